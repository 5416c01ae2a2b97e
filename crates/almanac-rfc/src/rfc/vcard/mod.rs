//! vCard codec (RFC 6350).
//!
//! Reads vCard 3.0 and 4.0, writes 4.0.
//!
//! - [`core`]: contact record types
//! - [`parse`]: block parser producing contacts plus parse errors
//! - [`build`]: generator
//!
//! ## Usage
//!
//! ```
//! use almanac_rfc::rfc::vcard::{generate_vcard_file, parse_vcard_file};
//!
//! let input = "BEGIN:VCARD\r\nVERSION:4.0\r\nFN:John Doe\r\n\
//!              EMAIL;PREF=1:john@example.com\r\nEND:VCARD\r\n";
//! let parsed = parse_vcard_file(input);
//! assert_eq!(parsed.contacts[0].formatted_name, "John Doe");
//! assert!(parsed.contacts[0].emails[0].primary);
//!
//! let output = generate_vcard_file(&parsed.contacts);
//! assert!(output.contains("EMAIL;PREF=1:john@example.com\r\n"));
//! ```

pub mod build;
pub mod core;
pub mod parse;


pub use build::{generate_vcard_file, generate_vcard_file_at};
pub use core::{Email, Gender, Language, ParsedContact, Phone, PostalAddress, StructuredName};
pub use parse::{VCardParseResult, parse_vcard_file};
