//! vCard parsing (RFC 6350, with vCard 3.0 input tolerance).
//!
//! - `lexer`: unfolding and tokenizing
//! - `property`: property name dispatch
//! - `values`: typed property values
//! - `builder`: per-card accumulator
//! - `parser`: the block scanner

mod builder;
mod lexer;
mod parser;
mod property;
mod values;

pub use parser::{VCardParseResult, parse_vcard_file};
pub use values::unescape_value;
