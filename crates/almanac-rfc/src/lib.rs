//! RFC 5545 (iCalendar) and RFC 6350 (vCard) record codecs.
//!
//! - [`rfc::text`]: escaping, folding, date and duration primitives
//! - [`rfc::validation`]: RFC value sets with lenient lookup
//! - [`rfc::ical`]: `VEVENT` / `VTODO` parser and generator
//! - [`rfc::vcard`]: contact parser and generator

pub mod error;
pub mod rfc;
