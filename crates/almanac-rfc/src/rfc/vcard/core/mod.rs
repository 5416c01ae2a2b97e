//! vCard record types (RFC 6350).

mod contact;
mod structured;

pub use contact::{Email, Language, ParsedContact, Phone};
pub use structured::{Gender, PostalAddress, StructuredName};
