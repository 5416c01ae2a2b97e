//! vCard generation (RFC 6350).

mod serializer;

pub use serializer::{generate_vcard_file, generate_vcard_file_at};
