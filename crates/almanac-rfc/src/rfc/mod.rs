pub mod error;
pub mod ical;
pub mod options;
pub mod text;
pub mod validation;
pub mod vcard;

pub use error::{ParseError, ParseErrorKind};
pub use options::GeneratorOptions;
