//! Parse diagnostics collected by the record parsers.
//!
//! Parsers never abort on bad input. Every problem becomes a [`ParseError`]
//! in the result's `errors` list and parsing continues with the next line or
//! block.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A problem found while parsing a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Line number where the error occurred (1-based, 0 for the whole document).
    pub line: usize,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Creates the document-level error for input without any recognized block.
    #[must_use]
    pub fn no_records(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::NoRecords, 0, message)
    }

    /// Creates a missing property error.
    #[must_use]
    pub fn missing_property(line: usize, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::MissingProperty, line, message)
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(line: usize, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::InvalidValue, line, message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}: {}", self.kind, self.message)
        } else {
            write!(f, "line {}: {}: {}", self.line, self.kind, self.message)
        }
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// The document contains no block of the requested kind.
    NoRecords,
    /// A content line could not be split into name, parameters and value.
    MalformedLine,
    /// A block lacks a property it cannot do without.
    MissingProperty,
    /// A property value could not be interpreted (or was only partly usable).
    InvalidValue,
    /// A block was opened but never closed.
    UnterminatedBlock,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRecords => write!(f, "no records"),
            Self::MalformedLine => write!(f, "malformed line"),
            Self::MissingProperty => write!(f, "missing property"),
            Self::InvalidValue => write!(f, "invalid value"),
            Self::UnterminatedBlock => write!(f, "unterminated block"),
        }
    }
}
