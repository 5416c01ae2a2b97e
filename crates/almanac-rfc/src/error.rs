use thiserror::Error;

/// RFC parsing and validation errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid recurrence rule: {0}")]
    InvalidRecurrence(String),

    #[error(transparent)]
    CoreError(#[from] almanac_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
