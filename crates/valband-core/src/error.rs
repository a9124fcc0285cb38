use thiserror::Error;

/// Validation and contract errors exposed by `valband-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("date must be a calendar date YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("peak window start {start} is after end {end}")]
    InvertedPeakWindow { start: String, end: String },

    #[error("timestamp must be a UTC date-time: '{value}'")]
    TimestampNotUtc { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("field '{field}' must be positive")]
    NonPositiveValue { field: &'static str },

    #[error("environment variable {key} has invalid value '{value}'")]
    InvalidEnvValue { key: &'static str, value: String },

    #[error("band multiple at position {index} must be finite")]
    NonFiniteMultiple { index: usize },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Failures while assembling a ratio series from retrieved inputs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RatioError {
    #[error("no index close could be matched with an aggregate observation")]
    EmptyJoin,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
