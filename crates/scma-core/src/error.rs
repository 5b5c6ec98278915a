//! Error types for SCMA Core.

use thiserror::Error;

/// Errors raised while constructing or parsing core values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("artefact name must not be empty")]
    EmptyName,

    #[error("artefact name {0:?} has leading or trailing whitespace")]
    UntrimmedName(String),

    #[error("artefact name {0:?} contains control characters")]
    ControlCharacters(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    #[error("invalid timestamp {value:?}: expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp { value: String },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
