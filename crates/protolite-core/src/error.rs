//! Error types for structural operations.

use thiserror::Error;

/// Errors that can occur while cloning, diffing, or reshaping values.
#[derive(Error, Debug)]
pub enum ProtoError {
    /// Input nested deeper than the configured limit.
    #[error("Nesting depth exceeded the limit of {limit}")]
    DepthExceeded { limit: usize },

    /// Input that cannot be represented by the requested operation, such
    /// as a parent chain that loops back onto itself.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A JSON string could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression source failed to compile.
    #[error("Invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    /// A callable value reported a failure.
    #[error("Call failed: {0}")]
    Call(String),
}

/// Convenience alias used throughout protolite-core.
pub type Result<T> = std::result::Result<T, ProtoError>;
