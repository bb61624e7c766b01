//! Error types for CRD validation

use thiserror::Error;

/// Errors that can occur when validating CRD types
#[derive(Debug, Error)]
pub enum CrdError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Invalid field value
    #[error("invalid value for field '{field}': {message}")]
    InvalidFieldValue { field: String, message: String },

    /// Validation error
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for CRD operations
pub type Result<T> = std::result::Result<T, CrdError>;
