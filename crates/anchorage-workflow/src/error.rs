//! Error types for workflow lifecycle operations
//!
//! The taxonomy separates caller configuration mistakes (validation,
//! unparsable templates) from cluster API rejections (submission,
//! deletion) and absent delete targets (not found). The lifecycle never
//! retries; it classifies and returns.

use anchorage_crd::{CrdError, Phase};
use thiserror::Error;

/// Error type for workflow lifecycle operations
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Workflow type failed validation
    #[error("invalid workflow type: {0}")]
    Validation(#[from] CrdError),

    /// Workflow template body is not parsable YAML
    #[error("unparsable workflow template: {0}")]
    TemplateParse(#[from] serde_yaml::Error),

    /// A workflow with the same name already exists in the namespace
    #[error("workflow '{0}' already exists")]
    AlreadyExists(String),

    /// The cluster API rejected the create call
    #[error("workflow '{name}' submission rejected: {message}")]
    Submission { name: String, message: String },

    /// Workflow not found
    #[error("workflow not found: {0}")]
    NotFound(String),

    /// The cluster API rejected the delete call
    #[error("workflow '{name}' deletion rejected: {message}")]
    Deletion { name: String, message: String },

    /// Cluster client error
    #[error("cluster client error: {0}")]
    Client(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LifecycleError {
    /// Whether this error is a caller configuration mistake that cannot
    /// succeed on retry with the same input.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LifecycleError::Validation(_) | LifecycleError::TemplateParse(_)
        )
    }

    /// The addon-visible phase implied by this error as an install
    /// outcome. Every failure mode collapses to `Failed`; callers
    /// distinguish causes through the error itself.
    pub fn phase(&self) -> Phase {
        Phase::Failed
    }
}

/// Result type for workflow lifecycle operations
pub type Result<T> = std::result::Result<T, LifecycleError>;
