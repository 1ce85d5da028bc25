//! Error types and error handling for the dyngrid adapter.
//!
//! Setup problems (`ConfigError`) surface while the adapter is being
//! built. Store, transform and render failures surface per request and
//! abort that request; nothing is retried here.

use thiserror::Error;

/// Result type alias for dyngrid operations
pub type Result<T> = std::result::Result<T, GridError>;

/// Main error type for the grid adapter
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown column '{column}': have you set the columns first?")]
    UnknownColumn { column: String, known: Vec<String> },

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Transform for column '{column}' failed: {message}")]
    TransformFailed { column: String, message: String },

    #[error("Render failed: {0}")]
    RenderFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl GridError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error comes from adapter setup
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GridError::ConfigError(_) | GridError::UnknownColumn { .. } | GridError::TomlError(_)
        )
    }

    /// Check if this error comes from the backing store
    pub fn is_store(&self) -> bool {
        matches!(self, GridError::StoreError(_))
    }

    /// Check if a required collaborator was missing
    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, GridError::ServiceUnavailable(_))
    }
}
