//! Error types for bucket administration
//!
//! Every failure reported by the remote store is flattened into a single
//! `Service` variant carrying the operation and resource it concerned.
//! Errors are caught at the command boundary and converted into exit codes;
//! nothing here is retried.

/// Result type alias used throughout the workspace
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by bucket operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A failure reported by the remote object store (permission denied,
    /// not found, conflict, validation failure, throttling, network).
    #[error("{operation} on '{resource}': {message}")]
    Service {
        operation: &'static str,
        resource: String,
        message: String,
    },

    /// User input rejected before any remote call was issued
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Build a service error with operation and resource context
    pub fn service(
        operation: &'static str,
        resource: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Service {
            operation,
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// True when the remote store reported a missing resource
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Service { message, .. } => {
                message.contains("NoSuchBucket")
                    || message.contains("NotFound")
                    || message.contains("404")
            }
            Self::InvalidInput(_) => false,
        }
    }
}
