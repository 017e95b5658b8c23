//! Error types for the warden-tools crate.

/// Errors that can occur while an executor runs an operation.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Invalid parameters passed to the executor
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Operation failed
    #[error("Execution error: {0}")]
    ExecutionError(String),

    /// Permission denied for operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Operation timed out
    #[error("Timeout: {0}")]
    Timeout(String),

    /// I/O error during execution
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
