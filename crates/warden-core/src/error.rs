//! Error types for the warden-core crate.

/// Core error type for building and configuring the guard.
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// Approval mode string was not one of always, dangerous, never
    #[error("Invalid approval mode '{0}': expected always, dangerous or never")]
    InvalidApprovalMode(String),

    /// Risk signature pattern failed to compile
    #[error("Invalid pattern for signature '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// Tool call could not be turned into an action request
    #[error("Invalid tool call: {0}")]
    InvalidToolCall(String),

    /// Configuration problem
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
