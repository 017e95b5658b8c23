//! Human confirmation of guarded actions.

use async_trait::async_trait;
use std::fmt;

/// What the operator is asked to approve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    /// Action label, e.g. "Write file".
    pub description: String,
    /// Truncated payload preview.
    pub detail: String,
}

impl fmt::Display for ConfirmationPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Action: {}", self.description)?;
        write!(f, "Detail: {}", self.detail)
    }
}

/// Why a confirmation produced no answer. The guard treats all of these as "no".
#[derive(Debug, thiserror::Error)]
pub enum ConfirmError {
    /// Interrupted by the operator (e.g. Ctrl-C)
    #[error("confirmation cancelled")]
    Cancelled,

    /// No answer within the configured confirmation timeout
    #[error("confirmation timed out")]
    TimedOut,

    /// Prompt could not be shown or read
    #[error("confirmation failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A yes/no prompt that blocks until the operator answers.
///
/// Implementations must fail safe: anything short of an explicit yes is
/// `Ok(false)` or an error, never `Ok(true)`.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    async fn confirm(&self, prompt: &ConfirmationPrompt) -> Result<bool, ConfirmError>;
}

/// Gate for non-interactive contexts: declines everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAllGate;

#[async_trait]
impl ConfirmationGate for DenyAllGate {
    async fn confirm(&self, prompt: &ConfirmationPrompt) -> Result<bool, ConfirmError> {
        tracing::debug!(action = %prompt.description, "no interactive approval handler, declining");
        Ok(false)
    }
}

/// Parse an operator answer. Only an explicit yes counts.
pub fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
