//! Executor capability and its result type.

use crate::error::ToolError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Result of one executor operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Output text.
    pub output: String,
    /// Optional metadata (e.g., exit code, bytes written).
    pub metadata: serde_json::Value,
    /// Whether the result represents an error.
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result.
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            metadata: serde_json::Value::Null,
            is_error: false,
        }
    }

    /// Create a successful result with metadata.
    pub fn success_with_metadata(output: impl Into<String>, metadata: serde_json::Value) -> Self {
        Self {
            output: output.into(),
            metadata,
            is_error: false,
        }
    }

    /// Create an error result.
    pub fn error(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            metadata: serde_json::Value::Null,
            is_error: true,
        }
    }
}

/// The side-effecting operations an agent may request.
///
/// Implementations perform the real work (spawning a shell, touching the
/// filesystem). Failures are reported either as `Err(ToolError)` or as a
/// `ToolResult` with `is_error` set, e.g. a command with a non-zero exit code.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run a shell command. `None` uses the executor's default timeout.
    async fn run_shell(
        &self,
        command: &str,
        timeout: Option<Duration>,
    ) -> Result<ToolResult, ToolError>;

    /// Create or overwrite a file with `contents`.
    async fn write_file(&self, path: &str, contents: &str) -> Result<ToolResult, ToolError>;

    /// Replace the single occurrence of `old_text` in a file with `new_text`.
    async fn edit_file(
        &self,
        path: &str,
        old_text: &str,
        new_text: &str,
    ) -> Result<ToolResult, ToolError>;
}

#[async_trait]
impl<E: Executor + ?Sized> Executor for Arc<E> {
    async fn run_shell(
        &self,
        command: &str,
        timeout: Option<Duration>,
    ) -> Result<ToolResult, ToolError> {
        (**self).run_shell(command, timeout).await
    }

    async fn write_file(&self, path: &str, contents: &str) -> Result<ToolResult, ToolError> {
        (**self).write_file(path, contents).await
    }

    async fn edit_file(
        &self,
        path: &str,
        old_text: &str,
        new_text: &str,
    ) -> Result<ToolResult, ToolError> {
        (**self).edit_file(path, old_text, new_text).await
    }
}

// Compile-time check: Executor must be object-safe
const _: () = {
    fn _assert_object_safe(_: &dyn Executor) {}
};
