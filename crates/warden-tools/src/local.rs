//! Executor backed by the local shell and filesystem.

use crate::error::ToolError;
use crate::path_guard;
use crate::shell;
use crate::traits::{Executor, ToolResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs operations directly on this machine, rooted at a base directory.
#[derive(Debug, Clone)]
pub struct LocalExecutor {
    base_dir: PathBuf,
    default_timeout: Duration,
    restrict_to_base_dir: bool,
}

impl LocalExecutor {
    /// Create an executor rooted at `base_dir`. File operations may not leave it.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            default_timeout: DEFAULT_TIMEOUT,
            restrict_to_base_dir: true,
        }
    }

    /// Timeout for shell commands that don't specify one.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Allow file operations outside the base directory.
    pub fn unrestricted(mut self) -> Self {
        self.restrict_to_base_dir = false;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    fn target_for_write(&self, path: &str) -> Result<PathBuf, ToolError> {
        if self.restrict_to_base_dir {
            path_guard::resolve_for_write(Path::new(path), &self.base_dir)
        } else {
            Ok(path_guard::join_base(Path::new(path), &self.base_dir))
        }
    }

    fn target_for_edit(&self, path: &str) -> Result<PathBuf, ToolError> {
        if self.restrict_to_base_dir {
            path_guard::resolve_existing(Path::new(path), &self.base_dir)
        } else {
            Ok(path_guard::join_base(Path::new(path), &self.base_dir))
        }
    }
}

#[async_trait]
impl Executor for LocalExecutor {
    async fn run_shell(
        &self,
        command: &str,
        timeout: Option<Duration>,
    ) -> Result<ToolResult, ToolError> {
        if command.trim().is_empty() {
            return Err(ToolError::InvalidParameters("command must not be empty".to_string()));
        }
        let timeout = timeout.unwrap_or(self.default_timeout);
        tracing::debug!(command, timeout_secs = timeout.as_secs(), "running shell command");

        let output = shell::run_shell_command(command, &self.base_dir, timeout).await?;
        Ok(shell::format_output(&output))
    }

    async fn write_file(&self, path: &str, contents: &str) -> Result<ToolResult, ToolError> {
        let target = self.target_for_write(path)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ToolError::ExecutionError(format!("Failed to create directories: {e}"))
            })?;
        }

        tokio::fs::write(&target, contents)
            .await
            .map_err(|e| ToolError::ExecutionError(format!("Failed to write file: {e}")))?;

        let bytes = contents.len();
        let lines = contents.lines().count();
        tracing::debug!(path = %target.display(), bytes, "wrote file");
        Ok(ToolResult::success_with_metadata(
            format!("Wrote {bytes} bytes ({lines} lines) to {path}"),
            serde_json::json!({"bytes": bytes, "lines": lines}),
        ))
    }

    async fn edit_file(
        &self,
        path: &str,
        old_text: &str,
        new_text: &str,
    ) -> Result<ToolResult, ToolError> {
        if old_text.is_empty() {
            return Err(ToolError::InvalidParameters("old_text must not be empty".to_string()));
        }
        let target = self.target_for_edit(path)?;

        let content = tokio::fs::read_to_string(&target)
            .await
            .map_err(|e| ToolError::ExecutionError(format!("Failed to read file: {e}")))?;

        match content.matches(old_text).count() {
            0 => {
                return Err(ToolError::ExecutionError(format!(
                    "old_text not found in {path}"
                )))
            }
            1 => {}
            count => {
                return Err(ToolError::ExecutionError(format!(
                    "old_text found {count} times in {path}; include more surrounding context \
                     so it matches exactly once"
                )))
            }
        }

        let updated = content.replacen(old_text, new_text, 1);
        tokio::fs::write(&target, &updated)
            .await
            .map_err(|e| ToolError::ExecutionError(format!("Failed to write file: {e}")))?;

        tracing::debug!(path = %target.display(), "edited file");
        Ok(ToolResult::success(format!("Edited {path}")))
    }
}
