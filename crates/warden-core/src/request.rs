//! Action requests: one side-effecting operation an agent asked for.

use crate::error::GuardError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Longest payload preview shown to the operator, in characters.
pub const DETAIL_PREVIEW_CHARS: usize = 200;

/// Which kind of side effect a request performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    ShellExec,
    FileWrite,
    FileEdit,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [Self::ShellExec, Self::FileWrite, Self::FileEdit];

    /// Tool name the model uses to request this kind of action.
    pub fn tool_name(self) -> &'static str {
        match self {
            Self::ShellExec => "run_shell",
            Self::FileWrite => "write_file",
            Self::FileEdit => "edit_file",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ShellExec => "shell-exec",
            Self::FileWrite => "file-write",
            Self::FileEdit => "file-edit",
        })
    }
}

/// One attempted side-effecting operation.
///
/// Built by the tool layer for a single invocation and consumed by value by
/// [`GuardedExecutor::execute`](crate::GuardedExecutor::execute).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    ShellExec {
        command: String,
        timeout: Option<Duration>,
    },
    FileWrite {
        path: String,
        contents: String,
    },
    FileEdit {
        path: String,
        old_text: String,
        new_text: String,
    },
}

impl ActionRequest {
    pub fn shell(command: impl Into<String>) -> Self {
        Self::ShellExec {
            command: command.into(),
            timeout: None,
        }
    }

    pub fn shell_with_timeout(command: impl Into<String>, timeout: Duration) -> Self {
        Self::ShellExec {
            command: command.into(),
            timeout: Some(timeout),
        }
    }

    pub fn write(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self::FileWrite {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn edit(
        path: impl Into<String>,
        old_text: impl Into<String>,
        new_text: impl Into<String>,
    ) -> Self {
        Self::FileEdit {
            path: path.into(),
            old_text: old_text.into(),
            new_text: new_text.into(),
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::ShellExec { .. } => ActionKind::ShellExec,
            Self::FileWrite { .. } => ActionKind::FileWrite,
            Self::FileEdit { .. } => ActionKind::FileEdit,
        }
    }

    /// The shell command, for shell requests.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::ShellExec { command, .. } => Some(command),
            _ => None,
        }
    }

    /// Human-readable label for the confirmation prompt.
    pub fn description(&self, dangerous: bool) -> &'static str {
        match self {
            Self::ShellExec { .. } if dangerous => "Execute dangerous shell command",
            Self::ShellExec { .. } => "Execute shell command",
            Self::FileWrite { .. } => "Write file",
            Self::FileEdit { .. } => "Edit file",
        }
    }

    /// Payload preview for the confirmation prompt: the command for shell
    /// requests, the target path for file requests.
    pub fn detail(&self) -> String {
        let full = match self {
            Self::ShellExec { command, .. } => command.as_str(),
            Self::FileWrite { path, .. } | Self::FileEdit { path, .. } => path.as_str(),
        };
        truncate_preview(full, DETAIL_PREVIEW_CHARS)
    }

    /// Build a request from a model tool call.
    pub fn from_tool_call(name: &str, args: serde_json::Value) -> Result<Self, GuardError> {
        let invalid = |e: serde_json::Error| GuardError::InvalidToolCall(format!("{name}: {e}"));
        match name {
            "run_shell" => {
                let params: RunShellParams = serde_json::from_value(args).map_err(invalid)?;
                Ok(Self::ShellExec {
                    command: params.command,
                    timeout: params.timeout.map(Duration::from_secs),
                })
            }
            "write_file" => {
                let params: WriteFileParams = serde_json::from_value(args).map_err(invalid)?;
                Ok(Self::write(params.path, params.contents))
            }
            "edit_file" => {
                let params: EditFileParams = serde_json::from_value(args).map_err(invalid)?;
                Ok(Self::edit(params.path, params.old_text, params.new_text))
            }
            other => Err(GuardError::InvalidToolCall(format!(
                "unknown tool '{other}'. Available: run_shell, write_file, edit_file"
            ))),
        }
    }
}

fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct RunShellParams {
    /// Shell command to execute.
    pub command: String,
    /// Optional timeout in seconds. Default: 120.
    #[serde(default)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct WriteFileParams {
    /// File path to write (relative to the base directory).
    pub path: String,
    /// Full file contents.
    pub contents: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EditFileParams {
    /// File path to edit (relative to the base directory).
    pub path: String,
    /// Exact text to replace. Must occur exactly once.
    pub old_text: String,
    /// Replacement text.
    pub new_text: String,
}

/// Tool definitions for the provider API, one per action kind.
pub fn tool_definitions() -> Vec<serde_json::Value> {
    ActionKind::ALL
        .iter()
        .map(|kind| {
            let (description, schema) = match kind {
                ActionKind::ShellExec => (
                    "Execute a shell command and return stdout/stderr.",
                    schemars::schema_for!(RunShellParams),
                ),
                ActionKind::FileWrite => (
                    "Create or overwrite a file with the given contents.",
                    schemars::schema_for!(WriteFileParams),
                ),
                ActionKind::FileEdit => (
                    "Replace an exact, unique text fragment in a file.",
                    schemars::schema_for!(EditFileParams),
                ),
            };
            serde_json::json!({
                "name": kind.tool_name(),
                "description": description,
                "parameters": schema,
            })
        })
        .collect()
}
