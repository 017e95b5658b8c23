//! Shell command runner.

use crate::error::ToolError;
use crate::traits::ToolResult;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

const MAX_OUTPUT_BYTES: usize = 50 * 1024; // 50KB

/// Raw output of a finished shell command.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    /// Child process stdout.
    pub stdout: Vec<u8>,
    /// Child process stderr.
    pub stderr: Vec<u8>,
    /// Child process exit code. -1 when unavailable.
    pub exit_code: i32,
    /// Whether process exited with success status.
    pub success: bool,
}

/// Run `command` through the platform shell in `cwd`, killing it after `timeout`.
pub async fn run_shell_command(
    command: &str,
    cwd: &Path,
    timeout: Duration,
) -> Result<ShellOutput, ToolError> {
    let (shell, flag) = shell_and_flag();
    let mut cmd = Command::new(shell);
    cmd.arg(flag).arg(command).current_dir(cwd).kill_on_drop(true);

    let output = tokio::time::timeout(timeout, cmd.output())
        .await
        .map_err(|_| ToolError::Timeout(format!("Command timed out after {}s", timeout.as_secs())))?
        .map_err(|e| ToolError::ExecutionError(format!("Failed to execute command: {e}")))?;

    Ok(ShellOutput {
        stdout: output.stdout,
        stderr: output.stderr,
        exit_code: output.status.code().unwrap_or(-1),
        success: output.status.success(),
    })
}

/// Render shell output the way the agent sees it.
pub fn format_output(output: &ShellOutput) -> ToolResult {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let mut text = String::new();
    if !stdout.is_empty() {
        text.push_str(&stdout);
    }
    if !stderr.is_empty() {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str("STDERR:\n");
        text.push_str(&stderr);
    }

    if text.len() > MAX_OUTPUT_BYTES {
        let mut cut = MAX_OUTPUT_BYTES;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("\n\n... (truncated at 50KB)");
    }

    if text.is_empty() {
        text = "(no output)".to_string();
    }

    let is_error = !output.success;
    if is_error {
        text = format!("Exit code: {}\n{text}", output.exit_code);
    }

    ToolResult {
        output: text,
        metadata: serde_json::json!({"exit_code": output.exit_code}),
        is_error,
    }
}

fn shell_and_flag() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("/bin/bash", "-lc")
    }
}
