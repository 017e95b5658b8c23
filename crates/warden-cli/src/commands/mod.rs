//! Command implementations.

pub mod check;
pub mod mode;
pub mod run;
pub mod tools;

use crate::terminal::TerminalGate;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use warden_core::{ApprovalMode, Config, ConfirmationGate, DenyAllGate, GuardedExecutor, RiskClassifier};
use warden_tools::LocalExecutor;

/// Typed error used to propagate deterministic process exit codes.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

/// Settings resolved from CLI flags over the saved config.
pub struct GuardSettings {
    pub mode: ApprovalMode,
    pub base_dir: PathBuf,
}

impl GuardSettings {
    pub fn resolve(
        mode: Option<ApprovalMode>,
        cwd: Option<PathBuf>,
        config: &Config,
    ) -> anyhow::Result<Self> {
        let base_dir = match cwd {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        Ok(Self {
            mode: mode.unwrap_or(config.approval_mode),
            base_dir,
        })
    }
}

/// Wire the local executor, the terminal gate and the configured catalog together.
pub fn build_guard(settings: &GuardSettings, config: &Config) -> anyhow::Result<GuardedExecutor> {
    let catalog = config
        .build_catalog()
        .map_err(|e| anyhow::anyhow!("Failed to load risk signatures: {e}"))?;

    let executor = LocalExecutor::new(&settings.base_dir).with_default_timeout(config.shell_timeout());

    // Without a terminal there is nobody to ask, so anything needing approval is declined.
    let gate: Arc<dyn ConfirmationGate> = if std::io::stdin().is_terminal() {
        Arc::new(TerminalGate)
    } else {
        tracing::debug!("stdin is not a terminal, confirmations will be declined");
        Arc::new(DenyAllGate)
    };

    let mut guard = GuardedExecutor::new(Arc::new(executor), gate, settings.mode)
        .with_classifier(RiskClassifier::new(catalog));
    if let Some(timeout) = config.confirm_timeout() {
        guard = guard.with_confirm_timeout(timeout);
    }
    Ok(guard)
}
