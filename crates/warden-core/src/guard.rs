//! The guarded executor: classify, decide, confirm, then delegate or reject.

use crate::classify::{Risk, RiskClassifier};
use crate::confirm::{ConfirmError, ConfirmationGate, ConfirmationPrompt};
use crate::policy::{decide, ApprovalDecision, ApprovalMode};
use crate::request::ActionRequest;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use warden_tools::{Executor, ToolError, ToolResult};

/// Reason carried by [`ExecutionOutcome::Rejected`].
pub const REJECTION_REASON: &str = "Operation rejected by user.";

/// Text the agent loop sees for a rejected action. Callers match on it.
pub const REJECTION_MESSAGE: &str = "Error: Operation rejected by user.";

/// Result of one guarded request.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    /// The underlying executor ran; its result is passed through untouched.
    Executed(ToolResult),
    /// Blocked before any side effect.
    Rejected { reason: String },
}

impl ExecutionOutcome {
    fn rejected() -> Self {
        Self::Rejected {
            reason: REJECTION_REASON.to_string(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Flatten into the shape an unguarded executor would return.
    pub fn into_tool_result(self) -> ToolResult {
        match self {
            Self::Executed(result) => result,
            Self::Rejected { reason } => ToolResult::error(format!("Error: {reason}")),
        }
    }
}

/// Wraps an [`Executor`] with approval gating.
///
/// Classification and the policy decision are pure and run without locking.
/// Prompts are serialized: only one confirmation owns the terminal at a time.
pub struct GuardedExecutor {
    inner: Arc<dyn Executor>,
    gate: Arc<dyn ConfirmationGate>,
    mode: ApprovalMode,
    classifier: RiskClassifier,
    confirm_timeout: Option<Duration>,
    prompt_lock: Mutex<()>,
}

impl GuardedExecutor {
    /// Guard `inner` with the default catalog.
    pub fn new(
        inner: Arc<dyn Executor>,
        gate: Arc<dyn ConfirmationGate>,
        mode: ApprovalMode,
    ) -> Self {
        Self {
            inner,
            gate,
            mode,
            classifier: RiskClassifier::default(),
            confirm_timeout: None,
            prompt_lock: Mutex::new(()),
        }
    }

    pub fn with_classifier(mut self, classifier: RiskClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Treat a prompt left unanswered for `timeout` as declined.
    /// Without this, prompts wait indefinitely.
    pub fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = Some(timeout);
        self
    }

    pub fn mode(&self) -> ApprovalMode {
        self.mode
    }

    pub fn classifier(&self) -> &RiskClassifier {
        &self.classifier
    }

    /// Risk and decision for `action` under the configured mode, without
    /// prompting or executing. `never` skips classification.
    pub fn assess(&self, action: &ActionRequest) -> (Risk, ApprovalDecision) {
        let risk = match self.mode {
            ApprovalMode::Never => Risk::Benign,
            ApprovalMode::Always | ApprovalMode::Dangerous => self.classifier.classify(action),
        };
        (risk, decide(self.mode, action.kind(), risk))
    }

    /// Run `action` if the policy (and, when required, the operator) allows it.
    ///
    /// `Err` only ever comes from the underlying executor.
    pub async fn execute(&self, action: ActionRequest) -> Result<ExecutionOutcome, ToolError> {
        let kind = action.kind();
        let (risk, decision) = self.assess(&action);
        tracing::debug!(%kind, %risk, %decision, mode = %self.mode, "guard decision");

        if risk == Risk::Dangerous {
            if let Some(command) = action.command() {
                let signatures: Vec<&str> = self
                    .classifier
                    .catalog()
                    .matching(command)
                    .into_iter()
                    .map(|sig| sig.name())
                    .collect();
                tracing::warn!(command, signatures = ?signatures, "dangerous command requested");
            }
        }

        if decision == ApprovalDecision::RequireConfirmation {
            let prompt = ConfirmationPrompt {
                description: action.description(risk == Risk::Dangerous).to_string(),
                detail: action.detail(),
            };
            if !self.ask(&prompt).await {
                tracing::info!(%kind, detail = %prompt.detail, "action rejected");
                return Ok(ExecutionOutcome::rejected());
            }
        }

        let result = self.delegate(action).await?;
        Ok(ExecutionOutcome::Executed(result))
    }

    /// Parse a model tool call and run it through the guard.
    pub async fn run_tool_call(
        &self,
        name: &str,
        args: serde_json::Value,
    ) -> Result<ExecutionOutcome, ToolError> {
        let action = ActionRequest::from_tool_call(name, args)
            .map_err(|e| ToolError::InvalidParameters(e.to_string()))?;
        self.execute(action).await
    }

    async fn ask(&self, prompt: &ConfirmationPrompt) -> bool {
        let _terminal = self.prompt_lock.lock().await;

        let answer = match self.confirm_timeout {
            Some(limit) => tokio::time::timeout(limit, self.gate.confirm(prompt))
                .await
                .unwrap_or(Err(ConfirmError::TimedOut)),
            None => self.gate.confirm(prompt).await,
        };

        match answer {
            Ok(approved) => approved,
            Err(e) => {
                tracing::info!(error = %e, "no confirmation obtained, declining");
                false
            }
        }
    }

    async fn delegate(&self, action: ActionRequest) -> Result<ToolResult, ToolError> {
        match action {
            ActionRequest::ShellExec { command, timeout } => {
                self.inner.run_shell(&command, timeout).await
            }
            ActionRequest::FileWrite { path, contents } => {
                self.inner.write_file(&path, &contents).await
            }
            ActionRequest::FileEdit {
                path,
                old_text,
                new_text,
            } => self.inner.edit_file(&path, &old_text, &new_text).await,
        }
    }
}

/// A guarded executor can stand in wherever an unguarded one is used.
/// Rejections surface as an error result carrying [`REJECTION_MESSAGE`].
#[async_trait]
impl Executor for GuardedExecutor {
    async fn run_shell(
        &self,
        command: &str,
        timeout: Option<Duration>,
    ) -> Result<ToolResult, ToolError> {
        let action = ActionRequest::ShellExec {
            command: command.to_string(),
            timeout,
        };
        Ok(self.execute(action).await?.into_tool_result())
    }

    async fn write_file(&self, path: &str, contents: &str) -> Result<ToolResult, ToolError> {
        let action = ActionRequest::write(path, contents);
        Ok(self.execute(action).await?.into_tool_result())
    }

    async fn edit_file(
        &self,
        path: &str,
        old_text: &str,
        new_text: &str,
    ) -> Result<ToolResult, ToolError> {
        let action = ActionRequest::edit(path, old_text, new_text);
        Ok(self.execute(action).await?.into_tool_result())
    }
}
