//! Integration tests for warden.
//!
//! These drive the real local executor through the guard inside a temp
//! directory, with a scripted operator in place of the terminal.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use warden_core::{
    ActionRequest, ApprovalMode, Config, ConfirmError, ConfirmationGate, ConfirmationPrompt,
    DenyAllGate, ExecutionOutcome, GuardedExecutor, RiskClassifier, SignatureConfig,
    REJECTION_MESSAGE,
};
use warden_tools::{Executor, LocalExecutor};

// -- Scripted operator --

struct Operator {
    answers: Mutex<VecDeque<bool>>,
    asked: Mutex<Vec<ConfirmationPrompt>>,
}

impl Operator {
    fn answering(answers: &[bool]) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            asked: Mutex::new(Vec::new()),
        })
    }

    fn times_asked(&self) -> usize {
        self.asked.lock().unwrap().len()
    }
}

#[async_trait]
impl ConfirmationGate for Operator {
    async fn confirm(&self, prompt: &ConfirmationPrompt) -> Result<bool, ConfirmError> {
        self.asked.lock().unwrap().push(prompt.clone());
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or(false))
    }
}

fn guarded(dir: &TempDir, mode: ApprovalMode, operator: Arc<Operator>) -> GuardedExecutor {
    GuardedExecutor::new(Arc::new(LocalExecutor::new(dir.path())), operator, mode)
}

// -- Integration tests --

#[tokio::test]
async fn test_declined_rm_leaves_files_in_place() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("build")).unwrap();
    std::fs::write(dir.path().join("build/out.o"), "obj").unwrap();
    let operator = Operator::answering(&[false]);
    let guard = guarded(&dir, ApprovalMode::Dangerous, operator.clone());

    let outcome = guard.execute(ActionRequest::shell("rm -rf build")).await.unwrap();

    assert!(outcome.is_rejected());
    assert_eq!(operator.times_asked(), 1);
    assert!(dir.path().join("build/out.o").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_benign_command_runs_directly() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("README.md"), "# hi").unwrap();
    let operator = Operator::answering(&[]);
    let guard = guarded(&dir, ApprovalMode::Dangerous, operator.clone());

    let outcome = guard.execute(ActionRequest::shell("ls -la")).await.unwrap();

    match outcome {
        ExecutionOutcome::Executed(result) => {
            assert!(!result.is_error);
            assert!(result.output.contains("README.md"));
        }
        other => panic!("expected executed, got {other:?}"),
    }
    assert_eq!(operator.times_asked(), 0);
}

#[tokio::test]
async fn test_always_mode_write_approved() {
    let dir = TempDir::new().unwrap();
    let operator = Operator::answering(&[true]);
    let guard = guarded(&dir, ApprovalMode::Always, operator.clone());

    let outcome = guard
        .execute(ActionRequest::write("notes.md", "hello"))
        .await
        .unwrap();

    assert!(!outcome.is_rejected());
    assert_eq!(operator.times_asked(), 1);
    let content = std::fs::read_to_string(dir.path().join("notes.md")).unwrap();
    assert_eq!(content, "hello");
}

#[tokio::test]
async fn test_always_mode_edit_declined_leaves_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
    let operator = Operator::answering(&[false]);
    let guard = guarded(&dir, ApprovalMode::Always, operator);

    let result = guard
        .edit_file("main.rs", "fn main() {}", "fn main() { panic!() }")
        .await
        .unwrap();

    assert!(result.is_error);
    assert_eq!(result.output, REJECTION_MESSAGE);
    let content = std::fs::read_to_string(dir.path().join("main.rs")).unwrap();
    assert_eq!(content, "fn main() {}");
}

#[cfg(unix)]
#[tokio::test]
async fn test_never_mode_runs_flagged_command_without_asking() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("stale.txt"), "x").unwrap();
    let operator = Operator::answering(&[]);
    let guard = guarded(&dir, ApprovalMode::Never, operator.clone());

    let outcome = guard.execute(ActionRequest::shell("rm -f stale.txt")).await.unwrap();

    assert!(!outcome.is_rejected());
    assert_eq!(operator.times_asked(), 0);
    assert!(!dir.path().join("stale.txt").exists());
}

#[tokio::test]
async fn test_deny_all_gate_fails_safe() {
    let dir = TempDir::new().unwrap();
    let guard = GuardedExecutor::new(
        Arc::new(LocalExecutor::new(dir.path())),
        Arc::new(DenyAllGate),
        ApprovalMode::Always,
    );

    let outcome = guard
        .execute(ActionRequest::write("blocked.txt", "nope"))
        .await
        .unwrap();

    assert!(outcome.is_rejected());
    assert!(!dir.path().join("blocked.txt").exists());
}

#[tokio::test]
async fn test_underlying_error_passes_through() {
    let dir = TempDir::new().unwrap();
    let operator = Operator::answering(&[]);
    let guard = guarded(&dir, ApprovalMode::Dangerous, operator);

    let result = guard
        .execute(ActionRequest::edit("missing.txt", "a", "b"))
        .await;

    assert!(matches!(result, Err(warden_tools::ToolError::ExecutionError(_))));
}

#[tokio::test]
async fn test_tool_call_from_model() {
    let dir = TempDir::new().unwrap();
    let operator = Operator::answering(&[]);
    let guard = guarded(&dir, ApprovalMode::Dangerous, operator.clone());

    let outcome = guard
        .run_tool_call(
            "write_file",
            serde_json::json!({"path": "src/lib.rs", "contents": "pub fn f() {}\n"}),
        )
        .await
        .unwrap();

    assert!(!outcome.is_rejected());
    assert_eq!(operator.times_asked(), 0);
    assert!(dir.path().join("src/lib.rs").exists());
}

#[tokio::test]
async fn test_configured_signature_gates_command() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        extra_signatures: vec![SignatureConfig {
            name: "npm-publish".to_string(),
            intent: "publishes a package".to_string(),
            pattern: r"\bnpm\s+publish\b".to_string(),
        }],
        ..Config::default()
    };
    let operator = Operator::answering(&[false]);
    let guard = guarded(&dir, ApprovalMode::Dangerous, operator.clone())
        .with_classifier(RiskClassifier::new(config.build_catalog().unwrap()));

    let outcome = guard.execute(ActionRequest::shell("npm publish")).await.unwrap();

    assert!(outcome.is_rejected());
    assert_eq!(operator.times_asked(), 1);
}
