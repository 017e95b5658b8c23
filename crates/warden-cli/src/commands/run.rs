use super::ExitError;
use tokio::io::AsyncReadExt;
use warden_core::{ActionRequest, ExecutionOutcome, GuardedExecutor, REJECTION_MESSAGE};

/// Exit code for an action the operator declined.
pub const EXIT_REJECTED: i32 = 2;

/// Run one action through the guard and report the outcome.
///
/// Exit codes: 0 executed, 1 executed but the operation reported an error,
/// 2 rejected.
pub async fn run(guard: &GuardedExecutor, action: ActionRequest) -> anyhow::Result<()> {
    let outcome = guard
        .execute(action)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    match outcome {
        ExecutionOutcome::Executed(result) => {
            println!("{}", result.output);
            if result.is_error {
                return Err(anyhow::Error::new(ExitError {
                    code: 1,
                    message: String::new(),
                }));
            }
            Ok(())
        }
        ExecutionOutcome::Rejected { .. } => Err(anyhow::Error::new(ExitError {
            code: EXIT_REJECTED,
            message: REJECTION_MESSAGE.to_string(),
        })),
    }
}

/// Contents from the flag, or all of stdin.
pub async fn contents_or_stdin(contents: Option<String>) -> anyhow::Result<String> {
    match contents {
        Some(contents) => Ok(contents),
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            Ok(buf)
        }
    }
}
