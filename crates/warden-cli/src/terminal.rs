//! Interactive confirmation on the controlling terminal.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use warden_core::confirm::parse_answer;
use warden_core::{ConfirmError, ConfirmationGate, ConfirmationPrompt};

/// Asks on stderr, reads the answer from stdin. Ctrl-C while waiting declines.
pub struct TerminalGate;

#[async_trait]
impl ConfirmationGate for TerminalGate {
    async fn confirm(&self, prompt: &ConfirmationPrompt) -> Result<bool, ConfirmError> {
        let mut input = BufReader::new(tokio::io::stdin());
        let mut output = tokio::io::stderr();
        tokio::select! {
            answer = ask(prompt, &mut input, &mut output) => answer,
            _ = tokio::signal::ctrl_c() => {
                let _ = tokio::io::stderr().write_all(b"\n").await;
                Err(ConfirmError::Cancelled)
            }
        }
    }
}

async fn ask<R, W>(
    prompt: &ConfirmationPrompt,
    input: &mut R,
    output: &mut W,
) -> Result<bool, ConfirmError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let text = format!(
        "\n!! Confirmation required\n  Action: {}\n  Detail: {}\n  Continue? [y/N] ",
        prompt.description, prompt.detail
    );
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;

    let mut line = String::new();
    let read = input.read_line(&mut line).await?;
    // EOF: nobody is there to say yes
    if read == 0 {
        return Ok(false);
    }
    Ok(parse_answer(&line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> ConfirmationPrompt {
        ConfirmationPrompt {
            description: "Execute dangerous shell command".to_string(),
            detail: "rm -rf /tmp/build".to_string(),
        }
    }

    async fn answer(input: &str) -> (bool, String) {
        let mut reader = BufReader::new(input.as_bytes());
        let mut shown = Vec::new();
        let approved = ask(&prompt(), &mut reader, &mut shown).await.unwrap();
        (approved, String::from_utf8(shown).unwrap())
    }

    #[tokio::test]
    async fn test_yes_approves() {
        let (approved, shown) = answer("y\n").await;
        assert!(approved);
        assert!(shown.contains("Action: Execute dangerous shell command"));
        assert!(shown.contains("Detail: rm -rf /tmp/build"));
    }

    #[tokio::test]
    async fn test_bare_enter_declines() {
        assert!(!answer("\n").await.0);
    }

    #[tokio::test]
    async fn test_eof_declines() {
        assert!(!answer("").await.0);
    }

    #[tokio::test]
    async fn test_other_answer_declines() {
        assert!(!answer("nope\n").await.0);
    }
}
