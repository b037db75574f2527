//! Line-oriented refinement loop behind `casewright chat`.
//!
//! The session must already hold a generated table. Each input line is a
//! refinement request; the revised table is written back after every turn.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{RefinementSession, RuntimeBundle};

pub const QUIT_COMMAND: &str = "/quit";
pub const PROMPT: &str = "> ";
const CREDENTIAL_CLEARED_NOTICE: &str =
    "the API key was rejected and has been cleared; restart with a valid key\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatExit {
    Quit,
    EndOfInput,
    CredentialRejected,
}

pub async fn run_chat<R, W>(
    session: &mut RefinementSession,
    runtime: &RuntimeBundle,
    input: R,
    mut output: W,
) -> io::Result<ChatExit>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            return Ok(ChatExit::EndOfInput);
        };
        let request = line.trim();
        if request.is_empty() {
            continue;
        }
        if request.eq_ignore_ascii_case(QUIT_COMMAND) {
            return Ok(ChatExit::Quit);
        }

        match session.refine(request).await {
            Ok(table) => {
                output.write_all(table.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            Err(error) => {
                tracing::warn!(error = %error, "refinement failed");
                output
                    .write_all(format!("error: {error}\n").as_bytes())
                    .await?;
                if runtime.handle_failure(&error) {
                    output.write_all(CREDENTIAL_CLEARED_NOTICE.as_bytes()).await?;
                    output.flush().await?;
                    return Ok(ChatExit::CredentialRejected);
                }
            }
        }
    }
}
