//! Interactive chat over stdin/stdout.
//!
//! Each input line is sent as a user message; the reply is printed as it
//! streams in. `/quit` or end of input leaves the loop.

use color_eyre::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::chat::{ChatSession, Notification};
use crate::client::ChatClient;
use crate::config::{ChatConfig, ENV_URL};
use crate::traits::HttpClient;

const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

/// Text of `current` that has not been printed yet.
///
/// The session reports the whole running reply on every update.
pub(crate) fn unprinted<'a>(current: &'a str, printed: usize) -> &'a str {
    current.get(printed..).unwrap_or("")
}

/// Send one line and print the reply incrementally.
pub async fn send_line<C, W>(
    session: &mut ChatSession,
    client: &ChatClient<C>,
    line: &str,
    out: &mut W,
) -> std::io::Result<Result<bool, Notification>>
where
    C: HttpClient,
    W: Write,
{
    let mut printed = 0;
    let mut write_result = Ok(());

    let outcome = session
        .send(client, line, |text| {
            if write_result.is_err() {
                return;
            }
            write_result = out
                .write_all(unprinted(text, printed).as_bytes())
                .and_then(|_| out.flush());
            printed = text.len();
        })
        .await;
    write_result?;

    match outcome {
        Ok(Some(_)) => {
            writeln!(out)?;
            Ok(Ok(true))
        }
        Ok(None) => Ok(Ok(false)),
        Err(notification) => {
            if printed > 0 {
                writeln!(out)?;
            }
            Ok(Err(notification))
        }
    }
}

/// Handle `expo-chat chat`.
pub async fn run_chat(config: ChatConfig) -> Result<()> {
    let client = ChatClient::new(config);
    let mut session = ChatSession::new(client.is_enabled());

    if let Some(greeting) = session.messages().first() {
        println!("{}\n", greeting.text);
    }
    if !client.is_enabled() {
        eprintln!(
            "{}",
            Notification::info(
                "Chat disabled",
                format!("Set {} to a chat completions endpoint.", ENV_URL)
            )
        );
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if QUIT_COMMANDS.contains(&input) {
            break;
        }

        if let Err(notification) = send_line(&mut session, &client, &line, &mut stdout).await? {
            eprintln!("{}", notification);
        }
    }

    tracing::debug!("Chat ended with {} messages", session.messages().len());
    Ok(())
}
