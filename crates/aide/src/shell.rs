// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `aide shell` command implementation.
//!
//! An interactive REPL over the same assistant the gateway serves. Replies
//! are HTML snippets; the shell flattens them to plain text for the terminal.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use aide_agent::TurnInput;
use aide_config::AideConfig;
use aide_core::{AideError, SessionId};
use tracing::warn;

use crate::wiring;

/// Wrap width for flattened replies.
const TEXT_WIDTH: usize = 100;

/// Runs the REPL until `/quit`, Ctrl+C, or Ctrl+D.
pub async fn run_shell(config: AideConfig, session: Option<String>) -> Result<(), AideError> {
    let wired = wiring::build(&config).await?;
    let session_id = SessionId(session.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()));

    let mut rl = DefaultEditor::new()
        .map_err(|e| AideError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "aide shell".bold().green());
    println!(
        "Type {} to leave, {} to start over, {} for draft state.\n",
        "/quit".yellow(),
        "/reset".yellow(),
        "/status".yellow()
    );

    let prompt = format!("{}> ", config.agent.name.green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match trimmed {
                    "/quit" | "/exit" => break,
                    "/reset" => {
                        wired.assistant.reset(&session_id).await?;
                        println!("{}", "session cleared".dimmed());
                        continue;
                    }
                    "/status" => {
                        let status = wired.assistant.status(&session_id).await?;
                        let json = serde_json::to_string_pretty(&status)
                            .map_err(|e| AideError::Internal(e.to_string()))?;
                        println!("{json}");
                        continue;
                    }
                    _ => {}
                }

                let input = TurnInput {
                    session_id: session_id.clone(),
                    text: trimmed.to_string(),
                    attachments: Vec::new(),
                };
                match wired.assistant.handle_turn(input).await {
                    Ok(output) => {
                        println!("{}\n", html_to_text(&output.reply));
                        if output.reset {
                            println!("{}", "(conversation reset)".dimmed());
                        }
                    }
                    Err(e) => eprintln!("{}: {e}", "error".red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

/// Flattens a reply snippet for the terminal.
///
/// A snippet html2text cannot render is shown as-is.
pub fn html_to_text(html: &str) -> String {
    match html2text::from_read(html.as_bytes(), TEXT_WIDTH) {
        Ok(text) => text.trim_end().to_string(),
        Err(e) => {
            warn!(error = %e, "reply could not be flattened");
            html.to_string()
        }
    }
}
