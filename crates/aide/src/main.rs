// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aide - a personal assistant for mail, calendar, travel, and chat.
//!
//! This is the binary entry point.

mod backends;
mod serve;
mod shell;
mod wiring;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use aide_agent::AgentSettings;
use aide_config::AideConfig;
use aide_core::{AideError, SessionState};

/// Aide - a personal assistant for mail, calendar, travel, and chat.
#[derive(Parser, Debug)]
#[command(name = "aide", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Launch an interactive REPL session.
    Shell {
        /// Resume this session id instead of starting a fresh one.
        #[arg(long)]
        session: Option<String>,
    },
    /// Print the action a line of text classifies to, as JSON.
    Parse {
        /// The text to classify.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Validate configuration and print the effective values.
    Config {
        /// Include secrets instead of redacting them.
        #[arg(long)]
        show_secrets: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => aide_config::load_and_validate_path(path),
        None => aide_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            aide_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => {
            init_tracing(&config.agent.log_level);
            serve::run_serve(config).await
        }
        Some(Commands::Shell { session }) => {
            // Keep the prompt readable: only warnings reach the terminal.
            init_tracing("warn");
            shell::run_shell(config, session).await
        }
        Some(Commands::Parse { text }) => run_parse(&config, &text.join(" ")),
        Some(Commands::Config { show_secrets }) => run_config(config, show_secrets),
        None => {
            println!("aide: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Classifies `text` against a fresh session and prints the request.
fn run_parse(config: &AideConfig, text: &str) -> Result<(), AideError> {
    let classifier = AgentSettings::from_config(config)?.classifier();
    let outcome = match classifier.classify(text, &SessionState::new(), chrono::Utc::now()) {
        Ok(request) => serde_json::to_value(&request),
        Err(e) => Ok(serde_json::json!({
            "error": e.to_string(),
            "kind": e.kind().to_string(),
        })),
    }
    .map_err(|e| AideError::Internal(e.to_string()))?;

    let pretty =
        serde_json::to_string_pretty(&outcome).map_err(|e| AideError::Internal(e.to_string()))?;
    println!("{pretty}");
    Ok(())
}

fn run_config(mut config: AideConfig, show_secrets: bool) -> Result<(), AideError> {
    if !show_secrets {
        redact(&mut config);
    }
    let rendered = toml::to_string_pretty(&config)
        .map_err(|e| AideError::Internal(format!("cannot render config: {e}")))?;
    println!("{rendered}");
    Ok(())
}

fn redact(config: &mut AideConfig) {
    for secret in [
        &mut config.generation.api_key,
        &mut config.travel.api_key,
        &mut config.gateway.bearer_token,
    ] {
        if secret.is_some() {
            *secret = Some("[redacted]".to_string());
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` wins when set. Output goes to stderr.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aide={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
