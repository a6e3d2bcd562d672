// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `aide serve` command implementation.

use tracing::{info, warn};

use aide_config::AideConfig;
use aide_core::AideError;
use aide_gateway::{start_server, AuthConfig, GatewayState};

use crate::wiring;

/// Runs the HTTP gateway until SIGINT or SIGTERM.
pub async fn run_serve(config: AideConfig) -> Result<(), AideError> {
    info!(agent = %config.agent.name, "starting aide serve");

    let wired = wiring::build(&config).await?;
    if config.gateway.bearer_token.is_none() {
        warn!("gateway.bearer_token is not set; the API is open to anyone who can reach it");
    }

    let state = GatewayState::new(
        wired.assistant,
        wired.staging,
        AuthConfig {
            bearer_token: config.gateway.bearer_token.clone(),
        },
    );
    start_server(&config.gateway, state, shutdown_signal()).await?;

    info!("aide serve shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
        _ = terminate => info!("received SIGTERM, initiating shutdown"),
    }
}
