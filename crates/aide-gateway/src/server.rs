// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use aide_agent::Assistant;
use aide_config::model::GatewayConfig;
use aide_core::AideError;

use crate::auth::{auth_middleware, AuthConfig};
use crate::handlers;
use crate::staging::TempDirStaging;

/// Largest accepted request body; base64 uploads inflate by a third.
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Requests processed at once across all sessions.
const MAX_IN_FLIGHT: usize = 64;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub assistant: Arc<Assistant>,
    pub staging: Arc<TempDirStaging>,
    pub auth: AuthConfig,
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(assistant: Arc<Assistant>, staging: Arc<TempDirStaging>, auth: AuthConfig) -> Self {
        Self {
            assistant,
            staging,
            auth,
            start_time: Instant::now(),
        }
    }
}

/// Builds the router:
/// - GET /health (public)
/// - POST /v1/turn
/// - POST /v1/sessions/{id}/reset
/// - GET /v1/sessions/{id}/history
/// - GET /v1/sessions/{id}/status
pub fn router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/v1/turn", post(handlers::post_turn))
        .route("/v1/sessions/{id}/reset", post(handlers::post_reset))
        .route("/v1/sessions/{id}/history", get(handlers::get_history))
        .route("/v1/sessions/{id}/status", get(handlers::get_status))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(ConcurrencyLimitLayer::new(MAX_IN_FLIGHT))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds the configured address and serves until `shutdown` resolves.
pub async fn start_server<F>(
    config: &GatewayConfig,
    state: GatewayState,
    shutdown: F,
) -> Result<(), AideError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AideError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!(addr = %addr, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AideError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("gateway stopped");
    Ok(())
}
