// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use aide_agent::{SessionStatus, TurnInput};
use aide_core::types::Turn;
use aide_core::{AideError, Attachment, AttachmentStaging, SessionId};

use crate::server::GatewayState;
use crate::staging::{TempDirStaging, UploadedFile};

/// Request body for POST /v1/turn.
#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    /// Session to continue. A new id is minted when absent.
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default, alias = "text")]
    pub message: String,
    #[serde(default)]
    pub attachments: Vec<UploadedFile>,
}

/// Response body for POST /v1/turn.
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub session_id: String,
    pub response: String,
    pub reset: bool,
    pub history: Vec<Turn>,
    pub status: SessionStatus,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<Turn>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(err: &AideError) -> Response {
    let status = match err {
        AideError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// POST /v1/turn
///
/// Stages uploads, runs one turn, and returns the reply with the updated
/// history and status.
pub async fn post_turn(State(state): State<GatewayState>, Json(body): Json<TurnRequest>) -> Response {
    if body.message.trim().is_empty() && body.attachments.is_empty() {
        return error_response(&AideError::ValidationFailed(
            "Empty message and no attachments".into(),
        ));
    }

    let session_id = SessionId(
        body.session_id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
    );

    let attachments = match state.staging.stage_all(&body.attachments).await {
        Ok(staged) => staged,
        Err(e) => return error_response(&e),
    };

    let input = TurnInput {
        session_id: session_id.clone(),
        text: body.message,
        attachments: attachments.clone(),
    };
    match state.assistant.handle_turn(input).await {
        Ok(output) => Json(TurnResponse {
            session_id: session_id.0,
            response: output.reply,
            reset: output.reset,
            history: output.history,
            status: output.status,
        })
        .into_response(),
        Err(e) => {
            release_uploads(&state.staging, &attachments).await;
            error_response(&e)
        }
    }
}

/// Removes uploads of a turn that never ran, logging what cannot be removed.
async fn release_uploads(staging: &TempDirStaging, attachments: &[Attachment]) {
    for attachment in attachments {
        if let Err(e) = staging.release(attachment).await {
            tracing::warn!(name = %attachment.name, error = %e, "failed to release staged upload");
        }
    }
}

/// POST /v1/sessions/{id}/reset
pub async fn post_reset(State(state): State<GatewayState>, Path(id): Path<String>) -> Response {
    match state.assistant.reset(&SessionId(id)).await {
        Ok(()) => Json(MessageResponse {
            message: "Chat reset successfully".into(),
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /v1/sessions/{id}/history
pub async fn get_history(State(state): State<GatewayState>, Path(id): Path<String>) -> Response {
    match state.assistant.history(&SessionId(id)).await {
        Ok(history) => Json(HistoryResponse { history }).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /v1/sessions/{id}/status
pub async fn get_status(State(state): State<GatewayState>, Path(id): Path<String>) -> Response {
    match state.assistant.status(&SessionId(id)).await {
        Ok(status) => Json(status).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /health (unauthenticated)
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_request_accepts_text_alias() {
        let req: TurnRequest =
            serde_json::from_str(r#"{"text": "show emails", "session_id": "s1"}"#).unwrap();
        assert_eq!(req.message, "show emails");
        assert!(req.attachments.is_empty());
    }

    #[test]
    fn turn_request_defaults() {
        let req: TurnRequest = serde_json::from_str("{}").unwrap();
        assert!(req.session_id.is_none());
        assert!(req.message.is_empty());
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn unremovable_uploads_are_logged() {
        let dir = tempfile::tempdir().unwrap();
        let stuck = dir.path().join("not-a-file");
        std::fs::create_dir(&stuck).unwrap();
        let staging = TempDirStaging::new(dir.path());
        let attachment = Attachment {
            name: "stuck.txt".into(),
            media_type: "text/plain".into(),
            size_bytes: 1,
            storage_ref: stuck.display().to_string(),
        };

        release_uploads(&staging, &[attachment]).await;
        assert!(logs_contain("failed to release staged upload"));
        assert!(stuck.exists());
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let resp = error_response(&AideError::ValidationFailed("nope".into()));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = error_response(&AideError::Internal("boom".into()));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
