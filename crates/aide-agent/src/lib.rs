// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn handling for the Aide assistant.
//!
//! The [`Assistant`] is the single entry point every surface (HTTP gateway,
//! interactive shell) drives. For each turn it:
//! - Serializes work per session
//! - Handles exit keywords and resets
//! - Classifies the text and executes the resulting action
//! - Renders the outcome and records both sides in history
//! - Releases uploads that no draft adopted

pub mod compose;
pub mod executor;
pub mod render;
pub mod session;
pub mod settings;

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use aide_core::types::{Speaker, Turn};
use aide_core::{
    ActionResult, AideError, Attachment, Clock, SessionId, SessionState, SessionStore,
};
use aide_router::{is_exit, Classifier};

pub use executor::{Collaborators, Executor};
pub use render::Renderer;
pub use session::{MemorySessionStore, WriteThroughStore};
pub use settings::AgentSettings;

/// Reply sent when a session is reset by an exit keyword.
pub const RESET_REPLY: &str = "Chat reset. Start a new conversation!";

/// One user turn.
#[derive(Debug, Clone)]
pub struct TurnInput {
    pub session_id: SessionId,
    pub text: String,
    /// Files uploaded with this turn, already staged.
    pub attachments: Vec<Attachment>,
}

/// The assistant's answer to a turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutput {
    pub reply: String,
    /// True when the turn ended the conversation.
    pub reset: bool,
    pub history: Vec<Turn>,
    pub status: SessionStatus,
}

/// Snapshot of a session for status queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStatus {
    pub has_draft: bool,
    pub has_email_selected: bool,
    pub draft: Option<DraftSummary>,
    pub selected_email: Option<SelectedEmail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftSummary {
    pub to: String,
    pub subject: String,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedEmail {
    pub sender: String,
    pub subject: String,
    pub id: String,
}

impl From<&SessionState> for SessionStatus {
    fn from(state: &SessionState) -> Self {
        SessionStatus {
            has_draft: state.has_draft(),
            has_email_selected: state.viewed.is_some(),
            draft: state.draft.as_ref().map(|d| DraftSummary {
                to: d.to.clone(),
                subject: d.subject.clone(),
                cc: d.cc.clone(),
                bcc: d.bcc.clone(),
            }),
            selected_email: state.viewed.as_ref().map(|v| SelectedEmail {
                sender: v.sender.clone(),
                subject: v.subject.clone(),
                id: v.id.clone(),
            }),
        }
    }
}

/// Coordinates classification, execution, rendering, and session persistence.
pub struct Assistant {
    classifier: Classifier,
    executor: Executor,
    renderer: Renderer,
    sessions: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    locks: DashMap<SessionId, Arc<tokio::sync::Mutex<()>>>,
}

impl Assistant {
    pub fn new(
        collaborators: Collaborators,
        sessions: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        settings: AgentSettings,
    ) -> Self {
        info!(
            agent_name = settings.agent_name.as_str(),
            zone = settings.zone_label.as_str(),
            "assistant initialized"
        );
        Self {
            classifier: settings.classifier(),
            renderer: Renderer::new(settings.offset, settings.zone_label.clone()),
            executor: Executor::new(collaborators, settings),
            sessions,
            clock,
            locks: DashMap::new(),
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Number of sessions with a live turn lock.
    pub fn tracked_sessions(&self) -> usize {
        self.locks.len()
    }

    fn lock_for(&self, id: &SessionId) -> Arc<tokio::sync::Mutex<()>> {
        self.locks.entry(id.clone()).or_default().clone()
    }

    /// Drops the turn lock of a reset session unless another turn is queued on it.
    fn forget_lock(&self, id: &SessionId, held: &Arc<tokio::sync::Mutex<()>>) {
        self.locks
            .remove_if(id, |_, lock| Arc::ptr_eq(lock, held) && Arc::strong_count(lock) <= 2);
    }

    async fn load(&self, id: &SessionId) -> Result<SessionState, AideError> {
        Ok(self.sessions.load(id).await?.unwrap_or_default())
    }

    /// Processes one turn to completion.
    ///
    /// Only an empty turn and session-store failures are errors. Everything
    /// else, including collaborator failures, comes back as a rendered reply.
    pub async fn handle_turn(&self, input: TurnInput) -> Result<TurnOutput, AideError> {
        let TurnInput {
            session_id,
            text,
            attachments,
        } = input;
        let text = text.trim().to_string();
        if text.is_empty() && attachments.is_empty() {
            return Err(AideError::ValidationFailed(
                "Empty message and no attachments".into(),
            ));
        }

        let lock = self.lock_for(&session_id);
        let _guard = lock.lock().await;
        let mut state = self.load(&session_id).await?;

        if is_exit(&text) {
            let mut released = state.reset();
            released.extend(attachments);
            self.executor.release_all(&released).await;
            self.sessions.save(&session_id, &state).await?;
            self.forget_lock(&session_id, &lock);
            info!(session_id = %session_id, released = released.len(), "session reset by exit keyword");
            return Ok(TurnOutput {
                reply: RESET_REPLY.to_string(),
                reset: true,
                history: state.history.clone(),
                status: SessionStatus::from(&state),
            });
        }

        state.push_turn(Speaker::User, user_entry(&text, &attachments));
        state.pending_attachments = attachments;

        let now = self.clock.now();
        let result = match self.classifier.classify(&text, &state, now) {
            Ok(request) => {
                debug!(session_id = %session_id, ?request, "classified turn");
                self.executor.execute(request, &mut state, now).await
            }
            Err(e) => Err(e),
        };
        let result = result.unwrap_or_else(|e| {
            warn!(session_id = %session_id, error = %e, kind = %e.kind(), "turn failed");
            ActionResult::failure(&e)
        });

        let reply = self.renderer.render(&result);
        state.push_turn(Speaker::Assistant, reply.clone());

        let pending = std::mem::take(&mut state.pending_attachments);
        let unadopted: Vec<Attachment> = pending
            .into_iter()
            .filter(|a| {
                state
                    .draft
                    .as_ref()
                    .is_none_or(|d| !d.attachments.contains(a))
            })
            .collect();
        self.executor.release_all(&unadopted).await;

        self.sessions.save(&session_id, &state).await?;
        Ok(TurnOutput {
            reply,
            reset: false,
            history: state.history.clone(),
            status: SessionStatus::from(&state),
        })
    }

    /// Clears a session, releasing any staged files it held.
    pub async fn reset(&self, id: &SessionId) -> Result<(), AideError> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;
        let mut state = self.load(id).await?;
        let released = state.reset();
        self.executor.release_all(&released).await;
        self.sessions.remove(id).await?;
        self.forget_lock(id, &lock);
        info!(session_id = %id, released = released.len(), "session reset");
        Ok(())
    }

    pub async fn history(&self, id: &SessionId) -> Result<Vec<Turn>, AideError> {
        Ok(self.load(id).await?.history)
    }

    pub async fn status(&self, id: &SessionId) -> Result<SessionStatus, AideError> {
        Ok(SessionStatus::from(&self.load(id).await?))
    }
}

/// History text for a user turn, noting uploaded files.
fn user_entry(text: &str, attachments: &[Attachment]) -> String {
    if attachments.is_empty() {
        return text.to_string();
    }
    let names: Vec<&str> = attachments.iter().map(|a| a.name.as_str()).collect();
    format!(
        "{text} [📎 {} files: {}]",
        attachments.len(),
        names.join(", ")
    )
}
