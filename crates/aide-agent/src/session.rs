// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session state stores.
//!
//! [`MemorySessionStore`] is the working copy every turn reads and writes.
//! [`WriteThroughStore`] layers an optional durable store underneath it so a
//! pending draft survives a restart. Durable failures are logged and never
//! fail the turn.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, warn};

use aide_core::{AideError, Collaborator, CollaboratorKind, SessionId, SessionState, SessionStore};

/// Process-local session map.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<SessionId, SessionState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently held.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl Collaborator for MemorySessionStore {
    fn name(&self) -> &str {
        "memory-sessions"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::SessionStore
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionState>, AideError> {
        Ok(self.sessions.get(id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, id: &SessionId, state: &SessionState) -> Result<(), AideError> {
        self.sessions.insert(id.clone(), state.clone());
        Ok(())
    }

    async fn remove(&self, id: &SessionId) -> Result<(), AideError> {
        self.sessions.remove(id);
        Ok(())
    }
}

/// In-memory store backed by an optional durable store.
///
/// Loads fall back to the durable copy when the session is not in memory.
/// Saves and removals go to both.
pub struct WriteThroughStore {
    memory: MemorySessionStore,
    durable: Option<Arc<dyn SessionStore>>,
}

impl WriteThroughStore {
    pub fn new(durable: Option<Arc<dyn SessionStore>>) -> Self {
        Self {
            memory: MemorySessionStore::new(),
            durable,
        }
    }

    /// A store with no durable layer.
    pub fn memory_only() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl Collaborator for WriteThroughStore {
    fn name(&self) -> &str {
        "write-through-sessions"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::SessionStore
    }
}

#[async_trait]
impl SessionStore for WriteThroughStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionState>, AideError> {
        if let Some(state) = self.memory.load(id).await? {
            return Ok(Some(state));
        }
        let Some(durable) = &self.durable else {
            return Ok(None);
        };
        match durable.load(id).await {
            Ok(Some(state)) => {
                debug!(session_id = %id, has_draft = state.has_draft(), "restored session from durable store");
                self.memory.save(id, &state).await?;
                Ok(Some(state))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                warn!(session_id = %id, error = %e, "durable session load failed");
                Ok(None)
            }
        }
    }

    async fn save(&self, id: &SessionId, state: &SessionState) -> Result<(), AideError> {
        self.memory.save(id, state).await?;
        if let Some(durable) = &self.durable
            && let Err(e) = durable.save(id, state).await
        {
            warn!(session_id = %id, error = %e, "durable session write failed");
        }
        Ok(())
    }

    async fn remove(&self, id: &SessionId) -> Result<(), AideError> {
        self.memory.remove(id).await?;
        if let Some(durable) = &self.durable
            && let Err(e) = durable.remove(id).await
        {
            warn!(session_id = %id, error = %e, "durable session removal failed");
        }
        Ok(())
    }
}
