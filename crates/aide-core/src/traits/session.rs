// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session key-value persistence.

use async_trait::async_trait;

use crate::error::AideError;
use crate::traits::collaborator::Collaborator;
use crate::types::{SessionId, SessionState};

/// Stores [`SessionState`] keyed by [`SessionId`].
///
/// The same interface backs the in-memory store and the durable fallback, so
/// durability is a write-through policy rather than a separate code path.
#[async_trait]
pub trait SessionStore: Collaborator {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionState>, AideError>;

    async fn save(&self, id: &SessionId, state: &SessionState) -> Result<(), AideError>;

    async fn remove(&self, id: &SessionId) -> Result<(), AideError>;
}
