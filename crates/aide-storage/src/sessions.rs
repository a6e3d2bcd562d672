// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the SessionStore trait.

use async_trait::async_trait;
use rusqlite::params;
use tracing::debug;

use aide_config::model::StorageConfig;
use aide_core::{
    AideError, Collaborator, CollaboratorKind, HealthStatus, SessionId, SessionState,
    SessionStore,
};

use crate::database::{map_tr_err, Database};

/// Durable session store.
///
/// Each session is one row holding the JSON-encoded [`SessionState`].
pub struct SqliteSessionStore {
    db: Database,
}

impl SqliteSessionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Opens the database named by the storage configuration.
    pub async fn open(config: &StorageConfig) -> Result<Self, AideError> {
        Ok(Self::new(Database::open(&config.database_path).await?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Number of stored sessions that hold a pending draft.
    pub async fn count_with_drafts(&self) -> Result<usize, AideError> {
        self.db
            .connection()
            .call(|conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM sessions WHERE has_draft = 1",
                    [],
                    |row| row.get::<_, i64>(0),
                )
            })
            .await
            .map(|n| usize::try_from(n).unwrap_or(0))
            .map_err(map_tr_err)
    }
}

fn encode(state: &SessionState) -> Result<String, AideError> {
    serde_json::to_string(state).map_err(|e| AideError::Storage {
        source: Box::new(e),
    })
}

fn decode(raw: &str) -> Result<SessionState, AideError> {
    serde_json::from_str(raw).map_err(|e| AideError::Storage {
        source: Box::new(e),
    })
}

#[async_trait]
impl Collaborator for SqliteSessionStore {
    fn name(&self) -> &str {
        "sqlite-sessions"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::SessionStore
    }

    async fn health_check(&self) -> Result<HealthStatus, AideError> {
        self.db
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionState>, AideError> {
        let key = id.as_str().to_string();
        let raw: Option<String> = self
            .db
            .connection()
            .call(move |conn| {
                let result = conn.query_row(
                    "SELECT state FROM sessions WHERE id = ?1",
                    params![key],
                    |row| row.get(0),
                );
                match result {
                    Ok(state) => Ok(Some(state)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await
            .map_err(map_tr_err)?;
        raw.as_deref().map(decode).transpose()
    }

    async fn save(&self, id: &SessionId, state: &SessionState) -> Result<(), AideError> {
        let key = id.as_str().to_string();
        let encoded = encode(state)?;
        let has_draft = state.has_draft();
        let updated_at = chrono::Utc::now()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string();
        self.db
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO sessions (id, state, has_draft, updated_at)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(id) DO UPDATE SET
                        state = excluded.state,
                        has_draft = excluded.has_draft,
                        updated_at = excluded.updated_at",
                    params![key, encoded, has_draft, updated_at],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!(session_id = %id, has_draft, "session persisted");
        Ok(())
    }

    async fn remove(&self, id: &SessionId) -> Result<(), AideError> {
        let key = id.as_str().to_string();
        self.db
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute("DELETE FROM sessions WHERE id = ?1", params![key])?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}
