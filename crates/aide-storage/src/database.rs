// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and migrations.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::{Path, PathBuf};

use tracing::debug;

use aide_core::AideError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Convert a tokio-rusqlite error into `AideError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> AideError {
    AideError::Storage {
        source: Box::new(e),
    }
}

fn storage_err<E>(e: E) -> AideError
where
    E: std::error::Error + Send + Sync + 'static,
{
    AideError::Storage {
        source: Box::new(e),
    }
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history` table.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), AideError> {
    embedded::migrations::runner().run(conn).map_err(storage_err)?;
    Ok(())
}

/// An open, migrated database.
pub struct Database {
    conn: tokio_rusqlite::Connection,
    path: PathBuf,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and applies migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AideError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(storage_err)?;
        }

        // Migrations run on a short-lived blocking connection before the
        // writer thread starts.
        let migrate_path = path.clone();
        tokio::task::spawn_blocking(move || -> Result<(), AideError> {
            let mut conn = rusqlite::Connection::open(&migrate_path).map_err(storage_err)?;
            conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")
                .map_err(storage_err)?;
            run_migrations(&mut conn)
        })
        .await
        .map_err(|e| AideError::Internal(format!("migration task failed: {e}")))??;

        let conn = tokio_rusqlite::Connection::open(&path)
            .await
            .map_err(storage_err)?;
        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path = %path.display(), "session database ready");
        Ok(Self { conn, path })
    }

    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checkpoints the WAL so the main file is self-contained.
    pub async fn checkpoint(&self) -> Result<(), AideError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
