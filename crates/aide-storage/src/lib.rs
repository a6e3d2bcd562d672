// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for Aide session state.
//!
//! Provides WAL-mode SQLite storage with embedded migrations and a
//! single-writer concurrency model via `tokio-rusqlite`. Sessions are stored
//! whole so a pending draft survives a restart.

pub mod database;
pub mod sessions;

pub use database::Database;
pub use sessions::SqliteSessionStore;
