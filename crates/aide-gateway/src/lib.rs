// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Aide assistant.
//!
//! Exposes turn handling, session reset, history, and status over JSON, and
//! stages uploaded attachments on disk for the lifetime of a draft.

pub mod auth;
pub mod handlers;
pub mod server;
pub mod staging;

pub use auth::AuthConfig;
pub use server::{router, start_server, GatewayState};
pub use staging::{TempDirStaging, UploadedFile};
