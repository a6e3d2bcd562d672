// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Aide assistant.
//!
//! This crate provides the error taxonomy, the domain types exchanged between
//! the classifier, executor, and formatter, and the collaborator traits that
//! every backend implements.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{AideError, FailureKind};
pub use types::{
    ActionRequest, ActionResult, Attachment, Category, CollaboratorKind, Draft, HealthStatus,
    MailRecord, SessionId, SessionState, ViewedRecord,
};

// Re-export all collaborator traits at crate root.
pub use traits::{
    AttachmentStaging, CalendarStore, Clock, Collaborator, FlightSearch, MailStore, MemoryStore,
    SessionStore, SystemClock, TextGenerator,
};
