// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Aide assistant.
//!
//! The first six variants are the domain taxonomy surfaced to users as a
//! `Failure` result. Their `Display` output is the human-readable reason.
//! The remaining variants cover infrastructure problems.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// The primary error type used across the classifier, executor, and collaborators.
#[derive(Debug, Error)]
pub enum AideError {
    /// A date or time phrase could not be turned into a timestamp.
    #[error("{0}")]
    DateUnresolved(String),

    /// A place name matched no airport code.
    #[error("{0}")]
    PlaceUnresolved(String),

    /// A record index or id did not resolve to a record.
    #[error("{0}")]
    RecordNotFound(String),

    /// A draft operation was requested with no draft in the session.
    ///
    /// The payload is the verb of the attempted operation, e.g. `send`.
    #[error("No email draft to {0}. Create a draft first.")]
    NoActiveDraft(String),

    /// Missing or malformed user input, such as an invalid address.
    #[error("{0}")]
    ValidationFailed(String),

    /// A downstream collaborator (mail, calendar, generation, memory, travel) failed.
    #[error("{message}")]
    Collaborator {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors (invalid TOML, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AideError {
    /// Shorthand for a collaborator failure without an underlying cause.
    pub fn collaborator(message: impl Into<String>) -> Self {
        AideError::Collaborator {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a collaborator failure wrapping a cause.
    pub fn collaborator_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AideError::Collaborator {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Machine-distinguishable kind of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            AideError::DateUnresolved(_) => FailureKind::DateUnresolved,
            AideError::PlaceUnresolved(_) => FailureKind::PlaceUnresolved,
            AideError::RecordNotFound(_) => FailureKind::RecordNotFound,
            AideError::NoActiveDraft(_) => FailureKind::NoActiveDraft,
            AideError::ValidationFailed(_) => FailureKind::ValidationFailed,
            AideError::Collaborator { .. } => FailureKind::CollaboratorFailure,
            AideError::Config(_) | AideError::Storage { .. } | AideError::Internal(_) => {
                FailureKind::Internal
            }
        }
    }
}

/// Kind tag carried by a `Failure` result.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    DateUnresolved,
    PlaceUnresolved,
    RecordNotFound,
    NoActiveDraft,
    ValidationFailed,
    CollaboratorFailure,
    Internal,
}
