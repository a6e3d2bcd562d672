// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that all collaborators implement.

use async_trait::async_trait;

use crate::error::AideError;
use crate::types::{CollaboratorKind, HealthStatus};

/// Identity and health reporting shared by every collaborator.
#[async_trait]
pub trait Collaborator: Send + Sync + 'static {
    /// Returns the human-readable name of this collaborator instance.
    fn name(&self) -> &str;

    /// Returns the role this collaborator plays.
    fn kind(&self) -> CollaboratorKind;

    /// Performs a health check and returns the collaborator's current status.
    async fn health_check(&self) -> Result<HealthStatus, AideError> {
        Ok(HealthStatus::Healthy)
    }
}
