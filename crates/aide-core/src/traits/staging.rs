// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attachment staging trait.

use async_trait::async_trait;

use crate::error::AideError;
use crate::traits::collaborator::Collaborator;
use crate::types::Attachment;

/// Owns the scoped store behind uploaded attachments.
///
/// Uploads happen outside the core; the core only releases what it no longer needs.
#[async_trait]
pub trait AttachmentStaging: Collaborator {
    /// Releases the bytes behind `attachment`. Releasing twice is not an error.
    async fn release(&self, attachment: &Attachment) -> Result<(), AideError>;
}
