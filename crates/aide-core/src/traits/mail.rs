// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mail store trait.

use async_trait::async_trait;

use crate::error::AideError;
use crate::traits::collaborator::Collaborator;
use crate::types::{Category, MailRecord, OutgoingMail, SendReceipt};

/// Reads and sends mail on behalf of the user.
#[async_trait]
pub trait MailStore: Collaborator {
    /// Lists the newest `count` records in `category`, newest first.
    async fn list_by_category(
        &self,
        count: usize,
        category: Category,
    ) -> Result<Vec<MailRecord>, AideError>;

    /// Fetches one record by origin-system id.
    async fn get_by_id(&self, id: &str) -> Result<MailRecord, AideError>;

    /// Sends a message and returns the origin-system message id.
    async fn send(&self, mail: OutgoingMail) -> Result<SendReceipt, AideError>;
}
