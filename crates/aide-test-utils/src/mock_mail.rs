// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock mail store for deterministic testing.
//!
//! `MockMail` serves a fixed mailbox and captures every outgoing message.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use aide_core::types::{OutgoingMail, SendReceipt};
use aide_core::{
    AideError, Category, Collaborator, CollaboratorKind, MailRecord, MailStore,
};

/// A mock mailbox.
///
/// Listings return the first `count` records regardless of category. Sends
/// are captured and can be made to fail by queueing errors.
pub struct MockMail {
    records: Arc<Mutex<Vec<MailRecord>>>,
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
    send_failures: Arc<Mutex<VecDeque<String>>>,
    list_calls: Arc<Mutex<Vec<(usize, Category)>>>,
}

impl MockMail {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<MailRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            sent: Arc::new(Mutex::new(Vec::new())),
            send_failures: Arc::new(Mutex::new(VecDeque::new())),
            list_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make the next send fail with `message`.
    pub async fn fail_next_send(&self, message: impl Into<String>) {
        self.send_failures.lock().await.push_back(message.into());
    }

    /// All messages sent so far.
    pub async fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().await.clone()
    }

    /// `(count, category)` of every listing call.
    pub async fn list_calls(&self) -> Vec<(usize, Category)> {
        self.list_calls.lock().await.clone()
    }
}

impl Default for MockMail {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a record with predictable fields for index `i`.
pub fn sample_record(i: usize, date: &str) -> MailRecord {
    MailRecord {
        id: format!("msg-{i}"),
        sender: format!("sender{i}@example.com"),
        subject: format!("Subject {i}"),
        snippet: format!("Snippet for message {i}"),
        body: format!("Full body of message {i}"),
        date: date.to_string(),
    }
}

#[async_trait]
impl Collaborator for MockMail {
    fn name(&self) -> &str {
        "mock-mail"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::Mail
    }
}

#[async_trait]
impl MailStore for MockMail {
    async fn list_by_category(
        &self,
        count: usize,
        category: Category,
    ) -> Result<Vec<MailRecord>, AideError> {
        self.list_calls.lock().await.push((count, category));
        let records = self.records.lock().await;
        Ok(records.iter().take(count).cloned().collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<MailRecord, AideError> {
        self.records
            .lock()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AideError::RecordNotFound(format!("No email with id {id}.")))
    }

    async fn send(&self, mail: OutgoingMail) -> Result<SendReceipt, AideError> {
        if let Some(message) = self.send_failures.lock().await.pop_front() {
            return Err(AideError::collaborator(message));
        }
        let mut sent = self.sent.lock().await;
        sent.push(mail);
        Ok(SendReceipt {
            message_id: format!("mock-sent-{}", sent.len()),
        })
    }
}
