// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Smaller mocks: memory, flights, attachment staging, and a fixed clock.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use aide_core::types::{FlightOption, FlightQuery, MemoryHit};
use aide_core::{
    AideError, Attachment, AttachmentStaging, Clock, Collaborator, CollaboratorKind,
    FlightSearch, MemoryStore,
};

/// Memory that returns every stored text as a hit, newest first.
pub struct MockMemory {
    stored: Arc<Mutex<Vec<(String, BTreeMap<String, String>)>>>,
    fail: bool,
}

impl MockMemory {
    pub fn new() -> Self {
        Self {
            stored: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A memory whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub async fn stored(&self) -> Vec<(String, BTreeMap<String, String>)> {
        self.stored.lock().await.clone()
    }
}

impl Default for MockMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Collaborator for MockMemory {
    fn name(&self) -> &str {
        "mock-memory"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::Memory
    }
}

#[async_trait]
impl MemoryStore for MockMemory {
    async fn store(
        &self,
        text: &str,
        metadata: BTreeMap<String, String>,
    ) -> Result<String, AideError> {
        if self.fail {
            return Err(AideError::collaborator("memory offline"));
        }
        self.stored.lock().await.push((text.to_string(), metadata));
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn search(&self, _query: &str, top_k: usize) -> Result<Vec<MemoryHit>, AideError> {
        if self.fail {
            return Err(AideError::collaborator("memory offline"));
        }
        Ok(self
            .stored
            .lock()
            .await
            .iter()
            .rev()
            .take(top_k)
            .map(|(text, metadata)| MemoryHit {
                text: text.clone(),
                metadata: metadata.clone(),
                score: 1.0,
            })
            .collect())
    }
}

/// Flight search returning queued result sets.
pub struct MockFlights {
    results: Arc<Mutex<VecDeque<Vec<FlightOption>>>>,
    queries: Arc<Mutex<Vec<FlightQuery>>>,
}

impl MockFlights {
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(VecDeque::new())),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn add_results(&self, options: Vec<FlightOption>) {
        self.results.lock().await.push_back(options);
    }

    pub async fn queries(&self) -> Vec<FlightQuery> {
        self.queries.lock().await.clone()
    }
}

impl Default for MockFlights {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Collaborator for MockFlights {
    fn name(&self) -> &str {
        "mock-flights"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::Travel
    }
}

#[async_trait]
impl FlightSearch for MockFlights {
    async fn search(&self, query: &FlightQuery) -> Result<Vec<FlightOption>, AideError> {
        self.queries.lock().await.push(query.clone());
        Ok(self.results.lock().await.pop_front().unwrap_or_default())
    }
}

/// Staging that records which attachments were released.
pub struct RecordingStaging {
    released: Arc<Mutex<Vec<Attachment>>>,
}

impl RecordingStaging {
    pub fn new() -> Self {
        Self {
            released: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn released(&self) -> Vec<Attachment> {
        self.released.lock().await.clone()
    }
}

impl Default for RecordingStaging {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Collaborator for RecordingStaging {
    fn name(&self) -> &str {
        "recording-staging"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::Staging
    }
}

#[async_trait]
impl AttachmentStaging for RecordingStaging {
    async fn release(&self, attachment: &Attachment) -> Result<(), AideError> {
        self.released.lock().await.push(attachment.clone());
        Ok(())
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a staged attachment descriptor.
pub fn attachment(name: &str, size_bytes: u64) -> Attachment {
    Attachment {
        name: name.to_string(),
        media_type: "application/octet-stream".to_string(),
        size_bytes,
        storage_ref: format!("/staging/{name}"),
    }
}
