// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cosine-ranked memory store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use aide_core::types::MemoryHit;
use aide_core::{AideError, Collaborator, CollaboratorKind, HealthStatus, MemoryStore};

use crate::embedder::{cosine_similarity, HashingEmbedder};

/// Hits scoring at or below this are dropped.
const MIN_SCORE: f32 = 0.05;

#[derive(Debug, Clone)]
struct Entry {
    id: String,
    text: String,
    metadata: BTreeMap<String, String>,
    embedding: Vec<f32>,
    created_at: DateTime<Utc>,
}

/// In-process similarity memory.
///
/// Search is a linear scan; ties are broken newest first.
pub struct SimilarityMemory {
    embedder: HashingEmbedder,
    entries: RwLock<Vec<Entry>>,
    capacity: Option<usize>,
}

impl Default for SimilarityMemory {
    fn default() -> Self {
        Self::new(HashingEmbedder::default())
    }
}

impl SimilarityMemory {
    pub fn new(embedder: HashingEmbedder) -> Self {
        Self {
            embedder,
            entries: RwLock::new(Vec::new()),
            capacity: None,
        }
    }

    /// Caps the number of entries; the oldest are evicted first.
    pub fn with_capacity_limit(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity.max(1));
        self
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Removes the entry with `id`. Returns whether one existed.
    pub async fn forget(&self, id: &str) -> bool {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        entries.len() != before
    }
}

#[async_trait]
impl Collaborator for SimilarityMemory {
    fn name(&self) -> &str {
        "similarity-memory"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::Memory
    }

    async fn health_check(&self) -> Result<HealthStatus, AideError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl MemoryStore for SimilarityMemory {
    async fn store(
        &self,
        text: &str,
        metadata: BTreeMap<String, String>,
    ) -> Result<String, AideError> {
        let entry = Entry {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            metadata,
            embedding: self.embedder.embed(text),
            created_at: Utc::now(),
        };
        let id = entry.id.clone();

        let mut entries = self.entries.write().await;
        entries.push(entry);
        if let Some(cap) = self.capacity
            && entries.len() > cap
        {
            let excess = entries.len() - cap;
            entries.drain(..excess);
        }
        debug!(memory_id = %id, total = entries.len(), "memory stored");
        Ok(id)
    }

    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<MemoryHit>, AideError> {
        if top_k == 0 {
            return Ok(Vec::new());
        }
        let query_embedding = self.embedder.embed(query);
        let entries = self.entries.read().await;

        let mut scored: Vec<(f32, &Entry)> = entries
            .iter()
            .map(|e| (cosine_similarity(&query_embedding, &e.embedding), e))
            .filter(|(score, _)| *score > MIN_SCORE)
            .collect();
        scored.sort_by(|a, b| {
            b.0.total_cmp(&a.0)
                .then_with(|| b.1.created_at.cmp(&a.1.created_at))
        });
        scored.truncate(top_k);

        debug!(hits = scored.len(), "memory search complete");
        Ok(scored
            .into_iter()
            .map(|(score, e)| MemoryHit {
                text: e.text.clone(),
                metadata: e.metadata.clone(),
                score,
            })
            .collect())
    }
}
