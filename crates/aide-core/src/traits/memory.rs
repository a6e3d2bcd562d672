// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Similarity-memory trait.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::AideError;
use crate::traits::collaborator::Collaborator;
use crate::types::MemoryHit;

/// Opaque similarity search over previously stored text.
#[async_trait]
pub trait MemoryStore: Collaborator {
    /// Stores `text` with metadata and returns the new entry id.
    async fn store(
        &self,
        text: &str,
        metadata: BTreeMap<String, String>,
    ) -> Result<String, AideError>;

    /// Returns at most `top_k` hits, best first.
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<MemoryHit>, AideError>;
}
