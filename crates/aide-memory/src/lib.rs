// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Similarity memory for freeform chat.
//!
//! Texts are embedded as hashed bag-of-words vectors and ranked by cosine
//! similarity. Everything lives in process memory; restarts start empty.

pub mod embedder;
pub mod store;

pub use embedder::{cosine_similarity, HashingEmbedder};
pub use store::SimilarityMemory;
