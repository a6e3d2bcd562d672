// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock text generator for deterministic testing.
//!
//! `MockGenerator` implements `TextGenerator` with pre-configured responses,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use aide_core::{AideError, Collaborator, CollaboratorKind, TextGenerator};

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum Scripted {
    Reply(String),
    Fail(String),
}

/// A mock generator that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned. Every prompt pair is captured.
pub struct MockGenerator {
    responses: Arc<Mutex<VecDeque<Scripted>>>,
    prompts: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockGenerator {
    /// Create a new mock generator with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock generator pre-loaded with the given replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        let generator = Self::new();
        if let Ok(mut queue) = generator.responses.try_lock() {
            queue.extend(responses.into_iter().map(Scripted::Reply));
        }
        generator
    }

    /// Add a reply to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.responses
            .lock()
            .await
            .push_back(Scripted::Reply(text.into()));
    }

    /// Make the next call fail with `message`.
    pub async fn add_failure(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .await
            .push_back(Scripted::Fail(message.into()));
    }

    /// `(system, user)` prompt pairs received so far.
    pub async fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().await.clone()
    }

    async fn next(&self) -> Scripted {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Scripted::Reply("mock response".to_string()))
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Collaborator for MockGenerator {
    fn name(&self) -> &str {
        "mock-generator"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::TextGeneration
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AideError> {
        self.prompts
            .lock()
            .await
            .push((system_prompt.to_string(), user_prompt.to_string()));
        match self.next().await {
            Scripted::Reply(text) => Ok(text),
            Scripted::Fail(message) => Err(AideError::collaborator(message)),
        }
    }
}
