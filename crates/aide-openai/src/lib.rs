// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible text generator for the Aide assistant.
//!
//! Implements [`TextGenerator`] against any `/chat/completions` endpoint.
//! The defaults target the Groq service.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use aide_config::model::GenerationConfig;
use aide_core::{AideError, Collaborator, CollaboratorKind, HealthStatus, TextGenerator};

use crate::client::ChatClient;
use crate::types::{ChatMessage, ChatRequest};

/// Environment variable consulted when the config carries no key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Chat-completions text generator.
pub struct OpenAiGenerator {
    client: ChatClient,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiGenerator {
    /// Creates a generator from the `generation` config section.
    ///
    /// API key resolution: `generation.api_key`, then `GROQ_API_KEY`.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, AideError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = ChatClient::new(
            &api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(model = %config.model, "text generator initialized");
        Ok(Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Replaces the HTTP client.
    pub fn with_client(mut self, client: ChatClient) -> Self {
        self.client = client;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(&self, system_prompt: &str, user_prompt: &str) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if !system_prompt.is_empty() {
            messages.push(ChatMessage::system(system_prompt));
        }
        messages.push(ChatMessage::user(user_prompt));
        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

fn resolve_api_key(config_key: &Option<String>) -> Result<String, AideError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            AideError::Config(format!(
                "text generation API key not found. Set generation.api_key in config or the {API_KEY_ENV} environment variable."
            ))
        })
}

#[async_trait]
impl Collaborator for OpenAiGenerator {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::TextGeneration
    }

    async fn health_check(&self) -> Result<HealthStatus, AideError> {
        // Probing the endpoint would spend tokens.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, AideError> {
        let request = self.request(system_prompt, user_prompt);
        let response = self.client.complete(&request).await?;
        if let Some(usage) = response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion usage"
            );
        }
        response
            .first_text()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AideError::collaborator("text generation returned no content"))
    }
}
