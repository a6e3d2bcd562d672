// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible chat-completions endpoints.
//!
//! Handles bearer authentication, request construction, and a single retry
//! on transient statuses (429, 500, 503).

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, warn};

use aide_core::AideError;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl ChatClient {
    /// Creates a client for `base_url` (up to and including the version segment).
    pub fn new(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self, AideError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| AideError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| AideError::collaborator_with(format!("failed to build HTTP client: {e}"), e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
            retry_delay: Duration::from_secs(1),
        })
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Overrides the pause before a retry.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends one completion request, retrying once on a transient status.
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AideError> {
        let url = self.endpoint();
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(self.retry_delay).await;
            }

            let response = self
                .client
                .post(&url)
                .json(request)
                .send()
                .await
                .map_err(|e| AideError::collaborator_with(format!("HTTP request failed: {e}"), e))?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| {
                    AideError::collaborator_with(format!("failed to read response body: {e}"), e)
                })?;
                return serde_json::from_str(&body).map_err(|e| {
                    AideError::collaborator_with(format!("failed to parse API response: {e}"), e)
                });
            }

            let body = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(AideError::collaborator(format!(
                    "API returned {status}: {body}"
                )));
                continue;
            }

            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "text generation error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(AideError::collaborator(message));
        }

        Err(last_error
            .unwrap_or_else(|| AideError::collaborator("completion request failed after retries")))
    }
}

fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
