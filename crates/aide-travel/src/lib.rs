// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flight search over a Google-Flights-style HTTP API.
//!
//! One-way searches only. The request carries the resolved airport codes and
//! date along with the configured class, party size, and currency.

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, info};

use aide_config::model::TravelConfig;
use aide_core::types::{FlightOption, FlightQuery};
use aide_core::{AideError, Collaborator, CollaboratorKind, FlightSearch, HealthStatus};

use crate::types::SearchResponse;

const SEARCH_PATH: &str = "/api/v1/searchFlights";

/// RapidAPI-hosted flight search client.
#[derive(Debug, Clone)]
pub struct RapidApiFlights {
    client: reqwest::Client,
    base_url: String,
    travel_class: String,
    adults: u32,
    currency: String,
}

impl RapidApiFlights {
    /// Builds the adapter from the `travel` config section.
    ///
    /// Fails when no API key is configured.
    pub fn from_config(config: &TravelConfig) -> Result<Self, AideError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AideError::Config("travel.api_key is not set".into()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-rapidapi-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| AideError::Config(format!("invalid travel API key: {e}")))?,
        );
        headers.insert(
            "x-rapidapi-host",
            HeaderValue::from_str(&config.api_host)
                .map_err(|e| AideError::Config(format!("invalid travel API host: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AideError::collaborator_with(format!("failed to build HTTP client: {e}"), e))?;

        info!(base_url = %config.base_url, "flight search initialized");
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            travel_class: config.travel_class.clone(),
            adults: config.adults,
            currency: config.currency.clone(),
        })
    }

    fn search_url(&self, query: &FlightQuery) -> Result<reqwest::Url, AideError> {
        let outbound = query.date.format("%Y-%m-%d").to_string();
        let adults = self.adults.to_string();
        reqwest::Url::parse_with_params(
            &format!("{}{SEARCH_PATH}", self.base_url),
            [
                ("departure_id", query.origin_code.as_str()),
                ("arrival_id", query.destination_code.as_str()),
                ("outbound_date", outbound.as_str()),
                ("travel_class", self.travel_class.as_str()),
                ("adults", adults.as_str()),
                ("show_hidden", "1"),
                ("currency", self.currency.as_str()),
                ("language_code", "en-US"),
                ("country_code", "US"),
            ],
        )
        .map_err(|e| AideError::Config(format!("invalid travel base URL: {e}")))
    }
}

#[async_trait]
impl Collaborator for RapidApiFlights {
    fn name(&self) -> &str {
        "rapidapi-flights"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::Travel
    }

    async fn health_check(&self) -> Result<HealthStatus, AideError> {
        // Searches are metered; report healthy without probing.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl FlightSearch for RapidApiFlights {
    async fn search(&self, query: &FlightQuery) -> Result<Vec<FlightOption>, AideError> {
        let url = self.search_url(query)?;
        debug!(
            origin = %query.origin_code,
            destination = %query.destination_code,
            date = %query.date,
            "searching flights"
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AideError::collaborator_with(format!("API flight search failed: {e}"), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AideError::collaborator(format!(
                "API flight search failed: {status}: {body}"
            )));
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            AideError::collaborator_with(format!("API flight search failed: {e}"), e)
        })?;
        if !parsed.status {
            return Err(AideError::collaborator(format!(
                "API Error: {}",
                parsed.error_message()
            )));
        }

        let options: Vec<FlightOption> = parsed
            .itineraries()
            .into_iter()
            .map(|raw| raw.into_option(&self.currency))
            .collect();
        debug!(count = options.len(), "flight search complete");
        Ok(options)
    }
}
