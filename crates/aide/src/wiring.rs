// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the assistant and its collaborators from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use aide_agent::{AgentSettings, Assistant, Collaborators, WriteThroughStore};
use aide_config::AideConfig;
use aide_core::{
    AideError, FlightSearch, MemoryStore, SessionStore, SystemClock, TextGenerator,
};
use aide_gateway::TempDirStaging;
use aide_memory::SimilarityMemory;
use aide_openai::OpenAiGenerator;
use aide_storage::SqliteSessionStore;
use aide_travel::RapidApiFlights;

use crate::backends::Unconfigured;

/// A ready-to-run assistant plus the staging area its uploads live in.
pub struct Wired {
    pub assistant: Arc<Assistant>,
    pub staging: Arc<TempDirStaging>,
}

pub async fn build(config: &AideConfig) -> Result<Wired, AideError> {
    let settings = AgentSettings::from_config(config)?;
    let staging = Arc::new(TempDirStaging::from_config(
        config.gateway.staging_dir.as_deref(),
    )?);

    let collaborators = Collaborators {
        mail: Arc::new(Unconfigured::mail()),
        calendar: Arc::new(Unconfigured::calendar()),
        generator: generator(config),
        memory: memory(config),
        flights: flights(config),
        staging: staging.clone(),
    };

    let assistant = Assistant::new(
        collaborators,
        sessions(config).await?,
        Arc::new(SystemClock),
        settings,
    );
    Ok(Wired {
        assistant: Arc::new(assistant),
        staging,
    })
}

fn generator(config: &AideConfig) -> Arc<dyn TextGenerator> {
    match OpenAiGenerator::from_config(&config.generation) {
        Ok(generator) => Arc::new(generator),
        Err(e) => {
            warn!(error = %e, "text generation unavailable");
            Arc::new(Unconfigured::generator())
        }
    }
}

fn flights(config: &AideConfig) -> Arc<dyn FlightSearch> {
    if config.travel.api_key.is_none() {
        info!("flight search disabled: travel.api_key is not set");
        return Arc::new(Unconfigured::flights());
    }
    match RapidApiFlights::from_config(&config.travel) {
        Ok(flights) => Arc::new(flights),
        Err(e) => {
            warn!(error = %e, "flight search unavailable");
            Arc::new(Unconfigured::flights())
        }
    }
}

fn memory(config: &AideConfig) -> Option<Arc<dyn MemoryStore>> {
    if !config.memory.enabled {
        info!("similarity memory disabled by configuration");
        return None;
    }
    Some(Arc::new(SimilarityMemory::default()))
}

async fn sessions(config: &AideConfig) -> Result<Arc<dyn SessionStore>, AideError> {
    if !config.storage.durable {
        return Ok(Arc::new(WriteThroughStore::memory_only()));
    }
    let durable = SqliteSessionStore::open(&config.storage).await?;
    info!(path = %durable.database().path().display(), "durable sessions enabled");
    Ok(Arc::new(WriteThroughStore::new(Some(Arc::new(durable)))))
}
