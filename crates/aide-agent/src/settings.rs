// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime settings derived from [`AideConfig`].

use aide_config::AideConfig;
use aide_core::AideError;
use aide_resolve::{DateResolver, PlaceResolver};
use aide_router::{Classifier, MailDefaults};
use chrono::{FixedOffset, NaiveTime, Offset, Utc};

/// Flattened view of the configuration values the agent reads at runtime.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub agent_name: String,
    pub signer: String,
    pub offset: FixedOffset,
    pub zone_label: String,
    pub default_event_time: NaiveTime,
    pub mail: MailDefaults,
    pub range_scan: usize,
    pub translate_fetch: usize,
    pub list_max: usize,
    pub event_minutes: i64,
    pub lookup_window: usize,
    pub memory_top_k: usize,
    pub alias_threshold: u32,
    pub direct_threshold: u32,
}

impl AgentSettings {
    /// Builds settings from a validated configuration.
    pub fn from_config(config: &AideConfig) -> Result<Self, AideError> {
        let offset = config
            .locale
            .offset_seconds()
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                AideError::Config(format!("invalid locale.utc_offset '{}'", config.locale.utc_offset))
            })?;
        let default_event_time = config
            .locale
            .default_time()
            .and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0))
            .ok_or_else(|| {
                AideError::Config(format!(
                    "invalid locale.default_event_time '{}'",
                    config.locale.default_event_time
                ))
            })?;

        Ok(Self {
            agent_name: config.agent.name.clone(),
            signer: config.agent.signer.clone(),
            offset,
            zone_label: config.locale.zone_label.clone(),
            default_event_time,
            mail: MailDefaults {
                default_count: config.mail.default_count,
                max_count: config.mail.max_count,
                default_subject: config.mail.default_subject.clone(),
            },
            range_scan: config.mail.range_scan,
            translate_fetch: config.mail.translate_fetch,
            list_max: config.calendar.list_max,
            event_minutes: config.calendar.event_minutes,
            lookup_window: config.calendar.lookup_window,
            memory_top_k: config.memory.top_k,
            alias_threshold: config.travel.alias_threshold,
            direct_threshold: config.travel.direct_threshold,
        })
    }

    /// The classifier configured with these settings.
    pub fn classifier(&self) -> Classifier {
        let dates = DateResolver::new(self.offset).with_default_time(self.default_event_time);
        let places = PlaceResolver::new(self.alias_threshold, self.direct_threshold);
        Classifier::new(dates, places).with_mail_defaults(self.mail.clone())
    }
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            agent_name: "aide".to_string(),
            signer: "RMM".to_string(),
            offset: FixedOffset::east_opt(19_800).unwrap_or_else(|| Utc.fix()),
            zone_label: "IST".to_string(),
            default_event_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            mail: MailDefaults::default(),
            range_scan: 50,
            translate_fetch: 20,
            list_max: 5,
            event_minutes: 60,
            lookup_window: 50,
            memory_top_k: 5,
            alias_threshold: 90,
            direct_threshold: 85,
        }
    }
}
