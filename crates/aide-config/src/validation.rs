// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as offsets, clock times, bounded counts, and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::AideConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AideConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |key: &str, reason: String| errors.push(ConfigError::invalid(key, reason));

    if config.agent.name.trim().is_empty() {
        fail("agent.name", "must not be empty".into());
    }
    if config.agent.signer.trim().is_empty() {
        fail("agent.signer", "must not be empty".into());
    }
    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        fail(
            "agent.log_level",
            format!("`{}` is not a log level", config.agent.log_level),
        );
    }

    if config.locale.offset_seconds().is_none() {
        fail(
            "locale.utc_offset",
            format!("`{}` must look like +HH:MM", config.locale.utc_offset),
        );
    }
    if config.locale.default_time().is_none() {
        fail(
            "locale.default_event_time",
            format!("`{}` is not a 24-hour HH:MM time", config.locale.default_event_time),
        );
    }

    let mail = &config.mail;
    if mail.default_count == 0 || mail.max_count == 0 {
        fail(
            "mail.default_count",
            "mail.default_count and mail.max_count must be at least 1".into(),
        );
    } else if mail.default_count > mail.max_count {
        fail(
            "mail.default_count",
            format!(
                "{} must not exceed mail.max_count ({})",
                mail.default_count, mail.max_count
            ),
        );
    }
    if mail.range_scan == 0 {
        fail("mail.range_scan", "must be at least 1".into());
    }

    if config.calendar.event_minutes <= 0 {
        fail(
            "calendar.event_minutes",
            format!("must be positive, got {}", config.calendar.event_minutes),
        );
    }
    if config.calendar.list_max == 0 {
        fail("calendar.list_max", "must be at least 1".into());
    }

    for (key, value) in [
        ("travel.alias_threshold", config.travel.alias_threshold),
        ("travel.direct_threshold", config.travel.direct_threshold),
    ] {
        if value > 100 {
            fail(key, format!("got {value}"));
        }
    }
    if config.travel.adults == 0 {
        fail("travel.adults", "must be at least 1".into());
    }

    let generation = &config.generation;
    if generation.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
        fail("generation.api_key", "must not be blank".into());
    }
    if !(0.0..=2.0).contains(&generation.temperature) {
        fail(
            "generation.temperature",
            format!("got {}", generation.temperature),
        );
    }
    if generation.max_tokens == 0 {
        fail("generation.max_tokens", "must be at least 1".into());
    }

    if config.storage.durable && config.storage.database_path.trim().is_empty() {
        fail(
            "storage.database_path",
            "must not be empty when storage.durable is set".into(),
        );
    }

    if config.gateway.host.trim().is_empty() {
        fail("gateway.host", "must not be empty".into());
    }
    if let Some(token) = &config.gateway.bearer_token
        && (token.is_empty() || token.chars().any(char::is_whitespace))
    {
        fail(
            "gateway.bearer_token",
            "must be non-empty and contain no whitespace".into(),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &AideConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        let config = AideConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_offset_fails_validation() {
        let mut config = AideConfig::default();
        config.locale.utc_offset = "IST".to_string();
        assert!(messages(&config).iter().any(|m| m.contains("utc_offset")));
    }

    #[test]
    fn collects_every_problem() {
        let mut config = AideConfig::default();
        config.mail.default_count = 30;
        config.generation.temperature = 3.5;
        config.travel.alias_threshold = 120;
        let found = messages(&config);
        assert_eq!(found.len(), 3, "got: {found:?}");
    }

    #[test]
    fn secrets_must_be_usable_when_present() {
        let mut config = AideConfig::default();
        config.generation.api_key = Some("   ".into());
        config.gateway.bearer_token = Some("two words".into());
        let errors = validate_config(&config).unwrap_err();
        let keys: Vec<String> = errors
            .iter()
            .filter_map(|e| match e {
                ConfigError::InvalidValue { key, .. } => Some(key.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(keys, vec!["generation.api_key", "gateway.bearer_token"]);

        config.generation.api_key = None;
        config.gateway.bearer_token = Some("s3cret-token".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_only_matters_when_durable() {
        let mut config = AideConfig::default();
        config.storage.database_path = String::new();
        assert!(validate_config(&config).is_err());
        config.storage.durable = false;
        assert!(validate_config(&config).is_ok());
    }
}
