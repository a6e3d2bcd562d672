// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Aide configuration system.

use aide_config::diagnostic::{suggest_key, ConfigError};
use aide_config::model::AideConfig;
use aide_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use serial_test::serial;

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_aide_config() {
    let toml = r#"
[agent]
name = "helper"
log_level = "debug"
signer = "Priya"

[locale]
utc_offset = "+01:00"
zone_label = "CET"
default_event_time = "10:30"

[mail]
default_count = 3
max_count = 10
default_subject = "Hello"

[calendar]
event_minutes = 30

[travel]
api_key = "rk-123"
currency = "EUR"

[memory]
enabled = false
top_k = 2

[generation]
api_key = "gsk-123"
model = "llama-3.1-8b-instant"
temperature = 0.2

[storage]
durable = false
database_path = "/tmp/aide-test.db"

[gateway]
host = "0.0.0.0"
port = 8080
bearer_token = "secret"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "helper");
    assert_eq!(config.agent.signer, "Priya");
    assert_eq!(config.locale.offset_seconds(), Some(3600));
    assert_eq!(config.locale.default_time(), Some((10, 30)));
    assert_eq!(config.mail.default_count, 3);
    assert_eq!(config.mail.default_subject, "Hello");
    assert_eq!(config.calendar.event_minutes, 30);
    assert_eq!(config.travel.api_key.as_deref(), Some("rk-123"));
    assert_eq!(config.travel.currency, "EUR");
    assert!(!config.memory.enabled);
    assert_eq!(config.generation.model, "llama-3.1-8b-instant");
    assert!(!config.storage.durable);
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(config.gateway.bearer_token.as_deref(), Some("secret"));
}

/// Serialized defaults provide sensible values for all fields.
#[test]
fn serialized_defaults_are_sensible() {
    let config = AideConfig::default();

    assert_eq!(config.agent.name, "aide");
    assert_eq!(config.agent.signer, "RMM");
    assert_eq!(config.locale.utc_offset, "+05:30");
    assert_eq!(config.locale.zone_label, "IST");
    assert_eq!(config.mail.default_count, 5);
    assert_eq!(config.mail.max_count, 20);
    assert_eq!(config.mail.range_scan, 50);
    assert_eq!(config.mail.default_subject, "Message from AI Assistant");
    assert_eq!(config.calendar.event_minutes, 60);
    assert_eq!(config.travel.alias_threshold, 90);
    assert_eq!(config.travel.direct_threshold, 85);
    assert_eq!(config.generation.max_tokens, 400);
    assert!((config.generation.temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(config.generation.base_url, "https://api.groq.com/openai/v1");
    assert!(config.storage.durable);
    assert!(config.storage.database_path.ends_with("aide.db"));
    assert_eq!(config.gateway.port, 5000);
}

/// Unknown field in [mail] produces an UnknownField error.
#[test]
fn unknown_field_in_mail_produces_error() {
    let toml = r#"
[mail]
defualt_count = 3
"#;

    let err = load_config_from_str(toml).expect_err("unknown field should be rejected");
    assert!(format!("{err}").contains("defualt_count"));
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telegram]
bot_token = "x"
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("telegram"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// An env-style dotted override lands on the right key.
#[test]
fn dotted_override_sets_nested_key() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: AideConfig = Figment::new()
        .merge(Serialized::defaults(AideConfig::default()))
        .merge(Toml::string("[generation]\nmodel = \"from-toml\"\n"))
        .merge(("generation.api_key", "gsk-env"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.generation.model, "from-toml");
    assert_eq!(config.generation.api_key.as_deref(), Some("gsk-env"));
}

/// `AIDE_GATEWAY_BEARER_TOKEN` maps to `gateway.bearer_token` through the real loader.
#[test]
#[serial]
fn env_var_overrides_file_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("aide.toml");
    std::fs::write(&path, "[gateway]\nbearer_token = \"from-file\"\n").expect("write");

    // SAFETY: serialized with the other env-mutating tests.
    unsafe { std::env::set_var("AIDE_GATEWAY_BEARER_TOKEN", "from-env") };
    let result = load_and_validate_path(&path);
    unsafe { std::env::remove_var("AIDE_GATEWAY_BEARER_TOKEN") };

    let config = result.expect("should load");
    assert_eq!(config.gateway.bearer_token.as_deref(), Some("from-env"));
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
#[serial]
fn missing_config_file_uses_defaults() {
    let config = load_and_validate_path(std::path::Path::new("/nonexistent/aide.toml"))
        .expect("missing file should be skipped");
    assert_eq!(config.agent.name, "aide");
}

#[test]
fn diagnostic_naem_suggests_name() {
    let suggestion = suggest_key("naem", &["name", "log_level", "signer"]);
    assert_eq!(suggestion, Some("name".to_string()));
}

/// Error output from load_and_validate_str names the key, suggestion, and valid keys.
#[test]
fn diagnostic_error_includes_unknown_key() {
    let toml = r#"
[agent]
naem = "test"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "naem"
                && suggestion.as_deref() == Some("name")
                && valid_keys.contains("signer")
        })
    });
    assert!(found, "expected UnknownKey for 'naem', got: {errors:?}");
}

/// A misspelled section is reported as a section with a suggestion.
#[test]
fn diagnostic_unknown_section_suggests_gateway() {
    let errors = load_and_validate_str("[gatway]\nport = 1\n").expect_err("should fail");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, section: None, suggestion, .. } if {
            key == "gatway" && suggestion.as_deref() == Some("gateway")
        })
    });
    assert!(found, "expected unknown section, got: {errors:?}");
}

/// Invalid type (string where number expected) produces clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[gateway]
port = "eighty"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. }) || e.to_string().contains("port")),
        "got: {errors:?}"
    );
}

/// ConfigError can be rendered using miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "signr".to_string(),
        suggestion: Some("signer".to_string()),
        section: Some("agent".to_string()),
        valid_keys: "name, log_level, signer".to_string(),
        from_env: false,
        span: None,
        src: None,
    };

    let help = error.help().expect("help text").to_string();
    assert!(help.contains("did you mean `signer`"));

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("signr"));
}

/// Validation failures surface through load_and_validate_str.
#[test]
fn validation_catches_bad_offset_and_count() {
    let toml = r#"
[locale]
utc_offset = "IST"

[mail]
default_count = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    assert!(messages.iter().any(|m| m.contains("utc_offset")), "{messages:?}");
    assert!(messages.iter().any(|m| m.contains("default_count")), "{messages:?}");
}

#[test]
fn load_and_validate_valid_toml() {
    let config = load_and_validate_str("[agent]\nname = \"test\"\n").expect("should validate");
    assert_eq!(config.agent.name, "test");
}
