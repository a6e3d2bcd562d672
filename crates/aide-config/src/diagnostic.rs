// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics.
//!
//! Figment failures and validation problems both end up as [`ConfigError`]s.
//! Unknown keys carry a "did you mean?" suggestion and, when the key came
//! from a TOML file, a span pointing at the offending line.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A problem with the assembled aide configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A section or key aide does not recognize.
    #[error("{}", unknown_message(.key, .section.as_deref()))]
    #[diagnostic(
        code(aide::config::unknown_key),
        help("{}", unknown_help(suggestion.as_deref(), valid_keys, *from_env))
    )]
    UnknownKey {
        key: String,
        /// Enclosing section; `None` for a top-level entry.
        section: Option<String>,
        suggestion: Option<String>,
        /// Comma-separated keys accepted at that level.
        valid_keys: String,
        /// Set when the key arrived through an `AIDE_*` variable.
        from_env: bool,
        #[label("not an aide setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong TOML type.
    #[error("`{key}` should be {expected}, found {found}")]
    #[diagnostic(code(aide::config::invalid_type), help("{}", value_hint(key)))]
    InvalidType {
        key: String,
        found: String,
        expected: String,
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A well-typed value outside what aide accepts.
    #[error("invalid `{key}`: {reason}")]
    #[diagnostic(code(aide::config::invalid_value), help("{}", value_hint(key)))]
    InvalidValue { key: String, reason: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(aide::config::other))]
    Other(String),
}

impl ConfigError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

fn unknown_message(key: &str, section: Option<&str>) -> String {
    match section {
        Some(section) => format!("unknown key `{key}` in [{section}]"),
        None => format!("unknown section `{key}`"),
    }
}

fn unknown_help(suggestion: Option<&str>, valid_keys: &str, from_env: bool) -> String {
    let mut help = match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    };
    if from_env {
        help.push_str("; environment overrides are spelled AIDE_<SECTION>_<KEY>");
    }
    help
}

/// What a well-formed value for `key` looks like.
fn value_hint(key: &str) -> String {
    let hint = match key {
        "agent.log_level" => "use one of trace, debug, info, warn, error",
        "locale.utc_offset" => "use a signed offset such as +05:30 or -04:00",
        "locale.default_event_time" => "use a 24-hour time such as 09:00",
        "generation.api_key" => {
            "remove the key to fall back to the GROQ_API_KEY environment variable"
        }
        "generation.temperature" => "sampling temperature runs from 0.0 to 2.0",
        "gateway.bearer_token" => "remove the token to leave /v1 open, or use one without spaces",
        "gateway.port" => "use a port number such as 5000",
        "storage.database_path" => "point it at a writable file, or set storage.durable = false",
        k if k.starts_with("travel.") && k.ends_with("_threshold") => {
            "similarity scores run from 0 to 100"
        }
        _ => return format!("run `aide config` to see the current value of `{key}`"),
    };
    hint.to_string()
}

/// Convert a `figment::Error` into one diagnostic per underlying failure.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let section = error.path.first().cloned();
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let (span, src) =
                        locate(&error, section.as_deref(), field, toml_sources);
                    ConfigError::UnknownKey {
                        key: field.clone(),
                        suggestion: suggest_key(field, expected),
                        valid_keys: expected.join(", "),
                        from_env: from_env(&error),
                        section,
                        span,
                        src,
                    }
                }
                Kind::InvalidType(actual, expected) => {
                    let field = error.path.last().cloned().unwrap_or_default();
                    let parent = error.path.len().checked_sub(2).map(|i| error.path[i].as_str());
                    let (span, src) = locate(&error, parent, &field, toml_sources);
                    ConfigError::InvalidType {
                        key: error.path.join("."),
                        found: actual.to_string(),
                        expected: expected.clone(),
                        span,
                        src,
                    }
                }
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

fn from_env(error: &figment::error::Error) -> bool {
    error
        .metadata
        .as_ref()
        .is_some_and(|m| m.name.contains("environment"))
}

/// Span of `key` in the TOML file that produced `error`, if that file is known.
fn locate(
    error: &figment::error::Error,
    section: Option<&str>,
    key: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline strings carry no file metadata; they are always the only source.
    let source = match file {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        None if toml_sources.len() == 1 && !from_env(error) => toml_sources.first(),
        None => None,
    };

    source
        .and_then(|(path, content)| {
            let offset = find_key_offset(content, section, key)?;
            Some((
                Some(SourceSpan::new(offset.into(), key.len())),
                Some(NamedSource::new(path, content.clone())),
            ))
        })
        .unwrap_or((None, None))
}

/// Byte offset of `key` inside `[section]` (or before any header when
/// `section` is `None`).
pub fn find_key_offset(content: &str, section: Option<&str>, key: &str) -> Option<usize> {
    let mut current: Option<&str> = None;
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(header) = trimmed.strip_prefix('[') {
            current = header.split(']').next().map(str::trim);
        } else if current == section
            && trimmed
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        {
            return Some(offset + line.len() - trimmed.len());
        }
        offset += line.len();
    }
    None
}

/// Closest valid key by Jaro-Winkler similarity.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (strsim::jaro_winkler(unknown, key), key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render errors to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        match handler.render_report(&mut buf, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{buf}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}
