// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./aide.toml` > `~/.config/aide/aide.toml` > `/etc/aide/aide.toml`
//! with environment variable overrides via `AIDE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::AideConfig;

/// Section names recognized in `AIDE_<SECTION>_<KEY>` variables.
const ENV_SECTIONS: &[&str] = &[
    "agent",
    "locale",
    "mail",
    "calendar",
    "travel",
    "memory",
    "generation",
    "storage",
    "gateway",
];

pub(crate) const SYSTEM_CONFIG: &str = "/etc/aide/aide.toml";
pub(crate) const LOCAL_CONFIG: &str = "aide.toml";

/// Path of the per-user config file, if a config dir exists.
pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("aide/aide.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/aide/aide.toml` (system-wide)
/// 3. `~/.config/aide/aide.toml` (user XDG config)
/// 4. `./aide.toml` (local directory)
/// 5. `AIDE_*` environment variables
pub fn load_config() -> Result<AideConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<AideConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AideConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AideConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AideConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AideConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment provider mapping `AIDE_GENERATION_API_KEY` to `generation.api_key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// underscore-containing keys stay intact.
fn env_provider() -> Env {
    Env::prefixed("AIDE_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env var name to a lowercase dotted config path.
///
/// Figment hands the name over in its original case.
pub fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(section)
            && let Some(field) = rest.strip_prefix('_')
        {
            return format!("{section}.{field}");
        }
    }
    key
}
