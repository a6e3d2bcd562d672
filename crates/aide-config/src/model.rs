// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Aide assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Aide configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AideConfig {
    /// Assistant identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Local time zone used for date resolution and display.
    #[serde(default)]
    pub locale: LocaleConfig,

    /// Mail listing and composition defaults.
    #[serde(default)]
    pub mail: MailConfig,

    /// Calendar defaults.
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Flight search settings.
    #[serde(default)]
    pub travel: TravelConfig,

    /// Similarity memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Text-generation endpoint settings.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Durable session storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Assistant identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Name the assistant uses for itself in prompts and memory metadata.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Name appended to generated mail sign-offs.
    #[serde(default = "default_signer")]
    pub signer: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            signer: default_signer(),
        }
    }
}

fn default_agent_name() -> String {
    "aide".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_signer() -> String {
    "RMM".to_string()
}

/// Local time zone configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleConfig {
    /// Fixed UTC offset of local time, `+HH:MM` or `-HH:MM`.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,

    /// Label printed after local times.
    #[serde(default = "default_zone_label")]
    pub zone_label: String,

    /// Time of day used when an event phrase names no time, `HH:MM`.
    #[serde(default = "default_event_time")]
    pub default_event_time: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            utc_offset: default_utc_offset(),
            zone_label: default_zone_label(),
            default_event_time: default_event_time(),
        }
    }
}

impl LocaleConfig {
    /// The configured offset in seconds east of UTC, if well-formed.
    pub fn offset_seconds(&self) -> Option<i32> {
        parse_utc_offset(&self.utc_offset)
    }

    /// The configured default event time as `(hour, minute)`, if well-formed.
    pub fn default_time(&self) -> Option<(u32, u32)> {
        parse_clock(&self.default_event_time)
    }
}

fn default_utc_offset() -> String {
    "+05:30".to_string()
}

fn default_zone_label() -> String {
    "IST".to_string()
}

fn default_event_time() -> String {
    "09:00".to_string()
}

/// Parses `+HH:MM` / `-HH:MM` into seconds east of UTC.
pub fn parse_utc_offset(value: &str) -> Option<i32> {
    let value = value.trim();
    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    let (hours, minutes) = parse_clock(rest)?;
    if hours > 14 {
        return None;
    }
    Some(sign * (hours as i32 * 3600 + minutes as i32 * 60))
}

/// Parses `HH:MM` (24-hour).
pub fn parse_clock(value: &str) -> Option<(u32, u32)> {
    let (h, m) = value.trim().split_once(':')?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    (hours < 24 && minutes < 60).then_some((hours, minutes))
}

/// Mail configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MailConfig {
    /// Records listed when the request names no count.
    #[serde(default = "default_mail_count")]
    pub default_count: usize,

    /// Upper bound for a requested count.
    #[serde(default = "default_mail_max")]
    pub max_count: usize,

    /// How many inbox records a date-range filter scans.
    #[serde(default = "default_range_scan")]
    pub range_scan: usize,

    /// Minimum inbox fetch when translating an uncached record.
    #[serde(default = "default_translate_fetch")]
    pub translate_fetch: usize,

    /// Subject used when a compose request names none.
    #[serde(default = "default_subject")]
    pub default_subject: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            default_count: default_mail_count(),
            max_count: default_mail_max(),
            range_scan: default_range_scan(),
            translate_fetch: default_translate_fetch(),
            default_subject: default_subject(),
        }
    }
}

fn default_mail_count() -> usize {
    5
}

fn default_mail_max() -> usize {
    20
}

fn default_range_scan() -> usize {
    50
}

fn default_translate_fetch() -> usize {
    20
}

fn default_subject() -> String {
    "Message from AI Assistant".to_string()
}

/// Calendar configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    /// Events shown by an upcoming-events listing.
    #[serde(default = "default_list_max")]
    pub list_max: usize,

    /// Length of created events.
    #[serde(default = "default_event_minutes")]
    pub event_minutes: i64,

    /// Upcoming events searched when deleting by title or time.
    #[serde(default = "default_lookup_window")]
    pub lookup_window: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            list_max: default_list_max(),
            event_minutes: default_event_minutes(),
            lookup_window: default_lookup_window(),
        }
    }
}

fn default_list_max() -> usize {
    5
}

fn default_event_minutes() -> i64 {
    60
}

fn default_lookup_window() -> usize {
    50
}

/// Flight search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TravelConfig {
    /// API key for the flight search service. `None` disables flight search.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the flight search API.
    #[serde(default = "default_travel_base_url")]
    pub base_url: String,

    /// Value of the API host header.
    #[serde(default = "default_travel_host")]
    pub api_host: String,

    #[serde(default = "default_travel_class")]
    pub travel_class: String,

    #[serde(default = "default_adults")]
    pub adults: u32,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Minimum similarity (0-100) for a fuzzy alias match.
    #[serde(default = "default_alias_threshold")]
    pub alias_threshold: u32,

    /// Minimum similarity (0-100) for a fuzzy canonical match.
    #[serde(default = "default_direct_threshold")]
    pub direct_threshold: u32,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_travel_base_url(),
            api_host: default_travel_host(),
            travel_class: default_travel_class(),
            adults: default_adults(),
            currency: default_currency(),
            alias_threshold: default_alias_threshold(),
            direct_threshold: default_direct_threshold(),
        }
    }
}

fn default_travel_base_url() -> String {
    "https://google-flights2.p.rapidapi.com".to_string()
}

fn default_travel_host() -> String {
    "google-flights2.p.rapidapi.com".to_string()
}

fn default_travel_class() -> String {
    "ECONOMY".to_string()
}

fn default_adults() -> u32 {
    1
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_alias_threshold() -> u32 {
    90
}

fn default_direct_threshold() -> u32 {
    85
}

/// Similarity memory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Whether freeform chat reads and writes memory.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Hits prepended to freeform chat prompts.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            top_k: default_top_k(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_top_k() -> usize {
    5
}

/// Text-generation endpoint configuration (OpenAI-compatible).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// API key. `None` requires the `GROQ_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL up to and including the API version segment.
    #[serde(default = "default_generation_base_url")]
    pub base_url: String,

    #[serde(default = "default_generation_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_generation_base_url(),
            model: default_generation_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_generation_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_generation_model() -> String {
    "meta-llama/llama-4-maverick-17b-128e-instruct".to_string()
}

fn default_max_tokens() -> u32 {
    400
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    60
}

/// Durable session storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Write session state through to SQLite after every turn.
    #[serde(default = "default_true")]
    pub durable: bool,

    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            durable: true,
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|d| d.join("aide").join("aide.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("aide.db"))
        .to_string_lossy()
        .into_owned()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_host")]
    pub host: String,

    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Bearer token required on API routes. `None` disables auth.
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Directory for staged uploads. `None` uses the system temp dir.
    #[serde(default)]
    pub staging_dir: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            bearer_token: None,
            staging_dir: None,
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    5000
}
