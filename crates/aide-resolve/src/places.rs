// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! City name to airport code resolution.
//!
//! Lookup order: exact canonical name, exact alias, fuzzy alias, fuzzy
//! canonical name. Fuzzy scores are normalized edit similarity on a 0-100
//! scale and must reach the configured threshold.

use aide_core::AideError;
use tracing::debug;

use crate::iata::{self, AIRPORTS, ALIASES};

/// A resolved city and its airport code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub city: String,
    pub code: String,
}

/// Resolves free-form city names to airport codes.
#[derive(Debug, Clone)]
pub struct PlaceResolver {
    alias_threshold: f64,
    direct_threshold: f64,
}

impl Default for PlaceResolver {
    fn default() -> Self {
        Self::new(90, 85)
    }
}

impl PlaceResolver {
    pub fn new(alias_threshold: u32, direct_threshold: u32) -> Self {
        Self {
            alias_threshold: f64::from(alias_threshold),
            direct_threshold: f64::from(direct_threshold),
        }
    }

    pub fn resolve(&self, name: &str) -> Result<Place, AideError> {
        let city = normalize(name);
        if city.is_empty() {
            return Err(unresolved(name));
        }

        let canonical: &str = iata::alias_target(&city).unwrap_or(city.as_str());
        if let Some(code) = iata::airport_code(canonical) {
            return Ok(place(canonical, code));
        }

        if let Some((alias, canonical, score)) = best_match(&city, ALIASES)
            && score >= self.alias_threshold
            && let Some(code) = iata::airport_code(canonical)
        {
            debug!(input = %city, alias, canonical, score, "fuzzy alias match");
            return Ok(place(canonical, code));
        }

        if let Some((matched, code, score)) = best_match(&city, AIRPORTS)
            && score >= self.direct_threshold
        {
            debug!(input = %city, matched, score, "fuzzy airport match");
            return Ok(place(matched, code));
        }

        Err(unresolved(name))
    }
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn place(city: &str, code: &str) -> Place {
    Place {
        city: city.to_string(),
        code: code.to_string(),
    }
}

fn unresolved(name: &str) -> AideError {
    AideError::PlaceUnresolved(format!("Could not find an airport for '{}'.", name.trim()))
}

/// Highest-scoring key of `table`, with its value and score.
fn best_match(
    input: &str,
    table: &'static [(&'static str, &'static str)],
) -> Option<(&'static str, &'static str, f64)> {
    table
        .iter()
        .map(|(key, value)| (*key, *value, similarity(input, key)))
        .max_by(|a, b| a.2.total_cmp(&b.2))
}

/// Normalized Damerau-Levenshtein similarity scaled to 0-100.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_damerau_levenshtein(a, b) * 100.0
}
