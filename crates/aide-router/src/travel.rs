// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flight request extraction: "from X to Y [on|for|at] <date>".

use std::sync::LazyLock;

use regex::Regex;

static FROM_TO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfrom\s+([a-z][a-z\s]*?)\s+to\s+(.+)$").unwrap());

const CITY_STOP_WORDS: &[&str] = &["on", "for", "at", "the", "in", "to", "from"];

/// Words that start the date part of the destination clause.
const DATE_INDICATORS: &[&str] = &[
    "on", "for", "at", "today", "tomorrow", "yesterday", "next", "this", "day", "monday",
    "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "january", "february",
    "march", "april", "may", "june", "july", "august", "september", "october", "november",
    "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov",
    "dec",
];

/// Raw pieces of a flight request before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightRequest {
    pub origin: String,
    pub destination: String,
    pub date_text: Option<String>,
}

/// Splits a "from X to Y <date>" phrase into its parts.
pub fn extract_flight(text: &str) -> Option<FlightRequest> {
    let caps = FROM_TO.captures(text)?;
    let origin = clean_city(&caps[1]);

    let rest: Vec<&str> = caps[2].split_whitespace().collect();
    let split = rest
        .iter()
        .position(|word| is_date_indicator(word))
        .unwrap_or(rest.len());
    let destination = clean_city(&rest[..split].join(" "));

    let date_words: Vec<&str> = rest[split..]
        .iter()
        .copied()
        .skip_while(|w| matches!(w.to_lowercase().as_str(), "on" | "for" | "at"))
        .collect();
    let date_text = (!date_words.is_empty()).then(|| date_words.join(" "));

    if origin.is_empty() || destination.is_empty() {
        return None;
    }
    Some(FlightRequest {
        origin,
        destination,
        date_text,
    })
}

fn is_date_indicator(word: &str) -> bool {
    let lower = word.to_lowercase();
    let bare = lower.trim_matches(|c: char| !c.is_alphanumeric());
    bare.starts_with(|c: char| c.is_ascii_digit()) || DATE_INDICATORS.contains(&bare)
}

fn clean_city(raw: &str) -> String {
    raw.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty() && !CITY_STOP_WORDS.contains(&w.to_lowercase().as_str()))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(text: &str) -> (String, String, Option<String>) {
        let r = extract_flight(text).expect("should extract");
        (r.origin, r.destination, r.date_text)
    }

    #[test]
    fn date_after_on() {
        assert_eq!(
            parts("search flights from Tokyo to Mumbai on 30 august"),
            ("tokyo".into(), "mumbai".into(), Some("30 august".into()))
        );
    }

    #[test]
    fn date_without_preposition() {
        assert_eq!(
            parts("flights from new york to delhi 2026-08-30"),
            ("new york".into(), "delhi".into(), Some("2026-08-30".into()))
        );
        assert_eq!(
            parts("flight from mumbai to bangkok next friday"),
            ("mumbai".into(), "bangkok".into(), Some("next friday".into()))
        );
    }

    #[test]
    fn missing_date() {
        assert_eq!(
            parts("cheap flight from london to paris"),
            ("london".into(), "paris".into(), None)
        );
    }

    #[test]
    fn no_from_to_clause() {
        assert!(extract_flight("book me a flight").is_none());
        assert!(extract_flight("flight from delhi to tomorrow").is_none());
    }
}
