// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered intent classification.
//!
//! The classifier is an explicit priority list. Each rule either claims the
//! turn and returns an [`ActionRequest`] or passes to the next rule. Rules
//! that depend on a pending draft only run when the session holds one.

use std::sync::LazyLock;

use aide_core::types::{FlightQuery, RecordRef};
use aide_core::{ActionRequest, AideError, Category, SessionState};
use aide_resolve::{DateResolver, PlaceResolver, Preference};
use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::debug;

use crate::extract::{self, ADDRESS_PATTERN};
use crate::{events, travel};

/// Confirmation replies accepted while a draft is pending (exact, trimmed).
const CONFIRM_YES: &[&str] = &["ok", "send", "yes", "y"];
const CONFIRM_NO: &[&str] = &["no", "cancel", "don't send", "n"];

const CC_PHRASES: &[&str] = &["add cc", "cc:", "add bcc", "bcc:"];

/// Whole-utterance phrases that list the primary inbox.
const READ_EXACT: &[&str] = &[
    "email",
    "emails",
    "show my emails",
    "read my emails",
    "show emails",
    "read emails",
    "my inbox",
    "read my inbox",
];

const TRANSLATE_GATE: &[&str] = &["translate", "email", "message", "mail"];

const COMPOSE_TRIGGERS: &[&str] = &[
    "send email",
    "compose email",
    "write email",
    "email to",
    "create email",
];

const READ_TRIGGERS: &[&str] = &[
    "read emails",
    "check emails",
    "show emails",
    "inbox",
    "latest emails",
];

const REPLY_TRIGGERS: &[&str] = &["reply", "respond", "answer"];

const MAIL_WORDS: &[&str] = &["email", "inbox", "mail", "mails", "message", "messages"];

/// Words that make a category keyword refer to a mail folder.
const FOLDER_GATE: &[&str] = &[
    "email",
    "emails",
    "inbox",
    "mail",
    "mails",
    "message",
    "messages",
    "primary",
    "social",
    "promotional",
    "promotion",
    "promotions",
    "personal",
    "updates",
    "forums",
    "spam",
    "junk",
    "trash",
    "drafts",
];

const LANGUAGE_STOP_WORDS: &[&str] = &["detail", "details", "full", "me"];

const ORDINAL: &str = r"\d+|first|1st|second|2nd|third|3rd|fourth|4th|fifth|5th";

static TRANSLATE_INDEX_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:translate|show|display)?\s*(?:the\s*)?(?:email|message)?\s*\b({ORDINAL})\s*(?:email|message)?\s*(?:to|in)\s*([a-z]+)$"
    ))
    .unwrap()
});

static TRANSLATE_LANGUAGE_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:translate|show|display)?\s*(?:the\s*)?(?:email|message)?\s*(?:to|in)\s*([a-z]+)\s*\b({ORDINAL})$"
    ))
    .unwrap()
});

static EMAIL_THEN_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)email\s+{ADDRESS_PATTERN}")).unwrap());

static DETAIL_NUMBERED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?:email|message)\s+(\d+)\b(?:\s+details?)?").unwrap(),
        Regex::new(r"(?:show|display|open|view)\s+(?:email|message)\s+(\d+)\b").unwrap(),
        Regex::new(r"details?\s+(?:of\s+)?(?:email|message)\s+(\d+)\b").unwrap(),
    ]
});

static DETAIL_BY_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:email|message)\s+(\w+)\s+details?").unwrap());

static LEGACY_DETAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:email|show email)\s*(\d+)\s*(?:details|content)?").unwrap()
});

static LEADING_EDIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^edit\s+").unwrap());

static LEADING_REPLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:reply|respond|answer)\b\s*").unwrap());

/// Mail listing and compose defaults used by the classifier.
#[derive(Debug, Clone)]
pub struct MailDefaults {
    pub default_count: usize,
    pub max_count: usize,
    pub default_subject: String,
}

impl Default for MailDefaults {
    fn default() -> Self {
        Self {
            default_count: 5,
            max_count: 20,
            default_subject: "Message from AI Assistant".to_string(),
        }
    }
}

/// Maps raw text plus session state to a structured [`ActionRequest`].
#[derive(Debug, Clone)]
pub struct Classifier {
    dates: DateResolver,
    places: PlaceResolver,
    mail: MailDefaults,
}

impl Classifier {
    pub fn new(dates: DateResolver, places: PlaceResolver) -> Self {
        Self {
            dates,
            places,
            mail: MailDefaults::default(),
        }
    }

    pub fn with_mail_defaults(mut self, mail: MailDefaults) -> Self {
        self.mail = mail;
        self
    }

    pub fn dates(&self) -> &DateResolver {
        &self.dates
    }

    /// Classifies one utterance.
    ///
    /// Errors are user-facing: an unresolvable event time or a present but
    /// unreadable travel date.
    pub fn classify(
        &self,
        text: &str,
        state: &SessionState,
        now: DateTime<Utc>,
    ) -> Result<ActionRequest, AideError> {
        let trimmed = text.trim();
        let lower = trimmed.to_lowercase();

        if state.has_draft()
            && let Some(request) = Self::draft_command(trimmed, &lower)
        {
            return Ok(request);
        }

        if events::is_event_text(&lower) {
            return events::classify(trimmed, now, &self.dates);
        }

        if READ_EXACT.contains(&lower.as_str()) {
            return Ok(ActionRequest::ReadRecords {
                count: self.mail.default_count,
                category: Category::Primary,
            });
        }

        // Rule 4: translate
        if TRANSLATE_GATE.iter().any(|w| lower.contains(w))
            && !lower.contains('@')
            && let Some(request) = Self::translate(&lower)
        {
            return Ok(request);
        }

        // Rule 5: compose
        if COMPOSE_TRIGGERS.iter().any(|p| lower.contains(p))
            || EMAIL_THEN_ADDRESS.is_match(trimmed)
        {
            return Ok(self.compose(trimmed, state));
        }

        // Date-range filter
        if MAIL_WORDS.iter().any(|w| lower.contains(w))
            && let Some((start, end)) = self.dates.resolve_range(trimmed, now)
        {
            return Ok(ActionRequest::ReadRecordsInRange { start, end });
        }

        // Rule 6: read
        if READ_TRIGGERS.iter().any(|p| lower.contains(p)) {
            return Ok(ActionRequest::ReadRecords {
                count: extract::count(&lower, self.mail.default_count, self.mail.max_count),
                category: extract::category(&lower).unwrap_or(Category::Primary),
            });
        }

        // Rule 7: detail
        if let Some(request) = Self::detail(&lower) {
            return Ok(request);
        }

        // Rule 8: reply
        if REPLY_TRIGGERS.iter().any(|p| lower.contains(p)) {
            let context = LEADING_REPLY.replace(trimmed, "").trim().to_string();
            return Ok(ActionRequest::Reply { context });
        }

        // Rule 9: legacy numeric detail
        if let Some(caps) = LEGACY_DETAIL.captures(trimmed)
            && let Ok(index) = caps[1].parse::<usize>()
        {
            return Ok(ActionRequest::ViewRecord {
                target: Some(RecordRef::Index(index)),
            });
        }

        // Flight search
        if lower.contains("flight")
            && let Some(request) = self.flight(trimmed, now)?
        {
            return Ok(request);
        }

        // Rule 10: folder keywords
        if FOLDER_GATE.iter().any(|w| extract::has_word(&lower, w))
            && let Some(category) = extract::category(&lower)
        {
            return Ok(ActionRequest::ReadRecords {
                count: extract::count(&lower, self.mail.default_count, self.mail.max_count),
                category,
            });
        }

        // Rule 11: chat
        Ok(ActionRequest::FreeformChat {
            text: trimmed.to_string(),
        })
    }

    /// Rules 1 to 3, only consulted while a draft is pending.
    fn draft_command(trimmed: &str, lower: &str) -> Option<ActionRequest> {
        // Rule 1: confirm or discard
        if CONFIRM_YES.contains(&lower) {
            return Some(ActionRequest::Confirm { accepted: true });
        }
        if CONFIRM_NO.contains(&lower) {
            return Some(ActionRequest::Confirm { accepted: false });
        }

        // Rule 2: edit
        if lower.starts_with("edit ") || lower.contains("change") || lower.contains("modify") {
            let instruction = LEADING_EDIT.replace(trimmed, "").trim().to_string();
            return Some(ActionRequest::Edit { instruction });
        }

        // Rule 3: cc/bcc
        if CC_PHRASES.iter().any(|p| lower.contains(p)) {
            return Some(ActionRequest::Edit {
                instruction: trimmed.to_string(),
            });
        }

        None
    }

    fn translate(lower: &str) -> Option<ActionRequest> {
        let (index, language) = if let Some(caps) = TRANSLATE_INDEX_FIRST.captures(lower) {
            (caps.get(1)?.as_str(), caps.get(2)?.as_str())
        } else {
            let caps = TRANSLATE_LANGUAGE_FIRST.captures(lower)?;
            (caps.get(2)?.as_str(), caps.get(1)?.as_str())
        };
        if LANGUAGE_STOP_WORDS.contains(&language) {
            return None;
        }
        let index = extract::ordinal(index).unwrap_or(1);
        Some(ActionRequest::TranslateRecord {
            index,
            target_language: capitalize(language),
        })
    }

    fn compose(&self, trimmed: &str, state: &SessionState) -> ActionRequest {
        ActionRequest::Compose {
            to: extract::recipient(trimmed),
            subject: extract::subject(trimmed)
                .unwrap_or_else(|| self.mail.default_subject.clone()),
            context: extract::context(trimmed)
                .unwrap_or_else(|| format!("Please compose an appropriate email for: {trimmed}")),
            cc: extract::cc_list(trimmed),
            bcc: extract::bcc_list(trimmed),
            attachments: state.pending_attachments.clone(),
        }
    }

    fn detail(lower: &str) -> Option<ActionRequest> {
        for pattern in DETAIL_NUMBERED.iter() {
            if let Some(caps) = pattern.captures(lower)
                && let Ok(index) = caps[1].parse::<usize>()
            {
                return Some(ActionRequest::ViewRecord {
                    target: Some(RecordRef::Index(index)),
                });
            }
        }
        if let Some(caps) = DETAIL_BY_ID.captures(lower) {
            return Some(ActionRequest::ViewRecord {
                target: Some(RecordRef::Id(caps[1].to_string())),
            });
        }
        if lower.contains("details") && !["create", "send", "compose"].iter().any(|w| lower.contains(w))
        {
            return Some(ActionRequest::ViewRecord { target: None });
        }
        None
    }

    /// A resolved flight search, or `None` to fall through when the cities
    /// cannot be read or resolved.
    fn flight(&self, trimmed: &str, now: DateTime<Utc>) -> Result<Option<ActionRequest>, AideError> {
        let Some(request) = travel::extract_flight(trimmed) else {
            return Ok(None);
        };
        let (origin, destination) = match (
            self.places.resolve(&request.origin),
            self.places.resolve(&request.destination),
        ) {
            (Ok(origin), Ok(destination)) => (origin, destination),
            (origin, destination) => {
                debug!(
                    origin = %request.origin,
                    destination = %request.destination,
                    origin_ok = origin.is_ok(),
                    destination_ok = destination.is_ok(),
                    "flight cities unresolved, falling through"
                );
                return Ok(None);
            }
        };

        let Some(date) = request
            .date_text
            .as_deref()
            .and_then(|text| self.dates.resolve_date(text, now, Preference::Future).ok())
        else {
            debug!(date = ?request.date_text, "flight date unresolved, falling through");
            return Ok(None);
        };

        Ok(Some(ActionRequest::SearchFlights {
            query: FlightQuery {
                origin_city: origin.city,
                origin_code: origin.code,
                destination_city: destination.city,
                destination_code: destination.code,
                date,
            },
        }))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_language() {
        assert_eq!(capitalize("hindi"), "Hindi");
        assert_eq!(capitalize("fRENCH"), "French");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn translate_both_orders() {
        assert_eq!(
            Classifier::translate("translate the second email to spanish"),
            Some(ActionRequest::TranslateRecord {
                index: 2,
                target_language: "Spanish".into()
            })
        );
        assert_eq!(
            Classifier::translate("translate to german 3"),
            Some(ActionRequest::TranslateRecord {
                index: 3,
                target_language: "German".into()
            })
        );
        assert_eq!(Classifier::translate("show email 2 in detail"), None);
    }

    #[test]
    fn detail_by_non_numeric_id() {
        assert_eq!(
            Classifier::detail("email 18c9f2ab details"),
            Some(ActionRequest::ViewRecord {
                target: Some(RecordRef::Id("18c9f2ab".into()))
            })
        );
        assert_eq!(
            Classifier::detail("show details"),
            Some(ActionRequest::ViewRecord { target: None })
        );
        assert_eq!(Classifier::detail("send details"), None);
    }
}
