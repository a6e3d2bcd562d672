// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar sub-grammar.
//!
//! Text that mentions calendars, events or their synonyms is parsed here
//! instead of by the mail grammar. Synonyms are folded to `create` and
//! `event` before any pattern runs.

use std::sync::LazyLock;

use aide_core::types::{EventTarget, HolidayMonth};
use aide_core::{ActionRequest, AideError};
use aide_resolve::datetime::TIME_PASSED;
use aide_resolve::{DateResolver, Preference};
use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::debug;

use crate::extract::{has_word, is_valid_address};

/// Words that route a turn into the calendar grammar.
const EVENT_WORDS: &[&str] = &[
    "calendar",
    "calendars",
    "event",
    "events",
    "meeting",
    "meetings",
    "appointment",
    "appointments",
    "reminder",
    "reminders",
    "call",
    "calls",
    "calling",
    "holiday",
    "holidays",
    "festival",
    "festivals",
];

const HOLIDAY_WORDS: &[&str] = &["holiday", "holidays", "festival", "festivals"];

const NEXT_MONTH_PHRASES: &[&str] = &["next month", "upcoming month", "following month"];

const BULK_DELETE_PHRASES: &[&str] = &["delete all", "remove all", "clear all"];

const LIST_WORDS: &[&str] = &["list", "show", "display", "upcoming"];

/// Words at which a captured title stops.
const TITLE_STOP_WORDS: &[&str] = &[
    "on", "at", "by", "for", "with", "and", "invite", "today", "tonight", "tomorrow", "day",
    "next", "this", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

const DEFAULT_TITLE: &str = "New Event";

pub const CREATE_HINT: &str = "❌ Could not recognize the event time.<br>💡 Try specifying a full date and time, e.g.:<br>• 'next Friday at 2pm'<br>• 'tomorrow 4pm IST'<br>• 'August 10th at noon'<br>";

pub const FALLBACK_HINT: &str = "❌ Please specify a recognizable event time.<br>💡 Examples:<br>• 'tomorrow 4pm IST'<br>• 'next Friday at noon'<br>";

static CREATE_SYNONYMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:add|schedule|set|make|arrange|book|organize)\b").unwrap()
});

static EVENT_SYNONYMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:meeting|appointment|reminder|call|session|meetup|note)\b").unwrap()
});

static DELETE_BY_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:delete|remove|cancel)\s+event(?:\s+(id)\b)?\s*(:)?\s*([A-Za-z0-9_\-]+)")
        .unwrap()
});

static DELETE_BY_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:delete|remove|cancel)\s+event\s+(?:called|named|about|titled|with title|regarding)\s*['"]?([^'"]+)['"]?"#,
    )
    .unwrap()
});

static DELETE_VERB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:delete|remove|cancel)\b").unwrap());

static CREATE_EVENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcreate\b.*\bevent\b").unwrap());

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:called|named|about|titled|with title|regarding)\s*['"]?([^'"]+)['"]?"#)
        .unwrap()
});

static INVITE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:invite|send invite to|send invitation to|invite to|send to|with|and)\s+")
        .unwrap()
});

static ATTENDEE_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s,]+").unwrap());

static CREATION_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^create\s+(?:an?\s+)?event\s+(?:(?:on|for)\s+)?").unwrap()
});

/// Returns `true` when lowercase `text` belongs to the calendar grammar.
pub fn is_event_text(lower: &str) -> bool {
    EVENT_WORDS.iter().any(|w| has_word(lower, w))
}

/// Replaces creation verbs with `create` and event nouns with `event`.
pub fn fold_synonyms(text: &str) -> String {
    let folded = CREATE_SYNONYMS.replace_all(text, "create");
    EVENT_SYNONYMS.replace_all(&folded, "event").into_owned()
}

/// Parses a calendar utterance.
pub fn classify(
    text: &str,
    now: DateTime<Utc>,
    dates: &DateResolver,
) -> Result<ActionRequest, AideError> {
    let folded = fold_synonyms(text);
    let lower = folded.to_lowercase();

    // Rule a: bulk delete
    if BULK_DELETE_PHRASES.iter().any(|p| lower.contains(p)) {
        return Ok(ActionRequest::DeleteAllEvents);
    }

    // Rule b: id-shaped deletion
    if let Some(id) = id_to_delete(&folded) {
        return Ok(ActionRequest::DeleteEvent {
            target: EventTarget::Id(id),
        });
    }

    // Rule c: holidays
    if HOLIDAY_WORDS.iter().any(|w| has_word(&lower, w)) {
        let month = if NEXT_MONTH_PHRASES.iter().any(|p| lower.contains(p)) {
            HolidayMonth::Next
        } else {
            HolidayMonth::Current
        };
        return Ok(ActionRequest::ListHolidays { month });
    }

    // Rule d: listing
    if LIST_WORDS.iter().any(|w| has_word(&lower, w)) {
        return Ok(ActionRequest::ListEvents);
    }

    // Rule e: deletion by title or time
    if let Some(caps) = DELETE_BY_TITLE.captures(&folded) {
        let title = caps[1].trim().to_string();
        if !title.is_empty() {
            return Ok(ActionRequest::DeleteEvent {
                target: EventTarget::Title(title),
            });
        }
    }
    if DELETE_VERB.is_match(&folded)
        && let Ok(when) = dates.resolve(&folded, now, Preference::Future)
    {
        return Ok(ActionRequest::DeleteEvent {
            target: EventTarget::Time(when),
        });
    }

    // Rule f: creation
    if CREATE_EVENT.is_match(&folded) {
        let title = title(&folded).unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let (attendees, without_invites) = split_invites(&folded);
        let raw_time_text = CREATION_PHRASE
            .replace(&without_invites, "")
            .trim_matches(|c: char| c == ' ' || c == ',' || c == '.')
            .to_string();
        debug!(%title, %raw_time_text, attendees = attendees.len(), "event creation");

        let start = dates
            .resolve(&raw_time_text, now, Preference::Future)
            .map_err(|err| hint_or_passed(err, CREATE_HINT))?;
        return Ok(ActionRequest::ScheduleEvent {
            title,
            raw_time_text,
            start,
            attendees,
        });
    }

    // Rule g: whatever title and time can be found
    let title = title(&folded).unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let start = dates
        .resolve(&folded, now, Preference::Future)
        .map_err(|err| hint_or_passed(err, FALLBACK_HINT))?;
    Ok(ActionRequest::ScheduleEvent {
        title,
        raw_time_text: folded.trim().to_string(),
        start,
        attendees: Vec::new(),
    })
}

/// An id token after "delete event", accepted only when it looks like an id.
fn id_to_delete(folded: &str) -> Option<String> {
    let caps = DELETE_BY_ID.captures(folded)?;
    let token = caps.get(3)?.as_str();
    let marked = caps.get(1).is_some() || caps.get(2).is_some();
    let id_shaped = token.len() >= 8 && token.chars().any(|c| c.is_ascii_digit());
    (marked || id_shaped).then(|| token.to_string())
}

/// Title after "called", "named", "about", ... cut before any date or invite words.
fn title(folded: &str) -> Option<String> {
    let caps = TITLE.captures(folded)?;
    let words: Vec<&str> = caps[1]
        .split_whitespace()
        .take_while(|word| {
            let lower = word.to_lowercase();
            let bare = lower.trim_matches(|c: char| !c.is_alphanumeric());
            !TITLE_STOP_WORDS.contains(&bare) && !bare.starts_with(|c: char| c.is_ascii_digit())
        })
        .collect();
    let title = words.join(" ");
    (!title.is_empty()).then_some(title)
}

/// Splits off invitees. The invite fragment is removed only if it names at
/// least one valid address.
fn split_invites(folded: &str) -> (Vec<String>, String) {
    for m in INVITE.find_iter(folded) {
        let attendees: Vec<String> = ATTENDEE_SPLIT
            .split(&folded[m.end()..])
            .map(|token| token.trim().trim_end_matches('.'))
            .filter(|token| is_valid_address(token))
            .map(str::to_string)
            .collect();
        if !attendees.is_empty() {
            let before = folded[..m.start()].split_whitespace().collect::<Vec<_>>().join(" ");
            return (attendees, before);
        }
    }
    (Vec::new(), folded.to_string())
}

fn hint_or_passed(err: AideError, hint: &str) -> AideError {
    match err {
        AideError::DateUnresolved(reason) if reason == TIME_PASSED => {
            AideError::DateUnresolved(reason)
        }
        _ => AideError::DateUnresolved(hint.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, FixedOffset, TimeZone, Timelike};

    use super::*;

    fn resolver() -> DateResolver {
        DateResolver::new(FixedOffset::east_opt(19_800).unwrap())
    }

    /// Wednesday 2026-10-14 10:00 +05:30.
    fn now() -> DateTime<Utc> {
        FixedOffset::east_opt(19_800)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 14, 10, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn run(text: &str) -> Result<ActionRequest, AideError> {
        classify(text, now(), &resolver())
    }

    #[test]
    fn gate_words_cover_inflections_but_not_fragments() {
        assert!(is_event_text("schedule a meeting"));
        assert!(is_event_text("show my calendar"));
        assert!(is_event_text("any holidays next month"));
        assert!(is_event_text("what is on my calendars"));
        assert!(is_event_text("am i calling anyone tomorrow"));
        assert!(!is_event_text("the callback was recalled"));
        assert!(!is_event_text("prevent this"));
    }

    #[test]
    fn synonyms_fold_case_insensitively() {
        assert_eq!(fold_synonyms("Schedule a Meeting"), "create a event");
        assert_eq!(fold_synonyms("called settings"), "called settings");
    }

    #[test]
    fn bulk_delete() {
        assert_eq!(run("delete all events").unwrap(), ActionRequest::DeleteAllEvents);
        assert_eq!(run("clear all meetings").unwrap(), ActionRequest::DeleteAllEvents);
    }

    #[test]
    fn delete_by_marked_or_id_shaped_token() {
        assert_eq!(
            run("delete event id abc").unwrap(),
            ActionRequest::DeleteEvent {
                target: EventTarget::Id("abc".into())
            }
        );
        assert_eq!(
            run("cancel meeting 7hq2k9v0lmn3").unwrap(),
            ActionRequest::DeleteEvent {
                target: EventTarget::Id("7hq2k9v0lmn3".into())
            }
        );
    }

    #[test]
    fn delete_by_title_is_not_mistaken_for_id() {
        assert_eq!(
            run("delete meeting called standup").unwrap(),
            ActionRequest::DeleteEvent {
                target: EventTarget::Title("standup".into())
            }
        );
    }

    #[test]
    fn delete_by_time() {
        match run("cancel my appointment tomorrow at 3pm").unwrap() {
            ActionRequest::DeleteEvent {
                target: EventTarget::Time(t),
            } => assert_eq!((t.day(), t.hour()), (15, 15)),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn holidays_current_and_next() {
        assert_eq!(
            run("show holidays").unwrap(),
            ActionRequest::ListHolidays {
                month: HolidayMonth::Current
            }
        );
        assert_eq!(
            run("festivals next month").unwrap(),
            ActionRequest::ListHolidays {
                month: HolidayMonth::Next
            }
        );
    }

    #[test]
    fn list_events() {
        assert_eq!(run("show my upcoming events").unwrap(), ActionRequest::ListEvents);
    }

    #[test]
    fn create_event_with_title_and_time() {
        match run("create event called standup tomorrow at 9am").unwrap() {
            ActionRequest::ScheduleEvent {
                title,
                start,
                attendees,
                ..
            } => {
                assert_eq!(title, "standup");
                assert_eq!((start.day(), start.hour(), start.minute()), (15, 9, 0));
                assert_eq!(start.weekday(), chrono::Weekday::Thu);
                assert!(attendees.is_empty());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn create_event_with_invitees() {
        match run("Schedule a meeting called Review next friday 2pm invite a@x.com, b@x.com").unwrap()
        {
            ActionRequest::ScheduleEvent {
                title,
                start,
                attendees,
                raw_time_text,
            } => {
                assert_eq!(title, "Review");
                assert_eq!(attendees, vec!["a@x.com", "b@x.com"]);
                assert_eq!((start.day(), start.hour()), (23, 14));
                assert!(!raw_time_text.contains("a@x.com"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn with_clause_without_addresses_stays_in_text() {
        match run("set a reminder about lunch with team tomorrow noon").unwrap() {
            ActionRequest::ScheduleEvent { title, start, .. } => {
                assert_eq!(title, "lunch");
                assert_eq!((start.day(), start.hour()), (15, 12));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn creation_without_time_is_a_hint() {
        let err = run("create event called retro").unwrap_err();
        assert_eq!(err.to_string(), CREATE_HINT);
    }

    #[test]
    fn creation_today_in_the_past_says_so() {
        let err = run("add meeting called sync today at 8am").unwrap_err();
        assert_eq!(err.to_string(), TIME_PASSED);
    }

    #[test]
    fn fallback_without_time_is_second_hint() {
        let err = run("what is on my calendar").unwrap_err();
        assert_eq!(err.to_string(), FALLBACK_HINT);
    }

    #[test]
    fn fallback_with_time_schedules_default_title() {
        match run("calendar tomorrow 5pm").unwrap() {
            ActionRequest::ScheduleEvent { title, start, .. } => {
                assert_eq!(title, "New Event");
                assert_eq!(start.hour(), 17);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
