// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Natural-language date and time resolution.
//!
//! All phrases are interpreted in a fixed local offset relative to a caller
//! supplied "now", so resolution is deterministic under test.

use std::sync::LazyLock;

use aide_core::AideError;
use chrono::{
    DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    Weekday,
};
use regex::Regex;

/// Reason given when "today" names a time that is already behind now.
pub const TIME_PASSED: &str = "The time has passed. Please choose another time.";

/// Which side of "now" an ambiguous phrase should land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preference {
    #[default]
    Future,
    Past,
}

const MONTH_PATTERN: &str = "jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

static CLOCK_12H: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})(?::([0-5]\d))?\s*(am|pm)\b").unwrap());

static CLOCK_24H: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([01]?\d|2[0-3]):([0-5]\d)\b").unwrap());

static TIME_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(noon|midday|midnight|morning|afternoon|evening|tonight|night)\b").unwrap()
});

static WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:(next|this|last)\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    )
    .unwrap()
});

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());

static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").unwrap());

static DAY_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({MONTH_PATTERN})\b(?:,?\s+(\d{{4}}))?"
    ))
    .unwrap()
});

static MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b({MONTH_PATTERN})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s+(\d{{4}}))?"
    ))
    .unwrap()
});

static BETWEEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bbetween\s+(.+?)\s+and\s+(.+)$").unwrap());

/// A date found in text, and whether it was anchored with "today"/"tonight".
#[derive(Debug, Clone, Copy)]
struct DateMatch {
    date: NaiveDate,
    anchored_today: bool,
}

/// Resolves phrases like "next Friday at 2pm" to zoned timestamps.
#[derive(Debug, Clone)]
pub struct DateResolver {
    offset: FixedOffset,
    default_time: NaiveTime,
}

impl DateResolver {
    /// Resolver for `offset` with a 09:00 default time of day.
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            default_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }

    /// Overrides the time used when a phrase names a date but no time.
    pub fn with_default_time(mut self, time: NaiveTime) -> Self {
        self.default_time = time;
        self
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Current time in the local offset.
    pub fn local_now(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset)
    }

    /// Resolves `text` to a timestamp in the local offset.
    ///
    /// A phrase with a date but no time uses the default time. A phrase with a
    /// time but no date uses today, rolled to the next (or previous) day per
    /// `preference` when that time is already behind (or ahead of) now.
    pub fn resolve(
        &self,
        text: &str,
        now: DateTime<Utc>,
        preference: Preference,
    ) -> Result<DateTime<FixedOffset>, AideError> {
        let lower = text.to_lowercase();
        let local_now = self.local_now(now);
        let time = find_time(&lower);
        let effective_time = time.unwrap_or(self.default_time);

        let (date, anchored_today) =
            match self.find_date(&lower, &local_now, effective_time, preference) {
                Some(found) => (found.date, found.anchored_today),
                None => {
                    let Some(clock) = time else {
                        return Err(AideError::DateUnresolved(format!(
                            "Could not understand a date or time in '{}'.",
                            text.trim()
                        )));
                    };
                    let today = local_now.date_naive();
                    let date = match preference {
                        Preference::Future if clock <= local_now.time() => {
                            today.checked_add_days(Days::new(1))
                        }
                        Preference::Past if clock > local_now.time() => {
                            today.checked_sub_days(Days::new(1))
                        }
                        _ => Some(today),
                    };
                    (date.ok_or_else(|| out_of_range(text))?, false)
                }
            };

        let resolved = self.localize(date.and_time(effective_time), text)?;
        if anchored_today && preference == Preference::Future && resolved <= local_now {
            return Err(AideError::DateUnresolved(TIME_PASSED.into()));
        }
        Ok(resolved)
    }

    /// Resolves only the calendar date in `text`.
    pub fn resolve_date(
        &self,
        text: &str,
        now: DateTime<Utc>,
        preference: Preference,
    ) -> Result<NaiveDate, AideError> {
        let lower = text.to_lowercase();
        let local_now = self.local_now(now);
        self.find_date(&lower, &local_now, self.default_time, preference)
            .map(|found| found.date)
            .ok_or_else(|| {
                AideError::DateUnresolved(format!(
                    "Could not understand a date in '{}'.",
                    text.trim()
                ))
            })
    }

    /// Finds "between X and Y" and resolves both ends as past-leaning dates.
    ///
    /// The start is midnight of X and the end is the last microsecond of Y.
    /// Returns `None` unless both ends resolve.
    pub fn resolve_range(
        &self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let lower = text.to_lowercase();
        let caps = BETWEEN.captures(&lower)?;
        let start = self.resolve_date(&caps[1], now, Preference::Past).ok()?;
        let end = self.resolve_date(&caps[2], now, Preference::Past).ok()?;
        let end_of_day = NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)?;
        let start = self.localize(start.and_time(NaiveTime::MIN), text).ok()?;
        let end = self.localize(end.and_time(end_of_day), text).ok()?;
        Some((start, end))
    }

    fn localize(&self, naive: NaiveDateTime, text: &str) -> Result<DateTime<FixedOffset>, AideError> {
        self.offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| out_of_range(text))
    }

    fn find_date(
        &self,
        lower: &str,
        local_now: &DateTime<FixedOffset>,
        time: NaiveTime,
        preference: Preference,
    ) -> Option<DateMatch> {
        let today = local_now.date_naive();
        let relative = |days: i64, anchored_today: bool| {
            let date = if days >= 0 {
                today.checked_add_days(Days::new(days.unsigned_abs()))
            } else {
                today.checked_sub_days(Days::new(days.unsigned_abs()))
            };
            date.map(|date| DateMatch {
                date,
                anchored_today,
            })
        };

        if lower.contains("day after tomorrow") {
            return relative(2, false);
        }
        if contains_word(lower, "tomorrow") {
            return relative(1, false);
        }
        if contains_word(lower, "yesterday") {
            return relative(-1, false);
        }
        if contains_word(lower, "today") || contains_word(lower, "tonight") {
            return relative(0, true);
        }

        if let Some(caps) = WEEKDAY.captures(lower) {
            let target = parse_weekday(&caps[2])?;
            let qualifier = caps.get(1).map(|m| m.as_str());
            let date = weekday_date(today, local_now.time(), target, qualifier, time, preference)?;
            return Some(DateMatch {
                date,
                anchored_today: false,
            });
        }

        let explicit = if let Some(caps) = ISO_DATE.captures(lower) {
            NaiveDate::from_ymd_opt(caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)
        } else if let Some(caps) = SLASH_DATE.captures(lower) {
            NaiveDate::from_ymd_opt(caps[3].parse().ok()?, caps[2].parse().ok()?, caps[1].parse().ok()?)
        } else if let Some(caps) = DAY_MONTH.captures(lower) {
            named_date(
                caps[1].parse().ok()?,
                month_number(&caps[2])?,
                caps.get(3).and_then(|y| y.as_str().parse().ok()),
                today,
                preference,
            )
        } else if let Some(caps) = MONTH_DAY.captures(lower) {
            named_date(
                caps[2].parse().ok()?,
                month_number(&caps[1])?,
                caps.get(3).and_then(|y| y.as_str().parse().ok()),
                today,
                preference,
            )
        } else {
            None
        };

        explicit.map(|date| DateMatch {
            date,
            anchored_today: false,
        })
    }
}

fn out_of_range(text: &str) -> AideError {
    AideError::DateUnresolved(format!("The date in '{}' is out of range.", text.trim()))
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack
        .split(|c: char| !c.is_alphanumeric())
        .any(|token| token == word)
}

/// Extracts a clock time from lowercase text.
fn find_time(lower: &str) -> Option<NaiveTime> {
    if let Some(caps) = CLOCK_12H.captures(lower) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        let hour = match (&caps[3], hour) {
            ("am", 12) => 0,
            ("am", h) => h,
            ("pm", 12) => 12,
            (_, h) => h + 12,
        };
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }

    if let Some(caps) = CLOCK_24H.captures(lower) {
        return NaiveTime::from_hms_opt(caps[1].parse().ok()?, caps[2].parse().ok()?, 0);
    }

    let hour = match TIME_WORD.captures(lower)?.get(1)?.as_str() {
        "midnight" => 0,
        "morning" => 9,
        "noon" | "midday" => 12,
        "afternoon" => 15,
        "evening" => 18,
        _ => 21,
    };
    NaiveTime::from_hms_opt(hour, 0, 0)
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    name.parse().ok()
}

/// Date of the named weekday relative to `today`.
///
/// Unqualified and "this" pick the nearest occurrence whose instant is still
/// ahead; "next" is always seven days after that; "last" is the most recent
/// strictly earlier occurrence.
fn weekday_date(
    today: NaiveDate,
    now_time: NaiveTime,
    target: Weekday,
    qualifier: Option<&str>,
    time: NaiveTime,
    preference: Preference,
) -> Option<NaiveDate> {
    let today_idx = i64::from(today.weekday().num_days_from_monday());
    let target_idx = i64::from(target.num_days_from_monday());

    let nearest_ahead = || {
        let mut ahead = (target_idx - today_idx).rem_euclid(7);
        if ahead == 0 && time <= now_time {
            ahead = 7;
        }
        ahead
    };
    let most_recent = |strict: bool| {
        let mut back = (today_idx - target_idx).rem_euclid(7);
        if back == 0 && (strict || time > now_time) {
            back = 7;
        }
        back
    };

    match (qualifier, preference) {
        (Some("last"), _) => today.checked_sub_days(Days::new(most_recent(true) as u64)),
        (Some("next"), _) => today.checked_add_days(Days::new(nearest_ahead() as u64 + 7)),
        (Some("this"), _) | (_, Preference::Future) => {
            today.checked_add_days(Days::new(nearest_ahead() as u64))
        }
        (_, Preference::Past) => today.checked_sub_days(Days::new(most_recent(false) as u64)),
    }
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Builds a day-month date, choosing the year from `preference` when absent.
fn named_date(
    day: u32,
    month: u32,
    year: Option<i32>,
    today: NaiveDate,
    preference: Preference,
) -> Option<NaiveDate> {
    if let Some(year) = year {
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    let candidate = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    match preference {
        Preference::Future if candidate < today => {
            NaiveDate::from_ymd_opt(today.year() + 1, month, day)
        }
        Preference::Past if candidate > today => {
            NaiveDate::from_ymd_opt(today.year() - 1, month, day)
        }
        _ => Some(candidate),
    }
}
