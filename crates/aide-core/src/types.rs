// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the classifier, executor, formatter, and collaborators.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::FailureKind;

/// Unique identifier for a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        SessionId(value.to_string())
    }
}

/// An uploaded file staged outside the core, referenced by `storage_ref`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
    /// Opaque handle understood by the staging collaborator (a temp file path).
    pub storage_ref: String,
}

/// An in-progress outgoing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub to: String,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub is_reply: bool,
    pub reply_source_id: Option<String>,
}

impl Draft {
    /// Appends `address` to the CC list unless it is already present.
    ///
    /// Returns `false` for a duplicate. Comparison is case-sensitive.
    pub fn add_cc(&mut self, address: &str) -> bool {
        push_unique(&mut self.cc, address)
    }

    /// Appends `address` to the BCC list unless it is already present.
    pub fn add_bcc(&mut self, address: &str) -> bool {
        push_unique(&mut self.bcc, address)
    }

    /// Sum of attachment sizes in bytes.
    pub fn total_attachment_bytes(&self) -> u64 {
        self.attachments.iter().map(|a| a.size_bytes).sum()
    }
}

fn push_unique(list: &mut Vec<String>, address: &str) -> bool {
    if list.iter().any(|existing| existing == address) {
        return false;
    }
    list.push(address.to_string());
    true
}

/// A message as returned by the mail store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailRecord {
    pub id: String,
    pub sender: String,
    pub subject: String,
    pub snippet: String,
    pub body: String,
    /// Raw origin-system date header.
    pub date: String,
}

/// The record the user is currently looking at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewedRecord {
    pub id: String,
    pub sender: String,
    pub subject: String,
    pub body: String,
    pub date: String,
}

impl From<MailRecord> for ViewedRecord {
    fn from(record: MailRecord) -> Self {
        ViewedRecord {
            id: record.id,
            sender: record.sender,
            subject: record.subject,
            body: record.body,
            date: record.date,
        }
    }
}

/// Who produced a history entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Speaker {
    #[strum(serialize = "You")]
    #[serde(rename = "You")]
    User,
    #[strum(serialize = "Agent")]
    #[serde(rename = "Agent")]
    Assistant,
}

/// One entry of session history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

/// Everything the assistant remembers about one conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub history: Vec<Turn>,
    pub draft: Option<Draft>,
    pub viewed: Option<ViewedRecord>,
    /// Records from the most recent listing, in display order.
    pub last_listed: Vec<MailRecord>,
    /// Attachments uploaded with the current turn.
    #[serde(default)]
    pub pending_attachments: Vec<Attachment>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_draft(&self) -> bool {
        self.draft.is_some()
    }

    pub fn push_turn(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.history.push(Turn {
            speaker,
            text: text.into(),
        });
    }

    /// Clears history, draft, viewed record, caches, and pending uploads.
    ///
    /// Returns the attachments that were held so the caller can release them.
    pub fn reset(&mut self) -> Vec<Attachment> {
        let mut released = std::mem::take(&mut self.pending_attachments);
        if let Some(draft) = self.draft.take() {
            for attachment in draft.attachments {
                if !released.contains(&attachment) {
                    released.push(attachment);
                }
            }
        }
        self.history.clear();
        self.viewed = None;
        self.last_listed.clear();
        released
    }
}

/// Closed set of mail folders/categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Primary,
    Personal,
    Social,
    Promotions,
    Updates,
    Forums,
    Sent,
    Spam,
    Trash,
    Drafts,
}

impl Category {
    /// Origin-system label id.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Primary => "INBOX",
            Category::Personal => "CATEGORY_PERSONAL",
            Category::Social => "CATEGORY_SOCIAL",
            Category::Promotions => "CATEGORY_PROMOTIONS",
            Category::Updates => "CATEGORY_UPDATES",
            Category::Forums => "CATEGORY_FORUMS",
            Category::Sent => "SENT",
            Category::Spam => "SPAM",
            Category::Trash => "TRASH",
            Category::Drafts => "DRAFT",
        }
    }

    /// User-facing name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Primary => "Primary Inbox",
            Category::Personal => "Personal",
            Category::Social => "Social",
            Category::Promotions => "Promotions",
            Category::Updates => "Updates",
            Category::Forums => "Forums",
            Category::Sent => "Sent",
            Category::Spam => "Spam",
            Category::Trash => "Trash",
            Category::Drafts => "Drafts",
        }
    }
}

/// How a detail request points at a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordRef {
    /// 1-based position in the last listing.
    Index(usize),
    /// Origin-system id.
    Id(String),
}

/// Which event a deletion refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTarget {
    Id(String),
    Title(String),
    Time(DateTime<FixedOffset>),
}

/// Month selector for holiday listings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HolidayMonth {
    Current,
    Next,
}

/// A resolved flight search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightQuery {
    pub origin_city: String,
    pub origin_code: String,
    pub destination_city: String,
    pub destination_code: String,
    pub date: NaiveDate,
}

/// Structured request produced by the intent classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRequest {
    ReadRecords {
        count: usize,
        category: Category,
    },
    ReadRecordsInRange {
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },
    ViewRecord {
        target: Option<RecordRef>,
    },
    Compose {
        to: Option<String>,
        subject: String,
        context: String,
        cc: Vec<String>,
        bcc: Vec<String>,
        attachments: Vec<Attachment>,
    },
    Reply {
        context: String,
    },
    Confirm {
        accepted: bool,
    },
    Edit {
        instruction: String,
    },
    TranslateRecord {
        index: usize,
        target_language: String,
    },
    ScheduleEvent {
        title: String,
        raw_time_text: String,
        start: DateTime<FixedOffset>,
        attendees: Vec<String>,
    },
    DeleteEvent {
        target: EventTarget,
    },
    DeleteAllEvents,
    ListEvents,
    ListHolidays {
        month: HolidayMonth,
    },
    SearchFlights {
        query: FlightQuery,
    },
    FreeformChat {
        text: String,
    },
}

/// Outgoing message handed to the mail store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMail {
    pub to: String,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<Attachment>,
}

impl From<&Draft> for OutgoingMail {
    fn from(draft: &Draft) -> Self {
        OutgoingMail {
            to: draft.to.clone(),
            cc: draft.cc.clone(),
            bcc: draft.bcc.clone(),
            subject: draft.subject.clone(),
            body: draft.body.clone(),
            attachments: draft.attachments.clone(),
        }
    }
}

/// Result of a successful send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    pub message_id: String,
}

/// Calendar event to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub start_utc: DateTime<Utc>,
    pub duration_minutes: i64,
    pub attendees: Vec<String>,
}

/// A calendar event as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    /// Start time in the configured local offset.
    pub start: DateTime<FixedOffset>,
    pub attendees: Vec<String>,
}

/// A subscribed calendar that publishes holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub title: String,
    pub date: NaiveDate,
}

/// Holidays of one region, in start order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRegion {
    pub region: String,
    pub holidays: Vec<HolidayEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportTime {
    pub name: String,
    pub code: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSegment {
    pub airline: String,
    pub flight_number: String,
    pub aircraft: String,
    pub departure: AirportTime,
    pub arrival: AirportTime,
    pub seat: String,
    pub legroom: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layover {
    pub city: String,
    pub airport_code: String,
    pub airport_name: String,
    pub duration_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub value: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emissions {
    pub grams: i64,
    pub difference_percent: i64,
}

/// One itinerary returned by the flight search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOption {
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub segments: Vec<FlightSegment>,
    pub price: Option<Price>,
    pub carry_on_bags: u32,
    pub checked_bags: u32,
    pub emissions: Option<Emissions>,
    pub layovers: Vec<Layover>,
}

/// A similarity-memory search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryHit {
    pub text: String,
    pub metadata: BTreeMap<String, String>,
    pub score: f32,
}

/// What an edit did to the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", content = "value", rename_all = "snake_case")]
pub enum DraftChange {
    ContentRewritten,
    CcAdded(String),
    CcAlreadyPresent(String),
    BccAdded(String),
    BccAlreadyPresent(String),
    RecipientChanged(String),
    SubjectChanged(String),
}

/// Normalized outcome of executing an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ActionResult {
    RecordList {
        category: Category,
        records: Vec<MailRecord>,
    },
    RecordRange {
        start: NaiveDate,
        end: NaiveDate,
        records: Vec<MailRecord>,
    },
    RecordDetail {
        record: ViewedRecord,
    },
    DraftCreated {
        draft: Draft,
    },
    DraftUpdated {
        draft: Draft,
        change: DraftChange,
    },
    MessageSent {
        receipt: SendReceipt,
        to: String,
        cc: Vec<String>,
        bcc: Vec<String>,
        attachment_count: usize,
    },
    DraftCancelled,
    EventCreated {
        event: CalendarEvent,
    },
    EventDeleted {
        id: String,
    },
    EventsCleared {
        deleted: usize,
    },
    EventList {
        events: Vec<CalendarEvent>,
    },
    HolidayList {
        month: HolidayMonth,
        /// Month name and year, e.g. `November 2026`.
        label: String,
        regions: Vec<HolidayRegion>,
    },
    TranslatedRecord {
        record: MailRecord,
        language: String,
        translated: String,
    },
    FlightList {
        query: FlightQuery,
        options: Vec<FlightOption>,
    },
    PlainText {
        text: String,
    },
    Failure {
        kind: FailureKind,
        reason: String,
    },
}

impl ActionResult {
    pub fn failure(err: &crate::error::AideError) -> Self {
        ActionResult::Failure {
            kind: err.kind(),
            reason: err.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ActionResult::Failure { .. })
    }
}

/// Health status reported by collaborator health checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Collaborator is fully operational.
    Healthy,
    /// Collaborator is operational but experiencing issues.
    Degraded(String),
    /// Collaborator is not operational.
    Unhealthy(String),
}

/// Identifies the role a collaborator plays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum CollaboratorKind {
    Mail,
    Calendar,
    TextGeneration,
    Memory,
    Travel,
    Staging,
    SessionStore,
}
