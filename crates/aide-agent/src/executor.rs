// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action execution against the injected collaborators.
//!
//! The executor owns the draft state machine: a session with no draft moves
//! to draft-pending on compose or reply, stays there across edits and failed
//! sends, and returns to no-draft on a successful send or a cancel.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use chrono::{
    DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveTime, TimeZone, Utc,
};
use futures::future::join_all;
use regex::Regex;
use tracing::{debug, info, warn};

use aide_core::types::{
    CalendarEvent, DraftChange, EventTarget, FlightQuery, HolidayMonth, HolidayRegion,
    HolidayEntry, NewEvent, OutgoingMail, RecordRef,
};
use aide_core::{
    ActionRequest, ActionResult, AideError, Attachment, AttachmentStaging, CalendarStore,
    Category, Draft, FlightSearch, MailRecord, MailStore, MemoryStore, SessionState,
    TextGenerator, ViewedRecord,
};
use aide_router::extract::{is_valid_address, ADDRESS_PATTERN};

use crate::compose::Composer;
use crate::settings::AgentSettings;

static BCC_EDIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)(?:add bcc|bcc:)\s*({ADDRESS_PATTERN})")).unwrap());
static CC_EDIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)(?:add cc|cc:)\s*({ADDRESS_PATTERN})")).unwrap());
static RECIPIENT_EDIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*change (?:the )?recipient to\s+(\S+)\s*$").unwrap()
});
static SUBJECT_EDIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*change (?:the )?subject to\s+(.+?)\s*$").unwrap());
/// Trailing zone comment some mail systems append, e.g. ` (UTC)`.
static DATE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").unwrap());

const CHAT_SYSTEM_PROMPT: &str = "You can use tools like travel search, calendar, and email. \
For emails, you can read, compose, reply, send, and edit emails. \
Parse user requests and provide structured responses. \
If a tool fails (e.g., city not found), fall back to providing helpful suggestions, airline options, websites, or sample flights.";

/// The external systems an [`Executor`] talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub mail: Arc<dyn MailStore>,
    pub calendar: Arc<dyn CalendarStore>,
    pub generator: Arc<dyn TextGenerator>,
    /// Similarity memory for freeform chat. `None` disables recall.
    pub memory: Option<Arc<dyn MemoryStore>>,
    pub flights: Arc<dyn FlightSearch>,
    pub staging: Arc<dyn AttachmentStaging>,
}

/// Executes classified requests and mutates the session accordingly.
pub struct Executor {
    collaborators: Collaborators,
    composer: Composer,
    settings: AgentSettings,
}

impl Executor {
    pub fn new(collaborators: Collaborators, settings: AgentSettings) -> Self {
        let composer = Composer::new(collaborators.generator.clone(), settings.signer.clone());
        Self {
            collaborators,
            composer,
            settings,
        }
    }

    /// Runs one request. Errors are returned for the caller to render as failures.
    pub async fn execute(
        &self,
        request: ActionRequest,
        state: &mut SessionState,
        now: DateTime<Utc>,
    ) -> Result<ActionResult, AideError> {
        match request {
            ActionRequest::ReadRecords { count, category } => {
                let records = self.collaborators.mail.list_by_category(count, category).await?;
                state.last_listed = records.clone();
                Ok(ActionResult::RecordList { category, records })
            }
            ActionRequest::ReadRecordsInRange { start, end } => {
                self.read_range(start, end, state).await
            }
            ActionRequest::ViewRecord { target } => self.view_record(target, state).await,
            ActionRequest::Compose {
                to,
                subject,
                context,
                cc,
                bcc,
                attachments,
            } => {
                let to = to.ok_or_else(|| {
                    AideError::ValidationFailed("Please specify recipient email address.".into())
                })?;
                let body = self.composer.compose(&subject, &context, &attachments).await;
                let draft = Draft {
                    to,
                    cc,
                    bcc,
                    subject,
                    body,
                    attachments,
                    created_at: now,
                    is_reply: false,
                    reply_source_id: None,
                };
                info!(attachments = draft.attachments.len(), "draft created");
                self.replace_draft(state, draft.clone()).await;
                Ok(ActionResult::DraftCreated { draft })
            }
            ActionRequest::Reply { context } => self.reply(&context, state, now).await,
            ActionRequest::Confirm { accepted } => self.confirm(accepted, state).await,
            ActionRequest::Edit { instruction } => self.edit(&instruction, state).await,
            ActionRequest::TranslateRecord {
                index,
                target_language,
            } => self.translate(index, &target_language, state).await,
            ActionRequest::ScheduleEvent {
                title,
                start,
                attendees,
                ..
            } => {
                let event = self
                    .collaborators
                    .calendar
                    .create_event(NewEvent {
                        title,
                        start_utc: start.with_timezone(&Utc),
                        duration_minutes: self.settings.event_minutes,
                        attendees,
                    })
                    .await?;
                Ok(ActionResult::EventCreated { event })
            }
            ActionRequest::DeleteEvent { target } => self.delete_event(target).await,
            ActionRequest::DeleteAllEvents => {
                let deleted = self.collaborators.calendar.delete_all_upcoming().await?;
                info!(deleted, "cleared upcoming events");
                Ok(ActionResult::EventsCleared { deleted })
            }
            ActionRequest::ListEvents => {
                let events = self
                    .collaborators
                    .calendar
                    .list_upcoming(self.settings.list_max)
                    .await?;
                Ok(ActionResult::EventList { events })
            }
            ActionRequest::ListHolidays { month } => self.list_holidays(month, now).await,
            ActionRequest::SearchFlights { query } => self.search_flights(query).await,
            ActionRequest::FreeformChat { text } => self.chat(&text).await,
        }
    }

    async fn read_range(
        &self,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        state: &mut SessionState,
    ) -> Result<ActionResult, AideError> {
        let scanned = self
            .collaborators
            .mail
            .list_by_category(self.settings.range_scan, Category::Primary)
            .await?;
        let total = scanned.len();
        let records: Vec<MailRecord> = scanned
            .into_iter()
            .filter(|record| match parse_mail_date(&record.date) {
                Some(at) => at >= start && at <= end,
                None => {
                    debug!(id = %record.id, date = %record.date, "skipping record with unparseable date");
                    false
                }
            })
            .collect();
        debug!(scanned = total, kept = records.len(), "range scan complete");
        state.last_listed = records.clone();
        Ok(ActionResult::RecordRange {
            start: start.date_naive(),
            end: end.date_naive(),
            records,
        })
    }

    async fn view_record(
        &self,
        target: Option<RecordRef>,
        state: &mut SessionState,
    ) -> Result<ActionResult, AideError> {
        let record: ViewedRecord = match target {
            Some(RecordRef::Index(index)) => {
                let id = cached(state, index)?.id.clone();
                self.collaborators.mail.get_by_id(&id).await?.into()
            }
            Some(RecordRef::Id(id)) => self.collaborators.mail.get_by_id(&id).await?.into(),
            None => match (&state.viewed, state.last_listed.as_slice()) {
                (Some(viewed), _) => viewed.clone(),
                (None, [only]) => {
                    let id = only.id.clone();
                    self.collaborators.mail.get_by_id(&id).await?.into()
                }
                _ => {
                    return Err(AideError::RecordNotFound(
                        "Please specify an email number (e.g., 'email 1 details')".into(),
                    ));
                }
            },
        };
        state.viewed = Some(record.clone());
        Ok(ActionResult::RecordDetail { record })
    }

    async fn reply(
        &self,
        context: &str,
        state: &mut SessionState,
        now: DateTime<Utc>,
    ) -> Result<ActionResult, AideError> {
        let viewed = state.viewed.clone().ok_or_else(|| {
            AideError::RecordNotFound(
                "No email selected to reply to. Please view an email first.".into(),
            )
        })?;
        let subject = if viewed.subject.starts_with("Re:") {
            viewed.subject.clone()
        } else {
            format!("Re: {}", viewed.subject)
        };
        let body = self.composer.reply(&viewed, &subject, context).await;
        let draft = Draft {
            to: viewed.sender.clone(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject,
            body,
            attachments: Vec::new(),
            created_at: now,
            is_reply: true,
            reply_source_id: Some(viewed.id.clone()),
        };
        self.replace_draft(state, draft.clone()).await;
        Ok(ActionResult::DraftCreated { draft })
    }

    async fn confirm(
        &self,
        accepted: bool,
        state: &mut SessionState,
    ) -> Result<ActionResult, AideError> {
        let verb = if accepted { "send" } else { "cancel" };
        let Some(draft) = state.draft.as_ref() else {
            return Err(AideError::NoActiveDraft(verb.into()));
        };

        if !accepted {
            if let Some(draft) = state.draft.take() {
                self.release_all(&draft.attachments).await;
            }
            info!("draft cancelled");
            return Ok(ActionResult::DraftCancelled);
        }

        let receipt = self
            .collaborators
            .mail
            .send(OutgoingMail::from(draft))
            .await
            .map_err(|e| AideError::collaborator_with(format!("Failed to send email: {e}"), e))?;

        let Some(sent) = state.draft.take() else {
            return Err(AideError::NoActiveDraft(verb.into()));
        };
        info!(message_id = %receipt.message_id, attachments = sent.attachments.len(), "message sent");
        self.release_all(&sent.attachments).await;
        Ok(ActionResult::MessageSent {
            receipt,
            to: sent.to,
            cc: sent.cc,
            bcc: sent.bcc,
            attachment_count: sent.attachments.len(),
        })
    }

    async fn edit(
        &self,
        instruction: &str,
        state: &mut SessionState,
    ) -> Result<ActionResult, AideError> {
        let Some(draft) = state.draft.as_mut() else {
            return Err(AideError::NoActiveDraft("edit".into()));
        };
        let lower = instruction.to_lowercase();

        let change = if lower.contains("add bcc") || lower.contains("bcc:") {
            let address = capture(&BCC_EDIT, instruction).ok_or_else(|| {
                AideError::ValidationFailed("Please provide a valid email address for BCC.".into())
            })?;
            if draft.add_bcc(&address) {
                DraftChange::BccAdded(address)
            } else {
                DraftChange::BccAlreadyPresent(address)
            }
        } else if lower.contains("add cc") || lower.contains("cc:") {
            let address = capture(&CC_EDIT, instruction).ok_or_else(|| {
                AideError::ValidationFailed("Please provide a valid email address for CC.".into())
            })?;
            if draft.add_cc(&address) {
                DraftChange::CcAdded(address)
            } else {
                DraftChange::CcAlreadyPresent(address)
            }
        } else if let Some(address) = capture(&RECIPIENT_EDIT, instruction) {
            if !is_valid_address(&address) {
                return Err(AideError::ValidationFailed(
                    "Please provide a valid email address for the recipient.".into(),
                ));
            }
            draft.to = address.clone();
            DraftChange::RecipientChanged(address)
        } else if let Some(subject) = capture(&SUBJECT_EDIT, instruction) {
            draft.subject = subject.clone();
            DraftChange::SubjectChanged(subject)
        } else {
            draft.body = self.composer.rewrite(draft, instruction).await?;
            DraftChange::ContentRewritten
        };

        debug!(?change, "draft edited");
        Ok(ActionResult::DraftUpdated {
            draft: draft.clone(),
            change,
        })
    }

    async fn translate(
        &self,
        index: usize,
        language: &str,
        state: &mut SessionState,
    ) -> Result<ActionResult, AideError> {
        if state.last_listed.len() < index {
            let fetch = self.settings.translate_fetch.max(index);
            state.last_listed = self
                .collaborators
                .mail
                .list_by_category(fetch, Category::Primary)
                .await?;
        }
        let record = cached(state, index)?.clone();
        let translated = self
            .collaborators
            .generator
            .translate(&record.body, language)
            .await
            .map_err(|e| AideError::collaborator_with(format!("Translation failed: {e}"), e))?;
        Ok(ActionResult::TranslatedRecord {
            record,
            language: language.to_string(),
            translated,
        })
    }

    async fn delete_event(&self, target: EventTarget) -> Result<ActionResult, AideError> {
        let calendar = &self.collaborators.calendar;
        let id = match target {
            EventTarget::Id(id) => id,
            EventTarget::Title(title) => {
                let upcoming = calendar.list_upcoming(self.settings.lookup_window).await?;
                match_title(&upcoming, &title)
                    .map(|event| event.id.clone())
                    .ok_or_else(|| {
                        AideError::RecordNotFound(format!(
                            "No upcoming event titled '{title}' was found."
                        ))
                    })?
            }
            EventTarget::Time(at) => {
                let upcoming = calendar.list_upcoming(self.settings.lookup_window).await?;
                upcoming
                    .iter()
                    .find(|event| event.start == at)
                    .map(|event| event.id.clone())
                    .ok_or_else(|| {
                        AideError::RecordNotFound(format!(
                            "No upcoming event found at {}.",
                            at.format("%d %B %Y, %I:%M %p")
                        ))
                    })?
            }
        };
        calendar.delete_event(&id).await?;
        info!(event_id = %id, "event deleted");
        Ok(ActionResult::EventDeleted { id })
    }

    async fn list_holidays(
        &self,
        month: HolidayMonth,
        now: DateTime<Utc>,
    ) -> Result<ActionResult, AideError> {
        let offset = self.settings.offset;
        let today = now.with_timezone(&offset).date_naive();
        let next_first = first_of_following_month(today)?;
        let (start, end, label_month) = match month {
            HolidayMonth::Current => (now, local_midnight(next_first, offset)?, today),
            HolidayMonth::Next => {
                let after = first_of_following_month(next_first)?;
                (
                    local_midnight(next_first, offset)?,
                    local_midnight(after, offset)?,
                    next_first,
                )
            }
        };

        let calendars = self.collaborators.calendar.list_holiday_calendars().await?;
        let mut regions: Vec<HolidayRegion> = Vec::new();
        for calendar in calendars {
            let name = calendar.name.to_lowercase();
            if !name.contains("holiday") {
                continue;
            }
            let region = if name.contains("india") {
                "India".to_string()
            } else {
                calendar.name.clone()
            };
            let events = self
                .collaborators
                .calendar
                .list_events_in_range(&calendar.id, start, end)
                .await?;
            let holidays = events.into_iter().map(|event| HolidayEntry {
                date: event.start.with_timezone(&offset).date_naive(),
                title: event.title,
            });
            match regions.iter_mut().find(|r| r.region == region) {
                Some(existing) => existing.holidays.extend(holidays),
                None => regions.push(HolidayRegion {
                    region,
                    holidays: holidays.collect(),
                }),
            }
        }

        if regions.is_empty() {
            return Err(AideError::RecordNotFound(
                "No holiday calendars found. Make sure you are subscribed to them.".into(),
            ));
        }
        regions.retain(|r| !r.holidays.is_empty());
        for region in &mut regions {
            region.holidays.sort_by_key(|h| h.date);
        }

        Ok(ActionResult::HolidayList {
            month,
            label: label_month.format("%B %Y").to_string(),
            regions,
        })
    }

    async fn search_flights(&self, query: FlightQuery) -> Result<ActionResult, AideError> {
        let options = self.collaborators.flights.search(&query).await?;
        info!(
            origin = %query.origin_code,
            destination = %query.destination_code,
            date = %query.date,
            results = options.len(),
            "flight search complete"
        );
        Ok(ActionResult::FlightList { query, options })
    }

    async fn chat(&self, text: &str) -> Result<ActionResult, AideError> {
        let context = match &self.collaborators.memory {
            Some(memory) => match memory.search(text, self.settings.memory_top_k).await {
                Ok(hits) => hits
                    .into_iter()
                    .map(|hit| hit.text)
                    .collect::<Vec<_>>()
                    .join("\n"),
                Err(e) => {
                    warn!(error = %e, "memory search failed, continuing without context");
                    String::new()
                }
            },
            None => String::new(),
        };

        let system = format!(
            "You are a helpful assistant named {}. {CHAT_SYSTEM_PROMPT}",
            self.settings.agent_name
        );
        let user = format!("Context:\n{context}\n\nQuery: {text}");
        let reply = self.collaborators.generator.generate(&system, &user).await?;

        if let Some(memory) = &self.collaborators.memory {
            for (role, content) in [("user", text), ("assistant", reply.as_str())] {
                let metadata = BTreeMap::from([
                    ("role".to_string(), role.to_string()),
                    ("agent".to_string(), self.settings.agent_name.clone()),
                ]);
                if let Err(e) = memory.store(content, metadata).await {
                    warn!(role, error = %e, "failed to store chat memory");
                }
            }
        }

        Ok(ActionResult::PlainText { text: reply })
    }

    /// Installs `draft`, releasing files held only by the draft it replaces.
    async fn replace_draft(&self, state: &mut SessionState, draft: Draft) {
        let dropped: Vec<Attachment> = state
            .draft
            .take()
            .map(|old| old.attachments)
            .unwrap_or_default()
            .into_iter()
            .filter(|a| !draft.attachments.contains(a))
            .collect();
        if !dropped.is_empty() {
            debug!(released = dropped.len(), "replaced draft held staged files");
            self.release_all(&dropped).await;
        }
        state.draft = Some(draft);
    }

    /// Releases staged files, logging failures.
    pub async fn release_all(&self, attachments: &[Attachment]) {
        let staging = &self.collaborators.staging;
        let results = join_all(attachments.iter().map(|a| staging.release(a))).await;
        for (attachment, result) in attachments.iter().zip(results) {
            if let Err(e) = result {
                warn!(name = %attachment.name, error = %e, "failed to release staged attachment");
            }
        }
    }
}

fn cached(state: &SessionState, index: usize) -> Result<&MailRecord, AideError> {
    index
        .checked_sub(1)
        .and_then(|i| state.last_listed.get(i))
        .ok_or_else(|| {
            AideError::RecordNotFound(format!("Email {index} not found. Please list emails first."))
        })
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn match_title<'a>(events: &'a [CalendarEvent], title: &str) -> Option<&'a CalendarEvent> {
    let wanted = title.trim().to_lowercase();
    events
        .iter()
        .find(|event| event.title.to_lowercase() == wanted)
        .or_else(|| {
            events
                .iter()
                .find(|event| event.title.to_lowercase().contains(&wanted))
        })
}

/// Parses an RFC 2822 date header, tolerating a trailing zone comment.
pub fn parse_mail_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = DATE_COMMENT.replace(raw.trim(), "");
    DateTime::parse_from_rfc2822(&trimmed).ok()
}

fn first_of_following_month(date: NaiveDate) -> Result<NaiveDate, AideError> {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .ok_or_else(|| AideError::Internal(format!("no month follows {date}")))
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> Result<DateTime<Utc>, AideError> {
    offset
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .single()
        .map(|at| at.with_timezone(&Utc))
        .ok_or_else(|| AideError::Internal(format!("cannot place midnight of {date}")))
}
