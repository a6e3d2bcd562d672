// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock calendar store backed by an in-memory event list.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use aide_core::types::{CalendarEvent, HolidayCalendar, NewEvent};
use aide_core::{AideError, CalendarStore, Collaborator, CollaboratorKind};

/// An in-memory calendar.
///
/// Created events get ids `evt-1`, `evt-2`, ... and keep the UTC offset of the
/// request. Holiday calendars hold their own events keyed by calendar id.
pub struct MockCalendar {
    events: Arc<Mutex<Vec<CalendarEvent>>>,
    holidays: Arc<Mutex<Vec<(HolidayCalendar, Vec<CalendarEvent>)>>>,
    created: Arc<Mutex<Vec<NewEvent>>>,
    next_id: Arc<Mutex<usize>>,
}

impl MockCalendar {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            holidays: Arc::new(Mutex::new(Vec::new())),
            created: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(0)),
        }
    }

    pub async fn add_event(&self, event: CalendarEvent) {
        self.events.lock().await.push(event);
    }

    pub async fn add_holiday_calendar(&self, calendar: HolidayCalendar, events: Vec<CalendarEvent>) {
        self.holidays.lock().await.push((calendar, events));
    }

    pub async fn events(&self) -> Vec<CalendarEvent> {
        self.events.lock().await.clone()
    }

    /// Every creation request received.
    pub async fn created(&self) -> Vec<NewEvent> {
        self.created.lock().await.clone()
    }
}

impl Default for MockCalendar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Collaborator for MockCalendar {
    fn name(&self) -> &str {
        "mock-calendar"
    }

    fn kind(&self) -> CollaboratorKind {
        CollaboratorKind::Calendar
    }
}

#[async_trait]
impl CalendarStore for MockCalendar {
    async fn create_event(&self, event: NewEvent) -> Result<CalendarEvent, AideError> {
        let id = {
            let mut next = self.next_id.lock().await;
            *next += 1;
            format!("evt-{next}")
        };
        let created = CalendarEvent {
            id,
            title: event.title.clone(),
            start: event.start_utc.fixed_offset(),
            attendees: event.attendees.clone(),
        };
        self.created.lock().await.push(event);
        self.events.lock().await.push(created.clone());
        Ok(created)
    }

    async fn list_upcoming(&self, max: usize) -> Result<Vec<CalendarEvent>, AideError> {
        let mut events = self.events.lock().await.clone();
        events.sort_by_key(|e| e.start);
        events.truncate(max);
        Ok(events)
    }

    async fn delete_event(&self, id: &str) -> Result<(), AideError> {
        let mut events = self.events.lock().await;
        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Err(AideError::collaborator(format!(
                "Failed to delete event: {id} not found"
            )));
        }
        Ok(())
    }

    async fn delete_all_upcoming(&self) -> Result<usize, AideError> {
        let mut events = self.events.lock().await;
        let deleted = events.len();
        events.clear();
        Ok(deleted)
    }

    async fn list_holiday_calendars(&self) -> Result<Vec<HolidayCalendar>, AideError> {
        Ok(self
            .holidays
            .lock()
            .await
            .iter()
            .map(|(calendar, _)| calendar.clone())
            .collect())
    }

    async fn list_events_in_range(
        &self,
        calendar_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, AideError> {
        let by_id: HashMap<String, Vec<CalendarEvent>> = self
            .holidays
            .lock()
            .await
            .iter()
            .map(|(calendar, events)| (calendar.id.clone(), events.clone()))
            .collect();
        Ok(by_id
            .get(calendar_id)
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.start >= start && e.start < end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
