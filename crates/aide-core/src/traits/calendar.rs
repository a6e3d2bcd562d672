// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AideError;
use crate::traits::collaborator::Collaborator;
use crate::types::{CalendarEvent, HolidayCalendar, NewEvent};

/// Creates, lists, and deletes events in the user's primary calendar and
/// reads subscribed holiday calendars.
#[async_trait]
pub trait CalendarStore: Collaborator {
    async fn create_event(&self, event: NewEvent) -> Result<CalendarEvent, AideError>;

    /// Upcoming events from now, ordered by start time.
    async fn list_upcoming(&self, max: usize) -> Result<Vec<CalendarEvent>, AideError>;

    async fn delete_event(&self, id: &str) -> Result<(), AideError>;

    /// Deletes every upcoming event and returns how many were removed.
    async fn delete_all_upcoming(&self) -> Result<usize, AideError>;

    async fn list_holiday_calendars(&self) -> Result<Vec<HolidayCalendar>, AideError>;

    /// Events of `calendar_id` starting in `[start, end)`.
    async fn list_events_in_range(
        &self,
        calendar_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, AideError>;
}
