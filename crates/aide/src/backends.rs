// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stand-ins for collaborators that have no bundled or configured backend.
//!
//! Each one answers every call with a collaborator failure naming what is
//! missing, so the assistant keeps running and the user sees why an action
//! could not be carried out.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use aide_core::types::{
    CalendarEvent, FlightOption, FlightQuery, HolidayCalendar, NewEvent, OutgoingMail,
    SendReceipt,
};
use aide_core::{
    AideError, CalendarStore, Category, Collaborator, CollaboratorKind, FlightSearch,
    HealthStatus, MailRecord, MailStore, TextGenerator,
};

/// A collaborator role with no backend wired in.
#[derive(Debug, Clone)]
pub struct Unconfigured {
    kind: CollaboratorKind,
    hint: &'static str,
}

impl Unconfigured {
    pub fn mail() -> Self {
        Self {
            kind: CollaboratorKind::Mail,
            hint: "No mail backend is configured.",
        }
    }

    pub fn calendar() -> Self {
        Self {
            kind: CollaboratorKind::Calendar,
            hint: "No calendar backend is configured.",
        }
    }

    pub fn generator() -> Self {
        Self {
            kind: CollaboratorKind::TextGeneration,
            hint: "Text generation is not configured. Set generation.api_key or GROQ_API_KEY.",
        }
    }

    pub fn flights() -> Self {
        Self {
            kind: CollaboratorKind::Travel,
            hint: "Flight search is not configured. Set travel.api_key.",
        }
    }

    fn fail<T>(&self) -> Result<T, AideError> {
        Err(AideError::collaborator(self.hint))
    }
}

#[async_trait]
impl Collaborator for Unconfigured {
    fn name(&self) -> &str {
        "unconfigured"
    }

    fn kind(&self) -> CollaboratorKind {
        self.kind
    }

    async fn health_check(&self) -> Result<HealthStatus, AideError> {
        Ok(HealthStatus::Unhealthy(self.hint.to_string()))
    }
}

#[async_trait]
impl MailStore for Unconfigured {
    async fn list_by_category(
        &self,
        _count: usize,
        _category: Category,
    ) -> Result<Vec<MailRecord>, AideError> {
        self.fail()
    }

    async fn get_by_id(&self, _id: &str) -> Result<MailRecord, AideError> {
        self.fail()
    }

    async fn send(&self, _mail: OutgoingMail) -> Result<SendReceipt, AideError> {
        self.fail()
    }
}

#[async_trait]
impl CalendarStore for Unconfigured {
    async fn create_event(&self, _event: NewEvent) -> Result<CalendarEvent, AideError> {
        self.fail()
    }

    async fn list_upcoming(&self, _max: usize) -> Result<Vec<CalendarEvent>, AideError> {
        self.fail()
    }

    async fn delete_event(&self, _id: &str) -> Result<(), AideError> {
        self.fail()
    }

    async fn delete_all_upcoming(&self) -> Result<usize, AideError> {
        self.fail()
    }

    async fn list_holiday_calendars(&self) -> Result<Vec<HolidayCalendar>, AideError> {
        self.fail()
    }

    async fn list_events_in_range(
        &self,
        _calendar_id: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, AideError> {
        self.fail()
    }
}

#[async_trait]
impl TextGenerator for Unconfigured {
    async fn generate(&self, _system: &str, _user: &str) -> Result<String, AideError> {
        self.fail()
    }
}

#[async_trait]
impl FlightSearch for Unconfigured {
    async fn search(&self, _query: &FlightQuery) -> Result<Vec<FlightOption>, AideError> {
        self.fail()
    }
}
