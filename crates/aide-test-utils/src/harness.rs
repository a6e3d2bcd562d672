// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end turn testing.
//!
//! `TestHarness` assembles an [`Assistant`] over mock collaborators and an
//! in-memory session store. Provides `send()` to drive full turns in tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use aide_agent::{AgentSettings, Assistant, Collaborators, TurnInput, TurnOutput, WriteThroughStore};
use aide_core::{AideError, Attachment, MailRecord, MemoryStore, SessionId, SessionStore};

use crate::mock_calendar::MockCalendar;
use crate::mock_generator::MockGenerator;
use crate::mock_mail::MockMail;
use crate::mock_services::{FixedClock, MockFlights, MockMemory, RecordingStaging};

/// Wednesday 14 October 2026, 10:00 at +05:30.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, 4, 30, 0)
        .single()
        .unwrap_or_default()
}

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    records: Vec<MailRecord>,
    responses: Vec<String>,
    now: DateTime<Utc>,
    memory: Option<MockMemory>,
    durable: Option<Arc<dyn SessionStore>>,
    settings: AgentSettings,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            responses: Vec::new(),
            now: reference_now(),
            memory: Some(MockMemory::new()),
            durable: None,
            settings: AgentSettings::default(),
        }
    }

    /// Mailbox contents, newest first.
    pub fn with_records(mut self, records: Vec<MailRecord>) -> Self {
        self.records = records;
        self
    }

    /// Set mock generator responses.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Replace the memory mock, or disable memory with `None`.
    pub fn with_memory(mut self, memory: Option<MockMemory>) -> Self {
        self.memory = memory;
        self
    }

    /// Layer a durable session store under the in-memory one.
    pub fn with_durable_sessions(mut self, durable: Arc<dyn SessionStore>) -> Self {
        self.durable = Some(durable);
        self
    }

    pub fn with_settings(mut self, settings: AgentSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the test harness.
    pub fn build(self) -> TestHarness {
        let mail = Arc::new(MockMail::with_records(self.records));
        let calendar = Arc::new(MockCalendar::new());
        let generator = Arc::new(MockGenerator::with_responses(self.responses));
        let memory = self.memory.map(Arc::new);
        let flights = Arc::new(MockFlights::new());
        let staging = Arc::new(RecordingStaging::new());
        let sessions = Arc::new(WriteThroughStore::new(self.durable));

        let collaborators = Collaborators {
            mail: mail.clone(),
            calendar: calendar.clone(),
            generator: generator.clone(),
            memory: memory.clone().map(|m| m as Arc<dyn MemoryStore>),
            flights: flights.clone(),
            staging: staging.clone(),
        };
        let assistant = Assistant::new(
            collaborators,
            sessions.clone(),
            Arc::new(FixedClock(self.now)),
            self.settings,
        );

        TestHarness {
            assistant,
            mail,
            calendar,
            generator,
            memory,
            flights,
            staging,
            sessions,
            session_id: SessionId::from("test-session"),
        }
    }
}

/// A complete test environment with mock collaborators.
pub struct TestHarness {
    pub assistant: Assistant,
    pub mail: Arc<MockMail>,
    pub calendar: Arc<MockCalendar>,
    pub generator: Arc<MockGenerator>,
    pub memory: Option<Arc<MockMemory>>,
    pub flights: Arc<MockFlights>,
    pub staging: Arc<RecordingStaging>,
    pub sessions: Arc<WriteThroughStore>,
    /// Session used by [`TestHarness::send`].
    pub session_id: SessionId,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Runs one text turn in the default session.
    pub async fn send(&self, text: &str) -> Result<TurnOutput, AideError> {
        self.send_with(text, Vec::new()).await
    }

    /// Runs one turn with uploaded attachments.
    pub async fn send_with(
        &self,
        text: &str,
        attachments: Vec<Attachment>,
    ) -> Result<TurnOutput, AideError> {
        self.send_as(self.session_id.clone(), text, attachments).await
    }

    /// Runs one turn in an explicit session.
    pub async fn send_as(
        &self,
        session_id: SessionId,
        text: &str,
        attachments: Vec<Attachment>,
    ) -> Result<TurnOutput, AideError> {
        self.assistant
            .handle_turn(TurnInput {
                session_id,
                text: text.to_string(),
                attachments,
            })
            .await
    }

    /// Reply text of one turn, failing the test on a turn error.
    pub async fn reply(&self, text: &str) -> String {
        match self.send(text).await {
            Ok(output) => output.reply,
            Err(e) => panic!("turn '{text}' failed: {e}"),
        }
    }
}
