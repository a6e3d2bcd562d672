// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Aide integration tests.
//!
//! Provides mock collaborators and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockMail`] - Mailbox with captured sends and injectable failures
//! - [`MockCalendar`] - In-memory calendar with holiday calendars
//! - [`MockGenerator`] - Text generator with pre-configured responses
//! - [`TestHarness`] - An assistant wired to all of the above

pub mod harness;
pub mod mock_calendar;
pub mod mock_generator;
pub mod mock_mail;
pub mod mock_services;

pub use harness::{reference_now, TestHarness, TestHarnessBuilder};
pub use mock_calendar::MockCalendar;
pub use mock_generator::MockGenerator;
pub use mock_mail::{sample_record, MockMail};
pub use mock_services::{attachment, FixedClock, MockFlights, MockMemory, RecordingStaging};
