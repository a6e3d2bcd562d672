// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! Every external system the assistant talks to is injected as a trait object
//! built once at start-up. All collaborators extend [`Collaborator`] and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod calendar;
pub mod clock;
pub mod collaborator;
pub mod generation;
pub mod mail;
pub mod memory;
pub mod session;
pub mod staging;
pub mod travel;

pub use calendar::CalendarStore;
pub use clock::{Clock, SystemClock};
pub use collaborator::Collaborator;
pub use generation::TextGenerator;
pub use mail::MailStore;
pub use memory::MemoryStore;
pub use session::SessionStore;
pub use staging::AttachmentStaging;
pub use travel::FlightSearch;
