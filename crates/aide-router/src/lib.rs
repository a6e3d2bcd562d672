// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request routing for the Aide assistant.
//!
//! This crate provides:
//! - [`is_exit`]: exit-keyword detection, checked before anything else
//! - [`Classifier`]: the ordered rule list that turns text into an
//!   [`ActionRequest`](aide_core::ActionRequest)
//! - [`extract`]: pure field extractors used by the rules
//! - [`events`] and [`travel`]: the calendar and flight sub-grammars

pub mod classifier;
pub mod events;
pub mod exit;
pub mod extract;
pub mod travel;

pub use classifier::{Classifier, MailDefaults};
pub use exit::{is_exit, EXIT_KEYWORDS};
