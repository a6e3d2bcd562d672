// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolvers that turn free text into concrete values.
//!
//! [`DateResolver`] maps phrases such as "next Friday at 2pm" to zoned
//! timestamps, and [`PlaceResolver`] maps city names (with common misspellings)
//! to airport codes.

pub mod datetime;
pub mod iata;
pub mod places;

pub use datetime::{DateResolver, Preference};
pub use places::{Place, PlaceResolver};
