// SPDX-FileCopyrightText: 2026 Aide Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flight search trait.

use async_trait::async_trait;

use crate::error::AideError;
use crate::traits::collaborator::Collaborator;
use crate::types::{FlightOption, FlightQuery};

#[async_trait]
pub trait FlightSearch: Collaborator {
    /// One-way search for the resolved airports and date.
    async fn search(&self, query: &FlightQuery) -> Result<Vec<FlightOption>, AideError>;
}
