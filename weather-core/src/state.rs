//! Caller-side lookup state.
//!
//! `Idle -> Loading -> Success | Failure`, re-entering `Loading` on every new
//! request. Each request gets a [`RequestTicket`]; a result only lands if its
//! ticket is still the latest, so a slow response can never overwrite a newer
//! one.

use chrono::{DateTime, Utc};

use crate::{error::LookupError, model::WeatherSnapshot};

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Idle,
    Loading,
    Success {
        snapshot: WeatherSnapshot,
        received_at: DateTime<Utc>,
    },
    Failure(LookupError),
}

#[derive(Debug, Clone)]
pub struct DisplayState {
    state: LookupState,
    latest: u64,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self {
            state: LookupState::Idle,
            latest: 0,
        }
    }

    pub fn current(&self) -> &LookupState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LookupState::Loading)
    }

    /// Latest snapshot, if the last settled request succeeded.
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match &self.state {
            LookupState::Success { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    /// Enter `Loading` for a new request, superseding any in flight.
    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        self.state = LookupState::Loading;
        RequestTicket(self.latest)
    }

    /// Settle the request identified by `ticket`.
    ///
    /// Returns false and leaves the state untouched when `ticket` has been
    /// superseded.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<WeatherSnapshot, LookupError>,
    ) -> bool {
        self.resolve_at(ticket, result, Utc::now())
    }

    fn resolve_at(
        &mut self,
        ticket: RequestTicket,
        result: Result<WeatherSnapshot, LookupError>,
        now: DateTime<Utc>,
    ) -> bool {
        if ticket.0 != self.latest || !self.is_loading() {
            tracing::debug!(ticket = ticket.0, latest = self.latest, "discarding stale lookup result");
            return false;
        }

        self.state = match result {
            Ok(snapshot) => LookupState::Success {
                snapshot,
                received_at: now,
            },
            Err(err) => LookupState::Failure(err),
        };
        true
    }
}
