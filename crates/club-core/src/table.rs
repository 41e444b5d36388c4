//! Per-table occupancy and billing.

use crate::time::TimeOfDay;
use crate::types::ClientName;

/// An ongoing occupancy of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub client: ClientName,
    pub started_at: TimeOfDay,
}

/// What a finished session added to its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charge {
    pub elapsed: TimeOfDay,
    pub amount: u64,
}

/// Running state of one table over the day.
///
/// `total_occupied` and `revenue` only grow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    session: Option<Session>,
    total_occupied: TimeOfDay,
    revenue: u64,
}

impl Table {
    pub const fn is_occupied(&self) -> bool {
        self.session.is_some()
    }

    pub fn occupant(&self) -> Option<&ClientName> {
        self.session.as_ref().map(|s| &s.client)
    }

    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub const fn total_occupied(&self) -> TimeOfDay {
        self.total_occupied
    }

    pub const fn revenue(&self) -> u64 {
        self.revenue
    }

    /// Starts a session. The caller guarantees the table is free.
    pub(crate) fn seat(&mut self, client: ClientName, at: TimeOfDay) {
        debug_assert!(self.session.is_none(), "seating at an occupied table");
        self.session = Some(Session {
            client,
            started_at: at,
        });
    }

    /// Ends the current session at `at`, billing every started hour.
    ///
    /// Returns `None` when the table was already free.
    pub(crate) fn release(&mut self, at: TimeOfDay, hourly_rate: u32) -> Option<Charge> {
        let session = self.session.take()?;
        let elapsed = at - session.started_at;
        let amount = u64::from(elapsed.started_hours()) * u64::from(hourly_rate);

        self.total_occupied += elapsed;
        self.revenue += amount;
        Some(Charge { elapsed, amount })
    }
}
