//! Read-only projection of a finished day.

use std::fmt;

use serde::Serialize;

use crate::club::ClubState;
use crate::event::Event;
use crate::time::TimeOfDay;
use crate::types::TableNumber;

/// Totals for a single table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub number: TableNumber,
    pub revenue: u64,
    pub occupied: TimeOfDay,
}

/// Everything the output needs, borrowed from the club.
///
/// The text rendering is the `Display` impl: opening time, the trace,
/// closing time, then `<table> <revenue> <HH:MM>` per table.
#[derive(Debug, Clone, Serialize)]
pub struct DayReport<'a> {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
    pub events: &'a [Event],
    pub tables: Vec<TableSummary>,
}

impl<'a> DayReport<'a> {
    pub(crate) fn new(club: &'a ClubState) -> Self {
        let tables = club
            .tables()
            .map(|(number, table)| TableSummary {
                number,
                revenue: table.revenue(),
                occupied: table.total_occupied(),
            })
            .collect();

        Self {
            open: club.config().open(),
            close: club.config().close(),
            events: club.log(),
            tables,
        }
    }

    /// Sum of all table revenue.
    pub fn total_revenue(&self) -> u64 {
        self.tables.iter().map(|t| t.revenue).sum()
    }
}

impl fmt::Display for DayReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.open)?;
        for event in self.events {
            writeln!(f, "{event}")?;
        }
        writeln!(f, "{}", self.close)?;
        for table in &self.tables {
            writeln!(f, "{} {} {}", table.number, table.revenue, table.occupied)?;
        }
        Ok(())
    }
}
