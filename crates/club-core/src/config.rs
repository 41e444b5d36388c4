//! Fixed parameters of a club day.

use std::num::NonZeroU32;

use serde::Serialize;
use thiserror::Error;

use crate::time::TimeOfDay;
use crate::types::TableNumber;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("number of tables must be positive")]
    NoTables,

    #[error("hourly rate must be positive")]
    FreeOfCharge,

    #[error("opening time {open} must be before closing time {close}")]
    HoursInverted { open: TimeOfDay, close: TimeOfDay },
}

/// Table count, opening hours and hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClubConfig {
    tables: NonZeroU32,
    open: TimeOfDay,
    close: TimeOfDay,
    hourly_rate: NonZeroU32,
}

impl ClubConfig {
    pub fn new(
        tables: u32,
        open: TimeOfDay,
        close: TimeOfDay,
        hourly_rate: u32,
    ) -> Result<Self, ConfigError> {
        let tables = NonZeroU32::new(tables).ok_or(ConfigError::NoTables)?;
        let hourly_rate = NonZeroU32::new(hourly_rate).ok_or(ConfigError::FreeOfCharge)?;
        if open >= close {
            return Err(ConfigError::HoursInverted { open, close });
        }
        Ok(Self {
            tables,
            open,
            close,
            hourly_rate,
        })
    }

    #[must_use]
    pub const fn tables(&self) -> u32 {
        self.tables.get()
    }

    #[must_use]
    pub const fn open(&self) -> TimeOfDay {
        self.open
    }

    #[must_use]
    pub const fn close(&self) -> TimeOfDay {
        self.close
    }

    #[must_use]
    pub const fn hourly_rate(&self) -> u32 {
        self.hourly_rate.get()
    }

    /// Whether an arrival at `time` falls inside `[open, close)`.
    #[must_use]
    pub fn is_open_at(&self, time: TimeOfDay) -> bool {
        self.open <= time && time < self.close
    }

    /// Resolves a raw table number against the table count.
    #[must_use]
    pub fn table(&self, number: i64) -> Option<TableNumber> {
        let number = u32::try_from(number).ok()?;
        if number > self.tables() {
            return None;
        }
        TableNumber::new(number).ok()
    }
}
