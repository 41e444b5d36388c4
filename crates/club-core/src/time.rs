//! Time-of-day values with wrapping minute arithmetic.
//!
//! A [`TimeOfDay`] doubles as a duration: subtracting two clock readings gives
//! the elapsed time between them, wrapping forward across midnight.

use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// Errors produced when building or parsing a [`TimeOfDay`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The text is not in strict `HH:MM` form.
    #[error("invalid time format {input:?}, expected HH:MM")]
    Format { input: String },

    /// Hours or minutes are outside the clock range.
    #[error("time out of range: {hours}:{minutes}")]
    OutOfRange { hours: u32, minutes: u32 },
}

/// Minutes since midnight, always in `0..1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight, also the zero duration.
    pub const MIDNIGHT: Self = Self(0);

    /// Creates a time from hours and minutes.
    pub const fn from_hm(hours: u32, minutes: u32) -> Result<Self, TimeError> {
        if hours >= 24 || minutes >= 60 {
            return Err(TimeError::OutOfRange { hours, minutes });
        }
        #[expect(clippy::cast_possible_truncation, reason = "bounded by range check")]
        let total = (hours * 60 + minutes) as u16;
        Ok(Self(total))
    }

    /// Creates a time from a minute count, wrapping at midnight.
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Self {
        #[expect(clippy::cast_possible_truncation, reason = "remainder fits in u16")]
        let wrapped = (minutes % MINUTES_PER_DAY as u32) as u16;
        Self(wrapped)
    }

    /// Total minutes since midnight.
    #[must_use]
    pub const fn as_minutes(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn hour(self) -> u16 {
        self.0 / MINUTES_PER_HOUR
    }

    #[must_use]
    pub const fn minute(self) -> u16 {
        self.0 % MINUTES_PER_HOUR
    }

    /// Whole hours needed to cover this duration, counting any started hour.
    #[must_use]
    pub const fn started_hours(self) -> u16 {
        self.0.div_ceil(MINUTES_PER_HOUR)
    }
}

impl Add for TimeOfDay {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_minutes(u32::from(self.0) + u32::from(rhs.0))
    }
}

impl AddAssign for TimeOfDay {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for TimeOfDay {
    type Output = Self;

    /// Elapsed time from `rhs` to `self`; never negative.
    fn sub(self, rhs: Self) -> Self {
        Self::from_minutes(u32::from(self.0) + u32::from(MINUTES_PER_DAY) - u32::from(rhs.0))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 2 || b.is_ascii_digit());
        if !well_formed {
            return Err(TimeError::Format {
                input: s.to_string(),
            });
        }

        let time = NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| TimeError::OutOfRange {
            hours: s[..2].parse().unwrap_or_default(),
            minutes: s[3..].parse().unwrap_or_default(),
        })?;
        Self::from_hm(time.hour(), time.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
