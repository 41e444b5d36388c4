//! Event records: the replay input and every line of the output trace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ClubError;
use crate::time::TimeOfDay;
use crate::types::{ClientName, TableNumber};

/// What an event means.
///
/// Codes 1-4 arrive as input; 11-13 are produced by the club. The numeric
/// code only exists on the wire, see [`EventKind::code`] and
/// [`EventKind::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ClientArrived,
    ClientSat,
    ClientWaiting,
    ClientLeft,
    /// The club removed the client (full queue or closing time).
    ClientForcedOut,
    /// The head of the queue took a freed table.
    ClientPromoted,
    Error,
    /// A code with no meaning to the club. Echoed, then rejected.
    Unrecognized(u8),
}

impl EventKind {
    /// Decodes a wire code. Unknown codes are kept rather than refused so the
    /// club can echo and reject them.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::ClientArrived,
            2 => Self::ClientSat,
            3 => Self::ClientWaiting,
            4 => Self::ClientLeft,
            11 => Self::ClientForcedOut,
            12 => Self::ClientPromoted,
            13 => Self::Error,
            other => Self::Unrecognized(other),
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::ClientArrived => 1,
            Self::ClientSat => 2,
            Self::ClientWaiting => 3,
            Self::ClientLeft => 4,
            Self::ClientForcedOut => 11,
            Self::ClientPromoted => 12,
            Self::Error => 13,
            Self::Unrecognized(code) => code,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for EventKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u8::deserialize(deserializer).map(Self::from_code)
    }
}

/// A timestamped event as it appears in the input and in the trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub time: TimeOfDay,
    #[serde(rename = "code")]
    pub kind: EventKind,
    /// Payload exactly as read; client name and, for seating, a table number.
    pub body: String,
}

impl Event {
    pub fn new(time: TimeOfDay, kind: EventKind, body: impl Into<String>) -> Self {
        Self {
            time,
            kind,
            body: body.into(),
        }
    }

    pub(crate) fn forced_out(time: TimeOfDay, client: &ClientName) -> Self {
        Self::new(time, EventKind::ClientForcedOut, client.as_str())
    }

    pub(crate) fn promoted(time: TimeOfDay, client: &ClientName, table: TableNumber) -> Self {
        Self::new(time, EventKind::ClientPromoted, format!("{client} {table}"))
    }

    pub(crate) fn error(time: TimeOfDay, error: &ClubError) -> Self {
        Self::new(time, EventKind::Error, error.to_string())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time, self.kind)?;
        if !self.body.is_empty() {
            write!(f, " {}", self.body)?;
        }
        Ok(())
    }
}
