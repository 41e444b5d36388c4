//! Business-rule rejections.
//!
//! None of these stop a replay. Each one is written to the trace as an error
//! event whose body is the `Display` text below.

use thiserror::Error;

/// Why the club refused an event.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClubError {
    /// Arrival outside opening hours.
    #[error("NotOpenYet")]
    NotOpenYet,

    /// Arrival of a client who is already inside.
    #[error("YouShallNotPass")]
    YouShallNotPass,

    #[error("ClientUnknown")]
    ClientUnknown,

    /// The requested table has an occupant, possibly the same client.
    #[error("PlaceIsBusy")]
    PlaceIsBusy,

    /// Waiting was requested while a table is free.
    #[error("ICanWaitNoLonger!")]
    ICanWaitNoLonger,

    /// Waiting was requested by a client who already has a table.
    #[error("ClientAlreadySeated")]
    ClientAlreadySeated,

    /// Table number outside `1..=N`.
    #[error("InvalidTableNumber")]
    InvalidTableNumber,

    #[error("UnknownEventType")]
    UnknownEventType,

    /// The body lacks the fields the event type needs.
    #[error("MalformedEvent")]
    MalformedEvent,
}
