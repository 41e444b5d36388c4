//! Core domain logic for the computer club day replay.
//!
//! This crate contains the fundamental types and logic for:
//! - Replay: the club state machine that seats, queues and bills clients
//! - Parsing: reading a day's header and events from text
//! - Reporting: the trace and per-table totals of a finished day

mod club;
pub mod config;
pub mod error;
pub mod event;
pub mod parse;
mod report;
pub mod table;
pub mod time;
pub mod types;

pub use club::{ClubState, Seat};
pub use config::ClubConfig;
pub use error::ClubError;
pub use event::{Event, EventKind};
pub use parse::{ParseError, Schedule, parse_schedule};
pub use report::{DayReport, TableSummary};
pub use time::TimeOfDay;
pub use types::{ClientName, TableNumber};
