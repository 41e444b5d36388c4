//! Input file parsing.
//!
//! The format is three header lines followed by one event per line:
//!
//! ```text
//! 3
//! 09:00 19:00
//! 10
//! 08:48 1 client1
//! 09:54 2 client1 1
//! ```
//!
//! Anything malformed here is fatal: the club never sees a schedule that
//! failed to parse.

use thiserror::Error;

use crate::config::{ClubConfig, ConfigError};
use crate::event::{Event, EventKind};
use crate::time::{TimeError, TimeOfDay};
use crate::types::{ClientName, ValidationError};

/// Highest event code accepted in input.
const MAX_EVENT_CODE: u8 = 13;

/// Why a particular line was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("invalid number of tables")]
    TableCount,

    #[error("invalid hourly rate")]
    HourlyRate,

    #[error("expected opening and closing time")]
    Hours,

    #[error(transparent)]
    Time(#[from] TimeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("expected <time> <code> [body]")]
    EventShape,

    #[error("invalid event code")]
    EventCode,

    #[error(transparent)]
    Client(#[from] ValidationError),

    #[error("missing client name")]
    MissingClient,

    #[error("invalid table number")]
    TableNumber,

    #[error("unexpected trailing input")]
    Trailing,

    #[error("event is earlier than the one before it")]
    OutOfOrder,
}

/// Structural errors in an input file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing {0}")]
    MissingHeader(&'static str),

    #[error("line {number}: {line}: {source}")]
    Line {
        number: usize,
        line: String,
        #[source]
        source: LineError,
    },
}

/// A parsed input file: the day's parameters and its events in file order.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub config: ClubConfig,
    pub events: Vec<Event>,
    /// 1-based source line of each event, parallel to `events`.
    lines: Vec<(usize, String)>,
}

impl Schedule {
    /// Rejects event lines whose time goes backwards.
    pub fn ensure_chronological(&self) -> Result<(), ParseError> {
        let mut last = TimeOfDay::MIDNIGHT;
        for (event, (number, line)) in self.events.iter().zip(&self.lines) {
            if event.time < last {
                return Err(ParseError::Line {
                    number: *number,
                    line: line.clone(),
                    source: LineError::OutOfOrder,
                });
            }
            last = event.time;
        }
        Ok(())
    }
}

/// Parses a complete input file.
pub fn parse_schedule(input: &str) -> Result<Schedule, ParseError> {
    let mut lines = input.lines().enumerate().map(|(i, line)| (i + 1, line));

    let (_, _, tables) = header(&mut lines, "number of tables", |line| {
        line.trim()
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or(LineError::TableCount)
    })?;

    let (hours_number, hours_line, (open, close)) =
        header(&mut lines, "opening and closing time", |line| {
            let (open, close) = line.trim_end().split_once(' ').ok_or(LineError::Hours)?;
            Ok((open.parse::<TimeOfDay>()?, close.parse::<TimeOfDay>()?))
        })?;

    let (_, _, rate) = header(&mut lines, "hourly rate", |line| {
        line.trim()
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or(LineError::HourlyRate)
    })?;

    let config = ClubConfig::new(tables, open, close, rate).map_err(|e| ParseError::Line {
        number: hours_number,
        line: hours_line.to_string(),
        source: e.into(),
    })?;

    let mut events = Vec::new();
    let mut sources = Vec::new();
    for (number, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let event = parse_event(line).map_err(|source| ParseError::Line {
            number,
            line: line.to_string(),
            source,
        })?;
        events.push(event);
        sources.push((number, line.to_string()));
    }

    tracing::debug!(tables, %open, %close, rate, events = events.len(), "parsed schedule");
    Ok(Schedule {
        config,
        events,
        lines: sources,
    })
}

/// Reads the next header line and applies `parse` to it.
fn header<'a, T>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    name: &'static str,
    parse: impl FnOnce(&str) -> Result<T, LineError>,
) -> Result<(usize, &'a str, T), ParseError> {
    let (number, line) = lines.next().ok_or(ParseError::MissingHeader(name))?;
    let value = parse(line).map_err(|source| ParseError::Line {
        number,
        line: line.to_string(),
        source,
    })?;
    Ok((number, line, value))
}

/// Parses `<HH:MM> <code> [body]`.
///
/// Codes 1-4 must carry a valid client name, and code 2 also an integer
/// table number. Other codes in range are accepted as-is; the club rejects
/// them when replayed.
pub fn parse_event(line: &str) -> Result<Event, LineError> {
    let line = line.trim();
    let (time, rest) = line.split_once(' ').ok_or(LineError::EventShape)?;
    let time: TimeOfDay = time.parse()?;

    let rest = rest.trim_start();
    let (code, body) = rest.split_once(' ').unwrap_or((rest, ""));
    let code: u8 = code
        .parse()
        .ok()
        .filter(|c| (1..=MAX_EVENT_CODE).contains(c))
        .ok_or(LineError::EventCode)?;
    let kind = EventKind::from_code(code);
    let body = body.trim();

    check_body(kind, body)?;
    Ok(Event::new(time, kind, body))
}

fn check_body(kind: EventKind, body: &str) -> Result<(), LineError> {
    let expects_table = match kind {
        EventKind::ClientSat => true,
        EventKind::ClientArrived | EventKind::ClientWaiting | EventKind::ClientLeft => false,
        _ => return Ok(()),
    };

    let mut tokens = body.split_whitespace();
    ClientName::new(tokens.next().ok_or(LineError::MissingClient)?)?;
    if expects_table {
        tokens
            .next()
            .and_then(|t| t.parse::<i64>().ok())
            .ok_or(LineError::TableNumber)?;
    }
    if tokens.next().is_some() {
        return Err(LineError::Trailing);
    }
    Ok(())
}
