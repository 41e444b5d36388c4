//! Replay command: runs a whole day and prints the report.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use club_core::{ClubState, Schedule};

use crate::{Config, OutputFormat};

/// Replays every event of the schedule, then closes the day.
pub fn replay(schedule: Schedule) -> ClubState {
    let mut club = ClubState::new(schedule.config);
    for event in schedule.events {
        club.process_event(event);
    }
    club.end_of_day();
    club
}

/// Writes the report of a finished day in the requested format.
pub fn render<W: Write>(writer: &mut W, club: &ClubState, format: OutputFormat) -> Result<()> {
    let report = club.report();
    match format {
        OutputFormat::Text => write!(writer, "{report}")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &report)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

pub fn run<W: Write>(writer: &mut W, path: &Path, config: &Config, json: bool) -> Result<()> {
    let schedule = super::load_schedule(path, config)?;
    let club = replay(schedule);
    tracing::debug!(
        events = club.log().len(),
        revenue = club.report().total_revenue(),
        "day replayed"
    );

    let format = if json { OutputFormat::Json } else { config.format };
    render(writer, &club, format)
}
