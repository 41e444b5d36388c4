//! Check command: validates an input file and summarizes it.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use club_core::{ClubConfig, Schedule};
use serde::Serialize;

use crate::{Config, OutputFormat};

/// What a valid input file contains.
#[derive(Debug, Serialize)]
pub struct Summary {
    #[serde(flatten)]
    pub config: ClubConfig,
    pub events: usize,
}

impl From<&Schedule> for Summary {
    fn from(schedule: &Schedule) -> Self {
        Self {
            config: schedule.config,
            events: schedule.events.len(),
        }
    }
}

pub fn run<W: Write>(writer: &mut W, path: &Path, config: &Config) -> Result<()> {
    let schedule = super::load_schedule(path, config)?;
    let summary = Summary::from(&schedule);

    match config.format {
        OutputFormat::Text => writeln!(
            writer,
            "ok: {} tables, open {}-{}, {} per hour, {} events",
            summary.config.tables(),
            summary.config.open(),
            summary.config.close(),
            summary.config.hourly_rate(),
            summary.events
        )?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, &summary)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
