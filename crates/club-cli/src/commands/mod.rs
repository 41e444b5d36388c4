//! CLI subcommand implementations.

pub mod check;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use club_core::{Schedule, parse_schedule};

use crate::Config;

/// Reads and parses an input file, applying the ordering check if configured.
pub(crate) fn load_schedule(path: &Path, config: &Config) -> Result<Schedule> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let schedule = parse_schedule(&input)?;
    if config.require_chronological {
        schedule.ensure_chronological()?;
    }
    Ok(schedule)
}
