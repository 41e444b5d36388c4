//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Computer club day replay.
///
/// Reads a day's events, replays them against the club's tables and queue,
/// and prints the full trace with per-table revenue.
#[derive(Debug, Parser)]
#[command(name = "club", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a day and print the trace and table totals.
    Replay {
        /// Input file with the header and event lines.
        file: PathBuf,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate an input file without replaying it.
    Check {
        /// Input file with the header and event lines.
        file: PathBuf,
    },
}
