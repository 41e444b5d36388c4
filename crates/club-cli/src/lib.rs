//! Computer club CLI library.
//!
//! This crate provides the CLI interface for replaying a club day.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::{Config, OutputFormat};
