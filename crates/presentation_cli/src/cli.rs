//! Command-line arguments

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};

/// Birthday calendar CLI
#[derive(Debug, Parser)]
#[command(name = "birthday-calendar")]
#[command(author, version, about = "Birthdays from a CardDAV address book", long_about = None)]
pub struct Cli {
    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./config.{toml,yaml,json} if present)
    #[arg(short, long, global = true, env = "BIRTHDAY_CALENDAR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List birthdays in a window
    ///
    /// Example: birthday-calendar events --from 2024-01-01T00:00:00Z --days 365
    Events {
        /// Window start as RFC 3339 timestamp (default: now)
        #[arg(long, value_parser = parse_rfc3339)]
        from: Option<DateTime<FixedOffset>>,

        /// Window length in days (default: calendar.days)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the next birthday within the configured horizon
    Next {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Refresh the next birthday periodically until interrupted
    Watch {
        /// Seconds between refreshes
        #[arg(long, default_value_t = 3600, value_parser = clap::value_parser!(u64).range(1..))]
        interval_secs: u64,
    },

    /// Check that the address book accepts the configured credentials
    Verify,
}

/// Log filter for a `-v` count, `None` to keep the configured filter
pub const fn log_filter_override(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn parse_rfc3339(value: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(value).map_err(|e| format!("expected RFC 3339 timestamp: {e}"))
}
