//! Command-line interface definitions for Agent Radar.
//!
//! Two subcommands mirror the two halves of the tool: `scan` runs the
//! discovery pipeline and `analyze` reports on the latest saved snapshot.
//! Defaults encode the standing configuration, so both run with no
//! arguments.

use clap::{Parser, Subcommand};

/// Default directory where scan snapshots are written and read back.
pub const DEFAULT_OUTPUT_DIR: &str = "discovery_output";

/// Default lookback window in days.
pub const DEFAULT_DAYS_BACK: i64 = 7;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan GitHub and arXiv for new agent-related work and save a snapshot
    Scan {
        /// Directory for findings snapshots
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: String,

        /// How many days back to look for new items
        #[arg(short, long, default_value_t = DEFAULT_DAYS_BACK)]
        days_back: i64,
    },
    /// Analyze the most recent findings snapshot
    Analyze {
        /// Directory containing findings snapshots
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: String,
    },
}
