//! # Agent Radar
//!
//! A discovery pipeline that monitors public sources for new agent-related
//! developments and saves findings as JSON snapshots for manual review.
//!
//! ## Features
//!
//! - Scans GitHub repository search per configured agent topic
//! - Scans the arXiv Atom feed for recent agent papers in cs.AI/cs.LG/cs.CL
//! - Filters results through keyword relevance predicates
//! - Writes one timestamped snapshot file per run, never overwriting
//! - Analyzes the latest snapshot into a ranked console report
//!
//! ## Usage
//!
//! ```sh
//! agent_radar scan
//! agent_radar analyze
//! ```
//!
//! ## Architecture
//!
//! The scan follows a pipeline: each collector queries its source, maps raw
//! results to findings, and applies its relevance predicate; the store sorts
//! the combined findings and persists a snapshot. Requests are issued one at
//! a time, and a failing source degrades the run instead of aborting it.

use clap::Parser;
use reqwest::Client;
use std::error::Error;
use tracing::{error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analyze;
mod cli;
mod collectors;
mod filters;
mod models;
mod store;
mod utils;

use cli::{Cli, Command};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    match args.command {
        Command::Scan {
            output_dir,
            days_back,
        } => run_scan(&output_dir, days_back).await,
        Command::Analyze { output_dir } => analyze::run(&output_dir),
    }
}

/// Run the full discovery scan: both collectors, then the snapshot save.
async fn run_scan(output_dir: &str, days_back: i64) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    info!(days_back, "Starting agent discovery scan");

    // Early check: ensure the snapshot dir is writable before any requests
    if let Err(e) = ensure_writable_dir(output_dir).await {
        error!(
            path = %output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;

    let mut findings = collectors::github::scan_topics(
        &client,
        collectors::github::TOPICS,
        days_back,
    )
    .await;

    match collectors::arxiv::scan(&client, days_back).await {
        Ok(mut papers) => findings.append(&mut papers),
        Err(e) => {
            // GitHub findings are still worth saving on their own.
            warn!(error = %e, "Error scanning arXiv; continuing without papers");
        }
    }

    info!(count = findings.len(), "Discovery scan collected findings");
    store::save_findings(findings, output_dir).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        "Discovery scan complete"
    );
    Ok(())
}
