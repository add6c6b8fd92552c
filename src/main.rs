//! # Influencer Census
//!
//! A batch profile scraper that fetches a roster of influencer pages,
//! extracts each profile's display name and follower count via configurable
//! CSS rules, and writes the census as a console table, CSV, or JSON report.
//!
//! ## Features
//!
//! - Fetches many profile pages concurrently (12 at a time by default)
//! - Extraction rules are plain data: override the built-in Rutube selectors
//!   with a YAML file to point the tool at a differently shaped site
//! - One bad profile never spoils the batch: failures are logged and leave
//!   a gap, everything else comes through
//! - Results always line up with the roster order, no matter which fetches
//!   finish first
//!
//! ## Usage
//!
//! ```sh
//! influencer_census -i influencers.txt --csv-out census.csv
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Roster**: Read profile URLs, one per line, each tagged with its position
//! 2. **Fetching**: Download profile pages concurrently with a bounded limit
//! 3. **Extraction**: Apply the CSS rules to each page and normalize the fields
//! 4. **Output**: Render the order-preserving census to the selected sinks

use clap::Parser;
use itertools::Itertools;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod batch;
mod cli;
mod extract;
mod fetch;
mod models;
mod outputs;
mod roster;
mod utils;

use batch::BatchScraper;
use cli::Cli;
use extract::{ProfileExtractor, RuleSet};
use fetch::{FetcherConfig, HttpFetcher};
use outputs::{console, csv, json};
use roster::load_roster;

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

    let start_time = std::time::Instant::now();
    info!("influencer_census starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.input, ?args.concurrency, ?args.timeout_secs, "Parsed CLI arguments");

    // --- Extraction rules ---
    let rules = match args.rules {
        Some(ref path) => {
            let text = tokio::fs::read_to_string(path).await?;
            let rules: RuleSet = serde_yaml::from_str(&text)?;
            info!(path = %path, "Loaded extraction rules");
            rules
        }
        None => {
            debug!("Using built-in extraction rules");
            RuleSet::default()
        }
    };
    let extractor = ProfileExtractor::new(&rules)?;

    // --- Roster ---
    let targets = load_roster(&args.input).await?;
    info!(path = %args.input, count = targets.len(), "Roster loaded");
    if targets.is_empty() {
        warn!(path = %args.input, "Roster is empty; nothing to scrape");
    }

    // --- Scrape ---
    let fetcher = HttpFetcher::new(FetcherConfig {
        timeout: Duration::from_secs(args.timeout_secs),
        ..FetcherConfig::default()
    })?;
    let scraper = BatchScraper::new(fetcher, extractor).with_concurrency(args.concurrency);
    let result = scraper.scrape_batch(&targets).await;

    let succeeded = result.success_count();
    let failed = targets.len() - succeeded;
    info!(
        total = targets.len(),
        succeeded,
        failed,
        "Census complete"
    );
    if failed > 0 {
        let failed_urls = result
            .missing_indices()
            .map(|i| targets[i].url.as_str())
            .join(", ");
        warn!(%failed_urls, "Profiles that produced no record");
    }

    // --- Output sinks ---
    if let Some(ref path) = args.csv_out {
        if let Err(e) = csv::write_census_file(path, &result).await {
            error!(path = %path, error = %e, "Failed writing CSV");
        }
    }

    if let Some(ref path) = args.json_out {
        if let Err(e) = json::write_report(path, &result).await {
            error!(path = %path, error = %e, "Failed writing JSON report");
        }
    }

    if args.print || (args.csv_out.is_none() && args.json_out.is_none()) {
        print!("{}", console::render_table(&result));
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
