//! Command-line interface definitions for Influencer Census.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use crate::batch::DEFAULT_CONCURRENCY;
use clap::Parser;

/// Command-line arguments for the Influencer Census application.
///
/// This struct defines all configuration options that can be passed to the
/// application at runtime. Options include the roster file, extraction rules,
/// output sinks, and fetch tuning.
///
/// # Examples
///
/// ```sh
/// # Scrape the default roster and print the table
/// influencer_census
///
/// # Custom roster, CSV and JSON outputs
/// influencer_census -i channels.txt --csv-out census.csv --json-out census.json
///
/// # Site-specific extraction rules and a wider fetch window
/// influencer_census -r rules.yaml --concurrency 24 --timeout-secs 60
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Roster file with one profile URL per line
    #[arg(short, long, default_value = "influencers.txt")]
    pub input: String,

    /// Optional path to a YAML rules file overriding the built-in selectors
    #[arg(short, long)]
    pub rules: Option<String>,

    /// Write the census as CSV to this path
    #[arg(long)]
    pub csv_out: Option<String>,

    /// Write the census as a JSON report to this path
    #[arg(long)]
    pub json_out: Option<String>,

    /// Print the census table to stdout even when file sinks are given
    #[arg(short, long)]
    pub print: bool,

    /// How many profiles to fetch at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}
