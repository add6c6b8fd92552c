//! Input glue: the newline-delimited roster of profile URLs.
//!
//! One URL per line. Lines are trimmed and blank lines dropped; everything
//! else is kept verbatim and paired with its zero-based position, which
//! becomes the target's slot in the batch result. A line that does not even
//! parse as a URL is worth a warning at load time, but it stays in the
//! roster — it will fail at fetch time like any other bad target, keeping
//! failure handling in one place.

use crate::models::ScrapeTarget;
use std::io;
use tokio::fs;
use tracing::{info, instrument, warn};
use url::Url;

/// Split roster text into targets with contiguous indices `0..n`.
pub fn parse_roster(text: &str) -> Vec<ScrapeTarget> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, line)| {
            if Url::parse(line).is_err() {
                warn!(line = %line, index, "Roster line does not look like a URL");
            }
            ScrapeTarget::new(line, index)
        })
        .collect()
}

/// Read the roster file at `path` and parse it.
///
/// Failing to read the file is a whole-run error; a readable but empty
/// file is a valid roster of zero targets.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn load_roster(path: &str) -> Result<Vec<ScrapeTarget>, io::Error> {
    let text = fs::read_to_string(path).await?;
    let targets = parse_roster(&text);
    info!(count = targets.len(), "Loaded roster");
    Ok(targets)
}
