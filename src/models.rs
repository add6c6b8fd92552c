//! Data models for scrape targets and extracted profile records.
//!
//! This module defines the two structures that travel through the pipeline:
//! - [`ScrapeTarget`]: one profile URL paired with its position in the roster
//! - [`ProfileRecord`]: the extracted name + follower count for one profile
//!
//! Ordering is carried by data, not by execution: a target's `index` is
//! assigned once when the roster is built and copied verbatim into the
//! record's `original_index`, which is the only thing that decides where a
//! result lands in the final batch.

use serde::{Deserialize, Serialize};

/// One input profile URL together with its original roster position.
///
/// The `index` is zero-based, assigned when the roster is parsed, and never
/// changes afterwards. The batch aggregator relies on roster-built targets
/// having unique, contiguous indices (`0..targets.len()`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeTarget {
    /// The profile page URL to fetch.
    pub url: String,
    /// Zero-based position of this URL in the input roster.
    pub index: usize,
}

impl ScrapeTarget {
    /// Pair a URL with its roster position.
    pub fn new(url: impl Into<String>, index: usize) -> Self {
        Self {
            url: url.into(),
            index,
        }
    }
}

/// A successfully scraped profile.
///
/// A record only exists fully populated: `name` is non-empty and trimmed,
/// `followers` is a non-empty string of decimal digits. Extraction either
/// produces both fields or fails the whole item, so partially filled records
/// never appear anywhere in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Display name of the profile, whitespace-trimmed.
    pub name: String,
    /// Follower count as scraped, reduced to decimal digits only.
    ///
    /// Kept as a string: the sinks reproduce it verbatim and no arithmetic
    /// is ever done on it.
    pub followers: String,
    /// Roster position of the target this record was scraped from.
    pub original_index: usize,
}
