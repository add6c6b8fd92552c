//! JSON report sink.
//!
//! Unlike the CSV sheet, the report keeps every slot: failed targets appear
//! as `null` at their roster position, so a consumer can line the report
//! back up against the input list. The envelope carries the counts and a
//! generation timestamp.
//!
//! ```json
//! {
//!   "generated_at": "2025-11-02T09:14:11+03:00",
//!   "total": 3,
//!   "succeeded": 2,
//!   "failed": 1,
//!   "profiles": [
//!     { "name": "Alice", "followers": "1000", "original_index": 0 },
//!     null,
//!     { "name": "Carol", "followers": "250", "original_index": 2 }
//!   ]
//! }
//! ```

use crate::batch::BatchResult;
use crate::models::ProfileRecord;
use chrono::Local;
use serde::Serialize;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// The report envelope: batch counts plus the full slot array.
#[derive(Debug, Serialize)]
pub struct CensusReport<'a> {
    /// RFC 3339 local timestamp of when the report was rendered.
    pub generated_at: String,
    /// Number of input targets.
    pub total: usize,
    /// Targets that produced a record.
    pub succeeded: usize,
    /// Targets that were skipped.
    pub failed: usize,
    /// One entry per target in roster order, `null` where scraping failed.
    pub profiles: &'a [Option<ProfileRecord>],
}

impl<'a> CensusReport<'a> {
    /// Build the envelope for `result`, stamped with the current time.
    pub fn new(result: &'a BatchResult) -> Self {
        let succeeded = result.success_count();
        Self {
            generated_at: Local::now().to_rfc3339(),
            total: result.len(),
            succeeded,
            failed: result.len() - succeeded,
            profiles: result.slots(),
        }
    }
}

/// Serialize the report for `result` and write it to `path`.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_report(path: &str, result: &BatchResult) -> Result<(), Box<dyn Error>> {
    let report = CensusReport::new(result);
    let json = serde_json::to_string(&report)?;
    fs::write(path, json).await?;
    info!(path = %path, profiles = report.succeeded, "Wrote JSON report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> BatchResult {
        BatchResult::from_slots(vec![
            Some(ProfileRecord {
                name: "Alice".to_string(),
                followers: "1000".to_string(),
                original_index: 0,
            }),
            None,
            Some(ProfileRecord {
                name: "Carol".to_string(),
                followers: "250".to_string(),
                original_index: 2,
            }),
        ])
    }

    #[test]
    fn test_report_counts_are_consistent() {
        let result = sample_result();
        let report = CensusReport::new(&result);
        assert_eq!(report.total, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn test_report_keeps_failed_slots_as_nulls() {
        let result = sample_result();
        let value = serde_json::to_value(CensusReport::new(&result)).unwrap();

        let profiles = value["profiles"].as_array().unwrap();
        assert_eq!(profiles.len(), 3);
        assert!(profiles[1].is_null());
        assert_eq!(profiles[0]["name"], "Alice");
        assert_eq!(profiles[2]["original_index"], 2);
    }

    #[test]
    fn test_empty_batch_report() {
        let result = BatchResult::from_slots(vec![]);
        let report = CensusReport::new(&result);
        assert_eq!(report.total, 0);
        assert_eq!(report.failed, 0);
        let value = serde_json::to_value(report).unwrap();
        assert_eq!(value["profiles"].as_array().unwrap().len(), 0);
    }
}
