//! Spreadsheet sink: the batch as a CSV file.
//!
//! Same two columns the original spreadsheet had, `Name` and `Followers`,
//! one row per successful record in roster order. Failed targets produce no
//! row at all — an empty line in a spreadsheet helps nobody; the JSON
//! report is the sink that keeps the gaps.

use crate::batch::BatchResult;
use csv::WriterBuilder;
use std::error::Error;
use std::io;
use tokio::fs;
use tracing::{info, instrument};

/// Write the census as CSV into any writer. Header first, then the
/// successful records in slot order.
pub fn write_census<W: io::Write>(writer: W, result: &BatchResult) -> Result<(), csv::Error> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(["Name", "Followers"])?;
    for record in result.records() {
        wtr.write_record([record.name.as_str(), record.followers.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the census to CSV and write it to `path`.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn write_census_file(path: &str, result: &BatchResult) -> Result<(), Box<dyn Error>> {
    let mut buf = Vec::new();
    write_census(&mut buf, result)?;
    fs::write(path, buf).await?;
    info!(path = %path, rows = result.success_count(), "Wrote CSV spreadsheet");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfileRecord;

    fn record(name: &str, followers: &str, index: usize) -> Option<ProfileRecord> {
        Some(ProfileRecord {
            name: name.to_string(),
            followers: followers.to_string(),
            original_index: index,
        })
    }

    fn render(slots: Vec<Option<ProfileRecord>>) -> String {
        let result = BatchResult::from_slots(slots);
        let mut buf = Vec::new();
        write_census(&mut buf, &result).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_then_rows_in_roster_order() {
        let out = render(vec![
            record("Alice", "1000", 0),
            record("Carol", "250", 1),
        ]);
        assert_eq!(out, "Name,Followers\nAlice,1000\nCarol,250\n");
    }

    #[test]
    fn test_failed_slots_produce_no_row() {
        let out = render(vec![record("Alice", "1000", 0), None, record("Carol", "250", 2)]);
        assert_eq!(out.lines().count(), 3);
        assert!(!out.contains(",,"));
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let out = render(vec![record("Smith, Alice", "1000", 0)]);
        assert!(out.contains("\"Smith, Alice\",1000"));
    }

    #[test]
    fn test_empty_batch_is_header_only() {
        let out = render(vec![]);
        assert_eq!(out, "Name,Followers\n");
    }
}
