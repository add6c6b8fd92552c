//! Console sink: the batch as a plain fixed-width table.
//!
//! Pure rendering, no printing: the caller decides what to do with the
//! string. Successful records only, roster order, name column sized to the
//! longest name.

use crate::batch::BatchResult;
use std::fmt::Write;

const NAME_HEADER: &str = "Name";
const FOLLOWERS_HEADER: &str = "Followers";

/// Render the census as an aligned two-column table.
pub fn render_table(result: &BatchResult) -> String {
    let name_width = result
        .records()
        .map(|record| record.name.chars().count())
        .chain(std::iter::once(NAME_HEADER.len()))
        .max()
        .unwrap_or(NAME_HEADER.len());

    let mut out = String::new();
    writeln!(out, "{NAME_HEADER:<name_width$}  {FOLLOWERS_HEADER}").unwrap();
    writeln!(
        out,
        "{}  {}",
        "-".repeat(name_width),
        "-".repeat(FOLLOWERS_HEADER.len())
    )
    .unwrap();
    for record in result.records() {
        writeln!(out, "{:<name_width$}  {}", record.name, record.followers).unwrap();
    }
    out
}
