//! Result sinks: where a finished batch goes.
//!
//! The pipeline hands every sink the same thing, an order-preserving
//! [`crate::batch::BatchResult`], and each sink decides how to render it:
//!
//! # Submodules
//!
//! - [`csv`]: spreadsheet file with a `Name,Followers` header row
//! - [`json`]: report file with counts and the full slot array
//! - [`console`]: fixed-width table for stdout
//!
//! CSV and the console table list successful records only, in roster order;
//! the JSON report keeps failed slots as explicit nulls so positions survive
//! serialization. None of the sinks reorder anything.

pub mod console;
pub mod csv;
pub mod json;
