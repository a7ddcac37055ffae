//! Output module for persisting crawl results
//!
//! This module handles:
//! - Writing records as CSV rows
//! - Reading CSV output back into records
//! - Printing crawl statistics

mod csv_output;
pub mod stats;
mod traits;

pub use csv_output::{read_records, CsvSink};
pub use stats::print_report;
pub use traits::{RecordSink, COLUMNS};

use crate::record::Record;
use crate::ScoutError;
use std::path::Path;

/// Writes records to a CSV file at `path`, replacing any existing file
///
/// # Arguments
///
/// * `path` - Destination file
/// * `records` - Records in output order
///
/// # Returns
///
/// * `Ok(())` - File written and flushed
/// * `Err(ScoutError)` - Failed to create or write the file
pub fn write_csv(path: &Path, records: &[Record]) -> Result<(), ScoutError> {
    let mut sink = CsvSink::create(path)?;
    sink.write_records(records)?;
    sink.finish()?;
    tracing::debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
