//! Output sink trait
//!
//! A sink consumes the ordered record sequence at the end of a run.

use crate::record::Record;
use crate::ScoutError;

/// Column order shared by every tabular sink
pub const COLUMNS: [&str; 6] = [
    "text",
    "author",
    "detail_link",
    "birth_date",
    "birth_place",
    "description",
];

/// Persists records in the order given
pub trait RecordSink {
    /// Appends records to the sink
    fn write_records(&mut self, records: &[Record]) -> Result<(), ScoutError>;

    /// Flushes buffered output
    fn finish(&mut self) -> Result<(), ScoutError>;
}
