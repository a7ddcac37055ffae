//! CSV sink
//!
//! Output is always UTF-8 with a header row, fields quoted as needed so
//! commas, quotes, and newlines survive a round trip.

use crate::output::traits::{RecordSink, COLUMNS};
use crate::record::Record;
use crate::ScoutError;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

/// Writes records as CSV rows
pub struct CsvSink<W: io::Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` and writes the header row
    pub fn create(path: &Path) -> Result<Self, ScoutError> {
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: io::Write> CsvSink<W> {
    /// Wraps a writer and writes the header row
    ///
    /// The header is written up front so even an empty run produces it.
    pub fn new(writer: W) -> Result<Self, ScoutError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(COLUMNS)?;
        Ok(Self { writer })
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> Result<W, ScoutError> {
        self.writer
            .into_inner()
            .map_err(|e| ScoutError::Io(io::Error::new(e.error().kind(), e.error().to_string())))
    }
}

impl<W: io::Write> RecordSink for CsvSink<W> {
    fn write_records(&mut self, records: &[Record]) -> Result<(), ScoutError> {
        for record in records {
            self.writer.serialize(record)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ScoutError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Reads records written by [`CsvSink`]
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<Record>, ScoutError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
