use crate::domain::model::{RawRecord, REQUIRED_COLUMNS};
use crate::utils::error::{ImportError, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// First data row number; row 1 is the header.
pub const FIRST_DATA_ROW: usize = 2;

/// Streams rows out of a header-delimited file.
///
/// The header must name every required column (any order, exact spelling).
/// Rows shorter than the header leave the trailing columns absent; values past
/// the header width are dropped.
pub struct RecordReader<R: Read> {
    reader: csv::Reader<R>,
    headers: StringRecord,
    next_row: usize,
}

impl RecordReader<File> {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ImportError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read> RecordReader<R> {
    pub fn from_reader(source: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);
        let headers = reader.headers()?.clone();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|header| header == **column))
            .map(|column| column.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(ImportError::SchemaError {
                expected: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
                missing,
            });
        }

        tracing::debug!("CSV header: {:?}", headers);

        Ok(Self {
            reader,
            headers,
            next_row: FIRST_DATA_ROW,
        })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => {
                let fields = self
                    .headers
                    .iter()
                    .zip(record.iter())
                    .map(|(header, value)| (header.to_string(), value.to_string()))
                    .collect();
                let row = RawRecord::new(self.next_row, fields);
                self.next_row += 1;
                Some(Ok(row))
            }
            Ok(false) => None,
            Err(e) => Some(Err(ImportError::ParseError(e))),
        }
    }
}
