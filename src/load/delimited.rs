//! Comma- and tab-delimited text.

use super::{dedupe_headers, header_name, TableLoader};
use crate::data::Table;
use crate::error::{UpsetError, Result};
use std::io::Read;
use std::path::Path;

/// Loader for delimited text with a header row.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedLoader {
    delimiter: u8,
}

impl DelimitedLoader {
    /// Loader with a custom delimiter.
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Comma-separated values.
    pub fn csv() -> Self {
        Self::new(b',')
    }

    /// Tab-separated values.
    pub fn tsv() -> Self {
        Self::new(b'\t')
    }

    /// Read a table from any reader.
    ///
    /// Column types are inferred per column; rows may be ragged.
    pub fn read<R: Read>(&self, reader: R) -> Result<Table> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let column_names = dedupe_headers(
            rdr.headers()?
                .iter()
                .enumerate()
                .map(|(i, h)| header_name(i, h))
                .collect(),
        );
        if column_names.is_empty() {
            return Err(UpsetError::EmptyData("No header row".to_string()));
        }

        let mut raw_rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            raw_rows.push(record.iter().map(String::from).collect());
        }

        Table::from_raw(column_names, raw_rows)
    }
}

impl TableLoader for DelimitedLoader {
    fn load(&self, path: &Path) -> Result<Table> {
        let file = std::fs::File::open(path)?;
        self.read(file)
    }
}
