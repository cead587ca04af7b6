//! Excel and OpenDocument workbooks.

use super::{dedupe_headers, header_name, TableLoader};
use crate::data::{Cell, Table};
use crate::error::{UpsetError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Loader for the first (or a named) worksheet of a workbook.
///
/// The first worksheet row is the header. Cell types come from the workbook.
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetLoader {
    sheet: Option<String>,
}

impl SpreadsheetLoader {
    /// Loader for a named worksheet, or the first one when `None`.
    pub fn new(sheet: Option<String>) -> Self {
        Self { sheet }
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(v) => Cell::Int(*v),
        Data::Float(v) => Cell::Float(*v),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) if s.is_empty() => Cell::Missing,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Empty | Data::Error(_) => Cell::Missing,
        other => Cell::Text(other.to_string()),
    }
}

impl TableLoader for SpreadsheetLoader {
    fn load(&self, path: &Path) -> Result<Table> {
        let mut workbook = open_workbook_auto(path)?;
        let range = match &self.sheet {
            Some(name) => {
                let available = workbook.sheet_names();
                if !available.iter().any(|s| s == name) {
                    return Err(UpsetError::MissingSheet {
                        sheet: name.clone(),
                        available: available.join(", "),
                    });
                }
                workbook.worksheet_range(name)?
            }
            None => workbook
                .worksheet_range_at(0)
                .ok_or_else(|| UpsetError::EmptyData("Workbook has no worksheets".to_string()))??,
        };

        let mut rows = range.rows();
        let header = rows
            .next()
            .ok_or_else(|| UpsetError::EmptyData("Empty worksheet".to_string()))?;
        let column_names = dedupe_headers(
            header
                .iter()
                .enumerate()
                .map(|(i, h)| header_name(i, &h.to_string()))
                .collect(),
        );

        let data = rows.map(|r| r.iter().map(to_cell).collect()).collect();
        Table::new(column_names, data)
    }
}
