//! Loading tables from delimited text and spreadsheet files.
//!
//! The loader only parses storage formats; interpreting set columns is
//! left to [`crate::normalize`].

mod delimited;
mod spreadsheet;

pub use delimited::DelimitedLoader;
pub use spreadsheet::SpreadsheetLoader;

use crate::data::Table;
use crate::error::{UpsetError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Anything that can turn a file into a [`Table`].
pub trait TableLoader {
    /// Load a table from `path`.
    fn load(&self, path: &Path) -> Result<Table>;
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    /// Comma-separated values (`.csv`).
    Csv,
    /// Tab-separated values (`.tsv`, `.txt`).
    Tsv,
    /// Excel or OpenDocument workbook (`.xls`, `.xlsx`, `.xlsm`, `.xlsb`, `.ods`).
    Spreadsheet,
}

impl FileFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" | "txt" => Ok(Self::Tsv),
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Ok(Self::Spreadsheet),
            _ => Err(UpsetError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Pick a loader for `path` by its extension.
pub fn loader_for(path: &Path, sheet: Option<&str>) -> Result<Box<dyn TableLoader>> {
    let loader: Box<dyn TableLoader> = match FileFormat::from_path(path)? {
        FileFormat::Csv => Box::new(DelimitedLoader::csv()),
        FileFormat::Tsv => Box::new(DelimitedLoader::tsv()),
        FileFormat::Spreadsheet => Box::new(SpreadsheetLoader::new(sheet.map(String::from))),
    };
    Ok(loader)
}

/// Load a table from a CSV, TSV or spreadsheet file.
///
/// Fails with [`UpsetError::FileNotFound`] before the extension is looked at.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    load_table_with_sheet(path, None)
}

/// Load a table, choosing a worksheet by name for spreadsheet input.
pub fn load_table_with_sheet<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> Result<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(UpsetError::FileNotFound(path.to_path_buf()));
    }
    let table = loader_for(path, sheet)?.load(path)?;
    info!(
        path = %path.display(),
        rows = table.n_rows(),
        columns = table.n_columns(),
        "loaded table"
    );
    Ok(table)
}

/// Name for a header cell, numbering empty ones by position. Names are kept
/// verbatim, surrounding whitespace included.
fn header_name(index: usize, raw: &str) -> String {
    if raw.is_empty() {
        format!("Unnamed: {}", index)
    } else {
        raw.to_string()
    }
}

/// Make header names unique: a repeat of `A` becomes `A.1`, then `A.2`, and
/// so on, skipping suffixes already taken.
fn dedupe_headers(names: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    names
        .into_iter()
        .map(|original| {
            let mut name = original.clone();
            let mut seen = counts.get(&name).copied().unwrap_or(0);
            while seen > 0 {
                counts.insert(name.clone(), seen + 1);
                name = format!("{}.{}", name, seen);
                seen = counts.get(&name).copied().unwrap_or(0);
            }
            counts.insert(name.clone(), 1);
            if name != original {
                warn!(column = %original, renamed = %name, "duplicate column header renamed");
            }
            name
        })
        .collect()
}
