//! In-memory tabular data with heterogeneous cell values.

use crate::error::{UpsetError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tokens read as missing values in delimited text.
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "#N/A", "NaN", "nan", "-NaN", "null", "NULL", "None", "<NA>",
];

/// Tokens read as booleans in delimited text.
const TRUE_TOKENS: &[&str] = &["true", "True", "TRUE"];
const FALSE_TOKENS: &[&str] = &["false", "False", "FALSE"];

/// A single cell value. Cells in one column may differ in type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Free text.
    Text(String),
    /// Empty or missing value.
    Missing,
}

impl Cell {
    /// Check if this is a missing value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Try to get as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Try to get as boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Missing => write!(f, "NA"),
        }
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Missing)
    }
}

/// Type inferred for a column of delimited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellType {
    Int,
    Float,
    Bool,
    Text,
}

impl CellType {
    /// Infer the narrowest type every non-missing value parses as.
    pub fn infer<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        let present = || values.clone().into_iter().filter(|v| !is_missing_token(v));

        if present().all(|v| v.trim().parse::<i64>().is_ok()) {
            CellType::Int
        } else if present().all(|v| v.trim().parse::<f64>().is_ok()) {
            CellType::Float
        } else if present().all(|v| TRUE_TOKENS.contains(&v) || FALSE_TOKENS.contains(&v)) {
            CellType::Bool
        } else {
            CellType::Text
        }
    }

    /// Parse a raw value as this type.
    ///
    /// Numbers may carry surrounding whitespace; missing tokens, booleans and
    /// text must match exactly and text is kept verbatim.
    pub fn parse(&self, raw: &str) -> Cell {
        if is_missing_token(raw) {
            return Cell::Missing;
        }
        match self {
            CellType::Int => raw.trim().parse().map(Cell::Int).unwrap_or(Cell::Missing),
            CellType::Float => raw.trim().parse().map(Cell::Float).unwrap_or(Cell::Missing),
            CellType::Bool => Cell::Bool(TRUE_TOKENS.contains(&raw)),
            CellType::Text => Cell::Text(raw.to_string()),
        }
    }
}

fn is_missing_token(v: &str) -> bool {
    MISSING_TOKENS.contains(&v)
}

/// A loaded table: ordered column names and rows of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column names in file order.
    column_names: Vec<String>,
    /// Row-major cell storage, every row as wide as `column_names`.
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create a table from typed rows. Column names must be unique.
    pub fn new(column_names: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        for (i, name) in column_names.iter().enumerate() {
            if column_names[..i].contains(name) {
                return Err(UpsetError::DuplicateColumn(name.clone()));
            }
        }
        for row in &rows {
            if row.len() != column_names.len() {
                return Err(UpsetError::DimensionMismatch {
                    expected: column_names.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(Self { column_names, rows })
    }

    /// Create a table from raw text rows, inferring a type per column.
    ///
    /// Short rows are padded with missing cells; extra trailing fields are dropped.
    pub fn from_raw(column_names: Vec<String>, raw_rows: Vec<Vec<String>>) -> Result<Self> {
        let n_columns = column_names.len();
        if n_columns == 0 {
            return Err(UpsetError::EmptyData("Table has no columns".to_string()));
        }

        let column_types: Vec<CellType> = (0..n_columns)
            .map(|col| {
                let values = raw_rows
                    .iter()
                    .map(move |row| row.get(col).map(String::as_str).unwrap_or(""));
                CellType::infer(values)
            })
            .collect();

        let rows = raw_rows
            .iter()
            .map(|raw| {
                column_types
                    .iter()
                    .enumerate()
                    .map(|(col, ty)| match raw.get(col) {
                        Some(value) => ty.parse(value),
                        None => Cell::Missing,
                    })
                    .collect()
            })
            .collect();

        Self::new(column_names, rows)
    }

    /// Column names.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.column_names.len()
    }

    /// Check if a column exists.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Position of a column.
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.column_names
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| UpsetError::MissingColumn(column.to_string()))
    }

    /// Resolve several columns, failing on the first absent one.
    pub fn select(&self, columns: &[String]) -> Result<Vec<usize>> {
        columns.iter().map(|c| self.column_index(c)).collect()
    }

    /// Get all values for a column.
    pub fn column(&self, column: &str) -> Result<Vec<&Cell>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Get a cell by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_names.iter().position(|c| c == column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Borrow a row.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
