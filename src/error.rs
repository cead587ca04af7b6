//! Error types for the composable-upset library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum UpsetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found → {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported file format '{extension}' for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Column not found → {0}")]
    MissingColumn(String),

    #[error("Worksheet not found → {sheet} (available: {available})")]
    MissingSheet { sheet: String, available: String },

    #[error("Column '{0}' listed more than once")]
    DuplicateColumn(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("At least one set column is required")]
    EmptySetList,

    #[error("{0}")]
    MissingArgument(String),

    #[error("Unrecognized membership value '{value}' at row {row}, column '{column}'")]
    UnrecognizedValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, UpsetError>;
