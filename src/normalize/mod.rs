//! Normalization of raw cell values into boolean membership flags.

pub mod boolean;

pub use boolean::{classify_cell, normalize_cell, normalize_row, normalize_table, NormalizePolicy};
