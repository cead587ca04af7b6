//! Built-in example dataset for trying the tool without input files.

use crate::data::{Cell, Table};
use crate::error::Result;

/// Set columns of the demo table.
pub const DEMO_COLUMNS: [&str; 3] = ["Condition_A", "Condition_B", "Condition_C"];

/// Six genes across three conditions, every row a different pattern.
pub fn demo_table() -> Result<Table> {
    let genes = ["G1", "G2", "G3", "G4", "G5", "G6"];
    let a = [1, 1, 0, 1, 0, 1];
    let b = [0, 1, 1, 1, 0, 0];
    let c = [1, 0, 1, 1, 1, 0];

    let column_names = std::iter::once("Gene")
        .chain(DEMO_COLUMNS)
        .map(String::from)
        .collect();
    let rows = (0..genes.len())
        .map(|i| {
            vec![
                Cell::from(genes[i]),
                Cell::Int(a[i]),
                Cell::Int(b[i]),
                Cell::Int(c[i]),
            ]
        })
        .collect();

    Table::new(column_names, rows)
}

/// Set columns of the demo table as owned names.
pub fn demo_columns() -> Vec<String> {
    DEMO_COLUMNS.iter().map(|s| s.to_string()).collect()
}
