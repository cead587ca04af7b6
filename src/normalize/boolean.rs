//! Boolean normalization of membership cells.
//!
//! Cells in set columns arrive as integers, floats, booleans or text. Each is
//! mapped to a membership flag:
//!
//! - **true**: `1`, `1.0`, `"1"`, `"yes"`, `"YES"`, `"Yes"`, `true`
//! - **false**: `0`, `0.0`, `"0"`, `"no"`, `"NO"`, `"No"`, `false`
//!
//! Anything else is *unrecognized*. Under [`NormalizePolicy::Permissive`]
//! unrecognized values count as "not a member"; under
//! [`NormalizePolicy::Strict`] they are reported as errors.

use crate::data::{validate_set_names, Cell, MembershipMatrix, Table};
use crate::error::{UpsetError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const TRUE_TEXT: &[&str] = &["1", "yes", "YES", "Yes"];
const FALSE_TEXT: &[&str] = &["0", "no", "NO", "No"];

/// How to treat cells that are neither a true nor a false literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalizePolicy {
    /// Unrecognized values become `false`.
    #[default]
    Permissive,
    /// Unrecognized values are an error.
    Strict,
}

/// Classify a cell as a true literal, a false literal, or neither.
pub fn classify_cell(cell: &Cell) -> Option<bool> {
    match cell {
        Cell::Bool(b) => Some(*b),
        Cell::Int(1) => Some(true),
        Cell::Int(0) => Some(false),
        Cell::Float(v) if *v == 1.0 => Some(true),
        Cell::Float(v) if *v == 0.0 => Some(false),
        Cell::Text(s) if TRUE_TEXT.contains(&s.as_str()) => Some(true),
        Cell::Text(s) if FALSE_TEXT.contains(&s.as_str()) => Some(false),
        _ => None,
    }
}

/// Normalize a cell to a membership flag. Unrecognized values are `false`.
pub fn normalize_cell(cell: &Cell) -> bool {
    classify_cell(cell).unwrap_or(false)
}

/// Normalize one row of cells under a policy.
///
/// `columns` names the cells for error reporting and must be as long as `cells`.
pub fn normalize_row(
    cells: &[&Cell],
    columns: &[String],
    row: usize,
    policy: NormalizePolicy,
) -> Result<Vec<bool>> {
    cells
        .iter()
        .zip(columns)
        .map(|(cell, column)| match (classify_cell(cell), policy) {
            (Some(flag), _) => Ok(flag),
            (None, NormalizePolicy::Permissive) => Ok(false),
            (None, NormalizePolicy::Strict) => Err(UpsetError::UnrecognizedValue {
                column: column.clone(),
                row,
                value: cell.to_string(),
            }),
        })
        .collect()
}

/// Build a membership matrix from the named columns of a table.
///
/// The set list is checked before any row is read: an empty list or a
/// repeated name is a configuration error, a name with no matching column
/// is a schema error.
pub fn normalize_table(
    table: &Table,
    set_names: &[String],
    policy: NormalizePolicy,
) -> Result<MembershipMatrix> {
    validate_set_names(set_names)?;
    let indices = table.select(set_names)?;

    let mut unrecognized = 0usize;
    let mut rows = Vec::with_capacity(table.n_rows());
    for (row_idx, row) in table.rows().enumerate() {
        let cells: Vec<&Cell> = indices.iter().map(|&i| &row[i]).collect();
        unrecognized += cells.iter().filter(|c| classify_cell(c).is_none()).count();
        rows.push(normalize_row(&cells, set_names, row_idx, policy)?);
    }

    if unrecognized > 0 {
        warn!(
            unrecognized,
            "treating unrecognized membership values as absent"
        );
    }
    debug!(
        rows = rows.len(),
        sets = set_names.len(),
        ?policy,
        "normalized membership matrix"
    );

    MembershipMatrix::new(set_names.to_vec(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_true_literals() {
        assert!(normalize_cell(&Cell::Int(1)));
        assert!(normalize_cell(&Cell::from("1")));
        assert!(normalize_cell(&Cell::from("yes")));
        assert!(normalize_cell(&Cell::from("YES")));
        assert!(normalize_cell(&Cell::from("Yes")));
        assert!(normalize_cell(&Cell::Bool(true)));
        assert!(normalize_cell(&Cell::Float(1.0)));
    }

    #[test]
    fn test_false_literals() {
        assert!(!normalize_cell(&Cell::Int(0)));
        assert!(!normalize_cell(&Cell::from("0")));
        assert!(!normalize_cell(&Cell::from("no")));
        assert!(!normalize_cell(&Cell::from("NO")));
        assert!(!normalize_cell(&Cell::Bool(false)));
    }

    #[test]
    fn test_unrecognized_defaults_to_false() {
        assert!(!normalize_cell(&Cell::from("maybe")));
        assert!(!normalize_cell(&Cell::Missing));
        assert!(!normalize_cell(&Cell::from("")));
        assert!(!normalize_cell(&Cell::Int(2)));
        assert!(!normalize_cell(&Cell::Int(-1)));
        assert!(!normalize_cell(&Cell::Float(0.5)));
        assert!(!normalize_cell(&Cell::from("yEs")));

        assert_eq!(classify_cell(&Cell::from("maybe")), None);
        assert_eq!(classify_cell(&Cell::Missing), None);
    }

    fn mixed_table() -> Table {
        Table::new(
            names(&["id", "A", "B"]),
            vec![
                vec![Cell::from("r1"), Cell::Int(1), Cell::from("yes")],
                vec![Cell::from("r2"), Cell::Int(0), Cell::from("maybe")],
                vec![Cell::from("r3"), Cell::Missing, Cell::Bool(true)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_table_permissive() {
        let table = mixed_table();
        let matrix =
            normalize_table(&table, &names(&["B", "A"]), NormalizePolicy::Permissive).unwrap();

        assert_eq!(matrix.set_names(), &["B", "A"]);
        assert_eq!(matrix.row(0), Some(&[true, true][..]));
        assert_eq!(matrix.row(1), Some(&[false, false][..]));
        assert_eq!(matrix.row(2), Some(&[true, false][..]));
    }

    #[test]
    fn test_normalize_table_strict() {
        let table = mixed_table();
        let err = normalize_table(&table, &names(&["A", "B"]), NormalizePolicy::Strict).unwrap_err();

        match err {
            UpsetError::UnrecognizedValue { column, row, value } => {
                assert_eq!(column, "B");
                assert_eq!(row, 1);
                assert_eq!(value, "maybe");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_normalize_table_configuration_errors() {
        let table = mixed_table();

        assert!(matches!(
            normalize_table(&table, &[], NormalizePolicy::Permissive),
            Err(UpsetError::EmptySetList)
        ));
        assert!(matches!(
            normalize_table(&table, &names(&["A", "Z"]), NormalizePolicy::Permissive),
            Err(UpsetError::MissingColumn(c)) if c == "Z"
        ));
    }
}
