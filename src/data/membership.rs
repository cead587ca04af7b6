//! Boolean membership matrix (rows × named sets).

use crate::error::{UpsetError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Check that a list of set names is usable: non-empty and without repeats.
pub fn validate_set_names(set_names: &[String]) -> Result<()> {
    if set_names.is_empty() {
        return Err(UpsetError::EmptySetList);
    }
    let mut seen = HashSet::with_capacity(set_names.len());
    for name in set_names {
        if !seen.insert(name.as_str()) {
            return Err(UpsetError::DuplicateColumn(name.clone()));
        }
    }
    Ok(())
}

/// One boolean flag per set for every row.
///
/// Every row holds exactly `set_names.len()` flags, in set-name order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipMatrix {
    set_names: Vec<String>,
    rows: Vec<Vec<bool>>,
}

impl MembershipMatrix {
    /// Create a membership matrix, validating names and row widths.
    pub fn new(set_names: Vec<String>, rows: Vec<Vec<bool>>) -> Result<Self> {
        validate_set_names(&set_names)?;
        if let Some(bad) = rows.iter().find(|r| r.len() != set_names.len()) {
            return Err(UpsetError::DimensionMismatch {
                expected: set_names.len(),
                actual: bad.len(),
            });
        }
        Ok(Self { set_names, rows })
    }

    /// Build from rows of 0/1 integers. Any non-zero value is a member.
    pub fn from_flags(set_names: Vec<String>, flags: &[Vec<u8>]) -> Result<Self> {
        let rows = flags
            .iter()
            .map(|r| r.iter().map(|&f| f != 0).collect())
            .collect();
        Self::new(set_names, rows)
    }

    /// Set names in caller order.
    pub fn set_names(&self) -> &[String] {
        &self.set_names
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of sets.
    pub fn n_sets(&self) -> usize {
        self.set_names.len()
    }

    /// Flags for one row.
    pub fn row(&self, row: usize) -> Option<&[bool]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Iterate over row flag vectors.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Number of rows in which each set is flagged.
    pub fn set_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.n_sets()];
        for row in &self.rows {
            for (size, &flag) in sizes.iter_mut().zip(row) {
                if flag {
                    *size += 1;
                }
            }
        }
        sizes
    }
}
