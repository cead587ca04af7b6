//! Result types for intersection aggregation.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Label used for the pattern in which a row belongs to no set.
pub const EMPTY_PATTERN_LABEL: &str = "(none)";

/// One observed membership pattern and the number of rows showing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionRecord {
    /// Member set names, in the caller's set order.
    pub members: Vec<String>,
    /// Membership flag per set, parallel to the set name list.
    pub mask: Vec<bool>,
    /// Number of rows with exactly this pattern.
    pub count: usize,
}

impl IntersectionRecord {
    /// Number of sets in the pattern.
    pub fn degree(&self) -> usize {
        self.members.len()
    }

    /// Whether this is the pattern of rows outside every set.
    pub fn is_empty_pattern(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the set at `index` takes part in this pattern.
    pub fn contains(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }

    /// Display label such as `A&B`.
    pub fn label(&self) -> String {
        if self.members.is_empty() {
            EMPTY_PATTERN_LABEL.to_string()
        } else {
            self.members.join("&")
        }
    }
}

/// Ordered intersection records for one membership matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionSet {
    /// Set names in caller order.
    pub set_names: Vec<String>,
    /// Number of rows in each set, parallel to `set_names`.
    pub set_sizes: Vec<usize>,
    /// Total number of rows aggregated.
    pub n_rows: usize,
    /// Records, sorted for display.
    pub records: Vec<IntersectionRecord>,
}

impl IntersectionSet {
    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all record counts. Equals `n_rows`.
    pub fn total_count(&self) -> usize {
        self.records.iter().map(|r| r.count).sum()
    }

    /// Largest record count, 0 when empty.
    pub fn max_count(&self) -> usize {
        self.records.iter().map(|r| r.count).max().unwrap_or(0)
    }

    /// Iterate over records.
    pub fn iter(&self) -> impl Iterator<Item = &IntersectionRecord> {
        self.records.iter()
    }

    /// Look up the record whose members are exactly the set `members`.
    ///
    /// Order and repeats in `members` are ignored; an unknown name matches nothing.
    pub fn find(&self, members: &[&str]) -> Option<&IntersectionRecord> {
        let mut mask = vec![false; self.set_names.len()];
        for m in members {
            let i = self.set_names.iter().position(|s| s == m)?;
            mask[i] = true;
        }
        self.records.iter().find(|r| r.mask == mask)
    }

    /// Summary statistics.
    pub fn summary(&self) -> IntersectionSummary {
        let n_empty = self
            .records
            .iter()
            .find(|r| r.is_empty_pattern())
            .map(|r| r.count)
            .unwrap_or(0);
        let weighted_degree: usize = self.records.iter().map(|r| r.degree() * r.count).sum();
        IntersectionSummary {
            n_rows: self.n_rows,
            n_sets: self.set_names.len(),
            n_patterns: self.len(),
            n_rows_in_no_set: n_empty,
            mean_degree: if self.n_rows > 0 {
                weighted_degree as f64 / self.n_rows as f64
            } else {
                0.0
            },
            largest: self.records.first().map(|r| (r.label(), r.count)),
        }
    }

    /// Write records to a TSV file.
    ///
    /// One column per set (0/1), then the pattern label, degree and count.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        // Header
        for name in &self.set_names {
            write!(writer, "{}\t", name)?;
        }
        writeln!(writer, "pattern\tdegree\tcount")?;

        for r in &self.records {
            for &flag in &r.mask {
                write!(writer, "{}\t", u8::from(flag))?;
            }
            writeln!(writer, "{}\t{}\t{}", r.label(), r.degree(), r.count)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a IntersectionSet {
    type Item = &'a IntersectionRecord;
    type IntoIter = std::slice::Iter<'a, IntersectionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Summary statistics for an intersection set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntersectionSummary {
    pub n_rows: usize,
    pub n_sets: usize,
    pub n_patterns: usize,
    pub n_rows_in_no_set: usize,
    /// Mean number of sets per row.
    pub mean_degree: f64,
    /// Label and count of the first (largest) record.
    pub largest: Option<(String, usize)>,
}

impl std::fmt::Display for IntersectionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Rows:              {}", self.n_rows)?;
        writeln!(f, "Sets:              {}", self.n_sets)?;
        writeln!(f, "Distinct patterns: {}", self.n_patterns)?;
        writeln!(f, "Rows in no set:    {}", self.n_rows_in_no_set)?;
        writeln!(f, "Mean sets per row: {:.2}", self.mean_degree)?;
        if let Some((label, count)) = &self.largest {
            writeln!(f, "Largest pattern:   {} ({})", label, count)?;
        }
        Ok(())
    }
}
