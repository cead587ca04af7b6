//! Per-set membership profiling.

use crate::data::MembershipMatrix;
use serde::{Deserialize, Serialize};

/// Profile of how rows are spread over the sets of a membership matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipProfile {
    /// Number of rows.
    pub n_rows: usize,
    /// Set names in caller order.
    pub set_names: Vec<String>,
    /// Rows flagged in each set.
    pub set_sizes: Vec<usize>,
    /// Proportion of rows flagged in each set.
    pub set_prevalence: Vec<f64>,
    /// Rows belonging to no set.
    pub n_in_no_set: usize,
    /// Rows belonging to every set.
    pub n_in_all_sets: usize,
    /// Mean number of sets per row.
    pub mean_degree: f64,
    /// Largest number of sets any row belongs to.
    pub max_degree: usize,
}

impl MembershipProfile {
    /// Names of sets with prevalence at or above a threshold.
    pub fn sets_above(&self, threshold: f64) -> Vec<&str> {
        self.set_names
            .iter()
            .zip(&self.set_prevalence)
            .filter(|(_, &p)| p >= threshold)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Name and size of the largest set. Ties go to the earlier set.
    pub fn largest_set(&self) -> Option<(&str, usize)> {
        self.set_names
            .iter()
            .zip(&self.set_sizes)
            .fold(None, |best: Option<(&str, usize)>, (name, &size)| match best {
                Some((_, s)) if s >= size => best,
                _ => Some((name.as_str(), size)),
            })
    }
}

impl std::fmt::Display for MembershipProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Membership Profile")?;
        writeln!(f, "  Rows:  {}", self.n_rows)?;
        writeln!(f, "  Sets:  {}", self.set_names.len())?;
        for ((name, size), p) in self
            .set_names
            .iter()
            .zip(&self.set_sizes)
            .zip(&self.set_prevalence)
        {
            writeln!(f, "    {:<20} {:>6} ({:.1}%)", name, size, p * 100.0)?;
        }
        writeln!(f, "  In no set:    {}", self.n_in_no_set)?;
        writeln!(f, "  In all sets:  {}", self.n_in_all_sets)?;
        writeln!(f, "  Mean sets per row: {:.2}", self.mean_degree)?;
        writeln!(f, "  Max sets per row:  {}", self.max_degree)?;
        Ok(())
    }
}

/// Profile set membership of a matrix.
pub fn profile_membership(matrix: &MembershipMatrix) -> MembershipProfile {
    let n_rows = matrix.n_rows();
    let n_sets = matrix.n_sets();
    let set_sizes = matrix.set_sizes();

    let set_prevalence = set_sizes
        .iter()
        .map(|&s| if n_rows > 0 { s as f64 / n_rows as f64 } else { 0.0 })
        .collect();

    let degrees: Vec<usize> = matrix
        .rows()
        .map(|row| row.iter().filter(|&&f| f).count())
        .collect();

    let mean_degree = if n_rows > 0 {
        degrees.iter().sum::<usize>() as f64 / n_rows as f64
    } else {
        0.0
    };

    MembershipProfile {
        n_rows,
        set_names: matrix.set_names().to_vec(),
        set_sizes,
        set_prevalence,
        n_in_no_set: degrees.iter().filter(|&&d| d == 0).count(),
        n_in_all_sets: degrees.iter().filter(|&&d| d == n_sets).count(),
        mean_degree,
        max_degree: degrees.iter().copied().max().unwrap_or(0),
    }
}
