//! Grouping of membership rows into intersection records.
//!
//! Each row's membership pattern is packed into a fixed-width bit key over
//! the set indices, so two rows with the same true/false assignment land in
//! the same bucket whatever order their members are later listed in. Counts
//! are gathered in a hash map and then sorted into a total order, which makes
//! the output independent of hash iteration order.

use crate::data::{IntersectionRecord, IntersectionSet, MembershipMatrix};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Bit-packed membership pattern over set indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternKey {
    words: Vec<u64>,
}

impl PatternKey {
    /// Pack a row of flags.
    pub fn from_flags(flags: &[bool]) -> Self {
        let mut words = vec![0u64; flags.len().div_ceil(64)];
        for (i, _) in flags.iter().enumerate().filter(|(_, &f)| f) {
            words[i / 64] |= 1u64 << (i % 64);
        }
        Self { words }
    }

    /// Whether set `index` is part of the pattern.
    pub fn contains(&self, index: usize) -> bool {
        self.words
            .get(index / 64)
            .is_some_and(|w| w & (1u64 << (index % 64)) != 0)
    }

    /// Number of sets in the pattern.
    pub fn degree(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Member set indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        (0..self.words.len() * 64)
            .filter(|&i| self.contains(i))
            .collect()
    }
}

/// Display order for intersection records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Descending count, then ascending degree, then member order.
    #[default]
    Cardinality,
    /// Ascending degree, then member order. Counts do not affect order.
    Degree,
}

/// Compare two patterns by degree, then lexicographically by member position.
///
/// Members compare by their index in the caller's set list, so with names
/// supplied in sorted order this is ordinary string lexicographic order.
fn compare_patterns(a: &[usize], b: &[usize]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Count rows per distinct membership pattern, ordered by cardinality.
pub fn aggregate_intersections(matrix: &MembershipMatrix) -> IntersectionSet {
    aggregate_intersections_by(matrix, SortOrder::Cardinality)
}

/// Count rows per distinct membership pattern in a chosen order.
///
/// Only observed patterns appear, the empty pattern included, and the counts
/// add up to the number of rows.
pub fn aggregate_intersections_by(matrix: &MembershipMatrix, order: SortOrder) -> IntersectionSet {
    let mut counts: HashMap<PatternKey, usize> = HashMap::new();
    for row in matrix.rows() {
        *counts.entry(PatternKey::from_flags(row)).or_insert(0) += 1;
    }

    let mut grouped: Vec<(Vec<usize>, usize)> = counts
        .into_iter()
        .map(|(key, count)| (key.indices(), count))
        .collect();

    grouped.sort_by(|(pa, ca), (pb, cb)| match order {
        SortOrder::Cardinality => cb.cmp(ca).then_with(|| compare_patterns(pa, pb)),
        SortOrder::Degree => compare_patterns(pa, pb),
    });

    let set_names = matrix.set_names();
    let records: Vec<IntersectionRecord> = grouped
        .into_iter()
        .map(|(indices, count)| {
            let mut mask = vec![false; set_names.len()];
            for &i in &indices {
                mask[i] = true;
            }
            IntersectionRecord {
                members: indices.iter().map(|&i| set_names[i].clone()).collect(),
                mask,
                count,
            }
        })
        .collect();

    debug!(
        rows = matrix.n_rows(),
        patterns = records.len(),
        ?order,
        "aggregated intersections"
    );

    IntersectionSet {
        set_names: set_names.to_vec(),
        set_sizes: matrix.set_sizes(),
        n_rows: matrix.n_rows(),
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(set_names: &[&str], flags: &[Vec<u8>]) -> MembershipMatrix {
        let names = set_names.iter().map(|s| s.to_string()).collect();
        MembershipMatrix::from_flags(names, flags).unwrap()
    }

    fn labels(set: &IntersectionSet) -> Vec<String> {
        set.iter().map(|r| r.label()).collect()
    }

    #[test]
    fn test_pattern_key() {
        let key = PatternKey::from_flags(&[true, false, true]);
        assert_eq!(key.degree(), 2);
        assert_eq!(key.indices(), vec![0, 2]);
        assert!(key.contains(2));
        assert!(!key.contains(1));
        assert!(!key.contains(500));
    }

    #[test]
    fn test_pattern_key_wide() {
        let mut flags = vec![false; 130];
        flags[3] = true;
        flags[64] = true;
        flags[129] = true;
        let key = PatternKey::from_flags(&flags);

        assert_eq!(key.indices(), vec![3, 64, 129]);
        assert_eq!(key, PatternKey::from_flags(&flags));
    }

    #[test]
    fn test_all_distinct_tie_break() {
        let m = matrix(
            &["A", "B", "C"],
            &[
                vec![1, 0, 1],
                vec![1, 1, 0],
                vec![0, 1, 1],
                vec![1, 1, 1],
                vec![0, 0, 1],
                vec![1, 0, 0],
            ],
        );
        let set = aggregate_intersections(&m);

        assert_eq!(labels(&set), vec!["A", "C", "A&B", "A&C", "B&C", "A&B&C"]);
        assert!(set.iter().all(|r| r.count == 1));
        assert_eq!(set.total_count(), 6);
    }

    #[test]
    fn test_single_pattern() {
        let m = matrix(&["A", "B"], &vec![vec![1u8, 0]; 5]);
        let set = aggregate_intersections(&m);

        assert_eq!(set.len(), 1);
        assert_eq!(set.records[0].members, vec!["A"]);
        assert_eq!(set.records[0].count, 5);
    }

    #[test]
    fn test_count_dominates_degree() {
        let m = matrix(
            &["A", "B"],
            &[vec![1, 1], vec![1, 1], vec![1, 0], vec![0, 0]],
        );
        let set = aggregate_intersections(&m);

        assert_eq!(labels(&set), vec!["A&B", "(none)", "A"]);
        assert_eq!(set.records[0].count, 2);
    }

    #[test]
    fn test_empty_pattern_is_counted() {
        let m = matrix(&["A"], &[vec![0], vec![0], vec![1]]);
        let set = aggregate_intersections(&m);

        let empty = set.iter().find(|r| r.is_empty_pattern()).unwrap();
        assert_eq!(empty.count, 2);
        assert_eq!(empty.mask, vec![false]);
    }

    #[test]
    fn test_members_follow_caller_order() {
        let m = matrix(&["C", "A"], &[vec![1, 1], vec![0, 1], vec![1, 0]]);
        let set = aggregate_intersections(&m);

        // "C" comes first in the caller's list, so it wins the tie over "A".
        assert_eq!(labels(&set), vec!["C", "A", "C&A"]);
    }

    #[test]
    fn test_set_sizes_and_rows() {
        let m = matrix(&["A", "B"], &[vec![1, 1], vec![1, 0], vec![0, 0]]);
        let set = aggregate_intersections(&m);

        assert_eq!(set.n_rows, 3);
        assert_eq!(set.set_sizes, vec![2, 1]);
    }

    #[test]
    fn test_degree_order() {
        let m = matrix(
            &["A", "B"],
            &[vec![1, 1], vec![1, 1], vec![1, 1], vec![0, 1], vec![1, 0], vec![1, 0]],
        );
        let set = aggregate_intersections_by(&m, SortOrder::Degree);

        assert_eq!(labels(&set), vec!["A", "B", "A&B"]);
    }

    #[test]
    fn test_no_rows() {
        let m = matrix(&["A"], &[]);
        let set = aggregate_intersections(&m);

        assert!(set.is_empty());
        assert_eq!(set.total_count(), 0);
    }
}
