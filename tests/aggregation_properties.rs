//! Property tests for normalization and intersection aggregation.

use composable_upset::prelude::*;
use proptest::prelude::*;
use std::collections::HashSet;

const SET_NAMES: [&str; 5] = ["A", "B", "C", "D", "E"];

fn matrix_strategy() -> impl Strategy<Value = MembershipMatrix> {
    (1usize..=5).prop_flat_map(|n_sets| {
        prop::collection::vec(prop::collection::vec(any::<bool>(), n_sets), 0..60).prop_map(
            move |rows| {
                let names = SET_NAMES[..n_sets].iter().map(|s| s.to_string()).collect();
                MembershipMatrix::new(names, rows).unwrap()
            },
        )
    })
}

fn cell_strategy() -> impl Strategy<Value = Cell> {
    prop_oneof![
        any::<i64>().prop_map(Cell::Int),
        any::<f64>().prop_map(Cell::Float),
        any::<bool>().prop_map(Cell::Bool),
        ".{0,8}".prop_map(Cell::Text),
        Just(Cell::Missing),
    ]
}

/// Positions of the sets taking part in a pattern.
fn members(mask: &[bool]) -> Vec<usize> {
    mask.iter().enumerate().filter(|(_, &m)| m).map(|(i, _)| i).collect()
}

proptest! {
    #[test]
    fn counts_add_up_to_rows(m in matrix_strategy()) {
        let set = aggregate_intersections(&m);
        prop_assert_eq!(set.total_count(), m.n_rows());
        prop_assert!(set.iter().all(|r| r.count > 0));
    }

    #[test]
    fn patterns_are_unique(m in matrix_strategy()) {
        let set = aggregate_intersections(&m);
        let distinct: HashSet<&Vec<bool>> = set.iter().map(|r| &r.mask).collect();
        prop_assert_eq!(distinct.len(), set.len());

        let observed: HashSet<&[bool]> = m.rows().collect();
        prop_assert_eq!(observed.len(), set.len());
    }

    #[test]
    fn records_sorted_by_count_then_degree(m in matrix_strategy()) {
        let set = aggregate_intersections(&m);
        for w in set.records.windows(2) {
            prop_assert!(w[0].count >= w[1].count);
            if w[0].count == w[1].count {
                prop_assert!(w[0].degree() <= w[1].degree());
            }
            if w[0].count == w[1].count && w[0].degree() == w[1].degree() {
                prop_assert!(members(&w[0].mask) < members(&w[1].mask));
            }
        }
    }

    #[test]
    fn aggregation_ignores_row_order(m in matrix_strategy()) {
        let mut reversed: Vec<Vec<bool>> = m.rows().map(|r| r.to_vec()).collect();
        reversed.reverse();
        let flipped = MembershipMatrix::new(m.set_names().to_vec(), reversed).unwrap();

        prop_assert_eq!(aggregate_intersections(&m), aggregate_intersections(&flipped));
    }

    #[test]
    fn set_sizes_match_records(m in matrix_strategy()) {
        let set = aggregate_intersections(&m);
        for (i, &size) in set.set_sizes.iter().enumerate() {
            let from_records: usize = set.iter().filter(|r| r.contains(i)).map(|r| r.count).sum();
            prop_assert_eq!(size, from_records);
        }
    }

    #[test]
    fn degree_order_keeps_records(m in matrix_strategy()) {
        let by_count = aggregate_intersections_by(&m, SortOrder::Cardinality);
        let by_degree = aggregate_intersections_by(&m, SortOrder::Degree);

        prop_assert_eq!(by_count.len(), by_degree.len());
        for w in by_degree.records.windows(2) {
            prop_assert!(w[0].degree() <= w[1].degree());
            if w[0].degree() == w[1].degree() {
                prop_assert!(members(&w[0].mask) < members(&w[1].mask));
            }
        }
    }

    #[test]
    fn normalization_is_total(cell in cell_strategy()) {
        let flag = normalize_cell(&cell);
        let table = Table::new(vec!["S".to_string()], vec![vec![cell]]).unwrap();
        let names = vec!["S".to_string()];

        let permissive = normalize_table(&table, &names, NormalizePolicy::Permissive).unwrap();
        prop_assert_eq!(permissive.row(0), Some(&[flag][..]));
        // Strict only ever disagrees by failing
        if let Ok(strict) = normalize_table(&table, &names, NormalizePolicy::Strict) {
            prop_assert_eq!(strict.row(0), Some(&[flag][..]));
        }
    }
}
