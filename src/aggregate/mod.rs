//! Intersection aggregation over membership matrices.

pub mod intersection;

pub use intersection::{aggregate_intersections, aggregate_intersections_by, PatternKey, SortOrder};
