//! Data structures for set-membership analysis.

mod membership;
mod result;
mod table;

pub use membership::{validate_set_names, MembershipMatrix};
pub use result::{IntersectionRecord, IntersectionSet, IntersectionSummary, EMPTY_PATTERN_LABEL};
pub use table::{Cell, CellType, Table};
