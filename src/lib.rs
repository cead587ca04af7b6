//! Composable UpSet Plot Library
//!
//! This library turns tabular membership data into the intersection counts
//! behind an UpSet plot, and draws the plot.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **load**: Table loading (CSV, TSV, spreadsheets)
//! - **data**: Core data structures (Table, MembershipMatrix, IntersectionSet)
//! - **normalize**: Cell value → boolean membership
//! - **aggregate**: Counting rows per distinct membership pattern
//! - **profile**: Per-set membership profiling
//! - **render**: PNG, JPEG and SVG output
//! - **pipeline**: Pipeline composition and configuration
//!
//! # Example
//!
//! ```no_run
//! use composable_upset::prelude::*;
//!
//! let table = load_table("genes.csv").unwrap();
//!
//! let set = UpsetPipeline::new()
//!     .columns(["Condition_A", "Condition_B", "Condition_C"])
//!     .run(&table)
//!     .unwrap();
//!
//! render_plot(&set, "upset_plot.png", &RenderConfig::default()).unwrap();
//! ```

pub mod aggregate;
pub mod data;
pub mod demo;
pub mod error;
pub mod load;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod render;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::aggregate::{aggregate_intersections, aggregate_intersections_by, SortOrder};
    pub use crate::data::{
        Cell, IntersectionRecord, IntersectionSet, IntersectionSummary, MembershipMatrix, Table,
    };
    pub use crate::demo::{demo_columns, demo_table};
    pub use crate::error::{Result, UpsetError};
    pub use crate::load::{load_table, load_table_with_sheet, FileFormat, TableLoader};
    pub use crate::normalize::{normalize_cell, normalize_table, NormalizePolicy};
    pub use crate::pipeline::{PipelineConfig, UpsetPipeline};
    pub use crate::profile::{profile_membership, MembershipProfile};
    pub use crate::render::{render_plot, RasterRenderer, RenderConfig, Renderer, SvgRenderer};
}
