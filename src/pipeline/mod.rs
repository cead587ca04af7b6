//! Pipeline composition: set columns, normalization policy and record order.

mod runner;

pub use runner::{PipelineConfig, UpsetPipeline};
