//! Pipeline runner: table → membership matrix → intersection set.

use crate::aggregate::{aggregate_intersections_by, SortOrder};
use crate::data::{validate_set_names, IntersectionSet, MembershipMatrix, Table};
use crate::error::{UpsetError, Result};
use crate::normalize::{normalize_table, NormalizePolicy};
use crate::render::RenderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Pipeline configuration for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Name of the pipeline.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Set columns, in display order.
    pub columns: Vec<String>,
    /// Handling of unrecognized cell values.
    pub policy: NormalizePolicy,
    /// Record order.
    pub order: SortOrder,
    /// Plot styling.
    pub render: RenderConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: "upset".to_string(),
            description: None,
            columns: Vec::new(),
            policy: NormalizePolicy::default(),
            order: SortOrder::default(),
            render: RenderConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.render.validate()?;
        Ok(config)
    }

    /// Load from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(UpsetError::FileNotFound(path.to_path_buf()));
        }
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(UpsetError::from)
    }
}

/// Builder for normalizing and aggregating a table.
#[derive(Debug, Clone)]
pub struct UpsetPipeline {
    name: String,
    columns: Vec<String>,
    policy: NormalizePolicy,
    order: SortOrder,
}

impl Default for UpsetPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl UpsetPipeline {
    /// Create a pipeline with no set columns.
    pub fn new() -> Self {
        Self {
            name: "unnamed".to_string(),
            columns: Vec::new(),
            policy: NormalizePolicy::Permissive,
            order: SortOrder::Cardinality,
        }
    }

    /// Create from a config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            name: config.name.clone(),
            columns: config.columns.clone(),
            policy: config.policy,
            order: config.order,
        }
    }

    /// Set the pipeline name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the set columns, replacing any given before.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the normalization policy.
    pub fn policy(mut self, policy: NormalizePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Report unrecognized values instead of treating them as absent.
    pub fn strict(self) -> Self {
        self.policy(NormalizePolicy::Strict)
    }

    /// Set the record order.
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Set columns configured so far.
    pub fn set_columns(&self) -> &[String] {
        &self.columns
    }

    /// Convert to config for serialization.
    pub fn to_config(&self, description: Option<&str>, render: RenderConfig) -> PipelineConfig {
        PipelineConfig {
            name: self.name.clone(),
            description: description.map(String::from),
            columns: self.columns.clone(),
            policy: self.policy,
            order: self.order,
            render,
        }
    }

    /// Normalize the set columns of `table`.
    ///
    /// The column list is validated before any data is read.
    pub fn normalize(&self, table: &Table) -> Result<MembershipMatrix> {
        validate_set_names(&self.columns)?;
        normalize_table(table, &self.columns, self.policy)
    }

    /// Aggregate an already normalized matrix in the configured order.
    pub fn aggregate(&self, matrix: &MembershipMatrix) -> IntersectionSet {
        aggregate_intersections_by(matrix, self.order)
    }

    /// Run the pipeline on a table.
    pub fn run(&self, table: &Table) -> Result<IntersectionSet> {
        let matrix = self.normalize(table)?;
        let set = self.aggregate(&matrix);
        info!(
            pipeline = %self.name,
            rows = set.n_rows,
            sets = set.set_names.len(),
            patterns = set.len(),
            "pipeline finished"
        );
        Ok(set)
    }
}
