//! Response DTOs for operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::descriptors::DescriptorVector;

/// A network skipped by a `keep_going` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFailure {
    /// Catalog key of the network.
    pub key: String,
    pub message: String,
}

/// Outcome of a describe run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeResponse {
    /// Rows appended to the table, in processing order.
    pub rows: Vec<DescriptorVector>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<EntryFailure>,

    /// Table the rows were appended to.
    pub output: PathBuf,
}

impl DescribeResponse {
    pub fn described_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Summary of one plotted distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub key: String,
    pub node_count: usize,
    pub min_degree: usize,
    pub max_degree: usize,
    /// Nodes per bin.
    pub counts: Vec<usize>,
    /// Ids of the charts handed to the renderer.
    pub charts: Vec<String>,
}

/// Outcome of a distribution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionResponse {
    pub distributions: Vec<DistributionSummary>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<EntryFailure>,
}

impl DistributionResponse {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
