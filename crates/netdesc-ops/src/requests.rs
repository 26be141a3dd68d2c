//! Request DTOs for operations.
//!
//! Each request carries everything one pipeline run needs, so the CLI and
//! tests drive [`crate::OpsContext`] the same way.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogEntry};

/// Describe every network of a catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeRequest {
    /// Networks to process, in order.
    pub catalog: Catalog,

    /// Hand each network to the graph viewer after reporting it.
    #[serde(default)]
    pub show_graphs: bool,

    /// Log load and extraction failures and move on instead of aborting.
    #[serde(default)]
    pub keep_going: bool,

    /// Print the console block for each network.
    #[serde(default = "default_echo")]
    pub echo: bool,
}

fn default_echo() -> bool {
    true
}

impl DescribeRequest {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            show_graphs: false,
            keep_going: false,
            echo: default_echo(),
        }
    }

    pub fn show_graphs(mut self, show: bool) -> Self {
        self.show_graphs = show;
        self
    }

    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Suppress the console block.
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }
}

/// Plot the binned degree distribution of selected networks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionRequest {
    pub entries: Vec<CatalogEntry>,

    /// Log failures and move on instead of aborting.
    #[serde(default)]
    pub keep_going: bool,
}

impl DistributionRequest {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            keep_going: false,
        }
    }

    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
}
