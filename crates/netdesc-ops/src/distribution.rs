//! Log-binned degree distribution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use netdesc_core::Network;

use crate::render::{Bar, ChartSpec};

/// Number of logarithmic bins.
pub const BIN_COUNT: usize = 15;

/// Width of each bar, in log-degree units.
pub const BAR_WIDTH: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    #[error("network has no nodes")]
    EmptyGraph,

    #[error("minimum degree is 0, logarithmic bins are undefined")]
    ZeroDegree,
}

/// Degree frequencies grouped into [`BIN_COUNT`] log-spaced bins over
/// `[min_degree, max_degree + 1]`.
///
/// Bin `i` holds degrees `k` with `edges[i] <= k < edges[i + 1]`; the last
/// bin holds every `k >= edges[BIN_COUNT - 1]`, so every node is counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeHistogram {
    /// Bin edges in degree space; `edges[0]` is exactly the minimum degree.
    pub edges: Vec<f64>,
    /// Bin edges in log space, used as bar positions.
    pub log_edges: Vec<f64>,
    /// Nodes per bin.
    pub counts: Vec<usize>,
    /// Raw frequency of each degree value, indexed by degree.
    pub frequencies: Vec<usize>,
    pub node_count: usize,
}

impl DegreeHistogram {
    /// Bin the total degrees of `network`.
    pub fn from_network(network: &Network) -> Result<Self, DistributionError> {
        Self::from_frequencies(network.degree_histogram())
    }

    /// Bin a degree histogram, where `frequencies[k]` is the number of nodes
    /// of degree `k`.
    pub fn from_frequencies(mut frequencies: Vec<usize>) -> Result<Self, DistributionError> {
        let (Some(min), Some(max)) = (
            frequencies.iter().position(|&f| f > 0),
            frequencies.iter().rposition(|&f| f > 0),
        ) else {
            return Err(DistributionError::EmptyGraph);
        };
        if min == 0 {
            return Err(DistributionError::ZeroDegree);
        }
        frequencies.truncate(max + 1);
        let node_count = frequencies.iter().sum();

        let log_edges = linspace((min as f64).ln(), ((max + 1) as f64).ln(), BIN_COUNT);
        let mut edges: Vec<f64> = log_edges.iter().map(|x| x.exp()).collect();
        edges[0] = min as f64;

        let mut counts = vec![0; BIN_COUNT];
        for (k, &freq) in frequencies.iter().enumerate() {
            if freq == 0 {
                continue;
            }
            if let Some(bin) = edges.iter().rposition(|&edge| edge <= k as f64) {
                counts[bin] += freq;
            }
        }

        Ok(Self {
            edges,
            log_edges,
            counts,
            frequencies,
            node_count,
        })
    }

    /// Probability mass per bin.
    pub fn pmf(&self) -> Vec<f64> {
        let n = self.node_count as f64;
        self.counts.iter().map(|&c| c as f64 / n).collect()
    }

    /// Number of nodes with degree at least `ceil(edge)`, per bin edge.
    pub fn ccdf(&self) -> Vec<usize> {
        self.edges
            .iter()
            .map(|edge| {
                let from = edge.ceil() as usize;
                self.frequencies.iter().skip(from).sum()
            })
            .collect()
    }

    /// Nodes that fall outside every bin.
    pub fn dropped(&self) -> usize {
        self.node_count - self.counts.iter().sum::<usize>()
    }

    /// Probability mass and complementary cumulative charts.
    pub fn charts(&self, network_name: &str) -> [ChartSpec; 2] {
        let title = format!("Network: {network_name}");
        let bars = |heights: Vec<f64>| -> Vec<Bar> {
            self.log_edges
                .iter()
                .zip(&self.edges)
                .zip(heights)
                .map(|((&x, &edge), height)| Bar {
                    x,
                    height,
                    label: edge_label(edge),
                })
                .collect()
        };

        let ccdf = self.ccdf().into_iter().map(|c| c as f64).collect();
        [
            ChartSpec {
                id: format!("{network_name}_pdf"),
                title: title.clone(),
                x_label: "K".to_string(),
                y_label: "p(K)".to_string(),
                log_y: true,
                bar_width: BAR_WIDTH,
                bars: bars(self.pmf()),
            },
            ChartSpec {
                id: format!("{network_name}_ccdf"),
                title,
                x_label: "K".to_string(),
                y_label: "Cumulative p(K)".to_string(),
                log_y: true,
                bar_width: BAR_WIDTH,
                bars: bars(ccdf),
            },
        ]
    }
}

/// `count` evenly spaced values from `start` to `stop`, both included.
fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let step = (stop - start) / (count - 1) as f64;
    let mut values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
    if let Some(last) = values.last_mut() {
        *last = stop;
    }
    values
}

/// Tick label: the edge rounded to two decimals.
fn edge_label(edge: f64) -> String {
    format!("{:?}", (edge * 100.0).round() / 100.0)
}
