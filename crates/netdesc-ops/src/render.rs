//! Rendering capabilities.
//!
//! The pipeline only describes what to draw. Backends live in `netdesc-viz`;
//! the recording implementations here keep the batch headless.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use netdesc_core::Network;

/// One bar of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Center position on the x axis.
    pub x: f64,
    pub height: f64,
    /// Tick label shown under the bar.
    pub label: String,
}

/// A bar chart ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// File stem for backends that write to disk.
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Logarithmic y axis.
    pub log_y: bool,
    pub bar_width: f64,
    pub bars: Vec<Bar>,
}

impl ChartSpec {
    /// Bars that can be drawn on this chart's y axis.
    ///
    /// A logarithmic axis cannot show non-positive heights.
    pub fn drawable_bars(&self) -> impl Iterator<Item = &Bar> {
        self.bars
            .iter()
            .filter(move |bar| bar.height.is_finite() && (!self.log_y || bar.height > 0.0))
    }

    /// Horizontal extent covering every bar, including its width.
    pub fn x_range(&self) -> (f64, f64) {
        let half = self.bar_width / 2.0;
        let min = self.bars.iter().map(|b| b.x).fold(f64::INFINITY, f64::min);
        let max = self.bars.iter().map(|b| b.x).fold(f64::NEG_INFINITY, f64::max);
        if min.is_finite() && max.is_finite() {
            (min - half, max + half)
        } else {
            (0.0, 1.0)
        }
    }
}

/// Draws charts somewhere: a window, a file, nowhere.
pub trait ChartRenderer {
    fn render(&mut self, chart: &ChartSpec) -> Result<()>;
}

/// Displays the node-link layout of a network.
pub trait GraphViewer {
    /// Show `network`; may block until the user dismisses it.
    fn show(&mut self, name: &str, network: &Network) -> Result<()>;
}

/// Renderer that only records what it was asked to draw.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub rendered: Vec<ChartSpec>,
}

impl ChartRenderer for NullRenderer {
    fn render(&mut self, chart: &ChartSpec) -> Result<()> {
        debug!(chart = %chart.id, bars = chart.bars.len(), "Skipping chart render");
        self.rendered.push(chart.clone());
        Ok(())
    }
}

/// Viewer for headless runs.
#[derive(Debug, Default)]
pub struct NoopViewer {
    /// Names of the networks that would have been shown.
    pub shown: Vec<String>,
}

impl GraphViewer for NoopViewer {
    fn show(&mut self, name: &str, network: &Network) -> Result<()> {
        debug!(
            network = name,
            nodes = network.node_count(),
            "No viewer available, skipping graph display"
        );
        self.shown.push(name.to_string());
        Ok(())
    }
}
