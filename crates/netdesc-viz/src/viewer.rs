//! Native window backend for [`GraphViewer`].

use anyhow::{anyhow, Result};
use eframe::{run_native, NativeOptions};
use petgraph::stable_graph::StableGraph;
use petgraph::EdgeType;
use tracing::info;

use netdesc_core::{Network, Vertex};
use netdesc_ops::GraphViewer;

use crate::app::NetworkViewerApp;

/// Opens one window per network and blocks until it is closed.
#[derive(Debug, Clone)]
pub struct NativeViewer {
    inner_size: [f32; 2],
}

impl Default for NativeViewer {
    fn default() -> Self {
        Self {
            inner_size: [1000.0, 750.0],
        }
    }
}

impl NativeViewer {
    pub fn new() -> Self {
        Self::default()
    }

    fn run<Ty: EdgeType + 'static>(
        &self,
        name: &str,
        graph: &StableGraph<Vertex, f64, Ty>,
    ) -> Result<()> {
        let title = format!("Network: {name}");
        let options = NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(self.inner_size)
                .with_title(title.clone()),
            ..Default::default()
        };

        let app = NetworkViewerApp::new(name, graph);
        info!(network = name, "Opening graph viewer");
        run_native(&title, options, Box::new(move |_cc| Ok(Box::new(app))))
            .map_err(|e| anyhow!("Graph viewer failed: {e}"))
    }
}

impl GraphViewer for NativeViewer {
    fn show(&mut self, name: &str, network: &Network) -> Result<()> {
        match network {
            Network::Directed(g) => self.run(name, g),
            Network::Undirected(g) => self.run(name, g),
        }
    }
}
