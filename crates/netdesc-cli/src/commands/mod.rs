//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod describe;
pub mod distribution;
pub mod show;

use netdesc_ops::GraphViewer;

/// The graph viewer this binary was built with.
#[cfg(feature = "native-viz")]
pub fn viewer() -> Option<Box<dyn GraphViewer>> {
    Some(Box::new(netdesc_viz::NativeViewer::new()))
}

/// The graph viewer this binary was built with.
#[cfg(not(feature = "native-viz"))]
pub fn viewer() -> Option<Box<dyn GraphViewer>> {
    None
}
