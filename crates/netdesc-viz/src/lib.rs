//! Rendering backends for netdesc.
//!
//! - [`SvgRenderer`]: degree-distribution charts written as SVG files
//! - `NativeViewer` (feature `native`): an eframe window showing the
//!   node-link layout of a network under a force-directed layout

mod chart;

#[cfg(feature = "native")]
mod app;
#[cfg(feature = "native")]
mod settings;
#[cfg(feature = "native")]
mod viewer;

pub use chart::SvgRenderer;

#[cfg(feature = "native")]
pub use app::NetworkViewerApp;
#[cfg(feature = "native")]
pub use viewer::NativeViewer;
