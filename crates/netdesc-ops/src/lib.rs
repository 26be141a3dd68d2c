//! Netdesc Operations Layer
//!
//! Everything between a loaded [`netdesc_core::Network`] and the outside
//! world: descriptor extraction, degree-distribution binning, the console
//! and CSV reporters, the network catalog and the batch pipeline that ties
//! them together.
//!
//! ## Architecture
//!
//! - **Requests**: typed inputs for each pipeline run
//! - **Responses**: what a run produced, including skipped networks
//! - **OpsContext**: executes runs against a [`Config`]
//! - **Render traits**: [`ChartRenderer`] and [`GraphViewer`] are supplied by
//!   the caller, so the pipeline itself never opens a window
//!
//! ## Usage
//!
//! ```rust,no_run
//! use netdesc_ops::{Config, DescribeRequest, NoopViewer, OpsContext};
//!
//! fn main() -> anyhow::Result<()> {
//!     let ctx = OpsContext::new(Config::load(None)?);
//!     let request = DescribeRequest::new(ctx.catalog(false)?);
//!     let response = ctx.describe(request, &mut NoopViewer::default())?;
//!
//!     println!("Described {} networks", response.rows.len());
//!     Ok(())
//! }
//! ```

mod catalog;
mod config;
mod context;
pub mod descriptors;
pub mod distribution;
mod error;
mod render;
mod report;
mod requests;
mod responses;

// Re-export public API
pub use catalog::{Catalog, CatalogEntry};
pub use config::{CategoryConfig, Config, ENV_BASE_DIR, ENV_CHART_DIR, ENV_OUTPUT};
pub use context::OpsContext;
pub use descriptors::{
    extract, DescriptorError, DescriptorVector, Descriptors, DESCRIPTOR_LABELS,
};
pub use distribution::{DegreeHistogram, DistributionError, BIN_COUNT};
pub use error::{OpsError, OpsResult};
pub use render::{Bar, ChartRenderer, ChartSpec, GraphViewer, NoopViewer, NullRenderer};
pub use report::{format_descriptors, print_descriptors, CsvReport, DescriptorTable};
pub use requests::*;
pub use responses::*;
