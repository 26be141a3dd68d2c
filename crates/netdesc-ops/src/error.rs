//! Error types for the operations layer.

use std::path::PathBuf;
use thiserror::Error;

use netdesc_core::GraphError;

use crate::descriptors::DescriptorError;
use crate::distribution::DistributionError;

/// Result type for operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Errors that can occur during operations.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Network file missing or malformed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A descriptor is undefined for the network.
    #[error("Descriptor extraction failed: {0}")]
    Descriptor(#[from] DescriptorError),

    /// Degree distribution cannot be binned.
    #[error("Degree distribution failed: {0}")]
    Distribution(#[from] DistributionError),

    /// Catalog entry not found.
    #[error("No network named {key} in the catalog")]
    UnknownNetwork { key: String },

    /// Chart or graph rendering failed.
    #[error("Rendering {target} failed: {message}")]
    Render { target: String, message: String },

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Directory traversal error.
    #[error("Failed to scan {path}: {message}")]
    Scan { path: PathBuf, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OpsError {
    /// Create a rendering error.
    pub fn render(target: impl Into<String>, err: anyhow::Error) -> Self {
        Self::Render {
            target: target.into(),
            message: format!("{err:#}"),
        }
    }
}
