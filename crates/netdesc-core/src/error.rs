//! Error types for loading networks.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for graph loading.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while reading a network file.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The file is absent or unreadable.
    #[error("Failed to read network file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content does not follow the Pajek format.
    #[error("Malformed network file at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl GraphError {
    /// Create a parse error for a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
