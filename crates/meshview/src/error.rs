//! Error types for Meshview operations.

use std::io;

use thiserror::Error;

use meshview_core::identifier::Id;

/// The main error type for Meshview operations.
#[derive(Debug, Error)]
pub enum MeshviewError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A topology table refers to something that does not exist.
    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Unknown node `{0}`")]
    UnknownNode(Id),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for MeshviewError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
