//! Export functionality for Meshview diagrams.
//!
//! The [`Exporter`] trait is the last stage of the pipeline:
//!
//! ```text
//! Topology tables
//!     ↓ construct
//! Diagram (nodes, edges, decorations)
//!     ↓ fit
//! Viewport
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`MeshviewError::Export`](crate::MeshviewError::Export) at the crate
//! boundary.

/// SVG export backend.
pub mod svg;

use thiserror::Error;

use crate::{diagram::Diagram, viewport::Viewport};

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Exports `diagram` as seen through `viewport`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_diagram(&mut self, diagram: &Diagram, viewport: &Viewport) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug, Error)]
pub enum Error {
    /// The diagram could not be converted, e.g. an invalid style value.
    #[error("Render error: {0}")]
    Render(String),

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
