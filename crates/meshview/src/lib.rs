//! Meshview - static diagrams of a multi-core memory hierarchy.
//!
//! Builds the fixed scene of a four-core processor: CPUs with private L1
//! caches, shared L2 and L3 banks, main memory and a six-router mesh whose
//! links are annotated with their utilization. The scene is rendered to SVG,
//! where pressing a node reveals a panel with its detail text.

pub mod config;
pub mod diagram;
pub mod export;
pub mod panel;
pub mod structure;
pub mod topology;

mod error;
mod viewport;

pub use meshview_core::{color, draw, geometry, identifier, scene};

pub use error::MeshviewError;
pub use panel::{DetailPanel, Inspector, PanelId};
pub use viewport::Viewport;

use std::io;

use log::{debug, info};

use meshview_core::{geometry::Size, identifier::Id};

use config::AppConfig;
use diagram::Diagram;
use export::Exporter;
use topology::Topology;

/// Builder for constructing and rendering Meshview diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use meshview::{DiagramBuilder, config::AppConfig};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let diagram = builder.build().expect("Failed to build");
///
/// let svg = builder.render_svg(&diagram).expect("Failed to render");
/// println!("{svg}");
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Construct the standard memory hierarchy diagram.
    ///
    /// # Errors
    ///
    /// Returns `MeshviewError::Graph` if the topology tables are inconsistent.
    pub fn build(&self) -> Result<Diagram, MeshviewError> {
        self.build_from(Topology::standard())
    }

    /// Construct a diagram from an arbitrary topology.
    ///
    /// # Errors
    ///
    /// Returns `MeshviewError::Graph` for duplicate nodes or references to
    /// unknown nodes.
    pub fn build_from(&self, topology: &Topology) -> Result<Diagram, MeshviewError> {
        Diagram::construct(topology)
    }

    /// Fit the diagram into the configured window.
    ///
    /// # Errors
    ///
    /// Returns `MeshviewError::Config` for an invalid window size or zoom.
    pub fn viewport(&self, diagram: &Diagram) -> Result<Viewport, MeshviewError> {
        let window = self.config.window();
        let view = self.config.view();
        Viewport::fit(
            diagram.content_bounds(),
            Size::new(window.width(), window.height()),
            view.margin(),
            view.zoom(),
        )
    }

    /// Render the diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `MeshviewError` for viewport or export errors.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, MeshviewError> {
        let buffer = self.write_svg(diagram, Vec::new())?;
        let svg = String::from_utf8(buffer).map_err(|err| MeshviewError::Export(Box::new(err)))?;
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Render the diagram as SVG into `writer`, returning the writer.
    ///
    /// # Errors
    ///
    /// Returns `MeshviewError` for viewport, style or write errors.
    pub fn write_svg<W: io::Write>(&self, diagram: &Diagram, writer: W) -> Result<W, MeshviewError> {
        let viewport = self.viewport(diagram)?;
        debug!(scale = viewport.scale(); "Viewport ready");

        let mut exporter = export::svg::SvgBuilder::new(writer)
            .with_window(self.config.window())
            .with_style(self.config.style())
            .build()?;
        exporter.export_diagram(diagram, &viewport)?;
        Ok(exporter.into_inner())
    }

    /// Snapshot the detail panel a press on `node` would open.
    ///
    /// # Errors
    ///
    /// Returns `MeshviewError::UnknownNode` if the diagram has no such node.
    pub fn inspect(&self, diagram: &Diagram, node: impl Into<Id>) -> Result<DetailPanel, MeshviewError> {
        let node = node.into();
        diagram
            .node(node)
            .map(DetailPanel::for_node)
            .ok_or(MeshviewError::UnknownNode(node))
    }
}
