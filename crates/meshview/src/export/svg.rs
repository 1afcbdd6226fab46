//! SVG export backend.
//!
//! [`SvgBuilder`] configures an [`Svg`] exporter over any [`io::Write`]
//! target. The document root has the window's logical size; the scene sits
//! in a group carrying the viewport transform, followed by one hidden detail
//! panel per node. Clicking a node follows a `#detail-<id>` link, and a CSS
//! `:target` rule reveals the matching panel until its close link is followed.

mod panel;

use std::io::{self, Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use meshview_core::{
    color::Color,
    draw::LayeredOutput,
    geometry::Size,
    scene::SceneItem,
};

use crate::{
    config::{StyleConfig, WindowConfig},
    diagram::Diagram,
    export::{self, Exporter},
    panel::DetailPanel,
    viewport::Viewport,
};

const PANEL_CSS: &str = "\
.detail-panel { display: none; }
.detail-panel:target { display: inline; }
.node-link { cursor: pointer; }
";

/// Fragment a node links to.
pub fn panel_anchor(node: &impl std::fmt::Display) -> String {
    format!("detail-{node}")
}

/// Builder for [`Svg`] exporters.
#[derive(Debug)]
pub struct SvgBuilder<W> {
    writer: W,
    window: WindowConfig,
    style: StyleConfig,
}

impl<W: io::Write> SvgBuilder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            window: WindowConfig::default(),
            style: StyleConfig::default(),
        }
    }

    pub fn with_window(mut self, window: &WindowConfig) -> Self {
        self.window = window.clone();
        self
    }

    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if the configured background color
    /// cannot be parsed.
    pub fn build(self) -> Result<Svg<W>, export::Error> {
        let background = self.style.background_color().map_err(export::Error::Render)?;
        Ok(Svg {
            writer: self.writer,
            title: self.window.title().to_string(),
            window: Size::new(self.window.width(), self.window.height()),
            background,
        })
    }
}

/// SVG exporter writing to `W`.
#[derive(Debug)]
pub struct Svg<W> {
    writer: W,
    title: String,
    window: Size,
    background: Option<Color>,
}

impl<W: io::Write> Svg<W> {
    /// Builds the complete document without writing it.
    pub fn render_document(&self, diagram: &Diagram, viewport: &Viewport) -> Document {
        let mut doc = Document::new()
            .set("width", self.window.width())
            .set("height", self.window.height())
            .set(
                "viewBox",
                format!("0 0 {} {}", self.window.width(), self.window.height()),
            )
            .add(svg_element::Title::new(self.title.as_str()))
            .add(svg_element::Style::new(PANEL_CSS));

        if let Some(background) = self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", background.to_string()),
            );
        }

        let mut output = LayeredOutput::new();
        for edge in diagram.edges() {
            output.merge(edge.render_to_layers());
        }
        for node in diagram.nodes() {
            output.merge(node.render_to_layers());
        }
        for decoration in diagram.decorations() {
            output.merge(decoration.render_to_layers());
        }
        debug!(items = output.len(); "Scene rendered to layers");

        let mut scene = svg_element::Group::new()
            .set("class", "scene")
            .set("transform", viewport.transform());
        for node in output.render() {
            scene = scene.add(node);
        }
        scene = scene.add(self.render_hotspots(diagram));
        doc = doc.add(scene);

        let mut panels = svg_element::Group::new().set("class", "detail-panels");
        for node in diagram.nodes() {
            panels = panels.add(panel::render_panel(&DetailPanel::for_node(node), self.window));
        }
        doc.add(panels)
    }

    /// Transparent link areas over every node.
    fn render_hotspots(&self, diagram: &Diagram) -> svg_element::Group {
        diagram
            .nodes()
            .fold(svg_element::Group::new().set("class", "hotspots"), |group, node| {
                let bounds = node.bounds();
                let area = svg_element::Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", "transparent");
                let link = svg_element::Anchor::new()
                    .set("href", format!("#{}", panel_anchor(&node.id())))
                    .set("class", "node-link")
                    .add(svg_element::Title::new(node.label()))
                    .add(area);
                group.add(link)
            })
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_document(&mut self, doc: &Document) -> Result<(), export::Error> {
        if let Err(err) = write!(self.writer, "{doc}") {
            error!(err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: io::Write> Exporter for Svg<W> {
    fn export_diagram(&mut self, diagram: &Diagram, viewport: &Viewport) -> Result<(), export::Error> {
        let doc = self.render_document(diagram, viewport);
        debug!("SVG document rendered");
        self.write_document(&doc)?;
        info!("SVG written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, topology::Topology};

    fn render(config: &AppConfig) -> String {
        let diagram = Diagram::construct(Topology::standard()).unwrap();
        let viewport = Viewport::fit(
            diagram.content_bounds(),
            Size::new(config.window().width(), config.window().height()),
            config.view().margin(),
            config.view().zoom(),
        )
        .unwrap();

        let mut exporter = SvgBuilder::new(Vec::new())
            .with_window(config.window())
            .with_style(config.style())
            .build()
            .unwrap();
        exporter.export_diagram(&diagram, &viewport).unwrap();
        String::from_utf8(exporter.into_inner()).unwrap()
    }

    #[test]
    fn test_document_root_and_title() {
        let svg = render(&AppConfig::default());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("width=\"1200\""));
        assert!(svg.contains("height=\"900\""));
        assert!(svg.contains("<title>Optimized Bus Topology Visualization</title>"));
        assert!(svg.contains(":target"));
    }

    #[test]
    fn test_one_panel_and_link_per_node() {
        let svg = render(&AppConfig::default());
        assert_eq!(svg.matches("class=\"detail-panel\"").count(), 23);
        assert_eq!(svg.matches("class=\"node-link\"").count(), 23);
        assert!(svg.contains("id=\"detail-Router0\""));
        assert!(svg.contains("href=\"#detail-L1_3\""));
    }

    #[test]
    fn test_edges_precede_nodes() {
        let svg = render(&AppConfig::default());
        let edges = svg.find("data-layer=\"edge\"").unwrap();
        let nodes = svg.find("data-layer=\"node\"").unwrap();
        let text = svg.find("data-layer=\"text\"").unwrap();
        assert!(edges < nodes);
        assert!(nodes < text);
    }

    #[test]
    fn test_utilization_labels() {
        let svg = render(&AppConfig::default());
        for label in ["1.81%", "0.52%", "1.54%", "1.61%", "1.63%", "1.45%", "0.66%", "0.82%", "0.34%", "0.71%"] {
            assert!(svg.contains(&format!(">{label}<")), "missing label {label}");
        }
    }

    #[test]
    fn test_invalid_background_fails_build() {
        let style = StyleConfig::new(Some("no-such-color".to_string()));
        let result = SvgBuilder::new(Vec::new()).with_style(&style).build();
        assert!(matches!(result, Err(export::Error::Render(_))));
    }

    #[test]
    fn test_panel_anchor() {
        assert_eq!(panel_anchor(&"Router3"), "detail-Router3");
    }
}
