//! Z-ordered collection of SVG output.
//!
//! Scene items emit SVG nodes into named [`RenderLayer`]s. [`LayeredOutput`]
//! collects those nodes from every item and emits one `<g data-layer="...">`
//! group per non-empty layer, bottom layer first. Within a layer, nodes keep
//! the order in which they were added.
//!
//! ```
//! # use meshview_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Line, Rectangle};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
//! output.add_to_layer(RenderLayer::Edge, Box::new(Line::new()));
//!
//! // Edge group first, then Node group
//! assert_eq!(output.render().len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Legend panel and other fills behind everything
    Background,
    /// Links between nodes, always below node bodies
    Edge,
    /// Node bodies
    Node,
    /// Attachment point markers drawn on node borders
    Attachment,
    /// Overlays such as access paths and markers
    Decoration,
    /// Text labels and annotations
    Text,
}

impl RenderLayer {
    /// Returns the value used for the `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Edge => "edge",
            Self::Node => "node",
            Self::Attachment => "attachment",
            Self::Decoration => "decoration",
            Self::Text => "text",
        }
    }
}

/// SVG nodes tagged with the layer they belong to.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to `layer`.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Moves every node of `other` into this output, keeping their layers.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of collected nodes across all layers.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Consumes the output and returns one group per non-empty layer, bottom first.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable sort keeps insertion order inside each layer.
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result: Vec<SvgNode> = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            current = match current {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((current_layer, group.add(node)))
                }
                previous => {
                    if let Some((_, group)) = previous {
                        result.push(Box::new(group));
                    }
                    let group = svg_element::Group::new()
                        .set("data-layer", layer.name())
                        .add(node);
                    Some((layer, group))
                }
            };
        }

        if let Some((_, group)) = current {
            result.push(Box::new(group));
        }

        result
    }
}
