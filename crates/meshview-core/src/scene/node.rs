//! Rectangular hardware-block nodes and their attachment points.

use std::fmt;

use log::{trace, warn};
use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextDefinition},
    geometry::{Bounds, Insets, Point, Size},
    identifier::Id,
    scene::SceneItem,
};

/// Radius of the marker drawn on every attachment point.
const ATTACHMENT_RADIUS: f32 = 4.0;

/// Offset of the label from the node's top-left corner.
const LABEL_OFFSET: Point = Point::new(10.0, 10.0);

/// One of the four edges of a node rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hardware role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Router,
    Cpu,
    L1Cache,
    L2Cache,
    L3Cache,
    Memory,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Router => "router",
            Self::Cpu => "cpu",
            Self::L1Cache => "l1",
            Self::L2Cache => "l2",
            Self::L3Cache => "l3",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A connection point bound to one side of its owning node.
///
/// Attachment points have no position of their own; it is derived from the
/// owning node's current rectangle every time it is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentPoint {
    index: usize,
    side: Side,
}

impl AttachmentPoint {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn side(self) -> Side {
        self.side
    }
}

/// A rectangular diagram element representing a hardware block.
#[derive(Debug, Clone)]
pub struct Node {
    id: Id,
    kind: NodeKind,
    label: String,
    position: Point,
    size: Size,
    fill: Color,
    attachment_points: Vec<AttachmentPoint>,
    detail_text: String,
}

impl Node {
    /// Size used when a node is created without explicit dimensions.
    pub const DEFAULT_SIZE: Size = Size::new(100.0, 60.0);

    /// Creates a node with its top-left corner at `position`.
    ///
    /// The node starts with no attachment points, a light gray fill and a
    /// detail text listing its position and size.
    pub fn new(
        id: Id,
        kind: NodeKind,
        label: impl Into<String>,
        position: Point,
        size: Size,
    ) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
            position,
            size,
            fill: Color::rgb(211, 211, 211),
            attachment_points: Vec::new(),
            detail_text: Self::default_detail_text(position, size),
        }
    }

    /// Rich detail text describing the basic geometry of a node.
    pub fn default_detail_text(position: Point, size: Size) -> String {
        format!(
            "<b>Basic parameters:</b><br>• Position: ({}, {})<br>• Size: {} x {}<br>",
            position.x(),
            position.y(),
            size.width(),
            size.height()
        )
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Top-left corner of the node in diagram coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Raw detail markup shown when the node is selected.
    pub fn detail_text(&self) -> &str {
        &self.detail_text
    }

    /// The node rectangle in diagram coordinates.
    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.size)
    }

    pub fn attachment_points(&self) -> &[AttachmentPoint] {
        &self.attachment_points
    }

    pub fn attachment_count(&self) -> usize {
        self.attachment_points.len()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_detail_text(&mut self, text: impl Into<String>) {
        self.detail_text = text.into();
    }

    pub fn set_fill(&mut self, fill: Color) {
        self.fill = fill;
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Resizes the node. Attachment points follow on their next lookup.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Size::new(width, height);
    }

    /// Appends an attachment point on `side` and returns its index.
    pub fn add_attachment_point(&mut self, side: Side) -> usize {
        let index = self.attachment_points.len();
        self.attachment_points.push(AttachmentPoint { index, side });
        trace!(node = self.id.to_string(), index, side = side.name(); "Attachment point added");
        index
    }

    /// Midpoint of `side` of the current rectangle, in diagram coordinates.
    pub fn side_position(&self, side: Side) -> Point {
        let (w, h) = (self.size.width(), self.size.height());
        let local = match side {
            Side::Left => Point::new(0.0, h / 2.0),
            Side::Right => Point::new(w, h / 2.0),
            Side::Top => Point::new(w / 2.0, 0.0),
            Side::Bottom => Point::new(w / 2.0, h),
        };
        self.position.add_point(local)
    }

    /// Position of the attachment point at `index`.
    ///
    /// An index past the last attachment point yields the node's own position.
    pub fn resolved_position(&self, index: usize) -> Point {
        self.attachment_points
            .get(index)
            .map(|point| self.side_position(point.side))
            .unwrap_or(self.position)
    }

    /// Position of the first attachment point declared on `side`.
    ///
    /// Falls back to the node's own position when no point sits on that side.
    pub fn attachment_position(&self, side: Side) -> Point {
        match self.attachment_points.iter().find(|point| point.side == side) {
            Some(point) => self.side_position(point.side),
            None => {
                warn!(
                    node = self.id.to_string(),
                    side = side.name();
                    "No attachment point on requested side, using node position"
                );
                self.position
            }
        }
    }
}

impl SceneItem for Node {
    fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let bounds = self.bounds();

        let outline = StrokeDefinition::solid(Color::default(), 1.0);
        let body = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", self.fill.to_string())
            .set("fill-opacity", self.fill.alpha())
            .set("data-node", self.id.to_string());
        let body = apply_stroke!(body, &outline);
        output.add_to_layer(RenderLayer::Node, Box::new(body));

        let port_fill = Color::rgb(255, 255, 0);
        for point in &self.attachment_points {
            let center = self.side_position(point.side);
            let marker = svg_element::Circle::new()
                .set("cx", center.x())
                .set("cy", center.y())
                .set("r", ATTACHMENT_RADIUS)
                .set("fill", port_fill.to_string())
                .set("data-side", point.side.name());
            let marker = apply_stroke!(marker, &outline);
            output.add_to_layer(RenderLayer::Attachment, Box::new(marker));
        }

        let label_style = TextDefinition::default();
        let label = Text::new(&label_style, &self.label);
        output.merge(label.render_to_layers(self.position.add_point(LABEL_OFFSET)));

        output
    }

    fn visual_bounds(&self) -> Bounds {
        let node_bounds = self.bounds().add_padding(Insets::uniform(ATTACHMENT_RADIUS));
        let label_style = TextDefinition::default();
        let label = Text::new(&label_style, &self.label);
        node_bounds.merge(&label.bounds_at(self.position.add_point(LABEL_OFFSET)))
    }
}
