//! Straight line segments between two frozen endpoints.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextDefinition},
    geometry::{Bounds, Point},
    scene::SceneItem,
};

/// Text drawn next to an edge, relative to the edge midpoint.
#[derive(Debug, Clone)]
pub struct EdgeLabel {
    text: String,
    definition: TextDefinition,
    offset: Point,
}

impl EdgeLabel {
    pub fn new(text: impl Into<String>, definition: TextDefinition, offset: Point) -> Self {
        Self {
            text: text.into(),
            definition,
            offset,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn definition(&self) -> &TextDefinition {
        &self.definition
    }

    pub fn offset(&self) -> Point {
        self.offset
    }
}

/// A straight connection between two points.
///
/// Endpoints are captured when the edge is built and never change.
#[derive(Debug, Clone)]
pub struct Edge {
    from: Point,
    to: Point,
    stroke: StrokeDefinition,
    label: Option<EdgeLabel>,
}

impl Edge {
    pub fn new(from: Point, to: Point, stroke: StrokeDefinition) -> Self {
        Self {
            from,
            to,
            stroke,
            label: None,
        }
    }

    /// Returns the edge with a label attached.
    pub fn with_label(mut self, label: EdgeLabel) -> Self {
        self.label = Some(label);
        self
    }

    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn midpoint(&self) -> Point {
        self.from.midpoint(self.to)
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn label(&self) -> Option<&EdgeLabel> {
        self.label.as_ref()
    }

    /// Top-left position of the label, if any.
    pub fn label_position(&self) -> Option<Point> {
        self.label
            .as_ref()
            .map(|label| self.midpoint().add_point(label.offset))
    }
}

impl SceneItem for Edge {
    fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let line = svg_element::Line::new()
            .set("x1", self.from.x())
            .set("y1", self.from.y())
            .set("x2", self.to.x())
            .set("y2", self.to.y());
        let line = apply_stroke!(line, &self.stroke);
        output.add_to_layer(RenderLayer::Edge, Box::new(line));

        if let (Some(label), Some(position)) = (&self.label, self.label_position()) {
            let text = Text::new(&label.definition, &label.text);
            output.merge(text.render_to_layers(position));
        }

        output
    }

    fn visual_bounds(&self) -> Bounds {
        let line = Bounds::from_points(self.from, self.to);
        match (&self.label, self.label_position()) {
            (Some(label), Some(position)) => {
                let text = Text::new(&label.definition, &label.text);
                line.merge(&text.bounds_at(position))
            }
            _ => line,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        color::Color,
        draw::StrokeCap,
        geometry::Size,
        identifier::Id,
        scene::{Node, NodeKind, Side},
    };

    #[test]
    fn test_edge_endpoints_are_frozen() {
        let mut cpu = Node::new(
            Id::new("CPU0"),
            NodeKind::Cpu,
            "CPU0",
            Point::new(200.0, 200.0),
            Size::new(120.0, 60.0),
        );
        let right = cpu.add_attachment_point(Side::Right);
        let edge = Edge::new(
            cpu.resolved_position(right),
            Point::new(350.0, 230.0),
            StrokeDefinition::default(),
        );

        cpu.set_size(300.0, 300.0);
        cpu.set_position(Point::new(0.0, 0.0));

        assert_eq!(edge.from(), Point::new(320.0, 230.0));
        assert_eq!(edge.to(), Point::new(350.0, 230.0));
    }

    #[test]
    fn test_midpoint_and_label_position() {
        let mut definition = TextDefinition::new();
        definition.set_bold(true);
        definition.set_font_size(8);
        let edge = Edge::new(
            Point::new(820.0, 335.0),
            Point::new(900.0, 335.0),
            StrokeDefinition::default(),
        )
        .with_label(EdgeLabel::new("1.81%", definition, Point::new(-20.0, -15.0)));

        assert_eq!(edge.midpoint(), Point::new(860.0, 335.0));
        let position = edge.label_position().unwrap();
        assert_approx_eq!(f32, position.x(), 840.0);
        assert_approx_eq!(f32, position.y(), 320.0);
        assert_eq!(edge.label().unwrap().text(), "1.81%");
    }

    #[test]
    fn test_unlabeled_edge_has_no_label_position() {
        let edge = Edge::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), StrokeDefinition::default());
        assert!(edge.label().is_none());
        assert!(edge.label_position().is_none());
    }

    #[test]
    fn test_render_places_line_on_edge_layer() {
        let stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0).with_cap(StrokeCap::Round);
        let edge = Edge::new(Point::new(320.0, 230.0), Point::new(350.0, 230.0), stroke);
        let rendered: String = edge
            .render_to_layers()
            .render()
            .iter()
            .map(|n| n.to_string())
            .collect();

        assert!(rendered.contains("data-layer=\"edge\""));
        assert!(rendered.contains("x1=\"320\""));
        assert!(rendered.contains("stroke-linecap=\"round\""));
        assert!(!rendered.contains("data-layer=\"text\""));
    }

    #[test]
    fn test_visual_bounds_include_label() {
        let edge = Edge::new(Point::new(0.0, 100.0), Point::new(100.0, 100.0), StrokeDefinition::default())
            .with_label(EdgeLabel::new("0.52%", TextDefinition::new(), Point::new(-20.0, -15.0)));
        let bounds = edge.visual_bounds();
        assert!(bounds.min_y() <= 85.0);
        assert_approx_eq!(f32, bounds.min_x(), 0.0);
    }
}
