//! Free-standing diagram elements: annotations, filled rectangles and paths.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, RichText, StrokeDefinition, Text, TextDefinition},
    geometry::{Bounds, Point},
    scene::SceneItem,
};

/// A non-interactive scene element.
#[derive(Debug, Clone)]
pub enum Decoration {
    /// Text placed at an absolute position, anchored per its definition.
    Label {
        position: Point,
        content: RichText,
        definition: TextDefinition,
    },
    /// Filled rectangle with a thin outline.
    Rect {
        bounds: Bounds,
        fill: Color,
        outline: StrokeDefinition,
        layer: RenderLayer,
    },
    /// Open path through a sequence of points.
    Polyline {
        points: Vec<Point>,
        stroke: StrokeDefinition,
    },
}

impl Decoration {
    /// Plain text, `\n` separates lines.
    pub fn label(position: Point, text: &str, definition: TextDefinition) -> Self {
        Self::Label {
            position,
            content: RichText::plain(text),
            definition,
        }
    }

    /// Rectangle drawn above nodes.
    pub fn rect(bounds: Bounds, fill: Color) -> Self {
        Self::Rect {
            bounds,
            fill,
            outline: StrokeDefinition::default(),
            layer: RenderLayer::Decoration,
        }
    }

    /// Rectangle drawn behind everything else.
    pub fn background(bounds: Bounds, fill: Color) -> Self {
        Self::Rect {
            bounds,
            fill,
            outline: StrokeDefinition::default(),
            layer: RenderLayer::Background,
        }
    }

    pub fn polyline(points: Vec<Point>, stroke: StrokeDefinition) -> Self {
        Self::Polyline { points, stroke }
    }

    /// Plain text of a label, `None` for shapes.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Label { content, .. } => Some(content.to_plain_text()),
            _ => None,
        }
    }
}

impl SceneItem for Decoration {
    fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        match self {
            Self::Label {
                position,
                content,
                definition,
            } => {
                output.merge(Text::rich(definition, content.clone()).render_to_layers(*position));
            }
            Self::Rect {
                bounds,
                fill,
                outline,
                layer,
            } => {
                let rect = svg_element::Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", fill.to_string())
                    .set("fill-opacity", fill.alpha());
                output.add_to_layer(*layer, Box::new(apply_stroke!(rect, outline)));
            }
            Self::Polyline { points, stroke } => {
                if points.len() < 2 {
                    return output;
                }
                let mut path_data = format!("M {} {}", points[0].x(), points[0].y());
                for point in &points[1..] {
                    path_data.push_str(&format!(" L {} {}", point.x(), point.y()));
                }
                let path = svg_element::Path::new()
                    .set("d", path_data)
                    .set("fill", "none");
                output.add_to_layer(RenderLayer::Decoration, Box::new(apply_stroke!(path, stroke)));
            }
        }
        output
    }

    fn visual_bounds(&self) -> Bounds {
        match self {
            Self::Label {
                position,
                content,
                definition,
            } => Text::rich(definition, content.clone()).bounds_at(*position),
            Self::Rect { bounds, .. } => *bounds,
            Self::Polyline { points, .. } => points
                .iter()
                .map(|point| Bounds::from_points(*point, *point))
                .reduce(|acc, bounds| acc.merge(&bounds))
                .unwrap_or_default(),
        }
    }
}
