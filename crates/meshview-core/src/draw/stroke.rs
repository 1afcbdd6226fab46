//! Stroke definitions for edges, outlines and paths.
//!
//! [`StrokeDefinition`] bundles color, width, dash pattern and line cap. The
//! [`apply_stroke!`](crate::apply_stroke!) macro writes all of them onto an
//! SVG element.
//!
//! | Property | SVG attribute |
//! |----------|---------------|
//! | `color` | `stroke`, `stroke-opacity` |
//! | `width` | `stroke-width` |
//! | `style` | `stroke-dasharray` |
//! | `cap` | `stroke-linecap` |
//!
//! ```
//! use meshview_core::color::Color;
//! use meshview_core::draw::{StrokeCap, StrokeDefinition};
//! use svg::node::element::Line;
//!
//! let stroke = StrokeDefinition::solid(Color::new("black").unwrap(), 2.0)
//!     .with_cap(StrokeCap::Round);
//! let line = meshview_core::apply_stroke!(Line::new(), &stroke);
//! assert!(line.to_string().contains("stroke-linecap=\"round\""));
//! ```

use crate::color::Color;

/// Line pattern of a stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// 2px dot, 3px gap
    Dotted,
}

impl StrokeStyle {
    /// SVG `stroke-dasharray` value, `None` for solid lines.
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dotted => Some("2,3"),
        }
    }
}

/// How line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
}

impl StrokeCap {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
        }
    }
}

/// A stroke definition for rendering lines and outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
}

impl StrokeDefinition {
    /// Creates a solid stroke with butt caps.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Creates a solid stroke. Same as [`StrokeDefinition::new`].
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Creates a dotted stroke.
    pub fn dotted(color: Color, width: f32) -> Self {
        Self::new(color, width).with_style(StrokeStyle::Dotted)
    }

    /// Returns the stroke with a different line pattern.
    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns the stroke with a different line cap.
    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::default(),
            cap: StrokeCap::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets color, opacity, width and line cap, plus the dash pattern when the
/// style is not solid.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
