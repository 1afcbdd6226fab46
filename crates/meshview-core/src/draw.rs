//! Drawing primitives for diagram rendering.
//!
//! Everything here is backend-agnostic data plus a stateless mapping onto SVG
//! nodes. Drawables emit into [`RenderLayer`]s, which [`LayeredOutput`]
//! orders during final SVG generation.
mod layer;
mod rich_text;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use rich_text::{RichText, Span};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeStyle};
pub use text::{Text, TextAnchor, TextDefinition};

use crate::geometry::{Point, Size};

/// Trait for elements that can be rendered at an arbitrary position.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable at `position` into one or more layers.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size of this drawable.
    fn size(&self) -> Size;
}
