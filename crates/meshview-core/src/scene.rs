//! Scene model: nodes, attachment points, edges and decorations.
//!
//! Scene items are plain data with absolute coordinates. Rendering is a
//! stateless mapping onto [`LayeredOutput`] through the [`SceneItem`] trait,
//! so geometry can be tested without any backend.
//!
//! Edges store resolved endpoint coordinates, not references to nodes. An
//! edge computed from a node keeps its endpoints even if the node is later
//! moved or resized.
//!
//! ```
//! # use meshview_core::{identifier::Id, geometry::{Point, Size}};
//! # use meshview_core::scene::{Edge, Node, NodeKind, Side};
//! # use meshview_core::draw::StrokeDefinition;
//! let mut cpu = Node::new(Id::new("CPU0"), NodeKind::Cpu, "CPU0", Point::new(200.0, 200.0), Size::new(120.0, 60.0));
//! let right = cpu.add_attachment_point(Side::Right);
//! assert_eq!(cpu.resolved_position(right), Point::new(320.0, 230.0));
//!
//! let edge = Edge::new(cpu.resolved_position(right), Point::new(350.0, 230.0), StrokeDefinition::default());
//! cpu.set_size(200.0, 100.0);
//! assert_eq!(edge.from(), Point::new(320.0, 230.0));
//! ```

mod decoration;
mod edge;
mod node;

pub use decoration::Decoration;
pub use edge::{Edge, EdgeLabel};
pub use node::{AttachmentPoint, Node, NodeKind, Side};

use crate::{draw::LayeredOutput, geometry::Bounds};

/// An element with absolute coordinates that can render itself.
pub trait SceneItem: std::fmt::Debug {
    /// Renders the item into layers.
    fn render_to_layers(&self) -> LayeredOutput;

    /// Returns the area covered by everything the item draws.
    fn visual_bounds(&self) -> Bounds;
}
