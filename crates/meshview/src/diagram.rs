//! Diagram construction from the topology tables.
//!
//! [`Diagram::construct`] runs the whole build in a fixed order:
//!
//! 1. canvas extent
//! 2. nodes from their descriptors, with attachment points per descriptor
//! 3. hierarchy edges, resolved from the current attachment positions
//! 4. router mesh with busy coloring and utilization labels
//! 5. annotations, legend, NUCA path and busy-path marker
//!
//! Fitting the result into a window is a separate step, see
//! [`Viewport`](crate::Viewport).

use indexmap::IndexMap;
use log::{info, trace};

use meshview_core::{
    color::Color,
    draw::{StrokeDefinition, TextDefinition},
    geometry::{Bounds, Point, Size},
    identifier::Id,
    scene::{Decoration, Edge, EdgeLabel, Node, NodeKind, SceneItem},
};

use crate::{
    error::MeshviewError,
    structure::Connectivity,
    topology::{Endpoint, LINK_LABEL_OFFSET, Legend, LegendEntry, Placement, Topology},
};

const MARKER_SIZE: Size = Size::new(10.0, 10.0);
const NUCA_LABEL_RISE: f32 = 20.0;
/// Vertex of the NUCA path the caption is attached to.
const NUCA_LABEL_VERTEX: usize = 3;

/// A router-to-router mesh link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouterLink {
    from: Id,
    to: Id,
    utilization: f64,
    busy: bool,
    edge_index: usize,
}

impl RouterLink {
    pub fn from(&self) -> Id {
        self.from
    }

    pub fn to(&self) -> Id {
        self.to
    }

    pub fn utilization(&self) -> f64 {
        self.utilization
    }

    /// Busy flag taken from the link descriptor, see
    /// [`LinkDescriptor::is_busy`](crate::topology::LinkDescriptor::is_busy).
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Index of the link's edge in [`Diagram::edges`].
    pub fn edge_index(&self) -> usize {
        self.edge_index
    }
}

/// Stroke used for a mesh link.
pub fn link_stroke(busy: bool) -> StrokeDefinition {
    if busy {
        StrokeDefinition::solid(Color::rgb(220, 20, 60), 4.0)
    } else {
        StrokeDefinition::solid(named_color("darkblue"), 2.0)
    }
}

/// Utilization label for a mesh link, `None` when utilization is zero.
pub fn link_label(utilization: f64, busy: bool) -> Option<EdgeLabel> {
    if utilization <= 0.0 {
        return None;
    }
    let mut definition = TextDefinition::new();
    definition.set_font_size(8);
    definition.set_bold(true);
    definition.set_color(Some(named_color(if busy { "red" } else { "darkblue" })));
    Some(EdgeLabel::new(
        format!("{:.2}%", utilization * 100.0),
        definition,
        LINK_LABEL_OFFSET,
    ))
}

fn named_color(name: &str) -> Color {
    Color::new(name).unwrap_or_default()
}

/// The constructed diagram: nodes, edges and decorations.
#[derive(Debug)]
pub struct Diagram {
    canvas: Size,
    nodes: IndexMap<Id, Node>,
    edges: Vec<Edge>,
    router_links: Vec<RouterLink>,
    decorations: Vec<Decoration>,
    legend: Vec<LegendEntry>,
    connectivity: Connectivity,
}

impl Diagram {
    /// Builds the diagram described by `topology`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshviewError::Graph`] when a table names a node that is not
    /// declared, or when a node id is declared twice.
    pub fn construct(topology: &Topology) -> Result<Self, MeshviewError> {
        info!(nodes = topology.nodes().len(); "Constructing diagram");
        let connectivity = Connectivity::from_topology(topology)?;

        let mut diagram = Self {
            canvas: topology.canvas(),
            nodes: IndexMap::new(),
            edges: Vec::new(),
            router_links: Vec::new(),
            decorations: Vec::new(),
            legend: topology.legend().entries().to_vec(),
            connectivity,
        };

        diagram.place_nodes(topology);
        diagram.connect_hierarchy(topology)?;
        diagram.connect_mesh(topology)?;
        diagram.annotate(topology)?;

        info!(
            nodes = diagram.nodes.len(),
            edges = diagram.edges.len(),
            decorations = diagram.decorations.len();
            "Diagram constructed"
        );
        Ok(diagram)
    }

    fn place_nodes(&mut self, topology: &Topology) {
        for descriptor in topology.nodes() {
            let mut node = Node::new(
                descriptor.id(),
                descriptor.kind(),
                descriptor.label(),
                descriptor.origin(),
                descriptor.size(),
            );
            node.set_fill(topology.palette().fill_for(descriptor.kind()));
            if let Some(text) = descriptor.detail_text() {
                node.set_detail_text(text);
            }
            for side in descriptor.sides() {
                node.add_attachment_point(*side);
            }
            trace!(node = descriptor.id().to_string(), kind = descriptor.kind().name(); "Node placed");
            self.nodes.insert(descriptor.id(), node);
        }
    }

    fn connect_hierarchy(&mut self, topology: &Topology) -> Result<(), MeshviewError> {
        for descriptor in topology.edges() {
            let edge = Edge::new(
                self.resolve(descriptor.from())?,
                self.resolve(descriptor.to())?,
                *descriptor.stroke(),
            );
            self.edges.push(edge);
        }
        Ok(())
    }

    fn connect_mesh(&mut self, topology: &Topology) -> Result<(), MeshviewError> {
        for link in topology.links() {
            let busy = link.is_busy();
            let mut edge = Edge::new(
                self.resolve(link.from())?,
                self.resolve(link.to())?,
                link_stroke(busy),
            );
            if let Some(label) = link_label(link.utilization(), busy) {
                edge = edge.with_label(label);
            }
            trace!(
                from = link.from().node().to_string(),
                to = link.to().node().to_string(),
                utilization = link.utilization(),
                busy;
                "Mesh link"
            );

            self.router_links.push(RouterLink {
                from: link.from().node(),
                to: link.to().node(),
                utilization: link.utilization(),
                busy,
                edge_index: self.edges.len(),
            });
            self.edges.push(edge);
        }
        Ok(())
    }

    fn annotate(&mut self, topology: &Topology) -> Result<(), MeshviewError> {
        for annotation in topology.annotations() {
            let position = match annotation.placement() {
                Placement::Absolute(position) => position,
                Placement::Node(id, offset) => self.node_or_graph_error(id)?.position().add_point(offset),
            };
            self.decorations.push(Decoration::label(
                position,
                annotation.text(),
                annotation.definition().clone(),
            ));
        }

        self.add_legend(topology.legend());

        let palette = topology.palette();
        let path = topology
            .nuca_path()
            .iter()
            .map(|endpoint| self.resolve(*endpoint))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(anchor) = path.get(NUCA_LABEL_VERTEX) {
            let mut definition = TextDefinition::new();
            definition.set_color(Some(palette.nuca_path));
            self.decorations.push(Decoration::label(
                anchor.sub_point(Point::new(0.0, NUCA_LABEL_RISE)),
                topology.nuca_label(),
                definition,
            ));
        }
        if !path.is_empty() {
            self.decorations.push(Decoration::polyline(
                path,
                StrokeDefinition::dotted(palette.nuca_path, 2.0),
            ));
        }

        if let Some(marker) = topology.busy_marker() {
            let center = self.resolve(marker)?;
            self.decorations.push(Decoration::rect(
                Bounds::new_from_center(center, MARKER_SIZE),
                palette.busy_path,
            ));
        }

        Ok(())
    }

    fn add_legend(&mut self, legend: &Legend) {
        self.decorations
            .push(Decoration::background(legend.background(), legend.fill()));
        for (index, entry) in legend.entries().iter().enumerate() {
            self.decorations
                .push(Decoration::rect(Legend::swatch_bounds(index), entry.color()));
            self.decorations.push(Decoration::label(
                Legend::label_position(index),
                entry.label(),
                TextDefinition::new(),
            ));
        }
    }

    fn node_or_graph_error(&self, id: Id) -> Result<&Node, MeshviewError> {
        self.nodes
            .get(&id)
            .ok_or_else(|| MeshviewError::Graph(format!("reference to unknown node `{id}`")))
    }

    fn resolve(&self, endpoint: Endpoint) -> Result<Point, MeshviewError> {
        Ok(self
            .node_or_graph_error(endpoint.node())?
            .attachment_position(endpoint.side()))
    }

    /// Fixed extent of the drawing canvas.
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: impl Into<Id>) -> Option<&Node> {
        self.nodes.get(&id.into())
    }

    pub fn node_mut(&mut self, id: impl Into<Id>) -> Option<&mut Node> {
        self.nodes.get_mut(&id.into())
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(move |node| node.kind() == kind)
    }

    /// Hierarchy edges followed by mesh links.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn router_links(&self) -> &[RouterLink] {
        &self.router_links
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Bounding box of everything drawn: nodes, edges and decorations.
    pub fn content_bounds(&self) -> Bounds {
        self.nodes
            .values()
            .map(|node| node.visual_bounds())
            .chain(self.edges.iter().map(|edge| edge.visual_bounds()))
            .chain(self.decorations.iter().map(|decoration| decoration.visual_bounds()))
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }
}
