//! Connectivity index over the topology tables.
//!
//! [`Connectivity`] mirrors the node and edge tables in a directed `petgraph`
//! graph. Building it validates that every endpoint names a declared node and
//! that node ids are unique.

use std::collections::HashMap;

use log::{debug, trace};
use petgraph::{
    Direction,
    algo::connected_components,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use meshview_core::{identifier::Id, scene::NodeKind};

use crate::{
    error::MeshviewError,
    topology::{Endpoint, Topology},
};

/// How two nodes are connected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Connection {
    /// Cache hierarchy or memory wiring.
    Hierarchy,
    /// Router-to-router mesh link with its utilization.
    Mesh(f64),
}

/// Directed graph of the topology.
#[derive(Debug)]
pub struct Connectivity {
    graph: DiGraph<(Id, NodeKind), Connection>,
    node_id_map: HashMap<Id, NodeIndex>,
}

impl Connectivity {
    /// Indexes `topology`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshviewError::Graph`] for a duplicated node id or an
    /// endpoint naming an undeclared node.
    pub fn from_topology(topology: &Topology) -> Result<Self, MeshviewError> {
        let mut graph = DiGraph::new();
        let mut node_id_map = HashMap::new();

        for node in topology.nodes() {
            let index = graph.add_node((node.id(), node.kind()));
            if node_id_map.insert(node.id(), index).is_some() {
                return Err(MeshviewError::Graph(format!(
                    "node `{}` is declared more than once",
                    node.id()
                )));
            }
        }

        let mut connectivity = Self { graph, node_id_map };

        for edge in topology.edges() {
            connectivity.connect(edge.from(), edge.to(), Connection::Hierarchy)?;
        }
        for link in topology.links() {
            connectivity.connect(link.from(), link.to(), Connection::Mesh(link.utilization()))?;
        }
        for endpoint in topology.nuca_path() {
            connectivity.index_of(endpoint.node())?;
        }
        if let Some(marker) = topology.busy_marker() {
            if !connectivity.contains(marker.node()) {
                return Err(MeshviewError::Graph(format!(
                    "busy-path marker references unknown node `{}`",
                    marker.node()
                )));
            }
        }

        debug!(
            nodes = connectivity.graph.node_count(),
            edges = connectivity.graph.edge_count();
            "Connectivity indexed"
        );
        Ok(connectivity)
    }

    fn connect(
        &mut self,
        from: Endpoint,
        to: Endpoint,
        connection: Connection,
    ) -> Result<(), MeshviewError> {
        let source = self.index_of(from.node())?;
        let target = self.index_of(to.node())?;
        trace!(from = from.node().to_string(), to = to.node().to_string(); "Connecting nodes");
        self.graph.add_edge(source, target, connection);
        Ok(())
    }

    fn index_of(&self, id: Id) -> Result<NodeIndex, MeshviewError> {
        self.node_id_map
            .get(&id)
            .copied()
            .ok_or_else(|| MeshviewError::Graph(format!("edge references unknown node `{id}`")))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.node_id_map.contains_key(&id)
    }

    /// Nodes reachable over one outgoing edge.
    pub fn successors(&self, id: Id) -> Vec<Id> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Nodes with an edge into `id`.
    pub fn predecessors(&self, id: Id) -> Vec<Id> {
        self.neighbors(id, Direction::Incoming)
    }

    fn neighbors(&self, id: Id, direction: Direction) -> Vec<Id> {
        let Some(&index) = self.node_id_map.get(&id) else {
            return Vec::new();
        };
        let mut neighbors: Vec<Id> = self
            .graph
            .neighbors_directed(index, direction)
            .map(|neighbor| self.graph[neighbor].0)
            .collect();
        // petgraph yields the most recently added edge first.
        neighbors.reverse();
        neighbors
    }

    /// Total utilization of the mesh links leaving `id`.
    pub fn outgoing_utilization(&self, id: Id) -> f64 {
        let Some(&index) = self.node_id_map.get(&id) else {
            return 0.0;
        };
        self.graph
            .edges_directed(index, Direction::Outgoing)
            .filter_map(|edge| match edge.weight() {
                Connection::Mesh(utilization) => Some(*utilization),
                Connection::Hierarchy => None,
            })
            .sum()
    }

    /// Number of weakly connected components.
    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use meshview_core::{
        draw::StrokeDefinition,
        geometry::{Point, Size},
        scene::Side,
    };

    use super::*;
    use crate::topology::{EdgeDescriptor, NodeDescriptor};

    #[test]
    fn test_standard_topology_counts() {
        let connectivity = Connectivity::from_topology(Topology::standard()).unwrap();
        assert_eq!(connectivity.node_count(), 23);
        assert_eq!(connectivity.edge_count(), 29);
        assert_eq!(connectivity.component_count(), 1);
    }

    #[test]
    fn test_router_neighbors() {
        let connectivity = Connectivity::from_topology(Topology::standard()).unwrap();
        let router0 = Id::new("Router0");

        assert_eq!(
            connectivity.successors(router0),
            vec![Id::new("Router1"), Id::new("Router5")]
        );
        let predecessors = connectivity.predecessors(router0);
        assert!(predecessors.contains(&Id::new("L2Cache0")));
        assert!(predecessors.contains(&Id::new("L3Cache0")));
        assert!(predecessors.contains(&Id::new("Router5")));
    }

    #[test]
    fn test_outgoing_utilization() {
        let connectivity = Connectivity::from_topology(Topology::standard()).unwrap();
        assert_approx_eq!(
            f64,
            connectivity.outgoing_utilization(Id::new("Router0")),
            0.0233,
            epsilon = 1e-9
        );
        assert_eq!(connectivity.outgoing_utilization(Id::new("CPU0")), 0.0);
    }

    #[test]
    fn test_unknown_endpoint_is_graph_error() {
        let mut topology = Topology::standard().clone();
        topology.add_edge(EdgeDescriptor::new(
            Endpoint::new("CPU0", Side::Right),
            Endpoint::new("Nowhere", Side::Left),
            StrokeDefinition::default(),
        ));

        let err = Connectivity::from_topology(&topology).unwrap_err();
        assert!(matches!(err, MeshviewError::Graph(message) if message.contains("Nowhere")));
    }

    #[test]
    fn test_duplicate_node_is_graph_error() {
        let mut topology = Topology::empty();
        for _ in 0..2 {
            topology.add_node(NodeDescriptor::new(
                "CPU0",
                NodeKind::Cpu,
                Point::default(),
                Size::new(10.0, 10.0),
                &[],
            ));
        }

        assert!(matches!(
            Connectivity::from_topology(&topology),
            Err(MeshviewError::Graph(_))
        ));
    }

    #[test]
    fn test_empty_topology_indexes_nothing() {
        let connectivity = Connectivity::from_topology(&Topology::empty()).unwrap();
        assert_eq!(connectivity.node_count(), 0);
        assert_eq!(connectivity.edge_count(), 0);
    }

    #[test]
    fn test_unknown_busy_marker_is_graph_error() {
        let mut topology = Topology::empty();
        topology.set_busy_marker(Endpoint::new("Router0", Side::Right));

        let err = Connectivity::from_topology(&topology).unwrap_err();
        assert!(matches!(
            err,
            MeshviewError::Graph(message)
                if message == "busy-path marker references unknown node `Router0`"
        ));
    }

    #[test]
    fn test_unknown_node_has_no_neighbors() {
        let connectivity = Connectivity::from_topology(Topology::standard()).unwrap();
        assert!(!connectivity.contains(Id::new("Nowhere")));
        assert!(connectivity.successors(Id::new("Nowhere")).is_empty());
    }
}
