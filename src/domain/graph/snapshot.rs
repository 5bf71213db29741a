use std::collections::{HashMap, HashSet};

use crate::domain::graph::road::Road;
use crate::domain::ids::NodeId;

/// An immutable point-in-time view of the open road network.
///
/// Snapshots are copies, never live views: a planner working on one is
/// isolated from concurrent administrative status changes. Edges are kept in
/// a stable order (sorted by name at snapshot time) so traversal is
/// deterministic.
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    nodes: HashSet<NodeId>,
    edges: Vec<Road>,
    /// Node -> indices into `edges`, both directions of every open road.
    adjacency: HashMap<NodeId, Vec<usize>>,
}

impl GraphSnapshot {
    /// Builds a snapshot from open roads. Callers are expected to have
    /// filtered out closed/maintenance edges already.
    pub(crate) fn new(open_roads: Vec<Road>) -> Self {
        let mut nodes = HashSet::new();
        let mut adjacency: HashMap<NodeId, Vec<usize>> = HashMap::new();

        for (index, road) in open_roads.iter().enumerate() {
            nodes.insert(road.from.clone());
            nodes.insert(road.to.clone());
            adjacency.entry(road.from.clone()).or_default().push(index);
            adjacency.entry(road.to.clone()).or_default().push(index);
        }

        GraphSnapshot { nodes, edges: open_roads, adjacency }
    }

    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.nodes.contains(node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[Road] {
        &self.edges
    }

    /// Indices into [`Self::edges`] of the roads incident to `node`.
    pub fn neighbor_indices(&self, node: &NodeId) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edge_at(&self, index: usize) -> &Road {
        &self.edges[index]
    }
}
