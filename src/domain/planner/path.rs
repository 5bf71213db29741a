use crate::domain::graph::road::{Road, SegmentKey};
use crate::domain::ids::{EdgeName, NodeId};

/// One road traversal within a planned path, oriented in travel direction.
/// Carries the capacity so the occupancy tracker can run admission control
/// without going back to the graph.
#[derive(Debug, Clone)]
pub struct PathSegment {
    pub edge: EdgeName,
    pub key: SegmentKey,
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
    pub capacity: u32,
}

impl PathSegment {
    /// The segment for crossing `road` starting at `entry`. `entry` must be
    /// one of the road's endpoints.
    pub fn traversing(road: &Road, entry: &NodeId) -> Self {
        let to = road.other_end(entry).unwrap_or(&road.to).clone();
        PathSegment {
            edge: road.name.clone(),
            key: road.segment_key(),
            from: entry.clone(),
            to,
            weight: road.weight,
            capacity: road.capacity,
        }
    }
}

/// The outcome of a planning run: an ordered node sequence, the segments
/// connecting them, and the congestion-weighted total cost.
#[derive(Debug, Clone)]
pub struct PlannedPath {
    nodes: Vec<NodeId>,
    segments: Vec<PathSegment>,
    total_cost: f64,
}

impl PlannedPath {
    pub fn new(nodes: Vec<NodeId>, segments: Vec<PathSegment>, total_cost: f64) -> Self {
        debug_assert_eq!(nodes.len(), segments.len() + 1);
        PlannedPath { nodes, segments, total_cost }
    }

    /// The degenerate source-equals-target path: one node, no segments,
    /// zero cost.
    pub fn trivial(node: NodeId) -> Self {
        PlannedPath { nodes: vec![node], segments: Vec::new(), total_cost: 0.0 }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn is_trivial(&self) -> bool {
        self.segments.is_empty()
    }
}
