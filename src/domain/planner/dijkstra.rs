use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use crate::domain::graph::road::Road;
use crate::domain::graph::snapshot::GraphSnapshot;
use crate::domain::ids::NodeId;
use crate::domain::planner::path::{PathSegment, PlannedPath};

/// Pluggable planning engine. The default is [`DijkstraPlanner`]; swapping
/// in A* or a hierarchy-based planner only touches this seam.
///
/// `weight` gives the effective traversal cost of an edge (base weight times
/// the frozen congestion factor). Planners must not read live congestion:
/// the caller evaluates it once per segment before the run.
pub trait PathPlanner: std::fmt::Debug + Send + Sync {
    /// The minimum-cost path from `source` to `target`, or `None` when the
    /// endpoints are disconnected or absent. `source == target` yields the
    /// trivial single-node path.
    fn shortest_path(
        &self,
        snapshot: &GraphSnapshot,
        source: &NodeId,
        target: &NodeId,
        weight: &dyn Fn(&Road) -> f64,
    ) -> Option<PlannedPath>;
}

/// Dijkstra's algorithm over the undirected open-edge snapshot, using a
/// binary heap for `O((V+E) log V)`.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

/// Heap entry ordered by cost, then node id. The node tie-break keeps the
/// extraction order, and with it the returned path, deterministic.
#[derive(Debug, Clone)]
struct Candidate {
    cost: f64,
    node: NodeId,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost.total_cmp(&other.cost).then_with(|| self.node.cmp(&other.node))
    }
}

impl PathPlanner for DijkstraPlanner {
    fn shortest_path(
        &self,
        snapshot: &GraphSnapshot,
        source: &NodeId,
        target: &NodeId,
        weight: &dyn Fn(&Road) -> f64,
    ) -> Option<PlannedPath> {
        if !snapshot.contains_node(source) || !snapshot.contains_node(target) {
            return None;
        }
        if source == target {
            return Some(PlannedPath::trivial(source.clone()));
        }

        let mut dist: HashMap<NodeId, f64> = HashMap::with_capacity(snapshot.node_count());
        let mut prev: HashMap<NodeId, (NodeId, &Road)> = HashMap::new();
        let mut heap: BinaryHeap<Reverse<Candidate>> = BinaryHeap::new();

        dist.insert(source.clone(), 0.0);
        heap.push(Reverse(Candidate { cost: 0.0, node: source.clone() }));

        while let Some(Reverse(Candidate { cost, node })) = heap.pop() {
            if node == *target {
                return Some(reconstruct(prev, source, target, cost));
            }

            // Stale entry: a cheaper route to this node was already settled.
            if dist.get(&node).is_some_and(|&best| cost > best) {
                continue;
            }

            for &index in snapshot.neighbor_indices(&node) {
                let road = snapshot.edge_at(index);
                let Some(neighbor) = road.other_end(&node) else { continue };
                let next_cost = cost + weight(road);

                let improves = dist.get(neighbor).is_none_or(|&best| next_cost < best);
                if improves {
                    dist.insert(neighbor.clone(), next_cost);
                    prev.insert(neighbor.clone(), (node.clone(), road));
                    heap.push(Reverse(Candidate { cost: next_cost, node: neighbor.clone() }));
                }
            }
        }

        None
    }
}

fn reconstruct(prev: HashMap<NodeId, (NodeId, &Road)>, source: &NodeId, target: &NodeId, total_cost: f64) -> PlannedPath {
    let mut nodes = vec![target.clone()];
    let mut segments = Vec::new();

    let mut current = target.clone();
    while current != *source {
        let (before, road) = prev[&current].clone();
        segments.push(PathSegment::traversing(road, &before));
        nodes.push(before.clone());
        current = before;
    }

    nodes.reverse();
    segments.reverse();
    PlannedPath::new(nodes, segments, total_cost)
}
