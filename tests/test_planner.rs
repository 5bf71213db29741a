use std::collections::HashMap;

use roadslot::api::road_dto::{RoadDto, RoadNetworkDto};
use roadslot::domain::graph::road::{Road, RoadStatus, SegmentKey};
use roadslot::domain::graph::store::GraphStore;
use roadslot::domain::ids::{EdgeName, NodeId};
use roadslot::domain::planner::dijkstra::{DijkstraPlanner, PathPlanner};
use roadslot::domain::principal::Principal;

fn road(from: &str, to: &str, weight: f64, status: &str) -> RoadDto {
    RoadDto { id: None, from: from.to_string(), to: to.to_string(), weight, capacity: 4, status: status.to_string() }
}

fn store_of(edges: Vec<RoadDto>) -> GraphStore {
    GraphStore::from_dto(&RoadNetworkDto { nodes: Vec::new(), edges }).unwrap()
}

fn base_weight(r: &Road) -> f64 {
    r.weight
}

fn node_ids(path: &roadslot::domain::planner::path::PlannedPath) -> Vec<String> {
    path.nodes().iter().map(|n| n.to_string()).collect()
}

#[test]
fn chain_route_has_summed_cost() {
    let store = store_of(vec![road("A", "B", 1.0, "open"), road("B", "C", 2.0, "open"), road("C", "D", 3.0, "open")]);
    let snapshot = store.snapshot();

    let path = DijkstraPlanner.shortest_path(&snapshot, &NodeId::new("A"), &NodeId::new("D"), &base_weight).unwrap();

    assert_eq!(node_ids(&path), ["A", "B", "C", "D"]);
    assert_eq!(path.total_cost(), 6.0);
    assert_eq!(path.segments().len(), 3);
}

#[test]
fn maintenance_edge_disconnects_the_chain() {
    let store = store_of(vec![road("A", "B", 1.0, "open"), road("B", "C", 2.0, "maintenance"), road("C", "D", 3.0, "open")]);
    let snapshot = store.snapshot();

    let plan = DijkstraPlanner.shortest_path(&snapshot, &NodeId::new("A"), &NodeId::new("D"), &base_weight);
    assert!(plan.is_none());
}

#[test]
fn planner_returns_the_globally_cheapest_route() {
    // Direct A--D edge costs 10; the detour over B and C costs 6.
    let store = store_of(vec![
        road("A", "D", 10.0, "open"),
        road("A", "B", 1.0, "open"),
        road("B", "C", 2.0, "open"),
        road("C", "D", 3.0, "open"),
    ]);
    let snapshot = store.snapshot();

    let path = DijkstraPlanner.shortest_path(&snapshot, &NodeId::new("A"), &NodeId::new("D"), &base_weight).unwrap();
    assert_eq!(node_ids(&path), ["A", "B", "C", "D"]);
    assert_eq!(path.total_cost(), 6.0);
}

#[test]
fn congestion_weighting_steers_around_a_loaded_edge() {
    // Both arms of the diamond cost 2 on base weight; a congestion factor on
    // A--B makes the upper arm expensive.
    let store = store_of(vec![road("A", "B", 1.0, "open"), road("B", "D", 1.0, "open"), road("A", "C", 1.0, "open"), road("C", "D", 1.0, "open")]);
    let snapshot = store.snapshot();

    let mut factors: HashMap<SegmentKey, f64> = HashMap::new();
    factors.insert(SegmentKey::between(&NodeId::new("A"), &NodeId::new("B")), 8.0);
    let weight = |r: &Road| r.weight * factors.get(&r.segment_key()).copied().unwrap_or(1.0);

    let path = DijkstraPlanner.shortest_path(&snapshot, &NodeId::new("A"), &NodeId::new("D"), &weight).unwrap();
    assert_eq!(node_ids(&path), ["A", "C", "D"]);
    assert_eq!(path.total_cost(), 2.0);
}

#[test]
fn disconnected_components_give_no_path() {
    let store = store_of(vec![road("A", "B", 1.0, "open"), road("C", "D", 1.0, "open")]);
    let snapshot = store.snapshot();
    assert!(DijkstraPlanner.shortest_path(&snapshot, &NodeId::new("A"), &NodeId::new("D"), &base_weight).is_none());
}

#[test]
fn closing_an_edge_affects_new_snapshots_only() {
    let store = store_of(vec![road("A", "B", 1.0, "open"), road("B", "C", 2.0, "open")]);
    let admin = Principal::admin("ops");

    let before = store.snapshot();
    store.set_status(&admin, &EdgeName::new("B--To--C"), RoadStatus::Closed).unwrap();
    let after = store.snapshot();

    // The planner working on the earlier snapshot is isolated from the
    // administrative change.
    assert!(DijkstraPlanner.shortest_path(&before, &NodeId::new("A"), &NodeId::new("C"), &base_weight).is_some());
    assert!(DijkstraPlanner.shortest_path(&after, &NodeId::new("A"), &NodeId::new("C"), &base_weight).is_none());
}
