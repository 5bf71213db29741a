use std::fs;

use rand::SeedableRng;
use rand::rngs::StdRng;

use roadslot::api::road_dto::{RoadDto, RoadNetworkDto, RoadStatusUpdateDto};
use roadslot::domain::graph::road::RoadStatus;
use roadslot::domain::graph::store::GraphStore;
use roadslot::domain::ids::{EdgeName, NodeId};
use roadslot::domain::planner::dijkstra::{DijkstraPlanner, PathPlanner};
use roadslot::domain::principal::Principal;
use roadslot::error::Error;
use roadslot::loader::{generator, parser};

fn road(from: &str, to: &str, weight: f64, status: &str) -> RoadDto {
    RoadDto { id: None, from: from.to_string(), to: to.to_string(), weight, capacity: 4, status: status.to_string() }
}

#[test]
fn parses_a_road_network_file() {
    let network = RoadNetworkDto { nodes: vec!["A".into(), "B".into()], edges: vec![road("A", "B", 2.0, "open")] };
    let path = std::env::temp_dir().join(format!("roadslot-net-{}.json", std::process::id()));
    fs::write(&path, serde_json::to_string_pretty(&network).unwrap()).unwrap();

    let parsed: RoadNetworkDto = parser::parse_json_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(parsed.edges.len(), 1);
    assert_eq!(parsed.edges[0].from, "A");
    assert_eq!(parsed.edges[0].weight, 2.0);
}

#[test]
fn missing_file_is_an_io_error() {
    let missing = std::env::temp_dir().join("roadslot-definitely-missing.json");
    let result: roadslot::error::Result<RoadNetworkDto> = parser::parse_json_file(&missing);
    assert!(matches!(result.unwrap_err(), Error::IoError(_)));
}

#[test]
fn malformed_json_is_a_deserialization_error() {
    let path = std::env::temp_dir().join(format!("roadslot-bad-{}.json", std::process::id()));
    fs::write(&path, "{ not json").unwrap();
    let result: roadslot::error::Result<RoadNetworkDto> = parser::parse_json_file(&path);
    fs::remove_file(&path).ok();
    assert!(matches!(result.unwrap_err(), Error::DeserializationError(_)));
}

#[test]
fn snapshot_contains_only_open_edges() {
    let store = GraphStore::from_dto(&RoadNetworkDto {
        nodes: Vec::new(),
        edges: vec![road("A", "B", 1.0, "open"), road("B", "C", 1.0, "closed"), road("C", "D", 1.0, "maintenance")],
    })
    .unwrap();

    assert_eq!(store.road_count(), 3);
    assert_eq!(store.snapshot().edges().len(), 1);
}

#[test]
fn duplicate_edge_names_overwrite() {
    let store = GraphStore::from_dto(&RoadNetworkDto {
        nodes: Vec::new(),
        edges: vec![
            RoadDto { id: Some("X--To--Y".into()), from: "X".into(), to: "Y".into(), weight: 5.0, capacity: 2, status: "open".into() },
            RoadDto { id: Some("X--To--Y".into()), from: "X".into(), to: "Y".into(), weight: 7.0, capacity: 9, status: "open".into() },
        ],
    })
    .unwrap();

    assert_eq!(store.road_count(), 1);
    let kept = store.get_road(&EdgeName::new("X--To--Y")).unwrap();
    assert_eq!(kept.weight, 7.0);
    assert_eq!(kept.capacity, 9);
}

#[test]
fn invalid_weight_fails_loading() {
    let result = GraphStore::from_dto(&RoadNetworkDto { nodes: Vec::new(), edges: vec![road("A", "B", -1.0, "open")] });
    assert!(matches!(result.unwrap_err(), Error::InvalidRequest(_)));
}

#[test]
fn status_changes_are_admin_only() {
    let store = GraphStore::from_dto(&RoadNetworkDto { nodes: Vec::new(), edges: vec![road("A", "B", 1.0, "open")] }).unwrap();
    let edge = EdgeName::new("A--To--B");

    let err = store.set_status(&Principal::user("alice"), &edge, RoadStatus::Closed).unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = store.set_status(&Principal::admin("ops"), &EdgeName::new("nope"), RoadStatus::Closed).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    store.set_status(&Principal::admin("ops"), &edge, RoadStatus::Closed).unwrap();
    assert!(store.snapshot().edges().is_empty());
}

#[test]
fn wire_status_updates_reach_the_store() {
    let store = GraphStore::from_dto(&RoadNetworkDto { nodes: Vec::new(), edges: vec![road("A", "B", 1.0, "open")] }).unwrap();
    let update = RoadStatusUpdateDto { edge_id: "A--To--B".to_string(), status: "maintenance".to_string() };

    store.apply_update(&Principal::admin("ops"), &update).unwrap();
    assert_eq!(store.get_road(&EdgeName::new("A--To--B")).unwrap().status, RoadStatus::Maintenance);

    let bad = RoadStatusUpdateDto { edge_id: "A--To--B".to_string(), status: "flooded".to_string() };
    assert!(matches!(store.apply_update(&Principal::admin("ops"), &bad).unwrap_err(), Error::InvalidRequest(_)));
}

#[test]
fn road_listing_is_sorted_and_round_trips_to_the_wire() {
    let store = GraphStore::from_dto(&RoadNetworkDto {
        nodes: Vec::new(),
        edges: vec![road("B", "C", 2.0, "closed"), road("A", "B", 1.0, "open")],
    })
    .unwrap();

    let dtos: Vec<_> = store.all_roads().iter().map(|r| r.to_dto()).collect();
    assert_eq!(dtos.len(), 2);
    assert_eq!(dtos[0].id.as_deref(), Some("A--To--B"));
    assert_eq!(dtos[1].id.as_deref(), Some("B--To--C"));
    assert_eq!(dtos[1].status, "closed");
    assert_eq!(dtos[1].weight, 2.0);
}

#[test]
fn generated_networks_are_connected() {
    let mut rng = StdRng::seed_from_u64(7);
    let network = generator::generate(30, &mut rng);
    assert_eq!(network.nodes.len(), 30);

    let store = GraphStore::from_dto(&network).unwrap();
    let snapshot = store.snapshot();
    // The spanning chain guarantees a route between the extremes.
    let plan = DijkstraPlanner.shortest_path(&snapshot, &NodeId::new("N1"), &NodeId::new("N30"), &|r| r.weight);
    assert!(plan.is_some());
}

#[test]
fn generated_edges_are_open_with_positive_attributes() {
    let mut rng = StdRng::seed_from_u64(11);
    let network = generator::generate(12, &mut rng);
    for edge in &network.edges {
        assert_eq!(edge.status, "open");
        assert!(edge.weight >= 1.0);
        assert!((3..=10).contains(&edge.capacity));
    }
}
