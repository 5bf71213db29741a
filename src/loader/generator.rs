use rand::Rng;

use crate::api::road_dto::{RoadDto, RoadNetworkDto};

/// Generates a random connected road network: a spanning chain over all
/// nodes for guaranteed connectivity, plus `1.5 * n` random extra edges.
/// Weights are 1–10 on the chain and 1–12 on extras; capacities are 3–10.
pub fn generate(n: usize, rng: &mut impl Rng) -> RoadNetworkDto {
    let nodes: Vec<String> = (1..=n).map(|i| format!("N{}", i)).collect();
    let mut edges = Vec::new();

    for pair in nodes.windows(2) {
        edges.push(RoadDto {
            id: None,
            from: pair[0].clone(),
            to: pair[1].clone(),
            weight: f64::from(rng.random_range(1..=10u32)),
            capacity: rng.random_range(3..=10),
            status: "open".to_string(),
        });
    }

    let extra = n * 3 / 2;
    for _ in 0..extra {
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        if a == b {
            continue;
        }
        edges.push(RoadDto {
            id: None,
            from: nodes[a].clone(),
            to: nodes[b].clone(),
            weight: f64::from(rng.random_range(1..=12u32)),
            capacity: rng.random_range(3..=10),
            status: "open".to_string(),
        });
    }

    RoadNetworkDto { nodes, edges }
}
