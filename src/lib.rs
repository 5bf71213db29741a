use std::path::Path;
use std::sync::Arc;

use crate::api::road_dto::RoadNetworkDto;
use crate::config::EngineConfig;
use crate::domain::booking::coordinator::BookingCoordinator;
use crate::domain::booking::store::{BookingStore, InMemoryBookingStore};
use crate::domain::clock::{SystemClock, WallClock};
use crate::domain::graph::store::GraphStore;
use crate::domain::occupancy::tracker::OccupancyTracker;
use crate::domain::oracle::adapter::{OracleAdapter, SpeedOracle};
use crate::domain::oracle::heuristic::HeuristicOracle;
use crate::domain::planner::dijkstra::DijkstraPlanner;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Builds a [`BookingCoordinator`] from a road network file with the default
/// collaborators: wall clock, in-process heuristic oracle, in-memory booking
/// store. Deployments with real collaborators use [`build_engine_with`].
pub fn build_engine(road_file: impl AsRef<Path>, config: EngineConfig) -> Result<BookingCoordinator> {
    build_engine_with(road_file, config, Arc::new(WallClock), Arc::new(HeuristicOracle), Arc::new(InMemoryBookingStore::new()))
}

pub fn build_engine_with(
    road_file: impl AsRef<Path>,
    config: EngineConfig,
    clock: Arc<dyn SystemClock>,
    oracle: Arc<dyn SpeedOracle>,
    bookings: Arc<dyn BookingStore>,
) -> Result<BookingCoordinator> {
    let network: RoadNetworkDto = parse_json_file(road_file)?;
    log::info!("Road network file parsed: {} edges.", network.edges.len());

    let graph = GraphStore::from_dto(&network)?;
    let occupancy = OccupancyTracker::new(config.max_congestion_factor);
    let adapter = OracleAdapter::new(oracle, config.oracle_timeout(), config.fallback_speed);

    Ok(BookingCoordinator::new(graph, occupancy, Arc::new(DijkstraPlanner), adapter, bookings, clock, config))
}
