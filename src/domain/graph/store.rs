use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use slotmap::{SlotMap, new_key_type};

use crate::api::road_dto::{RoadNetworkDto, RoadStatusUpdateDto};
use crate::domain::graph::road::{Road, RoadStatus};
use crate::domain::graph::snapshot::GraphSnapshot;
use crate::domain::ids::EdgeName;
use crate::domain::principal::Principal;
use crate::error::{Error, Result};

new_key_type! {
    pub struct RoadKey;
}

/// Authoritative owner of node and road definitions.
///
/// The store hands out immutable [`GraphSnapshot`]s for planning and accepts
/// exactly one mutation: an admin-gated status change. Handles are cheap to
/// clone and share the same underlying state.
#[derive(Debug, Clone)]
pub struct GraphStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    roads: SlotMap<RoadKey, Road>,
    name_index: HashMap<EdgeName, RoadKey>,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    pub fn new() -> Self {
        GraphStore { inner: Arc::new(RwLock::new(StoreInner::default())) }
    }

    /// Builds a store from a wire-format road network. A later edge with the
    /// same name overwrites an earlier one.
    pub fn from_dto(dto: &RoadNetworkDto) -> Result<Self> {
        let store = GraphStore::new();
        for road_dto in &dto.edges {
            store.add_road(Road::from_dto(road_dto)?);
        }
        log::info!("GraphStore loaded with {} roads.", store.road_count());
        Ok(store)
    }

    pub fn add_road(&self, road: Road) -> RoadKey {
        let mut guard = self.inner.write().unwrap();

        if let Some(&existing) = guard.name_index.get(&road.name) {
            log::debug!("Road '{}' already present, overwriting definition.", road.name);
            guard.roads[existing] = road;
            return existing;
        }

        let name = road.name.clone();
        let key = guard.roads.insert(road);
        guard.name_index.insert(name, key);
        key
    }

    pub fn road_count(&self) -> usize {
        let guard = self.inner.read().unwrap();
        guard.roads.len()
    }

    pub fn get_road(&self, name: &EdgeName) -> Option<Road> {
        let guard = self.inner.read().unwrap();
        guard.name_index.get(name).and_then(|&key| guard.roads.get(key)).cloned()
    }

    /// All roads regardless of status, sorted by name. Used by the
    /// administrative listing surface.
    pub fn all_roads(&self) -> Vec<Road> {
        let guard = self.inner.read().unwrap();
        let mut roads: Vec<Road> = guard.roads.values().cloned().collect();
        roads.sort_by(|a, b| a.name.cmp(&b.name));
        roads
    }

    /// A consistent copy of the open subgraph at a single point in time.
    pub fn snapshot(&self) -> GraphSnapshot {
        let guard = self.inner.read().unwrap();
        let mut open: Vec<Road> = guard.roads.values().filter(|r| r.is_open()).cloned().collect();
        open.sort_by(|a, b| a.name.cmp(&b.name));
        GraphSnapshot::new(open)
    }

    /// Administrative status change, the only mutation path after loading.
    /// Requires the Admin role; fails with `NotFound` for unknown edges.
    pub fn set_status(&self, principal: &Principal, edge: &EdgeName, status: RoadStatus) -> Result<()> {
        if !principal.is_admin() {
            return Err(Error::Forbidden(format!("principal '{}' may not change road status", principal.id)));
        }

        let mut guard = self.inner.write().unwrap();
        let key = *guard.name_index.get(edge).ok_or_else(|| Error::NotFound(format!("road '{}'", edge)))?;
        let road = &mut guard.roads[key];
        log::info!("Road '{}' status change: {} -> {}.", edge, road.status, status);
        road.status = status;
        Ok(())
    }

    /// Wire-format entry point for [`GraphStore::set_status`].
    pub fn apply_update(&self, principal: &Principal, update: &RoadStatusUpdateDto) -> Result<()> {
        let status = RoadStatus::parse(&update.status)?;
        self.set_status(principal, &EdgeName::new(update.edge_id.clone()), status)
    }
}
