use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
};

use crate::domain::graph::road::{Road, SegmentKey};
use crate::domain::occupancy::slot::SlotWindow;
use crate::domain::planner::path::PlannedPath;
use crate::error::{Error, Result};

type OccupancyKey = (SegmentKey, SlotWindow);

/// Per-segment, per-window reservation counters — the only mutable shared
/// state in the engine, and the owner of the admission-control invariant
/// `count <= capacity` for every key.
///
/// Each key gets its own counter cell so unrelated reservations never
/// contend. A multi-segment reservation locks its cells in global sorted key
/// order, which rules out deadlock between overlapping paths. Counter cells
/// are never removed once created: another reserver may still hold a handle
/// to the cell, and dropping it from the map would let its increments go
/// unobserved.
#[derive(Debug, Clone)]
pub struct OccupancyTracker {
    inner: Arc<RwLock<HashMap<OccupancyKey, Arc<Mutex<u32>>>>>,
    max_factor: f64,
}

impl OccupancyTracker {
    pub fn new(max_factor: f64) -> Self {
        OccupancyTracker { inner: Arc::new(RwLock::new(HashMap::new())), max_factor: max_factor.max(1.0) }
    }

    fn counter(&self, key: OccupancyKey) -> Arc<Mutex<u32>> {
        {
            let guard = self.inner.read().unwrap();
            if let Some(cell) = guard.get(&key) {
                return Arc::clone(cell);
            }
        }
        let mut guard = self.inner.write().unwrap();
        Arc::clone(guard.entry(key).or_default())
    }

    /// Current confirmed-hold count for one key. Absent keys count as zero.
    pub fn count(&self, segment: &SegmentKey, window: SlotWindow) -> u32 {
        let guard = self.inner.read().unwrap();
        guard.get(&(segment.clone(), window)).map(|cell| *cell.lock().unwrap()).unwrap_or(0)
    }

    fn factor_of(&self, count: u32, capacity: u32) -> f64 {
        if capacity == 0 || count >= capacity {
            return self.max_factor;
        }
        let load = f64::from(count) / f64::from(capacity);
        (1.0 / (1.0 - load)).min(self.max_factor)
    }

    /// Congestion multiplier for one key: 1.0 when empty, rising to
    /// `max_factor` as the segment saturates. Monotone in `count`.
    pub fn congestion_factor(&self, segment: &SegmentKey, window: SlotWindow, capacity: u32) -> f64 {
        self.factor_of(self.count(segment, window), capacity)
    }

    /// Reads every edge's congestion factor once, so a whole planning run
    /// works against frozen congestion rather than live counters.
    pub fn congestion_view(&self, edges: &[Road], window: SlotWindow) -> HashMap<SegmentKey, f64> {
        let guard = self.inner.read().unwrap();
        edges
            .iter()
            .map(|road| {
                let key = road.segment_key();
                let count = guard.get(&(key.clone(), window)).map(|cell| *cell.lock().unwrap()).unwrap_or(0);
                let factor = self.factor_of(count, road.capacity);
                (key, factor)
            })
            .collect()
    }

    /// Atomically reserves every segment of `path` for `window`.
    ///
    /// All-or-nothing: either every counter is incremented or none is. The
    /// cells are locked in sorted key order and all guards are held across
    /// the capacity checks, so no interleaving of concurrent calls can push
    /// any count past its capacity.
    pub fn try_reserve(&self, path: &PlannedPath, window: SlotWindow) -> Result<()> {
        let mut segments: Vec<_> = path.segments().iter().collect();
        segments.sort_by(|x, y| x.key.cmp(&y.key));
        // A planned path is simple and never repeats a segment; locking the
        // same cell twice would self-deadlock, so duplicates are dropped.
        segments.dedup_by(|x, y| x.key == y.key);

        let cells: Vec<_> = segments.iter().map(|seg| (self.counter((seg.key.clone(), window)), *seg)).collect();

        let mut guards = Vec::with_capacity(cells.len());
        for (cell, segment) in &cells {
            let guard = cell.lock().unwrap();
            if *guard >= segment.capacity {
                log::debug!("Reservation denied: segment {} at {}/{} for window {}.", segment.key, *guard, segment.capacity, window);
                // Guards drop here; nothing has been incremented yet.
                return Err(Error::CapacityExceeded { segment: segment.key.clone(), window });
            }
            guards.push(guard);
        }

        for guard in &mut guards {
            **guard += 1;
        }
        Ok(())
    }

    /// Releases a previously reserved path, used on cancellation and on
    /// rollback after a downstream failure.
    pub fn release(&self, path: &PlannedPath, window: SlotWindow) {
        let keys: Vec<SegmentKey> = path.segments().iter().map(|seg| seg.key.clone()).collect();
        self.release_segments(&keys, window);
    }

    /// Decrements the counters for `keys`. Releasing a key that was never
    /// reserved is logged and ignored rather than underflowing.
    pub fn release_segments(&self, keys: &[SegmentKey], window: SlotWindow) {
        for key in keys {
            let cell = {
                let guard = self.inner.read().unwrap();
                guard.get(&(key.clone(), window)).map(Arc::clone)
            };
            match cell {
                Some(cell) => {
                    let mut count = cell.lock().unwrap();
                    if *count == 0 {
                        log::warn!("Release of segment {} for window {} found no holds.", key, window);
                    } else {
                        *count -= 1;
                    }
                }
                None => {
                    log::warn!("Release of segment {} for window {} found no counter.", key, window);
                }
            }
        }
    }
}
