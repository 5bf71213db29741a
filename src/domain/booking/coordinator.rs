use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::api::booking_dto::BookingRequestDto;
use crate::config::EngineConfig;
use crate::domain::booking::record::{Booking, BookingStatus};
use crate::domain::booking::store::BookingStore;
use crate::domain::clock::SystemClock;
use crate::domain::graph::road::Road;
use crate::domain::graph::store::GraphStore;
use crate::domain::ids::NodeId;
use crate::domain::occupancy::slot::SlotWindow;
use crate::domain::occupancy::tracker::OccupancyTracker;
use crate::domain::oracle::adapter::OracleAdapter;
use crate::domain::planner::dijkstra::PathPlanner;
use crate::domain::principal::{Principal, Role};
use crate::error::{Error, Result};

/// A validated booking request.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub source: NodeId,
    pub destination: NodeId,
    pub slot: DateTime<Utc>,
}

impl BookingRequest {
    pub fn from_dto(dto: &BookingRequestDto) -> Result<Self> {
        if dto.source == dto.destination {
            return Err(Error::InvalidRequest(format!("source and destination are both '{}'", dto.source)));
        }
        let slot = parse_slot(&dto.slot)?;
        Ok(BookingRequest { source: NodeId::new(dto.source.clone()), destination: NodeId::new(dto.destination.clone()), slot })
    }
}

/// Accepts an RFC 3339 timestamp, or a bare `YYYY-MM-DDTHH:MM:SS` local
/// form which is read as UTC.
fn parse_slot(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(stamped) = DateTime::parse_from_rfc3339(raw) {
        return Ok(stamped.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    Err(Error::InvalidRequest(format!("slot '{}' is not a valid timestamp", raw)))
}

/// Orchestrates one booking request end to end:
/// plan on a snapshot, reserve atomically, consult the oracle, commit.
///
/// Each failure exit leaves no residue: planning failures happen before any
/// reservation, reservation failures roll themselves back, and a persistence
/// failure releases the held segments before surfacing. The oracle is called
/// strictly after reservation succeeds and outside every occupancy lock, so
/// a hung predictor cannot stall admission control.
#[derive(Debug, Clone)]
pub struct BookingCoordinator {
    graph: GraphStore,
    occupancy: OccupancyTracker,
    planner: Arc<dyn PathPlanner>,
    oracle: OracleAdapter,
    bookings: Arc<dyn BookingStore>,
    clock: Arc<dyn SystemClock>,
    config: EngineConfig,
}

impl BookingCoordinator {
    pub fn new(
        graph: GraphStore,
        occupancy: OccupancyTracker,
        planner: Arc<dyn PathPlanner>,
        oracle: OracleAdapter,
        bookings: Arc<dyn BookingStore>,
        clock: Arc<dyn SystemClock>,
        config: EngineConfig,
    ) -> Self {
        BookingCoordinator { graph, occupancy, planner, oracle, bookings, clock, config }
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn occupancy(&self) -> &OccupancyTracker {
        &self.occupancy
    }

    /// Books a travel slot for `principal`. Only user-role principals book.
    pub fn book(&self, principal: &Principal, dto: &BookingRequestDto) -> Result<Booking> {
        if principal.role != Role::User {
            return Err(Error::Forbidden(format!("principal '{}' has no user role; only users can book", principal.id)));
        }

        let request = BookingRequest::from_dto(dto)?;

        let now = self.clock.now();
        if request.slot < now - Duration::seconds(self.config.past_slot_grace_secs) {
            return Err(Error::InvalidRequest(format!("slot {} is in the past", request.slot.to_rfc3339())));
        }

        let window = SlotWindow::containing(request.slot, self.config.slot_granularity_secs);

        // Planning: immutable snapshot plus congestion frozen at this point.
        let snapshot = self.graph.snapshot();
        let congestion = self.occupancy.congestion_view(snapshot.edges(), window);
        let weight = |road: &Road| road.weight * congestion.get(&road.segment_key()).copied().unwrap_or(1.0);

        let path = self
            .planner
            .shortest_path(&snapshot, &request.source, &request.destination, &weight)
            .ok_or_else(|| Error::PathNotFound { from: request.source.clone(), destination: request.destination.clone() })?;

        log::debug!(
            "Planned {} -> {} via {} nodes, cost {:.3}, window {}.",
            request.source,
            request.destination,
            path.nodes().len(),
            path.total_cost(),
            window
        );

        // Reserving: all-or-nothing admission control.
        self.occupancy.try_reserve(&path, window)?;

        // Predicting: advisory only, runs with no occupancy lock held.
        let recommended_speed = self.oracle.recommended_speed(path.nodes(), window);

        let booking = Booking {
            id: Uuid::new_v4(),
            owner: principal.id.clone(),
            path: path.nodes().to_vec(),
            slot_window: window,
            recommended_speed,
            status: BookingStatus::Confirmed,
            created_at: now,
        };

        // Committing: a reservation without a recorded booking must not leak.
        if let Err(e) = self.bookings.insert(&booking) {
            self.occupancy.release(&path, window);
            log::warn!("Booking {} rolled back, store rejected it: {}.", booking.id, e);
            return Err(Error::PersistenceFailure(e.to_string()));
        }

        log::info!("Booking {} committed for '{}': {} -> {} at {}.", booking.id, principal.id, request.source, request.destination, window);
        Ok(booking)
    }

    /// Cancels a booking and releases its occupancy holds. Owners may cancel
    /// their own bookings; admins may cancel any.
    pub fn cancel(&self, principal: &Principal, id: &Uuid) -> Result<()> {
        let booking = self.bookings.get(id).ok_or_else(|| Error::NotFound(format!("booking '{}'", id)))?;

        if booking.owner != principal.id && !principal.is_admin() {
            return Err(Error::Forbidden(format!("principal '{}' does not own booking '{}'", principal.id, id)));
        }
        if booking.status == BookingStatus::Cancelled {
            return Err(Error::InvalidRequest(format!("booking '{}' is already cancelled", id)));
        }

        self.bookings.update_status(id, BookingStatus::Cancelled)?;
        self.occupancy.release_segments(&booking.segment_keys(), booking.slot_window);
        log::info!("Booking {} cancelled by '{}', holds released.", id, principal.id);
        Ok(())
    }

    /// Lists bookings: admins see all, users see only their own.
    pub fn list(&self, principal: &Principal) -> Vec<Booking> {
        if principal.is_admin() { self.bookings.list_all() } else { self.bookings.list_owned_by(&principal.id) }
    }
}
