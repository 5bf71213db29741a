use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::api::booking_dto::{BookingRecordDto, BookingResponseDto};
use crate::domain::graph::road::SegmentKey;
use crate::domain::ids::{NodeId, PrincipalId};
use crate::domain::occupancy::slot::SlotWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// A committed booking. The path is an immutable record of the segments
/// actually held; only `status` changes after creation, and only through
/// the coordinator.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub owner: PrincipalId,
    pub path: Vec<NodeId>,
    pub slot_window: SlotWindow,
    pub recommended_speed: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// The occupancy keys this booking holds, one per consecutive node pair.
    pub fn segment_keys(&self) -> Vec<SegmentKey> {
        self.path.windows(2).map(|pair| SegmentKey::between(&pair[0], &pair[1])).collect()
    }

    pub fn to_response_dto(&self) -> BookingResponseDto {
        BookingResponseDto {
            id: self.id.to_string(),
            path: self.path.iter().map(|n| n.to_string()).collect(),
            recommended_speed: self.recommended_speed,
            slot: self.slot_window.start().to_rfc3339(),
        }
    }

    pub fn to_record_dto(&self) -> BookingRecordDto {
        BookingRecordDto {
            id: self.id.to_string(),
            owner: self.owner.to_string(),
            path: self.path.iter().map(|n| n.to_string()).collect(),
            slot: self.slot_window.start().to_rfc3339(),
            recommended_speed: self.recommended_speed,
            status: self.status.as_str().to_string(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}
