use thiserror::Error;

use crate::domain::graph::road::SegmentKey;
use crate::domain::ids::NodeId;
use crate::domain::occupancy::slot::SlotWindow;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    /// Malformed input, identical source/destination, or an unparseable or
    /// past slot. Permanent: retrying the same request cannot succeed.
    #[error("Invalid booking request: {0}")]
    InvalidRequest(String),

    /// No open-edge path connects the requested endpoints. Raised before any
    /// reservation state is touched.
    #[error("No open route connects {from} to {destination}")]
    PathNotFound { from: NodeId, destination: NodeId },

    /// Admission control denied at least one segment for the requested
    /// window. Any partial holds have already been rolled back.
    #[error("Segment {segment} is fully booked for slot window {window}")]
    CapacityExceeded { segment: SegmentKey, window: SlotWindow },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The external booking store could not durably record the booking. The
    /// reservation has been released; the request is safe to retry.
    #[error("Booking could not be recorded: {0}")]
    PersistenceFailure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
