use serde::{Deserialize, Serialize};

/// Booking creation request as received from the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequestDto {
    pub source: String,
    pub destination: String,
    /// ISO-8601 timestamp of the desired travel slot.
    pub slot: String,
}

/// Response to a successful booking creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponseDto {
    pub id: String,
    pub path: Vec<String>,
    pub recommended_speed: f64,
    pub slot: String,
}

/// Full booking record as returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecordDto {
    pub id: String,
    pub owner: String,
    pub path: Vec<String>,
    pub slot: String,
    pub recommended_speed: f64,
    pub status: String,
    pub created_at: String,
}
