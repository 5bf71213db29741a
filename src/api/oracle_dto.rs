use serde::{Deserialize, Serialize};

/// Request sent to an out-of-process prediction oracle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleRequestDto {
    pub path: Vec<String>,
    pub slot: String,
}

/// Oracle response. A missing or non-positive speed counts as malformed and
/// triggers the fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleResponseDto {
    pub recommended_speed: f64,
}
