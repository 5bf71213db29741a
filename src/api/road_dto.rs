use serde::{Deserialize, Serialize};

fn default_status() -> String {
    "open".to_string()
}

/// Wire representation of a road segment as consumed and produced at the
/// GraphStore boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadDto {
    /// Administrative edge name. When absent, the store derives
    /// `"{from}--To--{to}"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub from: String,
    pub to: String,
    pub weight: f64,
    pub capacity: u32,
    #[serde(default = "default_status")]
    pub status: String,
}

/// A whole road network, matching the layout written by the generator and
/// accepted by the loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadNetworkDto {
    #[serde(default)]
    pub nodes: Vec<String>,
    pub edges: Vec<RoadDto>,
}

/// Administrative road-status update: `{edgeId, status}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadStatusUpdateDto {
    pub edge_id: String,
    pub status: String,
}
