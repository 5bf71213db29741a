use serde::Deserialize;
use std::time::Duration;

/// Tunable policies of the booking engine.
///
/// All fields have serde defaults, so a config file only needs to name the
/// values it wants to override.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Width of a reservation slot window in seconds. Two requests whose
    /// timestamps fall in the same bucket compete for the same counters.
    pub slot_granularity_secs: u32,

    /// How far in the past a requested slot may lie before it is rejected
    /// as `InvalidRequest`.
    pub past_slot_grace_secs: i64,

    /// Upper clamp for the congestion multiplier. Reached when a segment is
    /// saturated or has zero capacity.
    pub max_congestion_factor: f64,

    /// Recommended speed used whenever the prediction oracle is unavailable.
    pub fallback_speed: f64,

    /// How long a single oracle call may run before the fallback speed is
    /// substituted.
    pub oracle_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            slot_granularity_secs: 900,
            past_slot_grace_secs: 60,
            max_congestion_factor: 64.0,
            fallback_speed: 50.0,
            oracle_timeout_ms: 2_000,
        }
    }
}

impl EngineConfig {
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_millis(self.oracle_timeout_ms)
    }
}
