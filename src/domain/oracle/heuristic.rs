use chrono::Timelike;

use crate::domain::ids::NodeId;
use crate::domain::occupancy::slot::SlotWindow;
use crate::domain::oracle::adapter::{OracleError, SpeedOracle};

/// In-process speed predictor: slower in peak hours, stepped down for long
/// paths, never below the floor.
#[derive(Debug, Clone, Default)]
pub struct HeuristicOracle;

const BASE_SPEED: f64 = 50.0;
const PEAK_SPEED: f64 = 30.0;
const LONG_PATH_PENALTY: f64 = 8.0;
const FLOOR_SPEED: f64 = 20.0;

impl SpeedOracle for HeuristicOracle {
    fn predict(&self, path: &[NodeId], window: SlotWindow) -> std::result::Result<f64, OracleError> {
        let hour = window.start().hour();
        let peak = (8..=10).contains(&hour) || (17..=19).contains(&hour);

        let mut speed = if peak { PEAK_SPEED } else { BASE_SPEED };
        if path.len() >= 6 {
            speed -= LONG_PATH_PENALTY;
        }
        if path.len() >= 10 {
            speed -= LONG_PATH_PENALTY;
        }

        Ok(speed.max(FLOOR_SPEED))
    }
}
