use std::io::Write;
use std::process::{Command, Stdio};

use crate::api::oracle_dto::{OracleRequestDto, OracleResponseDto};
use crate::domain::ids::NodeId;
use crate::domain::occupancy::slot::SlotWindow;
use crate::domain::oracle::adapter::{OracleError, SpeedOracle};

/// Speed predictor running as a child process: the request is written to its
/// stdin as JSON, the response is read from its stdout. Any non-zero exit or
/// malformed output is a backend error, which the adapter turns into the
/// fallback speed.
#[derive(Debug, Clone)]
pub struct SubprocessOracle {
    program: String,
    args: Vec<String>,
}

impl SubprocessOracle {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        SubprocessOracle { program: program.into(), args }
    }
}

impl SpeedOracle for SubprocessOracle {
    fn predict(&self, path: &[NodeId], window: SlotWindow) -> std::result::Result<f64, OracleError> {
        let request = OracleRequestDto { path: path.iter().map(|n| n.to_string()).collect(), slot: window.start().to_rfc3339() };
        let payload = serde_json::to_string(&request).map_err(|e| OracleError::Backend(e.to_string()))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| OracleError::Backend(format!("failed to spawn '{}': {}", self.program, e)))?;

        child
            .stdin
            .as_mut()
            .ok_or_else(|| OracleError::Backend("child stdin unavailable".to_string()))?
            .write_all(payload.as_bytes())
            .map_err(|e| OracleError::Backend(format!("failed to write request: {}", e)))?;

        let output = child.wait_with_output().map_err(|e| OracleError::Backend(format!("failed to collect output: {}", e)))?;
        if !output.status.success() {
            return Err(OracleError::Backend(format!("predictor exited with {}", output.status)));
        }

        let response: OracleResponseDto =
            serde_json::from_slice(&output.stdout).map_err(|e| OracleError::Backend(format!("malformed predictor output: {}", e)))?;
        Ok(response.recommended_speed)
    }
}
