use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::domain::ids::NodeId;
use crate::domain::occupancy::slot::SlotWindow;

/// Failures of the prediction backend. These never surface to booking
/// callers; the adapter logs them and substitutes the fallback speed.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("prediction backend failed: {0}")]
    Backend(String),

    #[error("prediction call timed out after {0:?}")]
    Timeout(Duration),

    #[error("prediction worker disconnected before answering")]
    Disconnected,
}

/// The narrow call contract to the external speed predictor. The concrete
/// transport (in-process heuristic, RPC, subprocess) is swappable without
/// touching booking logic.
pub trait SpeedOracle: std::fmt::Debug + Send + Sync + 'static {
    fn predict(&self, path: &[NodeId], window: SlotWindow) -> std::result::Result<f64, OracleError>;
}

/// Wraps a [`SpeedOracle`] with a bounded timeout and a fallback speed.
///
/// The backend runs on a worker thread; if it has not answered within the
/// timeout, or answers with an error or an unusable value, the configured
/// fallback speed is returned instead. The oracle is advisory only and can
/// never fail a booking.
#[derive(Debug, Clone)]
pub struct OracleAdapter {
    backend: Arc<dyn SpeedOracle>,
    timeout: Duration,
    fallback_speed: f64,
}

impl OracleAdapter {
    pub fn new(backend: Arc<dyn SpeedOracle>, timeout: Duration, fallback_speed: f64) -> Self {
        OracleAdapter { backend, timeout, fallback_speed }
    }

    pub fn recommended_speed(&self, path: &[NodeId], window: SlotWindow) -> f64 {
        let (tx, rx) = mpsc::channel();
        let backend = Arc::clone(&self.backend);
        let owned_path: Vec<NodeId> = path.to_vec();

        thread::spawn(move || {
            let answer = backend.predict(&owned_path, window);
            // The receiver may have given up already; that is not an error.
            let _ = tx.send(answer);
        });

        let outcome = match rx.recv_timeout(self.timeout) {
            Ok(answer) => answer,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(OracleError::Timeout(self.timeout)),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(OracleError::Disconnected),
        };

        match outcome {
            Ok(speed) if speed.is_finite() && speed > 0.0 => speed,
            Ok(speed) => {
                log::warn!("Oracle returned unusable speed {}, using fallback {}.", speed, self.fallback_speed);
                self.fallback_speed
            }
            Err(e) => {
                log::warn!("Oracle unavailable ({}), using fallback {}.", e, self.fallback_speed);
                self.fallback_speed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[derive(Debug)]
    struct FixedOracle(f64);

    impl SpeedOracle for FixedOracle {
        fn predict(&self, _path: &[NodeId], _window: SlotWindow) -> std::result::Result<f64, OracleError> {
            Ok(self.0)
        }
    }

    #[derive(Debug)]
    struct StallingOracle(Duration);

    impl SpeedOracle for StallingOracle {
        fn predict(&self, _path: &[NodeId], _window: SlotWindow) -> std::result::Result<f64, OracleError> {
            thread::sleep(self.0);
            Ok(90.0)
        }
    }

    fn window() -> SlotWindow {
        SlotWindow::containing(Utc::now(), 900)
    }

    #[test]
    fn healthy_backend_answer_is_passed_through() {
        let adapter = OracleAdapter::new(Arc::new(FixedOracle(42.0)), Duration::from_millis(500), 50.0);
        assert_eq!(adapter.recommended_speed(&[NodeId::new("A")], window()), 42.0);
    }

    #[test]
    fn timeout_substitutes_the_fallback() {
        let adapter = OracleAdapter::new(Arc::new(StallingOracle(Duration::from_millis(300))), Duration::from_millis(20), 50.0);
        assert_eq!(adapter.recommended_speed(&[NodeId::new("A")], window()), 50.0);
    }

    #[test]
    fn non_positive_speed_counts_as_malformed() {
        let adapter = OracleAdapter::new(Arc::new(FixedOracle(-3.0)), Duration::from_millis(500), 50.0);
        assert_eq!(adapter.recommended_speed(&[NodeId::new("A")], window()), 50.0);
    }
}
