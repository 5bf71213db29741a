use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

/// Source of the current time for slot-cutoff decisions and created-at
/// stamps. Abstracted so the past-slot policy is testable.
pub trait SystemClock: std::fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real wall-clock time.
#[derive(Debug, Clone, Default)]
pub struct WallClock;

impl SystemClock for WallClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A settable clock for tests. Cloning shares the underlying time cell, so a
/// test can advance time after handing the clock to the engine.
#[derive(Debug, Clone)]
pub struct MockClock {
    time: Arc<RwLock<DateTime<Utc>>>,
}

impl MockClock {
    pub fn new(time: DateTime<Utc>) -> Self {
        MockClock { time: Arc::new(RwLock::new(time)) }
    }

    pub fn set(&self, time: DateTime<Utc>) {
        *self.time.write().unwrap() = time;
    }
}

impl SystemClock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.time.read().unwrap()
    }
}
