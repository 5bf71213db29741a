use chrono::{DateTime, Utc};
use std::fmt;

/// A discretized reservation bucket: a requested timestamp truncated down to
/// the configured granularity. Two requests collide only if their windows
/// coincide, which for equal granularity means equal start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotWindow {
    /// Bucket start, seconds since the Unix epoch.
    start_epoch_s: i64,
    /// Bucket width in seconds.
    width_s: u32,
}

impl SlotWindow {
    /// The window containing `at` for the given granularity. A granularity
    /// of zero is treated as one second.
    pub fn containing(at: DateTime<Utc>, granularity_secs: u32) -> Self {
        let width = i64::from(granularity_secs.max(1));
        let start = at.timestamp().div_euclid(width) * width;
        SlotWindow { start_epoch_s: start, width_s: width as u32 }
    }

    pub fn start(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.start_epoch_s, 0).unwrap_or_default()
    }

    /// Exclusive end of the window.
    pub fn end(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.start_epoch_s + i64::from(self.width_s), 0).unwrap_or_default()
    }
}

impl fmt::Display for SlotWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start().to_rfc3339(), self.end().to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 24, h, m, s).unwrap()
    }

    #[test]
    fn timestamps_in_the_same_bucket_share_a_window() {
        let a = SlotWindow::containing(at(10, 0, 5), 900);
        let b = SlotWindow::containing(at(10, 14, 59), 900);
        assert_eq!(a, b);
    }

    #[test]
    fn bucket_boundary_starts_a_new_window() {
        let a = SlotWindow::containing(at(10, 14, 59), 900);
        let b = SlotWindow::containing(at(10, 15, 0), 900);
        assert_ne!(a, b);
        assert_eq!(a.end(), b.start());
    }

    #[test]
    fn window_start_is_truncated_to_granularity() {
        let w = SlotWindow::containing(at(10, 7, 31), 900);
        assert_eq!(w.start(), at(10, 0, 0));
        assert_eq!(w.end(), at(10, 15, 0));
    }

    #[test]
    fn zero_granularity_degrades_to_one_second() {
        let w = SlotWindow::containing(at(10, 0, 7), 0);
        assert_eq!(w.start(), at(10, 0, 7));
    }
}
