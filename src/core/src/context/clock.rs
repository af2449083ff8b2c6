use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of "now" for the snapshot assembler. Injected so tests and the
/// debug time-travel offset never touch the real clock directly.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real wall clock with a debug offset in minutes. The offset is the only
/// mutable global-ish state in the whole engine.
pub struct SystemClock {
    offset_minutes: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            offset_minutes: AtomicI64::new(0),
        }
    }

    pub fn set_time_offset(&self, minutes: i64) {
        self.offset_minutes.store(minutes, Ordering::Relaxed);
    }

    pub fn time_offset(&self) -> i64 {
        self.offset_minutes.load(Ordering::Relaxed)
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now() + Duration::minutes(self.time_offset())
    }
}

/// Test clock pinned to one instant.
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        FixedClock { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_shifts_now() {
        let clock = SystemClock::new();
        let before = clock.now();

        clock.set_time_offset(120);
        assert_eq!(clock.time_offset(), 120);
        let shifted = clock.now();

        assert!(shifted - before >= Duration::minutes(119));
    }

    #[test]
    fn test_fixed_clock_never_moves() {
        let instant = Utc::now();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }
}
