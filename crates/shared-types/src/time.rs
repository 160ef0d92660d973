//! # Time Source
//!
//! Abstracted to allow testing with deterministic time.

use crate::entities::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};

/// Time source for consistent timestamp handling.
pub trait TimeSource: Send + Sync {
    /// Returns the current Unix timestamp in seconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Manually driven time source.
///
/// Used by unit and integration tests to step through expiry and
/// rate-limit windows without sleeping.
#[derive(Debug, Default)]
pub struct MockTimeSource {
    time: AtomicU64,
}

impl MockTimeSource {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.time.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_source() {
        let source = SystemTimeSource;
        // Jan 1, 2020
        assert!(source.now() > 1_577_836_800);
    }

    #[test]
    fn test_mock_time_source() {
        let source = MockTimeSource::new(1000);
        assert_eq!(source.now(), 1000);

        source.advance(500);
        assert_eq!(source.now(), 1500);

        source.set(3000);
        assert_eq!(source.now(), 3000);
    }

    #[test]
    fn test_arc_time_source_delegates() {
        let source = std::sync::Arc::new(MockTimeSource::new(7));
        let shared: std::sync::Arc<dyn TimeSource> = source.clone();
        source.advance(3);
        assert_eq!(shared.now(), 10);
    }
}
