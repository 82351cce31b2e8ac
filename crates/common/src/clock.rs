//! Clock abstraction for components that make time-bounded decisions.
//!
//! Anything that stamps or compares expiries (the claims cache, the
//! authentication resolver) reads time through [`Clock`] instead of calling
//! `Utc::now()` directly. Production code uses [`SystemClock`]; test suites
//! substitute the deterministic [`testing::ManualClock`] (behind the
//! `test-utils` feature) to drive expiry boundaries without sleeping.

use chrono::{DateTime, Utc};

/// Source of the current UTC time.
///
/// Implementations must be cheap to call; the resolver reads the clock on
/// every request.
pub trait Clock: Send + Sync + 'static {
    /// Current time in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    //! Deterministic clock for tests.

    use super::Clock;
    use chrono::{DateTime, Duration, Utc};
    use std::sync::Mutex;

    /// Manually-advanced clock.
    ///
    /// Starts at a fixed instant and only moves when told to, so tests can
    /// step across expiry boundaries exactly.
    #[derive(Debug)]
    pub struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        /// Create a clock frozen at `start`.
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(start),
            }
        }

        /// Move the clock forward by `delta`.
        pub fn advance(&self, delta: Duration) {
            let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
            *now += delta;
        }

        /// Jump the clock to an absolute instant.
        pub fn set(&self, to: DateTime<Utc>) {
            let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
            *now = to;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap_or_else(|e| e.into_inner())
        }
    }
}
