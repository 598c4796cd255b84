//! Mock clock for testing.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

use crate::traits::Clock;

/// Manually controlled [`Clock`].
///
/// All clones share the same time, so advancing one advances every holder.
///
/// ```
/// use indexnow::adapters::mock::MockClock;
/// use indexnow::traits::Clock;
/// use chrono::{Duration, Utc};
///
/// let start = Utc::now();
/// let clock = MockClock::new(start);
/// clock.advance(Duration::days(7));
/// assert_eq!(clock.now(), start + Duration::days(7));
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    current_time: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current_time: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, duration: Duration) {
        let mut time = self.current_time.lock().unwrap();
        *time += duration;
    }

    pub fn set(&self, time: DateTime<Utc>) {
        *self.current_time.lock().unwrap() = time;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current_time.lock().unwrap()
    }
}
