//! Wall-clock abstraction.
//!
//! Key rotation compares stored timestamps against "now", so tests need to
//! move time forward by days without sleeping.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
