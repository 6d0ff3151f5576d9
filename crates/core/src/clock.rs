//! Date oracle.
//!
//! The current day is always derived from a [`Clock`] at the point of the
//! decision, never remembered, so a rollover is seen by the next caller.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::types::DateId;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current UTC calendar day.
    fn today(&self) -> DateId {
        DateId::from_datetime(self.now())
    }
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and simulations.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Exact time from `now` until the next UTC midnight, sub-second part
/// included. Always positive.
pub fn until_next_reset(now: DateTime<Utc>) -> Duration {
    let tomorrow = now.date_naive() + Duration::days(1);
    tomorrow.and_time(chrono::NaiveTime::MIN).and_utc() - now
}

/// Whole seconds from `now` until the next UTC midnight, truncated.
///
/// Returns 86400 exactly at midnight and is never negative. Only for
/// display; schedule against [`until_next_reset`].
pub fn seconds_until_next_reset(now: DateTime<Utc>) -> i64 {
    until_next_reset(now).num_seconds().max(0)
}
