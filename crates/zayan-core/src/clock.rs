//! Time sources and id generation.
//!
//! The store never calls `Utc::now()` directly: every timestamp comes from a
//! [`Clock`] so tests can pin and advance time. Ids handed out by
//! [`IdGenerator`] are millisecond timestamps made strictly increasing with
//! `next = max(now_ms, last + 1)`.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of "now" for the store and the actions layer.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    #[must_use]
    pub fn at(start: DateTime<Utc>) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(start.timestamp_millis())),
        }
    }

    pub fn advance_ms(&self, ms: i64) {
        self.millis.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let ms = self.millis.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(ms).unwrap_or_default()
    }
}

/// Hands out unique ids for tasks and activity entries created at runtime.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Next id, derived from `now` but never repeating within this generator.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let next = std::cmp::max(now.timestamp_millis(), self.last + 1);
        self.last = next;
        next.to_string()
    }
}
