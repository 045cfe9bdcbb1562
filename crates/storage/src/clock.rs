//! Timestamp sources for created/updated stamps

use chrono::Utc;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of nanosecond timestamps
pub trait Clock: Send + Sync + fmt::Debug {
    /// Nanoseconds since the Unix epoch
    fn now_nanos(&self) -> i64;
}

/// Wall clock at nanosecond resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> i64 {
        // None only past the year 2262
        Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Clock reading `start`
    pub fn new(start: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }

    /// Jump to `ts`
    pub fn set(&self, ts: i64) {
        self.now.store(ts, Ordering::Release);
    }

    /// Move forward by `delta` and return the new reading
    pub fn advance(&self, delta: i64) -> i64 {
        self.now.fetch_add(delta, Ordering::AcqRel) + delta
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> i64 {
        self.now.load(Ordering::Acquire)
    }
}
