//! Wall-clock sources used to stamp notes.

use crate::model::note::EpochMillis;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies "now" in epoch milliseconds.
pub trait TimeSource {
    fn now_ms(&self) -> EpochMillis;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> EpochMillis {
        // A clock set before 1970 reads as the epoch.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Manually driven clock shared between a test and the code under test.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    now: Rc<Cell<EpochMillis>>,
}

impl ManualTimeSource {
    pub fn new(now: EpochMillis) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: EpochMillis) {
        self.now.set(now);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_ms(&self) -> EpochMillis {
        self.now.get()
    }
}
