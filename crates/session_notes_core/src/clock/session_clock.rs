//! Session countdown arithmetic.
//!
//! # Responsibility
//! - Derive elapsed/remaining time and progress from a fixed start and a
//!   planned duration.
//!
//! # Invariants
//! - `remaining_seconds` never goes below zero; overtime is not displayed.
//! - Once `Expired`, every later reading is `Expired`.

use crate::model::note::EpochMillis;

/// Countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Expired,
}

/// One derived snapshot of the session clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockReading {
    pub elapsed_seconds: i64,
    pub remaining_seconds: i64,
    /// Share of the planned duration still remaining, `100.0..=0.0`.
    pub progress_percent: f64,
    pub state: ClockState,
}

impl ClockReading {
    pub fn is_expired(&self) -> bool {
        self.state == ClockState::Expired
    }

    /// `mm:ss` label of the remaining time.
    pub fn remaining_label(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }
}

/// Fixed start timestamp plus planned duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    start_ms: EpochMillis,
    duration_minutes: u32,
}

impl SessionClock {
    pub fn new(start_ms: EpochMillis, duration_minutes: u32) -> Self {
        Self {
            start_ms,
            duration_minutes,
        }
    }

    pub fn start_ms(&self) -> EpochMillis {
        self.start_ms
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn duration_seconds(&self) -> i64 {
        i64::from(self.duration_minutes) * 60
    }

    /// Reads the clock at `now`.
    ///
    /// Readings before the start clamp elapsed time to zero.
    pub fn tick(&self, now: EpochMillis) -> ClockReading {
        let duration_seconds = self.duration_seconds();
        let elapsed_seconds = (now - self.start_ms).div_euclid(1000).max(0);
        let remaining_seconds = (duration_seconds - elapsed_seconds).max(0);
        let progress_percent = if duration_seconds == 0 {
            0.0
        } else {
            100.0 * remaining_seconds as f64 / duration_seconds as f64
        };
        let state = if remaining_seconds == 0 {
            ClockState::Expired
        } else {
            ClockState::Running
        };

        ClockReading {
            elapsed_seconds,
            remaining_seconds,
            progress_percent,
            state,
        }
    }
}

/// Formats seconds as zero-padded `mm:ss`; minutes may exceed two digits.
pub fn format_mm_ss(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
