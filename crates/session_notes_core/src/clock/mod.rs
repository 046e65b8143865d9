//! Time derivation and recurring scheduled work.
//!
//! # Responsibility
//! - Compute the session countdown from a fixed start and planned duration.
//! - Provide cancellable interval tasks for view-owned timers.
//! - Abstract "now" so notes can be stamped deterministically in tests.

pub mod scheduler;
pub mod session_clock;
pub mod time_source;
