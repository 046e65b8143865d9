//! Timeline projections over session notes.
//!
//! # Responsibility
//! - Classify, order, bucket and filter notes for display.
//! - Serve the full timeline, the mini timeline and the stats view from one
//!   set of pure functions.
//!
//! # Invariants
//! - Every projection is recomputed on read and leaves the store untouched.

pub mod classify;
pub mod projector;
pub mod views;
