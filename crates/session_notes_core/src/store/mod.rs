//! Session-scoped note storage.
//!
//! # Responsibility
//! - Own the mutable note sequence of the active session.
//! - Keep projections read-only by exposing borrowed views only.
//!
//! # Invariants
//! - Nothing in this module persists notes; durable storage is a caller concern.

pub mod note_store;
