//! Domain model for session notes.
//!
//! # Responsibility
//! - Define the note, note type and prep payload shapes shared by the store,
//!   the timeline projections and the session.
//!
//! # Invariants
//! - Note types are carried by value on each note, never as foreign keys.

pub mod note;
pub mod note_type;
pub mod prep;
