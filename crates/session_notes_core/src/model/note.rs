//! Session note record.
//!
//! # Responsibility
//! - Define the timestamped, typed entry captured during a session.
//!
//! # Invariants
//! - `id` is unique within one note store for its lifetime.
//! - `timestamp` is set once and is the authoritative ordering key.
//! - `created_at` and `updated_at` equal `timestamp`; notes are never edited in place.

use crate::model::note_type::NoteType;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Unix epoch milliseconds.
pub type EpochMillis = i64;

/// Stable note identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(Uuid);

impl NoteId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Special category of a note, decided by the code path that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteCategory {
    Drawing,
    Exercise,
    Planning,
    Standard,
}

impl NoteCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drawing => "drawing",
            Self::Exercise => "exercise",
            Self::Planning => "planning",
            Self::Standard => "standard",
        }
    }
}

/// One entry of a session's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Free text, or a `data:image/...` URI for drawings.
    pub content: String,
    /// Serialized as `type` to match the external schema naming.
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub timestamp: EpochMillis,
    pub created_at: EpochMillis,
    pub updated_at: EpochMillis,
    /// Absent on notes recorded before tagging existed; those are classified by sniffing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NoteCategory>,
}

impl Note {
    /// Creates a note with a fresh id; all three time fields equal `timestamp`.
    pub fn new(
        content: impl Into<String>,
        note_type: NoteType,
        timestamp: EpochMillis,
        category: Option<NoteCategory>,
    ) -> Self {
        Self {
            id: NoteId::generate(),
            content: content.into(),
            note_type,
            timestamp,
            created_at: timestamp,
            updated_at: timestamp,
            category,
        }
    }
}
