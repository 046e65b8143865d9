//! In-memory note collection owned by one live session.
//!
//! # Responsibility
//! - Append, seed and remove notes; expose them in insertion order.
//! - Tag each note with its category at creation time.
//!
//! # Invariants
//! - Note ids are unique for the store's lifetime.
//! - `add_*` appends; `seed_planning_note` prepends. Presentation re-sorts.
//! - Deleting an unknown id is a no-op.
//! - Only metadata is logged, never note content.

use crate::clock::time_source::{SystemTimeSource, TimeSource};
use crate::model::note::{EpochMillis, Note, NoteCategory, NoteId};
use crate::model::note_type::NoteType;
use crate::timeline::classify::sniff_category;
use log::debug;
use std::rc::Rc;

/// Insertion-ordered note sequence.
pub struct NoteStore {
    notes: Vec<Note>,
    time_source: Rc<dyn TimeSource>,
}

impl NoteStore {
    /// Creates an empty store stamping notes with the system clock.
    pub fn new() -> Self {
        Self::with_time_source(SystemTimeSource)
    }

    pub fn with_time_source(time_source: impl TimeSource + 'static) -> Self {
        Self {
            notes: Vec::new(),
            time_source: Rc::new(time_source),
        }
    }

    /// Current time according to the store's clock.
    pub fn now_ms(&self) -> EpochMillis {
        self.time_source.now_ms()
    }

    /// Appends a note stamped now, sniffing its category once.
    ///
    /// Content is not validated; callers reject empty input.
    pub fn add_note(&mut self, content: impl Into<String>, note_type: NoteType) -> &Note {
        let timestamp = self.now_ms();
        self.add_note_at(content, note_type, timestamp)
    }

    /// Appends a note with an explicit timestamp.
    pub fn add_note_at(
        &mut self,
        content: impl Into<String>,
        note_type: NoteType,
        timestamp: EpochMillis,
    ) -> &Note {
        let content = content.into();
        let category = sniff_category(&content, &note_type);
        self.push(Note::new(content, note_type, timestamp, Some(category)))
    }

    /// Appends a note stamped now with a category chosen by the caller.
    pub fn add_tagged_note(
        &mut self,
        content: impl Into<String>,
        note_type: NoteType,
        category: NoteCategory,
    ) -> &Note {
        let timestamp = self.now_ms();
        self.push(Note::new(content, note_type, timestamp, Some(category)))
    }

    /// Prepends a planning note dated `virtual_timestamp` instead of now.
    pub fn seed_planning_note(
        &mut self,
        content: impl Into<String>,
        note_type: NoteType,
        virtual_timestamp: EpochMillis,
    ) -> &Note {
        let note = Note::new(
            content,
            note_type,
            virtual_timestamp,
            Some(NoteCategory::Planning),
        );
        debug!(
            "event=note_seed module=store status=ok note_id={} timestamp={}",
            note.id, virtual_timestamp
        );
        self.notes.insert(0, note);
        &self.notes[0]
    }

    /// Removes the note with `id`. Returns whether a note was removed.
    pub fn delete_note(&mut self, id: NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        let removed = self.notes.len() != before;
        debug!(
            "event=note_delete module=store status={} note_id={id}",
            if removed { "ok" } else { "skipped" }
        );
        removed
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Notes in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn push(&mut self, note: Note) -> &Note {
        debug!(
            "event=note_add module=store status=ok note_id={} type_id={} category={}",
            note.id,
            note.note_type.id,
            note.category.map_or("untagged", NoteCategory::as_str)
        );
        self.notes.push(note);
        &self.notes[self.notes.len() - 1]
    }
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a NoteStore {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::NoteStore;
    use crate::clock::time_source::ManualTimeSource;
    use crate::model::note::NoteCategory;
    use crate::model::note_type::{NoteType, WellKnownType};

    fn observation() -> NoteType {
        NoteType::new("observation", "Observation", "#3b82f6", "eye")
    }

    #[test]
    fn add_note_stamps_all_time_fields_from_source() {
        let clock = ManualTimeSource::new(5_000);
        let mut store = NoteStore::with_time_source(clock.clone());
        let note = store.add_note("calm", observation()).clone();
        assert_eq!(note.timestamp, 5_000);
        assert_eq!(note.created_at, 5_000);
        assert_eq!(note.updated_at, 5_000);
        assert_eq!(note.category, Some(NoteCategory::Standard));
    }

    #[test]
    fn seed_prepends_and_add_appends() {
        let mut store = NoteStore::with_time_source(ManualTimeSource::new(10_000));
        let first = store.add_note("first", observation()).id;
        let seeded = store
            .seed_planning_note("plan", WellKnownType::Planning.synthetic(), 1_000)
            .id;
        let ids: Vec<_> = store.iter().map(|note| note.id).collect();
        assert_eq!(ids, vec![seeded, first]);
        assert_eq!(store.get(seeded).map(|n| n.category), Some(Some(NoteCategory::Planning)));
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = NoteStore::with_time_source(ManualTimeSource::new(0));
        let id = store.add_note("x", observation()).id;
        assert!(store.delete_note(id));
        assert!(!store.delete_note(id));
        assert!(store.is_empty());
    }
}
