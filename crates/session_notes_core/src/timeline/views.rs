//! View adapters over the projector: full timeline, mini timeline and stats.
//!
//! Every view reads the same notes and never mutates them.

use crate::model::note::{EpochMillis, Note, NoteCategory};
use crate::timeline::classify::{classify, deduplicate_exercise_starts, Classification};
use crate::timeline::projector::{
    filter_by_type, group_by_bucket, sort_by_timestamp, BucketKey, BucketMode, SortDirection,
};
use std::collections::BTreeMap;

/// Options for the full timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineOptions {
    pub mode: BucketMode,
    pub direction: SortDirection,
    /// Exact type name to keep; `None` keeps every type.
    pub type_filter: Option<String>,
    /// Hide "exercise started" notes superseded by a later result.
    pub hide_superseded_starts: bool,
}

impl TimelineOptions {
    /// Ascending, elapsed-minute buckets, superseded starts hidden.
    pub fn elapsed(session_start: EpochMillis) -> Self {
        Self {
            mode: BucketMode::elapsed(session_start),
            direction: SortDirection::Ascending,
            type_filter: None,
            hide_superseded_starts: true,
        }
    }

    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_type_filter(mut self, type_name: impl Into<String>) -> Self {
        self.type_filter = Some(type_name.into());
        self
    }
}

/// One rendered note.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry<'a> {
    pub note: &'a Note,
    pub classification: Classification,
}

impl<'a> TimelineEntry<'a> {
    fn of(note: &'a Note) -> Self {
        Self {
            note,
            classification: classify(note),
        }
    }

    pub fn color(&self) -> &'a str {
        &self.note.note_type.color
    }

    pub fn icon(&self) -> &'a str {
        &self.note.note_type.icon
    }
}

/// One bucket of the full timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSection<'a> {
    pub key: BucketKey,
    pub label: String,
    pub entries: Vec<TimelineEntry<'a>>,
}

/// Builds the grouped full timeline.
///
/// Sections follow `options.direction`, as do the entries inside each section.
pub fn full_timeline<'a, I>(notes: I, options: &TimelineOptions) -> Vec<TimelineSection<'a>>
where
    I: IntoIterator<Item = &'a Note>,
{
    let visible = if options.hide_superseded_starts {
        deduplicate_exercise_starts(notes)
    } else {
        notes.into_iter().collect()
    };
    let filtered = filter_by_type(visible, options.type_filter.as_deref());
    let sorted = sort_by_timestamp(filtered, options.direction);

    let sections = group_by_bucket(sorted, options.mode)
        .into_iter()
        .map(|(key, notes)| TimelineSection {
            key,
            label: key.to_string(),
            entries: notes.into_iter().map(TimelineEntry::of).collect(),
        });
    match options.direction {
        SortDirection::Ascending => sections.collect(),
        SortDirection::Descending => sections.rev().collect(),
    }
}

/// Newest-first compact list capped at `limit`, superseded starts hidden.
pub fn mini_timeline<'a, I>(notes: I, limit: usize) -> Vec<TimelineEntry<'a>>
where
    I: IntoIterator<Item = &'a Note>,
{
    sort_by_timestamp(deduplicate_exercise_starts(notes), SortDirection::Descending)
        .into_iter()
        .take(limit)
        .map(TimelineEntry::of)
        .collect()
}

/// Aggregate counts over every stored note.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_category: BTreeMap<NoteCategory, usize>,
    pub first_timestamp: Option<EpochMillis>,
    pub last_timestamp: Option<EpochMillis>,
}

impl SessionStats {
    /// Milliseconds between the earliest and latest note.
    pub fn span_ms(&self) -> i64 {
        match (self.first_timestamp, self.last_timestamp) {
            (Some(first), Some(last)) => last - first,
            _ => 0,
        }
    }

    pub fn count(&self, category: NoteCategory) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

pub fn session_stats<'a, I>(notes: I) -> SessionStats
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut stats = SessionStats::default();
    for note in notes {
        stats.total += 1;
        *stats.by_type.entry(note.note_type.name.clone()).or_default() += 1;
        *stats.by_category.entry(classify(note).category).or_default() += 1;
        stats.first_timestamp = Some(
            stats
                .first_timestamp
                .map_or(note.timestamp, |first| first.min(note.timestamp)),
        );
        stats.last_timestamp = Some(
            stats
                .last_timestamp
                .map_or(note.timestamp, |last| last.max(note.timestamp)),
        );
    }
    stats
}
