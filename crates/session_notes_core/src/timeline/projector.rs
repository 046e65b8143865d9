//! Ordering, bucketing and filtering of note sequences.
//!
//! # Responsibility
//! - Turn a flat note sequence into presentation-ready orderings and groups.
//!
//! # Invariants
//! - Projections never mutate their input.
//! - Sorting is stable in both directions.
//! - Buckets sort numerically (elapsed) or chronologically by local minute
//!   (clock), never by label text; notes keep input order within a bucket.

use crate::model::note::{EpochMillis, Note};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Timelike, Utc};
use log::warn;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

const MINUTE_MS: i64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Bucketing strategy for timeline groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketMode {
    /// Whole minutes since session start; negative before the start.
    ElapsedMinutes { session_start: EpochMillis },
    /// Wall-clock hour and minute in the given offset.
    ClockTime { offset: FixedOffset },
}

impl BucketMode {
    pub fn elapsed(session_start: EpochMillis) -> Self {
        Self::ElapsedMinutes { session_start }
    }

    /// Clock-time mode for an offset in minutes east of UTC; out-of-range offsets read as UTC.
    pub fn clock_time(utc_offset_minutes: i32) -> Self {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self::ClockTime { offset }
    }

    /// Bucket a timestamp falls into.
    pub fn key_for(&self, timestamp: EpochMillis) -> BucketKey {
        match self {
            Self::ElapsedMinutes { session_start } => BucketKey::ElapsedMinutes(
                timestamp.saturating_sub(*session_start).div_euclid(MINUTE_MS),
            ),
            Self::ClockTime { offset } => {
                let minute_start = timestamp.div_euclid(MINUTE_MS).saturating_mul(MINUTE_MS);
                let utc = DateTime::<Utc>::from_timestamp_millis(minute_start).unwrap_or_else(|| {
                    warn!(
                        "event=timeline_bucket module=timeline status=error error_code=timestamp_out_of_range timestamp={timestamp}"
                    );
                    DateTime::<Utc>::default()
                });
                BucketKey::ClockTime(utc.with_timezone(offset).naive_local())
            }
        }
    }
}

/// Timeline group key.
///
/// Elapsed keys order numerically. Clock keys hold the local minute with its
/// date, so they order chronologically across midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketKey {
    ElapsedMinutes(i64),
    ClockTime(NaiveDateTime),
}

impl Display for BucketKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ElapsedMinutes(minutes) if *minutes < 0 => write!(f, "-{} min", -minutes),
            Self::ElapsedMinutes(minutes) => write!(f, "+{minutes} min"),
            Self::ClockTime(local) => write!(f, "{}:{:02}", local.hour(), local.minute()),
        }
    }
}

/// Stable sort by timestamp.
pub fn sort_by_timestamp<'a, I>(notes: I, direction: SortDirection) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut sorted: Vec<&Note> = notes.into_iter().collect();
    match direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        SortDirection::Descending => sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
    }
    sorted
}

/// Groups notes into ordered buckets.
pub fn group_by_bucket<'a, I>(notes: I, mode: BucketMode) -> BTreeMap<BucketKey, Vec<&'a Note>>
where
    I: IntoIterator<Item = &'a Note>,
{
    let mut buckets: BTreeMap<BucketKey, Vec<&Note>> = BTreeMap::new();
    for note in notes {
        buckets.entry(mode.key_for(note.timestamp)).or_default().push(note);
    }
    buckets
}

/// Keeps notes whose type name equals `type_name`; `None` keeps everything.
pub fn filter_by_type<'a, I>(notes: I, type_name: Option<&str>) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    match type_name {
        None => notes.into_iter().collect(),
        Some(type_name) => notes
            .into_iter()
            .filter(|note| note.note_type.name == type_name)
            .collect(),
    }
}
