//! Special-note classification and exercise-start deduplication.
//!
//! # Responsibility
//! - Decide whether a note renders as an icon bubble (drawing, exercise,
//!   planning) or as a solid color dot.
//! - Hide "exercise started" placeholders once a result exists.
//!
//! # Invariants
//! - Classification is a pure function of the note; nothing is cached.
//! - Image payload content is always a drawing, whatever its type or tag.
//! - Tagged notes use their tag; untagged notes fall back to substring sniffing.

use crate::model::note::{Note, NoteCategory};
use crate::model::note_type::{NoteType, PLANNING_TYPE_ID};
use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix of embedded drawing payloads.
pub const IMAGE_DATA_PREFIX: &str = "data:image/";

static EXERCISE_START_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:exercise started|übung gestartet)\s*:\s*(.+)")
        .expect("valid exercise start regex")
});

/// Lowercase substrings used to sniff untagged notes.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    pub drawing: &'static [&'static str],
    pub exercise: &'static [&'static str],
    pub exercise_started: &'static [&'static str],
    pub exercise_results: &'static [&'static str],
    pub planning: &'static [&'static str],
}

/// English and German vocabulary.
pub static VOCABULARY: Vocabulary = Vocabulary {
    drawing: &["drawing", "zeichnung"],
    exercise: &["exercise", "übung"],
    exercise_started: &["exercise started", "übung gestartet"],
    exercise_results: &[
        "emotion identified",
        "breathing exercise completed",
        "reflection submitted",
        "emotion erkannt",
        "atemübung abgeschlossen",
        "reflexion eingereicht",
    ],
    planning: &["pre-session", "planning", "vorbereitung"],
};

/// How the timeline renders a note marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStyle {
    /// Bordered bubble carrying the type icon.
    Icon,
    /// Solid dot in the type color.
    SolidDot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: NoteCategory,
    pub display_style: DisplayStyle,
}

impl Classification {
    fn of(category: NoteCategory) -> Self {
        let display_style = match category {
            NoteCategory::Standard => DisplayStyle::SolidDot,
            NoteCategory::Drawing | NoteCategory::Exercise | NoteCategory::Planning => {
                DisplayStyle::Icon
            }
        };
        Self {
            category,
            display_style,
        }
    }
}

/// Classifies one note.
pub fn classify(note: &Note) -> Classification {
    if is_image_payload(&note.content) {
        return Classification::of(NoteCategory::Drawing);
    }
    let category = note
        .category
        .unwrap_or_else(|| sniff_category(&note.content, &note.note_type));
    Classification::of(category)
}

/// Infers a category from content and type without a tag.
pub fn sniff_category(content: &str, note_type: &NoteType) -> NoteCategory {
    let type_name = note_type.name.to_lowercase();
    if is_image_payload(content) || contains_any(&type_name, VOCABULARY.drawing) {
        return NoteCategory::Drawing;
    }

    let lowered_content = content.to_lowercase();
    if contains_any(&type_name, VOCABULARY.exercise)
        || contains_any(&lowered_content, VOCABULARY.exercise_started)
    {
        return NoteCategory::Exercise;
    }

    if note_type.id == PLANNING_TYPE_ID || contains_any(&type_name, VOCABULARY.planning) {
        return NoteCategory::Planning;
    }

    NoteCategory::Standard
}

/// Whether content is an embedded image data URI.
pub fn is_image_payload(content: &str) -> bool {
    content
        .trim_start()
        .get(..IMAGE_DATA_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(IMAGE_DATA_PREFIX))
}

/// Whether the note is an "exercise started" placeholder.
pub fn is_exercise_start(note: &Note) -> bool {
    contains_any(&note.content.to_lowercase(), VOCABULARY.exercise_started)
}

/// Whether the note carries a completed exercise result.
pub fn is_exercise_result(note: &Note) -> bool {
    contains_any(&note.content.to_lowercase(), VOCABULARY.exercise_results)
}

/// Exercise title named by a start placeholder, e.g. `Breathing`.
pub fn exercise_start_title(content: &str) -> Option<&str> {
    EXERCISE_START_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|title| title.as_str().trim())
        .filter(|title| !title.is_empty())
}

/// Drops start placeholders followed by any later result note.
///
/// The later result does not have to belong to the same exercise.
pub fn deduplicate_exercise_starts<'a, I>(notes: I) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    let notes: Vec<&Note> = notes.into_iter().collect();
    let latest_result = notes
        .iter()
        .filter(|note| is_exercise_result(note))
        .map(|note| note.timestamp)
        .max();

    match latest_result {
        None => notes,
        Some(latest_result) => notes
            .into_iter()
            .filter(|note| !(is_exercise_start(note) && latest_result > note.timestamp))
            .collect(),
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
