//! Live session context.
//!
//! # Responsibility
//! - Seed a session from handed-off prep data.
//! - Own the note store and session clock for the session's lifetime.
//! - Expose the user actions (manual notes, drawings, exercises) and the
//!   read-only projections consumed by the views.
//!
//! # Invariants
//! - At most one planning note is seeded, dated `planning_note_offset_ms`
//!   before session start.
//! - Blank manual notes and non-image drawing payloads are rejected; every
//!   other input degrades to a default instead of failing.

mod overlay;

pub use overlay::{BreathingOverlay, SessionCountdown};

use crate::clock::scheduler::Scheduler;
use crate::clock::session_clock::{ClockReading, SessionClock};
use crate::clock::time_source::TimeSource;
use crate::config::SessionConfig;
use crate::exercise::{ExerciseKind, ExerciseOutcome};
use crate::handoff::{load_prep_data, PrepChannel};
use crate::model::note::{EpochMillis, Note, NoteCategory, NoteId};
use crate::model::note_type::{NoteTypeRegistry, WellKnownType};
use crate::model::prep::PrepPayload;
use crate::store::note_store::NoteStore;
use crate::timeline::projector::BucketMode;
use crate::timeline::views::{
    full_timeline, mini_timeline, session_stats, SessionStats, TimelineEntry, TimelineOptions,
    TimelineSection,
};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static DRAWING_PAYLOAD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/[A-Za-z0-9.+-]+(?:;[A-Za-z0-9=._-]+)*,\S+$")
        .expect("valid drawing payload regex")
});

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Manual note content is blank.
    EmptyContent,
    /// Drawing content is not an image data URI.
    InvalidDrawingPayload,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content must not be empty"),
            Self::InvalidDrawingPayload => write!(f, "drawing must be an image data URI"),
        }
    }
}

impl Error for SessionError {}

/// State of one running therapy session.
pub struct LiveSession {
    store: NoteStore,
    clock: SessionClock,
    goals: Vec<String>,
    planned_exercises: Vec<ExerciseKind>,
    registry: NoteTypeRegistry,
    config: SessionConfig,
}

impl LiveSession {
    /// Starts a session now, with the builtin note type catalog.
    ///
    /// `None` prep data starts with defaults for every field.
    pub fn start(
        prep: Option<PrepPayload>,
        time_source: impl TimeSource + 'static,
        config: SessionConfig,
    ) -> Self {
        Self::start_with_registry(prep, time_source, config, NoteTypeRegistry::default())
    }

    /// Starts a session from whatever the prep stage left in `channel`.
    pub fn start_from_channel<C>(
        channel: &mut C,
        time_source: impl TimeSource + 'static,
        config: SessionConfig,
    ) -> Self
    where
        C: PrepChannel + ?Sized,
    {
        let prep = load_prep_data(channel, time_source.now_ms());
        Self::start(prep, time_source, config)
    }

    pub fn start_with_registry(
        prep: Option<PrepPayload>,
        time_source: impl TimeSource + 'static,
        config: SessionConfig,
        registry: NoteTypeRegistry,
    ) -> Self {
        let prep = prep
            .map(|payload| payload.normalized(config.default_duration_minutes))
            .unwrap_or_else(|| PrepPayload::defaults_with_duration(config.default_duration_minutes));

        let mut store = NoteStore::with_time_source(time_source);
        let start_ms = store.now_ms();
        if prep.has_planning_content() {
            store.seed_planning_note(
                prep.planning_note_content(),
                registry.resolve_well_known(WellKnownType::Planning),
                start_ms - config.planning_note_offset_ms,
            );
        }

        let planned_exercises = prep
            .planned_exercises
            .iter()
            .filter_map(|id| {
                let kind = ExerciseKind::from_id(id);
                if kind.is_none() {
                    warn!("event=session_start module=session status=skipped reason=unknown_exercise exercise_id={id}");
                }
                kind
            })
            .collect::<Vec<_>>();

        info!(
            "event=session_start module=session status=ok duration_min={} goals={} planned_exercises={} seeded_notes={}",
            prep.session_duration,
            prep.session_goals.len(),
            planned_exercises.len(),
            store.len()
        );

        Self {
            store,
            clock: SessionClock::new(start_ms, prep.session_duration),
            goals: prep.session_goals,
            planned_exercises,
            registry,
            config,
        }
    }

    pub fn start_ms(&self) -> EpochMillis {
        self.clock.start_ms()
    }

    pub fn clock(&self) -> SessionClock {
        self.clock
    }

    pub fn goals(&self) -> &[String] {
        &self.goals
    }

    pub fn planned_exercises(&self) -> &[ExerciseKind] {
        &self.planned_exercises
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> &NoteTypeRegistry {
        &self.registry
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Reads the session clock now.
    pub fn tick(&self) -> ClockReading {
        self.clock.tick(self.store.now_ms())
    }

    /// Records a manual note; unknown type names fall back to the first catalog type.
    pub fn add_note(&mut self, content: &str, type_name: &str) -> Result<&Note, SessionError> {
        if content.trim().is_empty() {
            return Err(SessionError::EmptyContent);
        }
        let note_type = self.registry.resolve_or_first(type_name);
        Ok(self.store.add_note(content.trim(), note_type))
    }

    /// Records a saved canvas as a drawing note.
    pub fn save_drawing(&mut self, data_uri: &str) -> Result<&Note, SessionError> {
        let data_uri = data_uri.trim();
        if !DRAWING_PAYLOAD_RE.is_match(data_uri) {
            return Err(SessionError::InvalidDrawingPayload);
        }
        let note_type = self.registry.resolve_well_known(WellKnownType::Drawing);
        Ok(self
            .store
            .add_tagged_note(data_uri, note_type, NoteCategory::Drawing))
    }

    /// Writes the "exercise started" placeholder.
    pub fn start_exercise(&mut self, kind: ExerciseKind) -> &Note {
        let note_type = self.registry.resolve_well_known(WellKnownType::Exercise);
        info!("event=exercise_start module=session status=ok exercise_id={}", kind.id());
        self.store
            .add_tagged_note(kind.start_content(), note_type, NoteCategory::Exercise)
    }

    /// Writes the result note of a finished exercise.
    pub fn record_exercise_outcome(&mut self, outcome: &ExerciseOutcome) -> &Note {
        let note_type = self.registry.resolve_well_known(WellKnownType::Exercise);
        info!(
            "event=exercise_complete module=session status=ok exercise_id={}",
            outcome.kind().id()
        );
        self.store
            .add_tagged_note(outcome.note_content(), note_type, NoteCategory::Exercise)
    }

    /// Removes a note; unknown ids are ignored.
    pub fn delete_note(&mut self, id: NoteId) -> bool {
        self.store.delete_note(id)
    }

    /// Elapsed-minute timeline options anchored at this session's start.
    pub fn elapsed_timeline_options(&self) -> TimelineOptions {
        TimelineOptions::elapsed(self.start_ms())
    }

    /// Clock-time timeline options in the configured UTC offset.
    pub fn clock_timeline_options(&self) -> TimelineOptions {
        TimelineOptions {
            mode: BucketMode::clock_time(self.config.utc_offset_minutes),
            ..self.elapsed_timeline_options()
        }
    }

    pub fn timeline(&self, options: &TimelineOptions) -> Vec<TimelineSection<'_>> {
        full_timeline(&self.store, options)
    }

    pub fn mini_timeline(&self) -> Vec<TimelineEntry<'_>> {
        mini_timeline(&self.store, self.config.mini_timeline_limit)
    }

    pub fn stats(&self) -> SessionStats {
        session_stats(&self.store)
    }

    /// Mounts the once-per-interval countdown on `scheduler`.
    pub fn mount_countdown(&self, scheduler: &Scheduler) -> SessionCountdown {
        SessionCountdown::mount(scheduler, self.clock, self.config.tick_interval_ms)
    }

    /// Writes the breathing start note and mounts the breathing overlay.
    pub fn open_breathing(&mut self, scheduler: &Scheduler) -> BreathingOverlay {
        self.start_exercise(ExerciseKind::Breathing);
        BreathingOverlay::mount(scheduler, self.config.breathing, self.config.tick_interval_ms)
    }
}
