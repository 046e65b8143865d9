//! Session note timeline engine.
//! This crate is the single source of truth for session and timeline invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod exercise;
pub mod handoff;
pub mod logging;
pub mod model;
pub mod session;
pub mod store;
pub mod timeline;

pub use clock::scheduler::{Scheduler, TaskControl, TaskHandle};
pub use clock::session_clock::{format_mm_ss, ClockReading, ClockState, SessionClock};
pub use clock::time_source::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use config::{ConfigError, SessionConfig};
pub use exercise::breathing::{
    BreathingEvent, BreathingExercise, BreathingPattern, BreathingPhase, BreathingResult,
    BreathingState,
};
pub use exercise::emotion_wheel::{EmotionSelection, EmotionWheelError};
pub use exercise::reflection::{ReflectionAnswers, ReflectionError};
pub use exercise::{ExerciseKind, ExerciseOutcome};
pub use handoff::{
    finalize_prep, load_prep_data, HandoffError, HandoffResult, MemoryPrepChannel, PrepChannel,
    SqlitePrepChannel, PREP_PAYLOAD_KEY,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{EpochMillis, Note, NoteCategory, NoteId};
pub use model::note_type::{NoteType, NoteTypeRegistry, RegistryError, WellKnownType};
pub use model::prep::{PrepPayload, DEFAULT_SESSION_DURATION_MINUTES};
pub use session::{BreathingOverlay, LiveSession, SessionCountdown, SessionError};
pub use store::note_store::NoteStore;
pub use timeline::classify::{
    classify, deduplicate_exercise_starts, Classification, DisplayStyle, IMAGE_DATA_PREFIX,
};
pub use timeline::projector::{
    filter_by_type, group_by_bucket, sort_by_timestamp, BucketKey, BucketMode, SortDirection,
};
pub use timeline::views::{
    full_timeline, mini_timeline, session_stats, SessionStats, TimelineEntry, TimelineOptions,
    TimelineSection,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
