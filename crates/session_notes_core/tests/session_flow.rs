use session_notes_core::db::open_db_in_memory;
use session_notes_core::{
    finalize_prep, BreathingPattern, BreathingState, EmotionSelection, ExerciseKind,
    ExerciseOutcome, LiveSession, ManualTimeSource, MemoryPrepChannel, NoteCategory, NoteId,
    PrepPayload, ReflectionAnswers, Scheduler, SessionConfig, SqlitePrepChannel,
};

const NOW: i64 = 1_767_258_000_000;
const HOUR: i64 = 3_600_000;

fn planned_payload(exercises: &[&str]) -> PrepPayload {
    PrepPayload {
        session_goals: vec!["G1".to_string()],
        session_duration: 30,
        session_notes: "remember X".to_string(),
        planned_exercises: exercises.iter().map(|id| id.to_string()).collect(),
    }
}

fn quick_breathing_config() -> SessionConfig {
    SessionConfig {
        breathing: BreathingPattern {
            inhale_secs: 1,
            hold_secs: 0,
            exhale_secs: 1,
            cycles: 2,
        },
        ..SessionConfig::default()
    }
}

#[test]
fn prep_handoff_seeds_one_planning_note_and_clock() {
    let mut channel = MemoryPrepChannel::new();
    finalize_prep(&mut channel, &planned_payload(&["breathing"]), NOW - 600_000).unwrap();

    let session = LiveSession::start_from_channel(
        &mut channel,
        ManualTimeSource::new(NOW),
        SessionConfig::default(),
    );

    let planning: Vec<_> = session
        .store()
        .iter()
        .filter(|note| note.category == Some(NoteCategory::Planning))
        .collect();
    assert_eq!(session.store().len(), 1);
    assert_eq!(planning.len(), 1);
    assert_eq!(planning[0].timestamp, NOW - HOUR);
    assert_eq!(planning[0].note_type.id, "pre-session");
    assert_eq!(planning[0].content, "Session goals:\n- G1\n\nremember X");

    let reading = session.tick();
    assert_eq!(reading.remaining_seconds, 1800);
    assert_eq!(reading.progress_percent, 100.0);
    assert_eq!(session.goals(), ["G1".to_string()]);
    assert_eq!(session.planned_exercises(), [ExerciseKind::Breathing]);
    assert!(channel.is_empty());
}

#[test]
fn second_session_from_same_channel_starts_with_defaults() {
    let mut channel = MemoryPrepChannel::new();
    finalize_prep(&mut channel, &planned_payload(&[]), NOW).unwrap();
    let _first =
        LiveSession::start_from_channel(&mut channel, ManualTimeSource::new(NOW), SessionConfig::default());

    let second =
        LiveSession::start_from_channel(&mut channel, ManualTimeSource::new(NOW), SessionConfig::default());
    assert!(second.store().is_empty());
    assert_eq!(second.clock().duration_minutes(), 50);
    assert!(second.planned_exercises().is_empty());
}

#[test]
fn expired_sqlite_handoff_starts_with_defaults() {
    let conn = open_db_in_memory().unwrap();
    let mut channel = SqlitePrepChannel::new(&conn, HOUR);
    finalize_prep(&mut channel, &planned_payload(&["breathing"]), NOW).unwrap();

    let session = LiveSession::start_from_channel(
        &mut channel,
        ManualTimeSource::new(NOW + 2 * HOUR),
        SessionConfig::default(),
    );
    assert!(session.store().is_empty());
    assert_eq!(session.tick().remaining_seconds, 50 * 60);
}

#[test]
fn unknown_planned_exercises_are_dropped() {
    let session = LiveSession::start(
        Some(planned_payload(&["breathing", "juggling", " reflection "])),
        ManualTimeSource::new(NOW),
        SessionConfig::default(),
    );
    assert_eq!(
        session.planned_exercises(),
        [ExerciseKind::Breathing, ExerciseKind::Reflection]
    );
}

#[test]
fn committed_breathing_result_supersedes_start_marker() {
    let time = ManualTimeSource::new(NOW);
    let scheduler = Scheduler::new(NOW);
    let mut session = LiveSession::start(None, time.clone(), quick_breathing_config());

    let overlay = session.open_breathing(&scheduler);
    assert_eq!(session.store().len(), 1);
    assert_eq!(overlay.toggle(), BreathingState::Running);

    scheduler.advance_to(NOW + 4_000);
    time.advance(4_000);
    assert_eq!(overlay.state(), BreathingState::Idle);
    assert_eq!(overlay.result().map(|result| result.cycles), Some(2));

    let content = overlay
        .commit(&mut session)
        .map(|note| note.content.clone())
        .unwrap();
    assert_eq!(content, "Breathing exercise completed: 2 cycles");
    assert_eq!(scheduler.active_tasks(), 0);
    assert_eq!(session.store().len(), 2);

    let sections = session.timeline(&session.elapsed_timeline_options());
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].label, "+0 min");
    assert_eq!(sections[0].entries.len(), 1);
    assert_eq!(sections[0].entries[0].note.content, content);
}

#[test]
fn closing_breathing_overlay_leaves_store_untouched() {
    let scheduler = Scheduler::new(NOW);
    let mut session =
        LiveSession::start(None, ManualTimeSource::new(NOW), quick_breathing_config());

    let overlay = session.open_breathing(&scheduler);
    overlay.toggle();
    scheduler.advance_to(NOW + 1_000);
    let before: Vec<NoteId> = session.store().iter().map(|note| note.id).collect();

    overlay.close();
    assert_eq!(scheduler.active_tasks(), 0);
    scheduler.advance_to(NOW + 10_000);
    let after: Vec<NoteId> = session.store().iter().map(|note| note.id).collect();
    assert_eq!(before, after);
    assert_eq!(session.store().len(), 1);
}

#[test]
fn uncommitted_breathing_run_writes_nothing_on_commit() {
    let scheduler = Scheduler::new(NOW);
    let mut session =
        LiveSession::start(None, ManualTimeSource::new(NOW), quick_breathing_config());

    let overlay = session.open_breathing(&scheduler);
    overlay.toggle();
    scheduler.advance_to(NOW + 1_000);
    assert!(overlay.commit(&mut session).is_none());
    assert_eq!(session.store().len(), 1);
    assert_eq!(scheduler.active_tasks(), 0);
}

#[test]
fn emotion_and_reflection_outcomes_are_recorded() {
    let time = ManualTimeSource::new(NOW);
    let mut session = LiveSession::start(None, time.clone(), SessionConfig::default());

    session.start_exercise(ExerciseKind::EmotionWheel);
    time.advance(30_000);
    let selection = EmotionSelection::pick("fear", Some("anxiety")).unwrap();
    let emotion = session
        .record_exercise_outcome(&ExerciseOutcome::Emotion(selection))
        .content
        .clone();
    assert_eq!(emotion, "Emotion identified: Fear > Anxiety");

    time.advance(60_000);
    session.start_exercise(ExerciseKind::Reflection);
    time.advance(60_000);
    let answers = ReflectionAnswers::submit(&["Calm", " ", "Tired"]).unwrap();
    let reflection = session
        .record_exercise_outcome(&ExerciseOutcome::Reflection(answers))
        .content
        .clone();
    assert_eq!(
        reflection,
        "Reflection submitted: What stood out to you today? Calm | How are you feeling right now? Tired"
    );

    let stats = session.stats();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.count(NoteCategory::Exercise), 4);

    let mini: Vec<&str> = session
        .mini_timeline()
        .iter()
        .map(|entry| entry.note.content.as_str())
        .collect();
    assert_eq!(mini, [reflection.as_str(), emotion.as_str()]);
}

#[test]
fn manual_notes_drawings_and_deletes() {
    let time = ManualTimeSource::new(NOW);
    let mut session = LiveSession::start(None, time.clone(), SessionConfig::default());

    let quote = session.add_note("I felt heard", "Client Quote").unwrap().id;
    time.advance(120_000);
    session
        .save_drawing("data:image/png;base64,iVBORw0KGgo=")
        .unwrap();

    assert!(!session.delete_note(NoteId::generate()));
    assert_eq!(session.store().len(), 2);

    let sections = session.timeline(&session.elapsed_timeline_options());
    let labels: Vec<&str> = sections.iter().map(|section| section.label.as_str()).collect();
    assert_eq!(labels, ["+0 min", "+2 min"]);
    assert_eq!(
        sections[1].entries[0].classification.category,
        NoteCategory::Drawing
    );

    assert!(session.delete_note(quote));
    assert_eq!(session.store().len(), 1);
}

#[test]
fn clock_timeline_uses_configured_offset() {
    let config = SessionConfig {
        utc_offset_minutes: 60,
        ..SessionConfig::default()
    };
    let session = LiveSession::start(
        Some(planned_payload(&[])),
        ManualTimeSource::new(NOW),
        config,
    );

    let sections = session.timeline(&session.clock_timeline_options());
    let labels: Vec<&str> = sections.iter().map(|section| section.label.as_str()).collect();
    assert_eq!(labels, ["9:00"]);
}
