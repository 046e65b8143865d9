//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `session_notes_core` linkage without a UI host.
//! - Replay a scripted session and print its projections deterministically.

use session_notes_core::{
    finalize_prep, ClockReading, EmotionSelection, ExerciseKind, ExerciseOutcome, LiveSession,
    ManualTimeSource, MemoryPrepChannel, PrepPayload, Scheduler, SessionConfig, TimeSource,
};

// 2026-01-01T09:00:00Z, fixed so output does not depend on the wall clock.
const DEMO_START_MS: i64 = 1_767_258_000_000;
const MINUTE_MS: i64 = 60_000;

fn main() {
    println!("session_notes_core ping={}", session_notes_core::ping());
    println!("session_notes_core version={}", session_notes_core::core_version());

    let (session, reading) = match replay_demo_session() {
        Ok(replayed) => replayed,
        Err(err) => {
            eprintln!("demo session failed: {err}");
            std::process::exit(1);
        }
    };

    println!(
        "clock remaining={} progress={:.1}%",
        reading.remaining_label(),
        reading.progress_percent
    );

    println!("timeline:");
    for section in session.timeline(&session.elapsed_timeline_options()) {
        println!("  [{}]", section.label);
        for entry in section.entries {
            println!(
                "    {:?} {} ({})",
                entry.classification.display_style,
                first_line(&entry.note.content),
                entry.note.note_type.name
            );
        }
    }

    println!("mini:");
    for entry in session.mini_timeline() {
        println!("  {} {}", entry.color(), first_line(&entry.note.content));
    }

    let stats = session.stats();
    println!("stats total={} span_ms={}", stats.total, stats.span_ms());
    for (type_name, count) in &stats.by_type {
        println!("  {type_name}={count}");
    }
}

/// Scripted prep handoff, manual note, emotion wheel and breathing run.
///
/// Returns the finished session and the last countdown reading.
fn replay_demo_session() -> Result<(LiveSession, ClockReading), String> {
    let mut channel = MemoryPrepChannel::new();
    let prep = PrepPayload {
        session_goals: vec!["Review sleep diary".to_string()],
        session_duration: 30,
        session_notes: "Follow up on last week's homework".to_string(),
        planned_exercises: vec![ExerciseKind::Breathing.id().to_string()],
    };
    finalize_prep(&mut channel, &prep, DEMO_START_MS)
        .map_err(|err| format!("prep handoff failed: {err}"))?;

    let time = ManualTimeSource::new(DEMO_START_MS);
    let scheduler = Scheduler::new(DEMO_START_MS);
    let mut session =
        LiveSession::start_from_channel(&mut channel, time.clone(), SessionConfig::default());
    let countdown = session.mount_countdown(&scheduler);

    advance(&time, &scheduler, 3 * MINUTE_MS);
    session
        .add_note("Client arrived calm", "Observation")
        .map_err(|err| format!("manual note rejected: {err}"))?;

    advance(&time, &scheduler, 4 * MINUTE_MS);
    let selection = EmotionSelection::pick("Fear", Some("Worry"))
        .map_err(|err| format!("emotion pick rejected: {err}"))?;
    session.start_exercise(ExerciseKind::EmotionWheel);
    session.record_exercise_outcome(&ExerciseOutcome::Emotion(selection));

    advance(&time, &scheduler, MINUTE_MS);
    let overlay = session.open_breathing(&scheduler);
    overlay.toggle();
    while overlay.result().is_none() {
        advance(&time, &scheduler, 1_000);
    }
    if overlay.commit(&mut session).is_none() {
        return Err("breathing overlay closed without a result".to_string());
    }

    Ok((session, countdown.reading()))
}

/// Moves the demo clock and fires every timer now due.
fn advance(time: &ManualTimeSource, scheduler: &Scheduler, delta_ms: i64) {
    time.advance(delta_ms);
    scheduler.advance_to(time.now_ms());
}

fn first_line(content: &str) -> &str {
    content.lines().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{first_line, replay_demo_session};
    use session_notes_core::NoteCategory;

    #[test]
    fn demo_session_records_every_scripted_step() {
        let (session, reading) = replay_demo_session().expect("demo replays");

        // planning, manual note, two emotion wheel notes, two breathing notes
        assert_eq!(session.store().len(), 6);
        assert_eq!(session.stats().count(NoteCategory::Planning), 1);
        assert_eq!(session.stats().count(NoteCategory::Exercise), 4);
        assert!(session
            .store()
            .iter()
            .any(|note| note.content == "Breathing exercise completed: 3 cycles"));
        assert!(!reading.is_expired());
        assert!(reading.remaining_seconds < 30 * 60);
    }

    #[test]
    fn first_line_handles_empty_content() {
        assert_eq!(first_line(""), "");
        assert_eq!(first_line("Session goals:\n- G1"), "Session goals:");
    }
}
