//! View-owned timers: the session countdown and the breathing overlay.
//!
//! # Invariants
//! - Each mounted view owns its `TaskHandle`; dropping the view cancels the timer.
//! - Closing an overlay without `commit` leaves the note store untouched.

use crate::clock::scheduler::{Scheduler, TaskControl, TaskHandle};
use crate::clock::session_clock::{ClockReading, SessionClock};
use crate::exercise::breathing::{
    BreathingExercise, BreathingPattern, BreathingPhase, BreathingResult, BreathingState,
};
use crate::exercise::ExerciseOutcome;
use crate::model::note::Note;
use crate::session::LiveSession;
use log::{debug, info};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Countdown display that refreshes itself every tick until expiry.
pub struct SessionCountdown {
    reading: Rc<Cell<ClockReading>>,
    task: TaskHandle,
}

impl SessionCountdown {
    pub fn mount(scheduler: &Scheduler, clock: SessionClock, interval_ms: i64) -> Self {
        let reading = Rc::new(Cell::new(clock.tick(scheduler.now_ms())));
        let sink = Rc::clone(&reading);
        let task = scheduler.every(interval_ms, move |now| {
            let current = clock.tick(now);
            sink.set(current);
            if current.is_expired() {
                info!(
                    "event=session_expired module=session status=ok elapsed_s={}",
                    current.elapsed_seconds
                );
                TaskControl::Stop
            } else {
                TaskControl::Continue
            }
        });

        Self { reading, task }
    }

    /// Latest reading published by the timer.
    pub fn reading(&self) -> ClockReading {
        self.reading.get()
    }

    /// Whether the countdown is still scheduled.
    pub fn is_ticking(&self) -> bool {
        self.task.is_active()
    }
}

/// Breathing exercise overlay with its own one-second timer.
pub struct BreathingOverlay {
    exercise: Rc<RefCell<BreathingExercise>>,
    task: TaskHandle,
}

impl BreathingOverlay {
    pub fn mount(scheduler: &Scheduler, pattern: BreathingPattern, interval_ms: i64) -> Self {
        let exercise = Rc::new(RefCell::new(BreathingExercise::new(pattern)));
        let driven = Rc::clone(&exercise);
        let task = scheduler.every(interval_ms, move |_| {
            if let Some(event) = driven.borrow_mut().tick() {
                debug!("event=breathing_tick module=exercise status=ok transition={event:?}");
            }
            TaskControl::Continue
        });

        Self { exercise, task }
    }

    /// Start, pause or resume.
    pub fn toggle(&self) -> BreathingState {
        self.exercise.borrow_mut().toggle()
    }

    pub fn reset(&self) {
        self.exercise.borrow_mut().reset();
    }

    pub fn state(&self) -> BreathingState {
        self.exercise.borrow().state()
    }

    pub fn phase(&self) -> BreathingPhase {
        self.exercise.borrow().phase()
    }

    pub fn seconds_left(&self) -> u32 {
        self.exercise.borrow().seconds_left()
    }

    pub fn result(&self) -> Option<BreathingResult> {
        self.exercise.borrow().result()
    }

    pub fn is_ticking(&self) -> bool {
        self.task.is_active()
    }

    /// Closes the overlay, writing the result note if a run finished.
    pub fn commit(self, session: &mut LiveSession) -> Option<&Note> {
        let result = self.result()?;
        drop(self);
        Some(session.record_exercise_outcome(&ExerciseOutcome::Breathing(result)))
    }

    /// Closes the overlay and discards its local state.
    pub fn close(self) {
        debug!("event=breathing_close module=exercise status=ok committed=false");
    }
}
