//! Paced breathing exercise.
//!
//! # Responsibility
//! - Drive the Inhale → Hold → Exhale cycle one second at a time.
//! - Track Idle/Running/Paused independently of the session clock.
//!
//! # Invariants
//! - `tick` only advances while Running.
//! - Completing the configured cycles returns to Idle with a result.
//! - A zero-length hold phase is skipped.

use serde::{Deserialize, Serialize};

/// Phase lengths in seconds plus the number of cycles per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathingPattern {
    pub inhale_secs: u32,
    pub hold_secs: u32,
    pub exhale_secs: u32,
    pub cycles: u32,
}

impl Default for BreathingPattern {
    fn default() -> Self {
        Self {
            inhale_secs: 4,
            hold_secs: 4,
            exhale_secs: 6,
            cycles: 3,
        }
    }
}

impl BreathingPattern {
    fn duration(&self, phase: BreathingPhase) -> u32 {
        match phase {
            BreathingPhase::Inhale => self.inhale_secs,
            BreathingPhase::Hold => self.hold_secs,
            BreathingPhase::Exhale => self.exhale_secs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathingPhase {
    Inhale,
    Hold,
    Exhale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathingState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathingResult {
    pub cycles: u32,
}

/// Transition reported by `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathingEvent {
    PhaseChanged(BreathingPhase),
    Completed(BreathingResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreathingExercise {
    pattern: BreathingPattern,
    state: BreathingState,
    phase: BreathingPhase,
    seconds_left: u32,
    completed_cycles: u32,
    result: Option<BreathingResult>,
}

impl BreathingExercise {
    pub fn new(pattern: BreathingPattern) -> Self {
        Self {
            pattern,
            state: BreathingState::Idle,
            phase: BreathingPhase::Inhale,
            seconds_left: pattern.inhale_secs,
            completed_cycles: 0,
            result: None,
        }
    }

    pub fn state(&self) -> BreathingState {
        self.state
    }

    pub fn phase(&self) -> BreathingPhase {
        self.phase
    }

    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    /// Result of the last finished run, until the next start or reset.
    pub fn result(&self) -> Option<BreathingResult> {
        self.result
    }

    /// Starts from Idle (fresh run), pauses when Running, resumes when Paused.
    pub fn toggle(&mut self) -> BreathingState {
        self.state = match self.state {
            BreathingState::Idle => {
                self.restart_counters();
                BreathingState::Running
            }
            BreathingState::Running => BreathingState::Paused,
            BreathingState::Paused => BreathingState::Running,
        };
        self.state
    }

    /// Stops and clears progress and result.
    pub fn reset(&mut self) {
        self.restart_counters();
        self.state = BreathingState::Idle;
    }

    /// Advances one second.
    pub fn tick(&mut self) -> Option<BreathingEvent> {
        if self.state != BreathingState::Running {
            return None;
        }

        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left > 0 {
            return None;
        }

        if self.phase == BreathingPhase::Exhale {
            self.completed_cycles += 1;
            if self.completed_cycles >= self.pattern.cycles {
                let result = BreathingResult {
                    cycles: self.completed_cycles,
                };
                self.result = Some(result);
                self.state = BreathingState::Idle;
                self.phase = BreathingPhase::Inhale;
                self.seconds_left = self.pattern.inhale_secs;
                return Some(BreathingEvent::Completed(result));
            }
        }

        let next = self.next_phase();
        self.phase = next;
        self.seconds_left = self.pattern.duration(next);
        Some(BreathingEvent::PhaseChanged(next))
    }

    fn next_phase(&self) -> BreathingPhase {
        match self.phase {
            BreathingPhase::Inhale if self.pattern.hold_secs == 0 => BreathingPhase::Exhale,
            BreathingPhase::Inhale => BreathingPhase::Hold,
            BreathingPhase::Hold => BreathingPhase::Exhale,
            BreathingPhase::Exhale => BreathingPhase::Inhale,
        }
    }

    fn restart_counters(&mut self) {
        self.phase = BreathingPhase::Inhale;
        self.seconds_left = self.pattern.inhale_secs;
        self.completed_cycles = 0;
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BreathingEvent, BreathingExercise, BreathingPattern, BreathingPhase, BreathingResult,
        BreathingState,
    };

    fn short_pattern() -> BreathingPattern {
        BreathingPattern {
            inhale_secs: 2,
            hold_secs: 1,
            exhale_secs: 2,
            cycles: 2,
        }
    }

    #[test]
    fn idle_and_paused_do_not_advance() {
        let mut exercise = BreathingExercise::new(short_pattern());
        assert_eq!(exercise.tick(), None);
        exercise.toggle();
        exercise.toggle();
        assert_eq!(exercise.state(), BreathingState::Paused);
        assert_eq!(exercise.tick(), None);
        assert_eq!(exercise.seconds_left(), 2);
    }

    #[test]
    fn walks_phases_and_completes() {
        let mut exercise = BreathingExercise::new(short_pattern());
        exercise.toggle();

        let events: Vec<_> = (0..10).filter_map(|_| exercise.tick()).collect();
        assert_eq!(
            events,
            vec![
                BreathingEvent::PhaseChanged(BreathingPhase::Hold),
                BreathingEvent::PhaseChanged(BreathingPhase::Exhale),
                BreathingEvent::PhaseChanged(BreathingPhase::Inhale),
                BreathingEvent::PhaseChanged(BreathingPhase::Hold),
                BreathingEvent::PhaseChanged(BreathingPhase::Exhale),
                BreathingEvent::Completed(BreathingResult { cycles: 2 }),
            ]
        );
        assert_eq!(exercise.state(), BreathingState::Idle);
        assert_eq!(exercise.result(), Some(BreathingResult { cycles: 2 }));
    }

    #[test]
    fn zero_hold_is_skipped() {
        let mut exercise = BreathingExercise::new(BreathingPattern {
            hold_secs: 0,
            ..short_pattern()
        });
        exercise.toggle();
        exercise.tick();
        assert_eq!(
            exercise.tick(),
            Some(BreathingEvent::PhaseChanged(BreathingPhase::Exhale))
        );
    }

    #[test]
    fn restart_clears_previous_result() {
        let mut exercise = BreathingExercise::new(BreathingPattern {
            cycles: 1,
            ..short_pattern()
        });
        exercise.toggle();
        while exercise.state() == BreathingState::Running {
            exercise.tick();
        }
        assert!(exercise.result().is_some());
        exercise.toggle();
        assert_eq!(exercise.result(), None);
        assert_eq!(exercise.completed_cycles(), 0);
    }
}
