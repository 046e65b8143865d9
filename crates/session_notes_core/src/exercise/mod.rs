//! Guided in-session exercises.
//!
//! # Responsibility
//! - Catalog the exercises a session can plan and run.
//! - Turn finished exercises into note content the timeline recognizes.
//!
//! # Invariants
//! - Exercise ids are stable strings shared with the prep payload.
//! - Outcome content always contains one of the classifier's result phrases.

pub mod breathing;
pub mod emotion_wheel;
pub mod reflection;

use breathing::BreathingResult;
use emotion_wheel::EmotionSelection;
use reflection::ReflectionAnswers;

/// Exercises offered during a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseKind {
    EmotionWheel,
    Breathing,
    Reflection,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 3] = [Self::EmotionWheel, Self::Breathing, Self::Reflection];

    pub fn id(self) -> &'static str {
        match self {
            Self::EmotionWheel => "emotion-wheel",
            Self::Breathing => "breathing",
            Self::Reflection => "reflection",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::EmotionWheel => "Emotion wheel",
            Self::Breathing => "Breathing",
            Self::Reflection => "Reflection",
        }
    }

    /// Parses a planned exercise id; unknown ids yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == id.trim())
    }

    /// Placeholder content written when the exercise opens.
    pub fn start_content(self) -> String {
        format!("Exercise started: {}", self.title())
    }
}

/// Committed result of one exercise run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseOutcome {
    Emotion(EmotionSelection),
    Breathing(BreathingResult),
    Reflection(ReflectionAnswers),
}

impl ExerciseOutcome {
    pub fn kind(&self) -> ExerciseKind {
        match self {
            Self::Emotion(_) => ExerciseKind::EmotionWheel,
            Self::Breathing(_) => ExerciseKind::Breathing,
            Self::Reflection(_) => ExerciseKind::Reflection,
        }
    }

    /// Note content recorded for the outcome.
    pub fn note_content(&self) -> String {
        match self {
            Self::Emotion(selection) => format!("Emotion identified: {}", selection.label()),
            Self::Breathing(result) => {
                format!("Breathing exercise completed: {} cycles", result.cycles)
            }
            Self::Reflection(answers) => {
                format!("Reflection submitted: {}", answers.summary())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExerciseKind;

    #[test]
    fn ids_round_trip_and_unknown_ids_are_rejected() {
        for kind in ExerciseKind::ALL {
            assert_eq!(ExerciseKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(ExerciseKind::from_id(" breathing "), Some(ExerciseKind::Breathing));
        assert_eq!(ExerciseKind::from_id("yoga"), None);
    }

    #[test]
    fn start_content_uses_title() {
        assert_eq!(
            ExerciseKind::EmotionWheel.start_content(),
            "Exercise started: Emotion wheel"
        );
    }
}
