//! Guided reflection prompts.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub const REFLECTION_PROMPTS: &[&str] = &[
    "What stood out to you today?",
    "What would you like to try before next session?",
    "How are you feeling right now?",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectionError {
    /// Every answer was blank.
    NothingAnswered,
    /// More answers than prompts.
    TooManyAnswers { prompts: usize, answers: usize },
}

impl Display for ReflectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingAnswered => write!(f, "reflection has no answered prompt"),
            Self::TooManyAnswers { prompts, answers } => {
                write!(f, "reflection has {answers} answers for {prompts} prompts")
            }
        }
    }
}

impl Error for ReflectionError {}

/// Answered prompts, in prompt order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionAnswers {
    answered: Vec<(&'static str, String)>,
}

impl ReflectionAnswers {
    /// Pairs answers with `REFLECTION_PROMPTS` by position; blank answers are skipped.
    pub fn submit<S: AsRef<str>>(answers: &[S]) -> Result<Self, ReflectionError> {
        if answers.len() > REFLECTION_PROMPTS.len() {
            return Err(ReflectionError::TooManyAnswers {
                prompts: REFLECTION_PROMPTS.len(),
                answers: answers.len(),
            });
        }

        let answered: Vec<(&'static str, String)> = REFLECTION_PROMPTS
            .iter()
            .zip(answers)
            .map(|(prompt, answer)| (*prompt, answer.as_ref().trim().to_string()))
            .filter(|(_, answer)| !answer.is_empty())
            .collect();
        if answered.is_empty() {
            return Err(ReflectionError::NothingAnswered);
        }
        Ok(Self { answered })
    }

    pub fn answered(&self) -> &[(&'static str, String)] {
        &self.answered
    }

    /// Single-line `prompt answer | ...` rendering.
    pub fn summary(&self) -> String {
        self.answered
            .iter()
            .map(|(prompt, answer)| format!("{prompt} {answer}"))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::{ReflectionAnswers, ReflectionError};

    #[test]
    fn skips_blank_answers() {
        let answers = ReflectionAnswers::submit(&["  ", "call my sister"]).unwrap();
        assert_eq!(answers.answered().len(), 1);
        assert_eq!(
            answers.summary(),
            "What would you like to try before next session? call my sister"
        );
    }

    #[test]
    fn rejects_empty_and_oversized_submissions() {
        assert_eq!(
            ReflectionAnswers::submit(&["", " "]),
            Err(ReflectionError::NothingAnswered)
        );
        assert!(matches!(
            ReflectionAnswers::submit(&["a", "b", "c", "d"]),
            Err(ReflectionError::TooManyAnswers { .. })
        ));
    }
}
