//! Emotion wheel: primary emotions with their secondary refinements.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// One segment of the inner wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryEmotion {
    pub name: &'static str,
    pub color: &'static str,
    pub secondary: &'static [&'static str],
}

pub const EMOTION_WHEEL: &[PrimaryEmotion] = &[
    PrimaryEmotion {
        name: "Joy",
        color: "#facc15",
        secondary: &["Optimism", "Pride", "Relief", "Contentment"],
    },
    PrimaryEmotion {
        name: "Sadness",
        color: "#60a5fa",
        secondary: &["Loneliness", "Grief", "Disappointment", "Hopelessness"],
    },
    PrimaryEmotion {
        name: "Anger",
        color: "#f87171",
        secondary: &["Frustration", "Irritation", "Resentment", "Jealousy"],
    },
    PrimaryEmotion {
        name: "Fear",
        color: "#a78bfa",
        secondary: &["Anxiety", "Insecurity", "Panic", "Worry"],
    },
    PrimaryEmotion {
        name: "Surprise",
        color: "#34d399",
        secondary: &["Confusion", "Amazement", "Shock"],
    },
    PrimaryEmotion {
        name: "Disgust",
        color: "#a3e635",
        secondary: &["Aversion", "Shame", "Contempt"],
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmotionWheelError {
    UnknownPrimary(String),
    SecondaryMismatch { primary: String, secondary: String },
}

impl Display for EmotionWheelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPrimary(name) => write!(f, "unknown primary emotion: {name}"),
            Self::SecondaryMismatch { primary, secondary } => {
                write!(f, "`{secondary}` is not a refinement of `{primary}`")
            }
        }
    }
}

impl Error for EmotionWheelError {}

/// Validated pick on the wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionSelection {
    pub primary: &'static str,
    pub secondary: Option<&'static str>,
}

impl EmotionSelection {
    /// Validates a pick; names match case-insensitively.
    pub fn pick(primary: &str, secondary: Option<&str>) -> Result<Self, EmotionWheelError> {
        let wheel_entry = EMOTION_WHEEL
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(primary.trim()))
            .ok_or_else(|| EmotionWheelError::UnknownPrimary(primary.trim().to_string()))?;

        let secondary = match secondary.map(str::trim).filter(|value| !value.is_empty()) {
            None => None,
            Some(value) => Some(
                wheel_entry
                    .secondary
                    .iter()
                    .copied()
                    .find(|candidate| candidate.eq_ignore_ascii_case(value))
                    .ok_or_else(|| EmotionWheelError::SecondaryMismatch {
                        primary: wheel_entry.name.to_string(),
                        secondary: value.to_string(),
                    })?,
            ),
        };

        Ok(Self {
            primary: wheel_entry.name,
            secondary,
        })
    }

    pub fn label(&self) -> String {
        match self.secondary {
            Some(secondary) => format!("{} > {}", self.primary, secondary),
            None => self.primary.to_string(),
        }
    }
}
