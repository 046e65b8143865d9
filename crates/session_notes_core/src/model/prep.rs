//! Session preparation payload handed from the prep stage to the live session.

use serde::{Deserialize, Serialize};

/// Session length used when no prep data specifies one.
pub const DEFAULT_SESSION_DURATION_MINUTES: u32 = 50;

fn default_duration() -> u32 {
    DEFAULT_SESSION_DURATION_MINUTES
}

/// Planning data created once by the prep stage and read once at session start.
///
/// Missing fields deserialize to their defaults so partial payloads still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepPayload {
    #[serde(default)]
    pub session_goals: Vec<String>,
    /// Minutes.
    #[serde(default = "default_duration")]
    pub session_duration: u32,
    #[serde(default)]
    pub session_notes: String,
    #[serde(default)]
    pub planned_exercises: Vec<String>,
}

impl Default for PrepPayload {
    fn default() -> Self {
        Self {
            session_goals: Vec::new(),
            session_duration: DEFAULT_SESSION_DURATION_MINUTES,
            session_notes: String::new(),
            planned_exercises: Vec::new(),
        }
    }
}

impl PrepPayload {
    /// Defaults for every field with a caller-chosen duration.
    pub fn defaults_with_duration(duration_minutes: u32) -> Self {
        Self {
            session_duration: duration_minutes,
            ..Self::default()
        }
    }

    /// Drops blank goals and replaces a zero duration with `default_minutes`.
    pub fn normalized(mut self, default_minutes: u32) -> Self {
        self.session_goals = self
            .session_goals
            .into_iter()
            .map(|goal| goal.trim().to_string())
            .filter(|goal| !goal.is_empty())
            .collect();
        self.planned_exercises = self
            .planned_exercises
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        if self.session_duration == 0 {
            self.session_duration = default_minutes;
        }
        self
    }

    /// Whether the payload carries anything worth a planning note.
    pub fn has_planning_content(&self) -> bool {
        !self.session_goals.is_empty() || !self.session_notes.trim().is_empty()
    }

    /// Text of the synthetic planning note seeded at session start.
    pub fn planning_note_content(&self) -> String {
        let mut sections = Vec::new();
        if !self.session_goals.is_empty() {
            let goals = self
                .session_goals
                .iter()
                .map(|goal| format!("- {goal}"))
                .collect::<Vec<_>>()
                .join("\n");
            sections.push(format!("Session goals:\n{goals}"));
        }
        let notes = self.session_notes.trim();
        if !notes.is_empty() {
            sections.push(notes.to_string());
        }
        sections.join("\n\n")
    }
}
