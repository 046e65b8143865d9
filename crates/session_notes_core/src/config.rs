//! Session engine configuration.
//!
//! # Responsibility
//! - Hold tunables for session defaults, handoff expiry, timers and views.
//! - Parse them from JSON with per-field defaults and validate them.
//!
//! # Invariants
//! - A config that passed `validate()` never yields zero-length timers,
//!   zero view limits or an invalid UTC offset.

use crate::exercise::breathing::BreathingPattern;
use crate::model::prep::DEFAULT_SESSION_DURATION_MINUTES;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const HOUR_MS: i64 = 60 * 60 * 1000;
const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Duration used when prep data is absent, malformed or zero.
    pub default_duration_minutes: u32,
    /// How far before session start the planning note is dated.
    pub planning_note_offset_ms: i64,
    /// Lifetime of an expiring handoff entry.
    pub handoff_ttl_ms: i64,
    pub tick_interval_ms: i64,
    pub mini_timeline_limit: usize,
    /// Minutes east of UTC for clock-time buckets.
    pub utc_offset_minutes: i32,
    pub breathing: BreathingPattern,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: DEFAULT_SESSION_DURATION_MINUTES,
            planning_note_offset_ms: HOUR_MS,
            handoff_ttl_ms: HOUR_MS,
            tick_interval_ms: 1000,
            mini_timeline_limit: 5,
            utc_offset_minutes: 0,
            breathing: BreathingPattern::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    /// Field must be strictly positive.
    NotPositive(&'static str),
    UtcOffsetOutOfRange(i32),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid session config: {err}"),
            Self::NotPositive(field) => write!(f, "`{field}` must be greater than zero"),
            Self::UtcOffsetOutOfRange(value) => write!(
                f,
                "`utc_offset_minutes` must be within ±{MAX_UTC_OFFSET_MINUTES}, got {value}"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl SessionConfig {
    /// Parses and validates a JSON document; missing fields take defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive(i64::from(self.default_duration_minutes), "default_duration_minutes")?;
        require_positive(self.planning_note_offset_ms, "planning_note_offset_ms")?;
        require_positive(self.handoff_ttl_ms, "handoff_ttl_ms")?;
        require_positive(self.tick_interval_ms, "tick_interval_ms")?;
        if self.mini_timeline_limit == 0 {
            return Err(ConfigError::NotPositive("mini_timeline_limit"));
        }
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::UtcOffsetOutOfRange(self.utc_offset_minutes));
        }
        require_positive(i64::from(self.breathing.inhale_secs), "breathing.inhale_secs")?;
        require_positive(i64::from(self.breathing.exhale_secs), "breathing.exhale_secs")?;
        require_positive(i64::from(self.breathing.cycles), "breathing.cycles")?;
        Ok(())
    }
}

fn require_positive(value: i64, field: &'static str) -> Result<(), ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NotPositive(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SessionConfig};

    #[test]
    fn defaults_are_valid() {
        let config = SessionConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.default_duration_minutes, 50);
        assert_eq!(config.planning_note_offset_ms, 3_600_000);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config =
            SessionConfig::from_json_str(r#"{"mini_timeline_limit":3,"breathing":{"cycles":5}}"#)
                .expect("partial config");
        assert_eq!(config.mini_timeline_limit, 3);
        assert_eq!(config.breathing.cycles, 5);
        assert_eq!(config.breathing.inhale_secs, 4);
        assert_eq!(config.handoff_ttl_ms, 3_600_000);
    }

    #[test]
    fn rejects_zero_tick_and_wild_offsets() {
        let err = SessionConfig::from_json_str(r#"{"tick_interval_ms":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive("tick_interval_ms")));

        let err = SessionConfig::from_json_str(r#"{"utc_offset_minutes":2000}"#).unwrap_err();
        assert!(matches!(err, ConfigError::UtcOffsetOutOfRange(2000)));

        assert!(matches!(
            SessionConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
