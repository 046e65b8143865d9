//! One-shot transfer of prep data into the live session.
//!
//! # Responsibility
//! - Write the prep payload once to a transient key-value channel.
//! - Read it back once at session start, degrading to `None` on any fault.
//!
//! # Invariants
//! - A successful read removes the entry; a second read is absent.
//! - Absent, expired, malformed and unreadable payloads are not errors for
//!   the reader; they are logged and reported as `None`.
//! - Payload text is never logged.

mod memory;
mod sqlite;

pub use memory::MemoryPrepChannel;
pub use sqlite::SqlitePrepChannel;

use crate::db::DbError;
use crate::model::note::EpochMillis;
use crate::model::prep::PrepPayload;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Channel key under which the prep payload is stored.
pub const PREP_PAYLOAD_KEY: &str = "session_prep";

pub type HandoffResult<T> = Result<T, HandoffError>;

#[derive(Debug)]
pub enum HandoffError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for HandoffError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode prep payload: {err}"),
        }
    }
}

impl Error for HandoffError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for HandoffError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for HandoffError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Transient string store shared by the prep and session stages.
pub trait PrepChannel {
    /// Stores `value` under `key`, replacing any previous entry.
    fn put(&mut self, key: &str, value: String, now: EpochMillis) -> HandoffResult<()>;
    /// Removes and returns the live entry under `key`.
    fn take(&mut self, key: &str, now: EpochMillis) -> HandoffResult<Option<String>>;
}

/// Serializes the prep payload into the channel.
pub fn finalize_prep<C>(channel: &mut C, payload: &PrepPayload, now: EpochMillis) -> HandoffResult<()>
where
    C: PrepChannel + ?Sized,
{
    let encoded = serde_json::to_string(payload).map_err(HandoffError::Encode)?;
    channel.put(PREP_PAYLOAD_KEY, encoded, now)?;
    info!(
        "event=prep_finalize module=handoff status=ok goals={} planned_exercises={} duration_min={}",
        payload.session_goals.len(),
        payload.planned_exercises.len(),
        payload.session_duration
    );
    Ok(())
}

/// Reads the prep payload once.
///
/// Returns `None` when nothing was handed off or the entry cannot be used.
pub fn load_prep_data<C>(channel: &mut C, now: EpochMillis) -> Option<PrepPayload>
where
    C: PrepChannel + ?Sized,
{
    let raw = match channel.take(PREP_PAYLOAD_KEY, now) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=prep_load module=handoff status=skipped reason=absent");
            return None;
        }
        Err(err) => {
            warn!("event=prep_load module=handoff status=error error_code=channel_read_failed error={err}");
            return None;
        }
    };

    match serde_json::from_str::<PrepPayload>(&raw) {
        Ok(payload) => {
            info!(
                "event=prep_load module=handoff status=ok goals={} planned_exercises={}",
                payload.session_goals.len(),
                payload.planned_exercises.len()
            );
            Some(payload)
        }
        Err(err) => {
            // serde_json errors carry only position and category, not payload text.
            warn!(
                "event=prep_load module=handoff status=error error_code=malformed_payload line={} column={}",
                err.line(),
                err.column()
            );
            None
        }
    }
}
