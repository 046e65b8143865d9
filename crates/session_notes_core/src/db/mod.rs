//! SQLite bootstrap for the expiring prep handoff store.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections with migrations applied.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Callers never touch a connection before migrations succeed.
//! - A failed migration names the version it stopped at.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// The connection could not be established.
    Open(rusqlite::Error),
    /// Applying migration `version` failed; the transaction was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Any other statement failure.
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Stable code used in `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Open(_) => "db_open_failed",
            Self::Migration { .. } => "db_migration_failed",
            Self::UnsupportedSchemaVersion { .. } => "db_schema_too_new",
            Self::Sqlite(_) => "db_statement_failed",
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "cannot open handoff store: {err}"),
            Self::Migration { version, source } => {
                write!(f, "handoff migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "handoff schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Sqlite(err) => write!(f, "handoff store query failed: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Sqlite(err) => Some(err),
            Self::Migration { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;

    #[test]
    fn migration_error_names_version_and_keeps_source() {
        let err = DbError::Migration {
            version: 3,
            source: rusqlite::Error::InvalidQuery,
        };
        assert_eq!(err.code(), "db_migration_failed");
        assert!(err.to_string().starts_with("handoff migration 3 failed"));
        assert!(err.source().is_some());
    }

    #[test]
    fn schema_too_new_has_no_source() {
        let err = DbError::UnsupportedSchemaVersion {
            db_version: 9,
            latest_supported: 1,
        };
        assert_eq!(err.code(), "db_schema_too_new");
        assert!(err.source().is_none());
    }
}
