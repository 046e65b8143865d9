//! Connection bootstrap for the handoff store.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite file and applies pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a private in-memory database and applies migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with<F>(mode: &str, connect: F) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            let err = DbError::Open(err);
            log_open_failure(mode, started_at, &err);
            return Err(err);
        }
    };

    if let Err(err) = bootstrap_connection(&mut conn) {
        log_open_failure(mode, started_at, &err);
        return Err(err);
    }

    info!(
        "event=db_open module=db status=ok mode={mode} duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn log_open_failure(mode: &str, started_at: Instant, err: &DbError) {
    error!(
        "event=db_open module=db status=error mode={mode} duration_ms={} error_code={} error={err}",
        started_at.elapsed().as_millis(),
        err.code()
    );
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}
