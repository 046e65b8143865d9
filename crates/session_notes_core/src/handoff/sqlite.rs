//! Cookie style channel: SQLite rows with an expiry timestamp.
//!
//! # Invariants
//! - Rows expire `ttl_ms` after they are written; expired rows read as absent.
//! - `take` deletes the row it returns.

use super::{HandoffResult, PrepChannel};
use crate::model::note::EpochMillis;
use log::debug;
use rusqlite::{params, Connection};

/// Expiring handoff channel over a migrated connection.
pub struct SqlitePrepChannel<'conn> {
    conn: &'conn Connection,
    ttl_ms: i64,
}

impl<'conn> SqlitePrepChannel<'conn> {
    /// `conn` must come from `db::open_db` or `db::open_db_in_memory`.
    pub fn new(conn: &'conn Connection, ttl_ms: i64) -> Self {
        Self { conn, ttl_ms }
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Deletes expired rows. Returns how many were removed.
    pub fn purge_expired(&self, now: EpochMillis) -> HandoffResult<usize> {
        let purged = self.conn.execute(
            "DELETE FROM handoff_entries
             WHERE expires_at IS NOT NULL AND expires_at <= ?1;",
            params![now],
        )?;
        if purged > 0 {
            debug!("event=handoff_purge module=handoff status=ok purged={purged}");
        }
        Ok(purged)
    }
}

impl PrepChannel for SqlitePrepChannel<'_> {
    fn put(&mut self, key: &str, value: String, now: EpochMillis) -> HandoffResult<()> {
        self.conn.execute(
            "INSERT INTO handoff_entries (key, payload, written_at, expires_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                written_at = excluded.written_at,
                expires_at = excluded.expires_at;",
            params![key, value, now, now.saturating_add(self.ttl_ms)],
        )?;
        Ok(())
    }

    fn take(&mut self, key: &str, now: EpochMillis) -> HandoffResult<Option<String>> {
        self.purge_expired(now)?;

        let mut stmt = self.conn.prepare(
            "DELETE FROM handoff_entries
             WHERE key = ?1
             RETURNING payload;",
        )?;
        let mut rows = stmt.query(params![key])?;
        let payload = match rows.next()? {
            Some(row) => Some(row.get::<_, String>(0)?),
            None => None,
        };
        Ok(payload)
    }
}
