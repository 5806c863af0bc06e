//! SQLite key/value document adapter.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections for document storage.
//! - Keep one row per document key in the `documents` table.
//!
//! # Invariants
//! - Returned ports have the `documents` table in place.
//! - Only the configured key is ever read or written.

use super::port::{DocumentPort, PersistResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Document key used when the caller does not provide one.
pub const DEFAULT_DOCUMENT_KEY: &str = "cockpit.tracking";

const DOCUMENTS_DDL: &str = "CREATE TABLE IF NOT EXISTS documents (
    key TEXT PRIMARY KEY NOT NULL,
    body TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

pub struct SqlitePort {
    conn: Connection,
    key: String,
}

impl SqlitePort {
    /// Opens a SQLite file and prepares the `documents` table.
    ///
    /// # Side effects
    /// - Emits `store_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>, key: impl Into<String>) -> PersistResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start mode=file");

        let conn = Connection::open(path).map_err(|err| {
            error!(
                "event=store_open module=store status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            err
        })?;
        Self::bootstrap(conn, key.into(), "file", started_at)
    }

    /// Opens an in-memory SQLite database; contents vanish with the port.
    pub fn open_in_memory() -> PersistResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start mode=memory");

        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn, DEFAULT_DOCUMENT_KEY.to_string(), "memory", started_at)
    }

    fn bootstrap(
        conn: Connection,
        key: String,
        mode: &str,
        started_at: Instant,
    ) -> PersistResult<Self> {
        let prepared = conn
            .busy_timeout(Duration::from_secs(5))
            .and_then(|()| conn.execute_batch(DOCUMENTS_DDL));

        match prepared {
            Ok(()) => {
                info!(
                    "event=store_open module=store status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn, key })
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl DocumentPort for SqlitePort {
    fn kind(&self) -> &'static str {
        "sqlite"
    }

    fn read(&self) -> PersistResult<Option<String>> {
        let body = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(body)
    }

    fn write(&self, document: &str) -> PersistResult<()> {
        self.conn.execute(
            "INSERT INTO documents (key, body) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                body = excluded.body,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.key.as_str(), document],
        )?;
        Ok(())
    }
}
