//! SQLite-backed note database.

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::{Mutex, MutexGuard};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension};

use super::Stamper;
use crate::config::database_dir;
use crate::error::StoreResult;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_notes_updated_at ON notes(updated_at DESC, id DESC);
";

/// Single-connection note database.
///
/// All access is serialized through one connection lock. Writes take their
/// stamp from [`Stamper`] while holding that lock.
pub struct Database {
    conn: Mutex<Connection>,
    stamper: Mutex<Stamper>,
}

impl Database {
    /// Open (or create) the database at `database_url` and make sure the
    /// schema exists. `":memory:"` opens a private in-memory database.
    pub fn new(database_url: &str) -> StoreResult<Self> {
        if let Some(dir) = database_dir(database_url) {
            std::fs::create_dir_all(dir)?;
        }

        let conn = Connection::open(database_url)?;
        conn.execute_batch(SCHEMA)?;

        let newest: Option<String> = conn
            .query_row("SELECT MAX(updated_at) FROM notes", [], |row| row.get(0))
            .optional()?
            .flatten();
        let last_stamp = newest
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        log::debug!("[DB] Opened {} (newest stamp: {:?})", database_url, last_stamp);

        Ok(Self {
            conn: Mutex::new(conn),
            stamper: Mutex::new(Stamper::new(last_stamp)),
        })
    }

    /// Lock the connection for anything that does not need a stamp.
    pub(super) fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }

    /// Lock the connection for a write and draw the write's stamp.
    pub(super) fn write_conn(&self) -> (MutexGuard<'_, Connection>, DateTime<Utc>) {
        let conn = self.conn.lock();
        let stamp = self.stamper.lock().next(Utc::now());
        (conn, stamp)
    }

    /// Cheap liveness probe for the health endpoint.
    pub fn ping(&self) -> StoreResult<()> {
        self.lock_conn()
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}

/// Fixed-width RFC 3339 (microseconds, `Z` suffix) so string order is time order.
pub(super) fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(super) fn parse_timestamp(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_new_creates_parent_dir_and_schema() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("minimd.db");

        let db = Database::new(db_path.to_str().unwrap()).expect("Failed to open database");
        assert!(db_path.exists());

        let tables: Vec<String> = db
            .lock_conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        assert!(tables.contains(&"notes".to_string()));
        db.ping().unwrap();
    }

    #[test]
    fn test_reopen_resumes_after_newest_stamp() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("minimd.db");
        let future = Utc.with_ymd_and_hms(2999, 1, 1, 0, 0, 0).unwrap();

        {
            let db = Database::new(db_path.to_str().unwrap()).unwrap();
            db.lock_conn()
                .execute(
                    "INSERT INTO notes (title, content, created_at, updated_at) VALUES ('a', '', ?1, ?1)",
                    [format_timestamp(&future)],
                )
                .unwrap();
        }

        let db = Database::new(db_path.to_str().unwrap()).unwrap();
        let (_conn, stamp) = db.write_conn();
        assert!(stamp > future);
    }

    #[test]
    fn test_in_memory_database() {
        let db = Database::new(":memory:").expect("Failed to open in-memory database");
        db.ping().unwrap();
        let (_conn, stamp) = db.write_conn();
        assert!(stamp <= Utc::now());
    }

    #[test]
    fn test_timestamp_format_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(format_timestamp(&whole), "2024-05-01T10:00:00.000000Z");
    }
}
