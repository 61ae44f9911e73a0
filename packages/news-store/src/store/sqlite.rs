//! SQLite-backed news store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::NewsStore;
use crate::error::StoreError;
use crate::record::Record;

/// Busy timeout applied to every connection (ms).
const BUSY_TIMEOUT_MS: u64 = 5_000;

/// Schema created on open. Tags are a JSON array; timestamps are RFC 3339
/// text. `deleted_at` implements soft delete: stamped rows are invisible
/// to every read and update.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS news (
    id         TEXT PRIMARY KEY,
    author     TEXT NOT NULL,
    title      TEXT NOT NULL,
    summary    TEXT NOT NULL,
    content    TEXT NOT NULL,
    source     TEXT NOT NULL,
    tags       TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    deleted_at TEXT
);
";

const RECORD_COLUMNS: &str = "id, author, title, summary, content, source, tags, created_at, updated_at";

/// SQLite store: one connection behind a mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    /// Opens a private in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(busy_timeout_ms = BUSY_TIMEOUT_MS, "sqlite store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl NewsStore for SqliteStore {
    fn create(&self, mut record: Record) -> Result<Record, StoreError> {
        record.id = Uuid::new_v4();
        record.updated_at = Utc::now();
        let tags = encode_tags(&record.tags)?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO news (id, author, title, summary, content, source, tags, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                record.id.to_string(),
                record.author,
                record.title,
                record.summary,
                record.content,
                record.source,
                tags,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(record)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Record, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM news WHERE id = ?1 AND deleted_at IS NULL"
        ))?;
        let raw = stmt
            .query_row(params![id.to_string()], read_row)
            .optional()?;
        match raw {
            Some(raw) => decode_row(raw),
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn find_all(&self) -> Result<Vec<Record>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM news WHERE deleted_at IS NULL ORDER BY created_at"
        ))?;
        let rows = stmt.query_map([], read_row)?;

        let mut records = Vec::new();
        for raw in rows {
            records.push(decode_row(raw?)?);
        }
        Ok(records)
    }

    fn update_by_id(&self, id: Uuid, mut record: Record) -> Result<(), StoreError> {
        record.updated_at = Utc::now();
        let tags = encode_tags(&record.tags)?;

        let conn = self.lock()?;
        let touched = conn.execute(
            "UPDATE news
             SET author = ?2, title = ?3, summary = ?4, content = ?5,
                 source = ?6, tags = ?7, created_at = ?8, updated_at = ?9
             WHERE id = ?1 AND deleted_at IS NULL",
            params![
                id.to_string(),
                record.author,
                record.title,
                record.summary,
                record.content,
                record.source,
                tags,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;
        if touched == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let conn = self.lock()?;
        // Soft delete; zero touched rows means the id was already gone,
        // which still counts as success.
        conn.execute(
            "UPDATE news SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
            params![id.to_string(), Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

/// Row image as stored, before decoding into a [`Record`].
struct RawRow {
    id: String,
    author: String,
    title: String,
    summary: String,
    content: String,
    source: String,
    tags: String,
    created_at: String,
    updated_at: String,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: row.get(0)?,
        author: row.get(1)?,
        title: row.get(2)?,
        summary: row.get(3)?,
        content: row.get(4)?,
        source: row.get(5)?,
        tags: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn decode_row(raw: RawRow) -> Result<Record, StoreError> {
    let id = Uuid::parse_str(&raw.id).map_err(|e| StoreError::CorruptRow {
        id: Uuid::nil(),
        reason: format!("bad id '{}': {}", raw.id, e),
    })?;
    let corrupt = |reason: String| StoreError::CorruptRow { id, reason };

    let tags: Vec<String> =
        serde_json::from_str(&raw.tags).map_err(|e| corrupt(format!("bad tags: {}", e)))?;
    let created_at = parse_timestamp(&raw.created_at)
        .map_err(|e| corrupt(format!("bad created_at: {}", e)))?;
    let updated_at = parse_timestamp(&raw.updated_at)
        .map_err(|e| corrupt(format!("bad updated_at: {}", e)))?;

    Ok(Record {
        id,
        author: raw.author,
        title: raw.title,
        summary: raw.summary,
        content: raw.content,
        source: raw.source,
        tags,
        created_at,
        updated_at,
    })
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(text)?.with_timezone(&Utc))
}

fn encode_tags(tags: &[String]) -> Result<String, StoreError> {
    serde_json::to_string(tags).map_err(|e| StoreError::Backend(e.to_string()))
}
