//! SQLite-backed answer store.
//!
//! Two tables, both append-only from the kernel's point of view:
//!
//! - `answers`: one row per answer version, `active` flipped on delete
//! - `events`: one row per accepted command
//!
//! Writes go through `BEGIN IMMEDIATE` transactions so a second process
//! (the CLI next to a running node) cannot interleave its check-then-act
//! sequence with ours.

use std::path::{Path, PathBuf};

use answer_kernel::store::{now_ms, AnswerReader, AnswerStore, StoreTx};
use answer_kernel::{AnswerFilter, AnswerRecord, EventEntry, EventType, KernelError, KernelResult};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

use crate::error::Result;

const SCHEMA: &str = r#"
    PRAGMA journal_mode=WAL;
    PRAGMA synchronous=NORMAL;

    CREATE TABLE IF NOT EXISTS answers (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      key TEXT NOT NULL,
      value TEXT NOT NULL,
      active INTEGER NOT NULL DEFAULT 1,
      created_at_ms INTEGER NOT NULL,
      updated_at_ms INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS answers_key_active ON answers(key, active);

    CREATE TABLE IF NOT EXISTS events (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      type TEXT NOT NULL,
      key TEXT NOT NULL,
      created_at_ms INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS events_key ON events(key);
"#;

/// Row counts across both tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub answers: i64,
    pub active_answers: i64,
    pub events: i64,
    pub keys: i64,
}

#[derive(Debug)]
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the database file, creating parent directories as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&path)?;
        let store = Self { path: Some(path), conn };
        store.migrate()?;
        tracing::debug!("answer store opened at {:?}", store.path);
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            path: None,
            conn: Connection::open_in_memory()?,
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn stats(&self) -> Result<StoreStats> {
        let stats = self.conn.query_row(
            r#"
            SELECT
              (SELECT COUNT(*) FROM answers),
              (SELECT COUNT(*) FROM answers WHERE active = 1),
              (SELECT COUNT(*) FROM events),
              (SELECT COUNT(DISTINCT key) FROM answers)
            "#,
            [],
            |row| {
                Ok(StoreStats {
                    answers: row.get(0)?,
                    active_answers: row.get(1)?,
                    events: row.get(2)?,
                    keys: row.get(3)?,
                })
            },
        )?;
        Ok(stats)
    }

    /// Keys that currently hold more than one active row, with their active count.
    pub fn keys_with_multiple_active(&self) -> Result<Vec<(String, i64)>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT key, COUNT(*) FROM answers
            WHERE active = 1
            GROUP BY key
            HAVING COUNT(*) > 1
            ORDER BY key
            "#,
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

impl AnswerReader for SqliteStore {
    fn find_answer(&self, filter: &AnswerFilter<'_>) -> KernelResult<Option<AnswerRecord>> {
        Ok(find_answer(&self.conn, filter)?)
    }

    fn answers_for(&self, key: &str) -> KernelResult<Vec<AnswerRecord>> {
        Ok(answers_for(&self.conn, key)?)
    }

    fn events_for(&self, key: &str) -> KernelResult<Vec<EventEntry>> {
        Ok(events_for(&self.conn, key)?)
    }
}

impl AnswerStore for SqliteStore {
    type Tx<'a> = SqliteTx<'a>;

    fn begin(&mut self) -> KernelResult<SqliteTx<'_>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(crate::PersistenceError::from)?;
        Ok(SqliteTx { tx })
    }
}

/// Open write transaction. Rolls back on drop unless committed.
pub struct SqliteTx<'a> {
    tx: Transaction<'a>,
}

impl AnswerReader for SqliteTx<'_> {
    fn find_answer(&self, filter: &AnswerFilter<'_>) -> KernelResult<Option<AnswerRecord>> {
        Ok(find_answer(&self.tx, filter)?)
    }

    fn answers_for(&self, key: &str) -> KernelResult<Vec<AnswerRecord>> {
        Ok(answers_for(&self.tx, key)?)
    }

    fn events_for(&self, key: &str) -> KernelResult<Vec<EventEntry>> {
        Ok(events_for(&self.tx, key)?)
    }
}

impl StoreTx for SqliteTx<'_> {
    fn insert_answer(&mut self, key: &str, value: &str) -> KernelResult<AnswerRecord> {
        Ok(insert_answer_tx(&self.tx, key, value, now_ms())?)
    }

    fn set_active(&mut self, id: i64, active: bool) -> KernelResult<()> {
        let changed = self
            .tx
            .execute(
                "UPDATE answers SET active = ?2, updated_at_ms = ?3 WHERE id = ?1",
                params![id, active, now_ms()],
            )
            .map_err(crate::PersistenceError::from)?;
        if changed == 0 {
            return Err(KernelError::NotFound);
        }
        Ok(())
    }

    fn append_event(&mut self, kind: EventType, key: &str) -> KernelResult<EventEntry> {
        Ok(insert_event_tx(&self.tx, kind, key, now_ms())?)
    }

    fn commit(self) -> KernelResult<()> {
        self.tx.commit().map_err(crate::PersistenceError::from)?;
        Ok(())
    }
}

fn find_answer(conn: &Connection, filter: &AnswerFilter<'_>) -> Result<Option<AnswerRecord>> {
    Ok(conn
        .query_row(
            r#"
            SELECT id, key, value, active, created_at_ms, updated_at_ms
            FROM answers
            WHERE key = ?1
              AND (?2 IS NULL OR value = ?2)
              AND (?3 IS NULL OR active = ?3)
            ORDER BY id DESC
            LIMIT 1
            "#,
            params![filter.key, filter.value, filter.active],
            answer_from_row,
        )
        .optional()?)
}

fn answers_for(conn: &Connection, key: &str) -> Result<Vec<AnswerRecord>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, key, value, active, created_at_ms, updated_at_ms
        FROM answers
        WHERE key = ?1
        ORDER BY id ASC
        "#,
    )?;
    let rows = stmt
        .query_map(params![key], answer_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn events_for(conn: &Connection, key: &str) -> Result<Vec<EventEntry>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, type, key, created_at_ms
        FROM events
        WHERE key = ?1
        ORDER BY id ASC
        "#,
    )?;
    let rows = stmt
        .query_map(params![key], event_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn insert_answer_tx(tx: &Transaction<'_>, key: &str, value: &str, now_ms: i64) -> Result<AnswerRecord> {
    tx.execute(
        r#"
        INSERT INTO answers(key, value, active, created_at_ms, updated_at_ms)
        VALUES (?1, ?2, 1, ?3, ?3)
        "#,
        params![key, value, now_ms],
    )?;
    Ok(AnswerRecord {
        id: tx.last_insert_rowid(),
        key: key.to_string(),
        value: value.to_string(),
        active: true,
        created_at_ms: now_ms,
        updated_at_ms: now_ms,
    })
}

fn insert_event_tx(tx: &Transaction<'_>, kind: EventType, key: &str, now_ms: i64) -> Result<EventEntry> {
    tx.execute(
        "INSERT INTO events(type, key, created_at_ms) VALUES (?1, ?2, ?3)",
        params![kind.as_str(), key, now_ms],
    )?;
    Ok(EventEntry {
        id: tx.last_insert_rowid(),
        kind,
        key: key.to_string(),
        created_at_ms: now_ms,
    })
}

fn answer_from_row(row: &Row<'_>) -> rusqlite::Result<AnswerRecord> {
    Ok(AnswerRecord {
        id: row.get(0)?,
        key: row.get(1)?,
        value: row.get(2)?,
        active: row.get(3)?,
        created_at_ms: row.get(4)?,
        updated_at_ms: row.get(5)?,
    })
}

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<EventEntry> {
    let raw: String = row.get(1)?;
    let kind = raw
        .parse::<EventType>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    Ok(EventEntry {
        id: row.get(0)?,
        kind,
        key: row.get(2)?,
        created_at_ms: row.get(3)?,
    })
}
