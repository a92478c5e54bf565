//! SQLite implementation of the `NoteStore` trait
//!
//! Blocking rusqlite work runs on the tokio blocking pool; the async
//! surface never holds the connection across an await point.
//!
//! Live queries: the store keeps a registry of active subscriptions. After
//! every mutation that changed a row, it prunes cancelled subscriptions and
//! recomputes every remaining one against the new state, pushing exactly
//! one fully-materialized list per mutation. Recomputing all of them is
//! deliberate; fine-grained invalidation is not worth it at this scale.

use crate::connection::SqlitePool;
use crate::error::{SqliteError, SqliteResult};
use async_trait::async_trait;
use chrono::DateTime;
use keepit_core::subscription::{self, NotePublisher, NoteSubscription};
use keepit_core::{Note, NoteId, NoteStore, SortOrder, StorageError, StorageResult};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Params};
use std::sync::Arc;
use tracing::debug;

/// SQLite-backed note store with live query support.
#[derive(Clone)]
pub struct SqliteNoteStore {
    pool: SqlitePool,
    watchers: Arc<Mutex<Vec<Watcher>>>,
}

struct Watcher {
    order: SortOrder,
    publisher: NotePublisher,
}

impl SqliteNoteStore {
    /// Create a store over the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            watchers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of live subscriptions still registered.
    pub fn active_subscriptions(&self) -> usize {
        self.watchers.lock().len()
    }
}

#[async_trait]
impl NoteStore for SqliteNoteStore {
    async fn insert(&self, note: &Note) -> StorageResult<NoteId> {
        let pool = self.pool.clone();
        let watchers = Arc::clone(&self.watchers);
        let note = note.clone();

        tokio::task::spawn_blocking(move || -> SqliteResult<NoteId> {
            let id = pool.with_connection(|conn| {
                conn.execute(
                    "INSERT INTO notes (title, content, date) VALUES (?1, ?2, ?3)",
                    params![note.title, note.content, note.timestamp_millis()],
                )?;
                Ok(conn.last_insert_rowid())
            })?;
            debug!(id, "note inserted");
            refresh_watchers(&pool, &watchers)?;
            Ok(id)
        })
        .await
        .map_err(|e| StorageError::Internal(e.to_string()))?
        .map_err(Into::into)
    }

    async fn update(&self, note: &Note) -> StorageResult<()> {
        let id = note
            .id
            .ok_or_else(|| StorageError::NotFound("update requires an id".to_string()))?;
        let pool = self.pool.clone();
        let watchers = Arc::clone(&self.watchers);
        let note = note.clone();

        tokio::task::spawn_blocking(move || -> SqliteResult<()> {
            let rows_affected = pool.with_connection(|conn| {
                Ok(conn.execute(
                    "UPDATE notes SET title = ?2, content = ?3, date = ?4 WHERE id = ?1",
                    params![id, note.title, note.content, note.timestamp_millis()],
                )?)
            })?;

            if rows_affected == 0 {
                return Err(SqliteError::NotFound(format!("note {} does not exist", id)));
            }

            debug!(id, "note updated");
            refresh_watchers(&pool, &watchers)?;
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Internal(e.to_string()))?
        .map_err(Into::into)
    }

    async fn delete(&self, id: NoteId) -> StorageResult<()> {
        let pool = self.pool.clone();
        let watchers = Arc::clone(&self.watchers);

        tokio::task::spawn_blocking(move || -> SqliteResult<()> {
            let rows_affected = pool
                .with_connection(|conn| Ok(conn.execute("DELETE FROM notes WHERE id = ?1", [id])?))?;

            // Deleting a missing id is a quiet no-op, and nothing changed,
            // so subscribers are not woken.
            if rows_affected > 0 {
                debug!(id, "note deleted");
                refresh_watchers(&pool, &watchers)?;
            }
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Internal(e.to_string()))?
        .map_err(Into::into)
    }

    async fn get_by_id(&self, id: NoteId) -> StorageResult<Option<Note>> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || -> SqliteResult<Option<Note>> {
            pool.with_connection(|conn| {
                let note = conn
                    .query_row(
                        "SELECT id, title, content, date FROM notes WHERE id = ?1",
                        [id],
                        row_to_note,
                    )
                    .optional()?;
                Ok(note)
            })
        })
        .await
        .map_err(|e| StorageError::Internal(e.to_string()))?
        .map_err(Into::into)
    }

    async fn query(&self, order: &SortOrder) -> StorageResult<Vec<Note>> {
        let pool = self.pool.clone();
        let order = order.clone();

        tokio::task::spawn_blocking(move || -> SqliteResult<Vec<Note>> {
            pool.with_connection(|conn| query_notes(conn, &order))
        })
        .await
        .map_err(|e| StorageError::Internal(e.to_string()))?
        .map_err(Into::into)
    }

    async fn subscribe(&self, order: SortOrder) -> StorageResult<NoteSubscription> {
        let pool = self.pool.clone();
        let watchers = Arc::clone(&self.watchers);

        tokio::task::spawn_blocking(move || -> SqliteResult<NoteSubscription> {
            // Registry lock first, then connection, the same ordering
            // refresh_watchers uses. Holding it across the seed query means
            // no mutation can refresh the registry between this snapshot and
            // the watcher becoming visible, so the seed is always the
            // current result and every later change produces an emission.
            let mut guard = watchers.lock();
            let initial = pool.with_connection(|conn| query_notes(conn, &order))?;
            let (publisher, sub) = subscription::channel(initial);
            guard.push(Watcher { order, publisher });
            Ok(sub)
        })
        .await
        .map_err(|e| StorageError::Internal(e.to_string()))?
        .map_err(Into::into)
    }
}

/// Recompute and push every live query; prune cancelled ones first.
///
/// Runs on the blocking pool while holding the registry lock, so a
/// subscriber always sees fully-post-write state and emissions arrive in
/// table-change order.
fn refresh_watchers(pool: &SqlitePool, watchers: &Mutex<Vec<Watcher>>) -> SqliteResult<()> {
    let mut guard = watchers.lock();
    guard.retain(|w| !w.publisher.is_closed());
    if guard.is_empty() {
        return Ok(());
    }

    pool.with_connection(|conn| {
        for watcher in guard.iter() {
            let notes = query_notes(conn, &watcher.order)?;
            watcher.publisher.publish(notes);
        }
        Ok(())
    })
}

/// Evaluate a `SortOrder` against the notes table.
///
/// Substring matching uses `LIKE` with escaped wildcards: ASCII-case-
/// insensitive, `%` and `_` in the needle taken literally. The filter
/// variants carry no ORDER BY: store-native row order is the contract,
/// nothing more.
fn query_notes(conn: &Connection, order: &SortOrder) -> SqliteResult<Vec<Note>> {
    const SELECT: &str = "SELECT id, title, content, date FROM notes";

    match order {
        SortOrder::DateDescending => {
            select_notes(conn, &format!("{SELECT} ORDER BY date DESC"), params![])
        }
        SortOrder::DateAscending => {
            select_notes(conn, &format!("{SELECT} ORDER BY date ASC"), params![])
        }
        SortOrder::TitleDescending => {
            select_notes(conn, &format!("{SELECT} ORDER BY title DESC"), params![])
        }
        SortOrder::TitleAscending => {
            select_notes(conn, &format!("{SELECT} ORDER BY title ASC"), params![])
        }
        SortOrder::ById(id) => select_notes(conn, &format!("{SELECT} WHERE id = ?1"), params![id]),
        SortOrder::ByTitle(needle) => select_notes(
            conn,
            &format!("{SELECT} WHERE title LIKE ?1 ESCAPE '\\'"),
            params![like_pattern(needle)],
        ),
        SortOrder::ByContent(needle) => select_notes(
            conn,
            &format!("{SELECT} WHERE content LIKE ?1 ESCAPE '\\'"),
            params![like_pattern(needle)],
        ),
    }
}

/// Wrap a needle in `%...%`, escaping LIKE metacharacters so the needle
/// always matches as a literal substring.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn select_notes<P: Params>(conn: &Connection, sql: &str, params: P) -> SqliteResult<Vec<Note>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, row_to_note)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

/// Convert a database row to a Note
fn row_to_note(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let content: String = row.get(2)?;
    let millis: i64 = row.get(3)?;

    Ok(Note {
        id: Some(id),
        title,
        content,
        // Epoch fallback only for a corrupted timestamp column.
        created_or_edited_at: DateTime::from_timestamp_millis(millis).unwrap_or_default(),
    })
}
