//! In-memory `NoteStore` used by the use-case unit tests

use crate::error::{StorageError, StorageResult};
use crate::note::{Note, NoteId};
use crate::sort::SortOrder;
use crate::store::NoteStore;
use crate::subscription::{self, NotePublisher, NoteSubscription};
use async_trait::async_trait;
use parking_lot::Mutex;

/// Mirrors the SQLite store's observable contract: auto-incremented ids,
/// LIKE-style ASCII-case-insensitive substring filters, stable insertion
/// order for ties, and recompute-all live queries on every effective
/// mutation.
#[derive(Default)]
pub(crate) struct MemoryNoteStore {
    inner: Mutex<State>,
}

#[derive(Default)]
struct State {
    next_id: NoteId,
    rows: Vec<Note>,
    watchers: Vec<Watcher>,
}

struct Watcher {
    order: SortOrder,
    publisher: NotePublisher,
}

impl MemoryNoteStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(State {
                next_id: 1,
                rows: Vec::new(),
                watchers: Vec::new(),
            }),
        }
    }
}

fn evaluate(rows: &[Note], order: &SortOrder) -> Vec<Note> {
    match order {
        SortOrder::DateDescending => {
            let mut out = rows.to_vec();
            out.sort_by_key(|n| std::cmp::Reverse(n.timestamp_millis()));
            out
        }
        SortOrder::DateAscending => {
            let mut out = rows.to_vec();
            out.sort_by_key(Note::timestamp_millis);
            out
        }
        SortOrder::TitleDescending => {
            let mut out = rows.to_vec();
            out.sort_by(|a, b| b.title.cmp(&a.title));
            out
        }
        SortOrder::TitleAscending => {
            let mut out = rows.to_vec();
            out.sort_by(|a, b| a.title.cmp(&b.title));
            out
        }
        SortOrder::ById(id) => rows.iter().filter(|n| n.id == Some(*id)).cloned().collect(),
        SortOrder::ByTitle(needle) => rows
            .iter()
            .filter(|n| contains_like(&n.title, needle))
            .cloned()
            .collect(),
        SortOrder::ByContent(needle) => rows
            .iter()
            .filter(|n| contains_like(&n.content, needle))
            .cloned()
            .collect(),
    }
}

/// SQLite LIKE parity: substring match with ASCII-only case folding.
fn contains_like(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

fn notify(state: &mut State) {
    state.watchers.retain(|w| !w.publisher.is_closed());
    for watcher in &state.watchers {
        watcher.publisher.publish(evaluate(&state.rows, &watcher.order));
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn insert(&self, note: &Note) -> StorageResult<NoteId> {
        let mut state = self.inner.lock();
        let id = state.next_id;
        state.next_id += 1;
        let stored = note.clone().with_id(id);
        state.rows.push(stored);
        notify(&mut state);
        Ok(id)
    }

    async fn update(&self, note: &Note) -> StorageResult<()> {
        let id = note
            .id
            .ok_or_else(|| StorageError::NotFound("update requires an id".to_string()))?;
        let mut state = self.inner.lock();
        let slot = state
            .rows
            .iter_mut()
            .find(|n| n.id == Some(id))
            .ok_or_else(|| StorageError::NotFound(format!("note {id} does not exist")))?;
        *slot = note.clone();
        notify(&mut state);
        Ok(())
    }

    async fn delete(&self, id: NoteId) -> StorageResult<()> {
        let mut state = self.inner.lock();
        let before = state.rows.len();
        state.rows.retain(|n| n.id != Some(id));
        if state.rows.len() != before {
            notify(&mut state);
        }
        Ok(())
    }

    async fn get_by_id(&self, id: NoteId) -> StorageResult<Option<Note>> {
        let state = self.inner.lock();
        Ok(state.rows.iter().find(|n| n.id == Some(id)).cloned())
    }

    async fn query(&self, order: &SortOrder) -> StorageResult<Vec<Note>> {
        let state = self.inner.lock();
        Ok(evaluate(&state.rows, order))
    }

    async fn subscribe(&self, order: SortOrder) -> StorageResult<NoteSubscription> {
        let mut state = self.inner.lock();
        let initial = evaluate(&state.rows, &order);
        let (publisher, sub) = subscription::channel(initial);
        state.watchers.push(Watcher { order, publisher });
        Ok(sub)
    }
}
