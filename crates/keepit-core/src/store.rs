//! Storage abstraction trait
//!
//! Core owns the trait; storage crates implement it. This is the seam that
//! lets the duplicate detector and search merger run against any engine
//! (SQLite in production, the in-memory store in tests) without touching
//! business logic.

use crate::error::StorageResult;
use crate::note::{Note, NoteId};
use crate::sort::SortOrder;
use crate::subscription::NoteSubscription;
use async_trait::async_trait;

/// Durable CRUD and query access to the note collection.
///
/// Implementations must be `Send + Sync`; every method may suspend on I/O.
/// Queries never fail for "no matching row" — an empty list or `None` is a
/// normal result. Mutations fail with a [`StorageError`](crate::StorageError)
/// only on genuine medium failure, plus `NotFound` for `update` against a
/// missing row.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist a new note and return the assigned id.
    ///
    /// Any id already present on `note` is ignored; assignment is the
    /// store's job and ids are never reused.
    async fn insert(&self, note: &Note) -> StorageResult<NoteId>;

    /// Replace the stored note carrying the same id.
    ///
    /// Fails with `StorageError::NotFound` when `note.id` is absent or does
    /// not match any row.
    async fn update(&self, note: &Note) -> StorageResult<()>;

    /// Remove the note with the given id.
    ///
    /// Deleting an id with no matching row is a no-op.
    async fn delete(&self, id: NoteId) -> StorageResult<()>;

    /// Single-row lookup; `Ok(None)` when absent.
    async fn get_by_id(&self, id: NoteId) -> StorageResult<Option<Note>>;

    /// One-shot evaluation of a query against current state.
    async fn query(&self, order: &SortOrder) -> StorageResult<Vec<Note>>;

    /// Register a live query.
    ///
    /// The returned subscription is seeded with the current result and
    /// receives a freshly recomputed list after every successful mutation.
    /// Dropping it unsubscribes.
    async fn subscribe(&self, order: SortOrder) -> StorageResult<NoteSubscription>;
}
