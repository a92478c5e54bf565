//! Write-path helpers: add, edit, remove

use crate::clock::Clock;
use crate::error::StorageResult;
use crate::note::{Note, NoteId};
use crate::store::NoteStore;
use std::sync::Arc;
use tracing::debug;

/// Stamps notes with the injected clock and delegates writes to the store.
///
/// Callers are responsible for validating title/content before reaching
/// this layer; the editor and store enforce nothing about text shape.
pub struct NoteEditor<S, C> {
    store: Arc<S>,
    clock: C,
}

impl<S: NoteStore, C: Clock> NoteEditor<S, C> {
    pub fn new(store: Arc<S>, clock: C) -> Self {
        Self { store, clock }
    }

    /// Persist a new note stamped with the current moment.
    pub async fn add(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> StorageResult<NoteId> {
        let note = Note::new(title, content, self.clock.now());
        let id = self.store.insert(&note).await?;
        debug!(id, "note added");
        Ok(id)
    }

    /// Overwrite an existing note's text, restamping its edit time.
    pub async fn edit(
        &self,
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> StorageResult<()> {
        let note = Note::new(title, content, self.clock.now()).with_id(id);
        self.store.update(&note).await?;
        debug!(id, "note edited");
        Ok(())
    }

    /// Delete by id.
    pub async fn remove(&self, id: NoteId) -> StorageResult<()> {
        self.store.delete(id).await?;
        debug!(id, "note removed");
        Ok(())
    }
}
