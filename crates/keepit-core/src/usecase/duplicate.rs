//! Duplicate detection over the note store

use crate::error::StorageResult;
use crate::note::Note;
use crate::sort::SortOrder;
use crate::store::NoteStore;
use std::sync::Arc;
use tracing::debug;

/// Decides whether a candidate note's text already exists in the store.
///
/// Two-phase strategy: titles are short and selective, so the title
/// substring query runs first and short-circuits the (typically larger)
/// content scan. The content fallback still catches a candidate whose title
/// was reworded but whose text matches an existing note on both fields.
/// A match always means title AND content equal case-insensitively;
/// timestamp and id never participate.
pub struct DuplicateDetector<S> {
    store: Arc<S>,
}

impl<S: NoteStore> DuplicateDetector<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// True iff a stored note has the same text identity as `candidate`.
    ///
    /// Storage errors from either query propagate untouched; no retries.
    pub async fn is_duplicate(&self, candidate: &Note) -> StorageResult<bool> {
        let by_title = self
            .store
            .query(&SortOrder::ByTitle(candidate.title.clone()))
            .await?;
        if by_title.iter().any(|note| note.has_same_text(candidate)) {
            debug!(title = %candidate.title, "duplicate found via title query");
            return Ok(true);
        }

        let by_content = self
            .store
            .query(&SortOrder::ByContent(candidate.content.clone()))
            .await?;
        let found = by_content.iter().any(|note| note.has_same_text(candidate));
        debug!(title = %candidate.title, found, "duplicate check fell through to content query");
        Ok(found)
    }
}
