//! Merged text search over title and content
//!
//! Runs the title and content substring queries as two live subscriptions
//! and joins them combine-latest style: whenever either source re-emits,
//! the merged list is recomputed once from each source's latest value and
//! pushed. Title matches come first; a content match already present among
//! the title matches appears exactly once, in its title-match position.

use crate::error::StorageResult;
use crate::note::{same_note, Note};
use crate::sort::SortOrder;
use crate::store::NoteStore;
use crate::subscription::{self, NoteSubscription};
use std::sync::Arc;
use tracing::debug;

/// Live merged search across note titles and contents.
pub struct SearchNotes<S> {
    store: Arc<S>,
}

impl<S: NoteStore> SearchNotes<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Subscribe to the merged search results for `query_text`.
    ///
    /// A blank query is not a search at all: it yields exactly the default
    /// date-descending listing. Otherwise the returned subscription emits a
    /// recomputed merge every time either underlying query re-emits, until
    /// it is dropped.
    pub async fn search(&self, query_text: &str) -> StorageResult<NoteSubscription> {
        if query_text.trim().is_empty() {
            debug!("blank search query, falling back to default listing");
            return self.store.subscribe(SortOrder::DateDescending).await;
        }

        let mut by_title = self
            .store
            .subscribe(SortOrder::ByTitle(query_text.to_string()))
            .await?;
        let mut by_content = self
            .store
            .subscribe(SortOrder::ByContent(query_text.to_string()))
            .await?;

        let initial = merge(&by_title.latest(), &by_content.latest());
        let (publisher, sub) = subscription::channel(initial);

        // Combine-latest join. The task winds down when both sources close
        // or when the last downstream subscriber goes away; a source that
        // closes alone keeps contributing its last value while the survivor
        // is drained.
        tokio::spawn(async move {
            let mut title_open = true;
            let mut content_open = true;
            loop {
                let changed = tokio::select! {
                    res = by_title.changed(), if title_open => {
                        title_open = res.is_ok();
                        title_open
                    }
                    res = by_content.changed(), if content_open => {
                        content_open = res.is_ok();
                        content_open
                    }
                    _ = publisher.closed() => break,
                };
                if !title_open && !content_open {
                    break;
                }
                if !changed {
                    continue;
                }
                // latest() folds a simultaneous change on the other source
                // into this same recomputation.
                let merged = merge(&by_title.latest(), &by_content.latest());
                if !publisher.publish(merged) {
                    break;
                }
            }
        });

        Ok(sub)
    }
}

/// Title matches first, then content matches not already present.
fn merge(by_title: &[Note], by_content: &[Note]) -> Vec<Note> {
    let mut merged = by_title.to_vec();
    for note in by_content {
        if !by_title.iter().any(|seen| same_note(seen, note)) {
            merged.push(note.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NoteStore;
    use crate::testing::MemoryNoteStore;
    use chrono::{TimeZone, Utc};

    fn note(title: &str, content: &str, millis: i64) -> Note {
        Note::new(title, content, Utc.timestamp_millis_opt(millis).unwrap())
    }

    #[tokio::test]
    async fn title_matches_come_first_without_duplicates() {
        let store = Arc::new(MemoryNoteStore::new());
        let a = store
            .insert(&note("Meeting notes", "discuss budget", 1_000))
            .await
            .unwrap();
        let b = store
            .insert(&note("Recipe", "meeting snacks for party", 2_000))
            .await
            .unwrap();

        let search = SearchNotes::new(Arc::clone(&store));
        let sub = search.search("meeting").await.unwrap();

        let ids: Vec<_> = sub.current().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![Some(a), Some(b)]);
    }

    #[tokio::test]
    async fn note_matching_both_fields_appears_once() {
        let store = Arc::new(MemoryNoteStore::new());
        let id = store
            .insert(&note("meeting agenda", "meeting follow-ups", 1_000))
            .await
            .unwrap();

        let search = SearchNotes::new(Arc::clone(&store));
        let sub = search.search("meeting").await.unwrap();

        let current = sub.current();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].id, Some(id));
    }

    #[tokio::test]
    async fn blank_query_equals_default_listing() {
        let store = Arc::new(MemoryNoteStore::new());
        store.insert(&note("b", "2", 2_000)).await.unwrap();
        store.insert(&note("a", "1", 1_000)).await.unwrap();
        store.insert(&note("c", "3", 3_000)).await.unwrap();

        let search = SearchNotes::new(Arc::clone(&store));
        let expected = store.query(&SortOrder::DateDescending).await.unwrap();

        for blank in ["", "   "] {
            let sub = search.search(blank).await.unwrap();
            assert_eq!(*sub.current(), expected);
        }
    }

    #[tokio::test]
    async fn merge_recomputes_when_either_source_changes() {
        let store = Arc::new(MemoryNoteStore::new());
        store
            .insert(&note("Meeting notes", "discuss budget", 1_000))
            .await
            .unwrap();

        let search = SearchNotes::new(Arc::clone(&store));
        let mut sub = search.search("meeting").await.unwrap();
        assert_eq!(sub.current().len(), 1);

        // A content-only match arrives; the merged list grows.
        store
            .insert(&note("Recipe", "meeting snacks", 2_000))
            .await
            .unwrap();
        let updated = sub.next().await.unwrap();
        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0].title, "Meeting notes");
        assert_eq!(updated[1].title, "Recipe");

        // A title-only match arrives; still one emission, title side first.
        store
            .insert(&note("Another meeting", "nothing relevant", 3_000))
            .await
            .unwrap();
        let updated = sub.next().await.unwrap();
        assert_eq!(updated.len(), 3);
        assert!(updated
            .iter()
            .take(2)
            .all(|n| n.title.contains("eeting")));
    }

    #[tokio::test]
    async fn deletion_propagates_through_the_join() {
        let store = Arc::new(MemoryNoteStore::new());
        let id = store
            .insert(&note("Meeting notes", "discuss budget", 1_000))
            .await
            .unwrap();
        store
            .insert(&note("Recipe", "meeting snacks", 2_000))
            .await
            .unwrap();

        let search = SearchNotes::new(Arc::clone(&store));
        let mut sub = search.search("meeting").await.unwrap();
        assert_eq!(sub.current().len(), 2);

        store.delete(id).await.unwrap();
        let updated = sub.next().await.unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].title, "Recipe");
    }

    /// Hands every subscription's publisher to the test so source lifetimes
    /// can be driven one at a time.
    #[derive(Default)]
    struct ScriptedStore {
        publishers: parking_lot::Mutex<Vec<(SortOrder, subscription::NotePublisher)>>,
    }

    #[async_trait::async_trait]
    impl NoteStore for ScriptedStore {
        async fn insert(&self, _note: &Note) -> StorageResult<crate::note::NoteId> {
            Ok(0)
        }

        async fn update(&self, _note: &Note) -> StorageResult<()> {
            Ok(())
        }

        async fn delete(&self, _id: crate::note::NoteId) -> StorageResult<()> {
            Ok(())
        }

        async fn get_by_id(&self, _id: crate::note::NoteId) -> StorageResult<Option<Note>> {
            Ok(None)
        }

        async fn query(&self, _order: &SortOrder) -> StorageResult<Vec<Note>> {
            Ok(Vec::new())
        }

        async fn subscribe(&self, order: SortOrder) -> StorageResult<NoteSubscription> {
            let (publisher, sub) = subscription::channel(Vec::new());
            self.publishers.lock().push((order, publisher));
            Ok(sub)
        }
    }

    #[tokio::test]
    async fn join_drains_the_surviving_source_after_one_closes() {
        let store = Arc::new(ScriptedStore::default());
        let search = SearchNotes::new(Arc::clone(&store));
        let mut sub = search.search("meeting").await.unwrap();

        let (title_pub, content_pub) = {
            let mut publishers = store.publishers.lock();
            let content = publishers.pop().unwrap().1;
            let title = publishers.pop().unwrap().1;
            (title, content)
        };

        // The title source closing alone must not end the join.
        drop(title_pub);
        assert!(content_pub.publish(vec![note("Recipe", "meeting snacks", 1_000)]));
        let list = sub.next().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Recipe");

        // Only once both sources are gone does the join shut down.
        drop(content_pub);
        assert!(sub.next().await.is_none());
    }

    #[test]
    fn merge_orders_and_dedups_by_id() {
        let shared = note("both", "both", 0).with_id(1);
        let title_only = note("title hit", "x", 0).with_id(2);
        let content_only = note("y", "content hit", 0).with_id(3);

        let merged = merge(
            &[title_only.clone(), shared.clone()],
            &[shared.clone(), content_only.clone()],
        );
        assert_eq!(merged, vec![title_only, shared, content_only]);
    }

    #[test]
    fn merge_dedups_unsaved_notes_by_value() {
        let unsaved = note("draft", "text", 0);
        let merged = merge(&[unsaved.clone()], &[unsaved.clone()]);
        assert_eq!(merged.len(), 1);
    }
}
