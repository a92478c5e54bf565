//! Live query subscriptions
//!
//! A live query is a push stream: every time the underlying table changes,
//! the store recomputes the full ordered result and publishes it to every
//! subscriber. Built on `tokio::sync::watch`, so a slow consumer always
//! observes the latest fully-materialized list (intermediate lists may be
//! coalesced, emission order is preserved). Dropping the subscription is
//! the cancellation signal; the publisher side sees the channel close and
//! the store prunes it.

use crate::note::Note;
use std::sync::Arc;
use tokio::sync::watch;

/// The current result list of a live query.
///
/// Shared rather than cloned per subscriber: one recomputation feeds every
/// active subscription of the same query.
pub type NoteList = Arc<Vec<Note>>;

/// Create a connected publisher/subscription pair seeded with `initial`.
pub fn channel(initial: Vec<Note>) -> (NotePublisher, NoteSubscription) {
    let (tx, rx) = watch::channel(Arc::new(initial));
    (NotePublisher { tx }, NoteSubscription { rx })
}

/// Producer half of a live query, held by the store (or a derived join).
#[derive(Debug)]
pub struct NotePublisher {
    tx: watch::Sender<NoteList>,
}

impl NotePublisher {
    /// Push a freshly recomputed result list.
    ///
    /// Returns `false` when every subscriber has gone away, which tells the
    /// owner to drop this publisher.
    pub fn publish(&self, notes: Vec<Note>) -> bool {
        self.tx.send(Arc::new(notes)).is_ok()
    }

    /// True once all subscriptions have been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Resolves when the last subscription is dropped.
    pub async fn closed(&self) {
        self.tx.closed().await
    }
}

/// Consumer half of a live query.
///
/// `current()` reads the latest list without waiting; `next()` suspends
/// until a new list is published. Dropping the subscription unsubscribes.
#[derive(Debug, Clone)]
pub struct NoteSubscription {
    rx: watch::Receiver<NoteList>,
}

impl NoteSubscription {
    /// The most recently published result list.
    pub fn current(&self) -> NoteList {
        self.rx.borrow().clone()
    }

    /// Wait for the next published list.
    ///
    /// Returns `None` when the publisher side has been dropped (the store
    /// or derived query shut down).
    pub async fn next(&mut self) -> Option<NoteList> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Wait until a new list is available without consuming it.
    ///
    /// Used by joins that want to re-read several sources after any one of
    /// them changes. Returns `Err` when the publisher is gone.
    pub async fn changed(&mut self) -> Result<(), SubscriptionClosed> {
        self.rx.changed().await.map_err(|_| SubscriptionClosed)
    }

    /// The latest list, marking it as seen for subsequent `changed()` calls.
    pub fn latest(&mut self) -> NoteList {
        self.rx.borrow_and_update().clone()
    }
}

/// The publisher behind a subscription has shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("live query publisher has shut down")]
pub struct SubscriptionClosed;
