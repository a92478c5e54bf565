//! Keepit core: domain types, storage traits and note use-cases
//!
//! This crate owns the vocabulary of the system and the algorithms layered
//! on top of storage; concrete engines live in sibling crates (see
//! `keepit-sqlite`) and implement [`store::NoteStore`].
//!
//! - [`note`] — the `Note` entity and its text-identity rules
//! - [`sort`] — the closed set of retrieval intents ([`SortOrder`])
//! - [`store`] — the async storage trait
//! - [`subscription`] — live query plumbing (publish/subscribe lists)
//! - [`usecase`] — duplicate detection, merged search, write helpers
//! - [`view`] — display-ready projections
//! - [`clock`] — injected time source

pub mod clock;
pub mod error;
pub mod note;
pub mod sort;
pub mod store;
pub mod subscription;
pub mod usecase;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{StorageError, StorageResult};
pub use note::{same_note, Note, NoteId};
pub use sort::SortOrder;
pub use store::NoteStore;
pub use subscription::{NotePublisher, NoteSubscription, SubscriptionClosed};
pub use usecase::{DuplicateDetector, NoteEditor, SearchNotes};
pub use view::{DateStamp, NoteView};
