//! The sort/query specification shared by every consumer of the store

use crate::note::NoteId;
use serde::{Deserialize, Serialize};

/// A single retrieval intent understood by the note store.
///
/// This closed set is the only vocabulary higher layers use to ask for
/// notes, which keeps them decoupled from any concrete storage engine.
/// Every consumer matches it exhaustively; adding a variant is a
/// compile-time obligation on all of them, by construction.
///
/// The four ordering variants scan the whole table. `ById` yields zero or
/// one note wrapped as a list so it composes with the rest. `ByTitle` and
/// `ByContent` are substring filters with the engine's LIKE semantics
/// (ASCII-case-insensitive, wildcards taken literally), returned in
/// store-native row order, which callers must not rely on beyond "stable
/// per snapshot".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    DateDescending,
    DateAscending,
    TitleDescending,
    TitleAscending,
    ById(NoteId),
    ByTitle(String),
    ByContent(String),
}

impl SortOrder {
    /// True for the variants that order the full table rather than filter it.
    pub fn is_full_listing(&self) -> bool {
        match self {
            SortOrder::DateDescending
            | SortOrder::DateAscending
            | SortOrder::TitleDescending
            | SortOrder::TitleAscending => true,
            SortOrder::ById(_) | SortOrder::ByTitle(_) | SortOrder::ByContent(_) => false,
        }
    }
}
