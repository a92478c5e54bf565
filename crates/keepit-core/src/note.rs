//! The note entity and its text-identity rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row identifier assigned by the store on first insert.
///
/// Identifiers are never reused and never change once assigned.
pub type NoteId = i64;

/// A single note as persisted by a [`NoteStore`](crate::store::NoteStore).
///
/// `id` is `None` until the note has been inserted; the store assigns it.
/// The timestamp records the moment of creation or last edit (whichever the
/// caller stamped) and is persisted as epoch milliseconds, so sub-millisecond
/// precision is lost on the round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Option<NoteId>,
    pub title: String,
    pub content: String,
    pub created_or_edited_at: DateTime<Utc>,
}

impl Note {
    /// Create a not-yet-persisted note with the given timestamp.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        created_or_edited_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            created_or_edited_at,
        }
    }

    /// Attach a store-assigned identifier.
    pub fn with_id(mut self, id: NoteId) -> Self {
        self.id = Some(id);
        self
    }

    /// Text-identity check: title and content both equal case-insensitively.
    ///
    /// Timestamp and id are deliberately excluded; duplicate detection is
    /// about what the user wrote, not when.
    pub fn has_same_text(&self, other: &Note) -> bool {
        self.title.to_lowercase() == other.title.to_lowercase()
            && self.content.to_lowercase() == other.content.to_lowercase()
    }

    /// The timestamp as it is persisted (epoch milliseconds).
    pub fn timestamp_millis(&self) -> i64 {
        self.created_or_edited_at.timestamp_millis()
    }
}

/// Whether two notes refer to the same stored row.
///
/// Keys on `id` when both sides carry one; unsaved notes fall back to full
/// value equality.
pub fn same_note(a: &Note, b: &Note) -> bool {
    match (a.id, b.id) {
        (Some(left), Some(right)) => left == right,
        _ => a == b,
    }
}
