//! Display-ready note projections
//!
//! The presentation layer renders notes with the timestamp broken into
//! human-readable parts. This mapping is the only piece of that layer with
//! any content, so it lives here next to the entity it projects.

use crate::note::{Note, NoteId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A timestamp decomposed into the parts the note cards display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateStamp {
    pub day_of_week: String,
    pub day_of_month: String,
    pub month: String,
    pub year: String,
}

impl DateStamp {
    pub fn from_datetime(moment: &DateTime<Utc>) -> Self {
        Self {
            day_of_week: moment.format("%A").to_string(),
            day_of_month: moment.format("%d").to_string(),
            month: moment.format("%B").to_string(),
            year: moment.format("%Y").to_string(),
        }
    }
}

/// A note shaped for display: assigned id, text fields, formatted date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteView {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub date: DateStamp,
}

impl NoteView {
    /// Project a stored note. Unsaved notes surface as id 0, matching the
    /// "not yet persisted" sentinel the UI layer expects.
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: note.id.unwrap_or(0),
            title: note.title.clone(),
            content: note.content.clone(),
            date: DateStamp::from_datetime(&note.created_or_edited_at),
        }
    }

    pub fn from_notes(notes: &[Note]) -> Vec<Self> {
        notes.iter().map(Self::from_note).collect()
    }
}
