//! Note use-cases built on the `NoteStore` query surface
//!
//! These add no persistence of their own; they read and write strictly
//! through the store trait.

pub mod duplicate;
pub mod editor;
pub mod search;

pub use duplicate::DuplicateDetector;
pub use editor::NoteEditor;
pub use search::SearchNotes;
