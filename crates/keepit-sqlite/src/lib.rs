//! SQLite storage backend for Keepit
//!
//! This crate provides the SQLite-based implementation of
//! [`keepit_core::NoteStore`]: a single-table schema, a mutex-guarded
//! connection, and a live-query registry that re-runs every active
//! subscription after each mutation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keepit_sqlite::{SqliteConfig, SqlitePool, SqliteNoteStore};
//! use keepit_core::{NoteStore, SortOrder};
//!
//! let pool = SqlitePool::new(SqliteConfig::new("./keepit.db"))?;
//! let store = SqliteNoteStore::new(pool);
//!
//! let all = store.query(&SortOrder::DateDescending).await?;
//! let live = store.subscribe(SortOrder::DateDescending).await?;
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod note_store;
pub mod schema;

// Re-exports
pub use config::SqliteConfig;
pub use connection::SqlitePool;
pub use error::{SqliteError, SqliteResult};
pub use note_store::SqliteNoteStore;
