//! SQLite configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Tunables for the SQLite connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// Database file path; `:memory:` opens an in-memory database.
    pub path: PathBuf,

    /// Enable write-ahead logging for concurrent readers.
    pub wal_mode: bool,

    /// How long a blocked writer waits before giving up.
    pub busy_timeout_ms: u32,

    /// Page cache size passed straight to `PRAGMA cache_size`.
    pub cache_size: i32,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("keepit.db"),
            wal_mode: true,
            busy_timeout_ms: 5_000,
            cache_size: -2_000, // 2 MiB, in KiB units per SQLite convention
        }
    }
}

impl SqliteConfig {
    /// Configuration for an on-disk database at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// In-memory configuration for tests.
    pub fn memory() -> Self {
        Self {
            path: PathBuf::from(":memory:"),
            // WAL is meaningless without a file
            wal_mode: false,
            ..Self::default()
        }
    }

    /// True when this configuration opens an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.path.to_str() == Some(":memory:")
    }
}
