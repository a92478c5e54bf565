//! Error types shared across storage backends

use serde::{Deserialize, Serialize};

/// Common result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage operation errors
///
/// These are failures of the underlying medium. "No matching row" from a
/// query is not an error; it is an empty or absent result. `NotFound` is
/// reserved for mutations that require an existing row (update).
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
