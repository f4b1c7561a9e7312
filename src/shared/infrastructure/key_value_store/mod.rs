// Key-value persistence port for locally owned state.
//
// Purpose
// - Give stores a durable place to keep small JSON documents without reaching into ambient globals.
//
// Boundaries
// - Values are opaque strings. Encoding and decoding belong to the caller.
// - A write either fully lands or not at all.

pub mod in_memory;
pub mod json_file;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value for {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("storage offline")]
    Offline,
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
