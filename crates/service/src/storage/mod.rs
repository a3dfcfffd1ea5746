//! Storage abstractions for service layer
//!
//! A [`BlobBackend`] is a flat key -> bytes store. Four implementations are
//! provided and selected by configuration; [`DocumentStore`] layers JSON
//! documents and collections on top of whichever one is active.

pub mod document_store;
pub mod fs;
pub mod http_blob;
pub mod memory;
pub mod seaorm;

use async_trait::async_trait;
use thiserror::Error;

pub use document_store::{Document, DocumentStore};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("blob service error: {0}")]
    Http(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("malformed document {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Flat object storage: the only thing every backend has to provide.
///
/// `put` must replace an existing object in a single step so that a reader
/// racing a writer sees either the old or the new bytes, never nothing.
#[async_trait]
pub trait BlobBackend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError>;
    /// Returns whether an object existed.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;
    /// Keys starting with `prefix`, sorted ascending.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

/// A single path segment usable inside a key: ASCII alphanumerics, `-`, `_`
/// and `.`, not empty and not starting with `.`. Dot names are reserved for
/// backend temp files.
pub fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment.len() <= 128
        && !segment.starts_with('.')
        && segment.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Keys are relative, `/`-separated and made of valid segments.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.split('/').all(is_valid_segment) {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
