//! Storage traits and error types
//!
//! Backends only move opaque JSON documents keyed by `(kind, profile id)`.
//! Typed access is layered on top by the provided methods of [`ProfileStore`].

use crate::model::{AnalysisResult, ProfileRecord};
use crate::storage::DocumentKind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value persistence for records and analyses
///
/// Implementations must be safe to share between tasks; a later `put` for the
/// same key replaces the earlier document.
pub trait ProfileStore: Send + Sync {
    /// Stores a serialized document, replacing any previous one
    fn put_document(&self, kind: DocumentKind, id: &str, document: &str) -> StorageResult<()>;

    /// Gets a serialized document
    fn get_document(&self, kind: DocumentKind, id: &str) -> StorageResult<Option<String>>;

    /// Lists stored ids of one kind, sorted
    fn list_ids(&self, kind: DocumentKind) -> StorageResult<Vec<String>>;

    fn put_profile(&self, record: &ProfileRecord) -> StorageResult<()> {
        put_json(self, DocumentKind::Profile, &record.profile_id, record)
    }

    fn get_profile(&self, id: &str) -> StorageResult<Option<ProfileRecord>> {
        get_json(self, DocumentKind::Profile, id)
    }

    fn put_analysis(&self, analysis: &AnalysisResult) -> StorageResult<()> {
        put_json(self, DocumentKind::Analysis, &analysis.profile_id, analysis)
    }

    fn get_analysis(&self, id: &str) -> StorageResult<Option<AnalysisResult>> {
        get_json(self, DocumentKind::Analysis, id)
    }
}

fn put_json<S, T>(store: &S, kind: DocumentKind, id: &str, value: &T) -> StorageResult<()>
where
    S: ProfileStore + ?Sized,
    T: Serialize,
{
    let document = serde_json::to_string(value)?;
    store.put_document(kind, id, &document)
}

fn get_json<S, T>(store: &S, kind: DocumentKind, id: &str) -> StorageResult<Option<T>>
where
    S: ProfileStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get_document(kind, id)? {
        Some(document) => Ok(Some(serde_json::from_str(&document)?)),
        None => Ok(None),
    }
}
