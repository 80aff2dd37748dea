//! In-memory storage, used when no database path is configured

use crate::storage::traits::{ProfileStore, StorageResult};
use crate::storage::{document_key, DocumentKind};
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, (DocumentKind, String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryStore {
    fn put_document(&self, kind: DocumentKind, id: &str, document: &str) -> StorageResult<()> {
        let mut documents = self.documents.write().unwrap_or_else(|e| e.into_inner());
        documents.insert(
            document_key(kind, id),
            (kind, id.to_string(), document.to_string()),
        );
        Ok(())
    }

    fn get_document(&self, kind: DocumentKind, id: &str) -> StorageResult<Option<String>> {
        let documents = self.documents.read().unwrap_or_else(|e| e.into_inner());
        Ok(documents
            .get(&document_key(kind, id))
            .map(|(_, _, document)| document.clone()))
    }

    fn list_ids(&self, kind: DocumentKind) -> StorageResult<Vec<String>> {
        let documents = self.documents.read().unwrap_or_else(|e| e.into_inner());
        let mut ids: Vec<String> = documents
            .values()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, id, _)| id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }
}
