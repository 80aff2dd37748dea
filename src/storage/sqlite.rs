//! SQLite storage implementation

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ProfileStore, StorageResult};
use crate::storage::{document_key, DocumentKind};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// SQLite storage backend
///
/// The connection sits behind a mutex so one store can be shared by every
/// request task.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens or creates the database file and ensures the schema exists
    pub fn new(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;
        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProfileStore for SqliteStore {
    fn put_document(&self, kind: DocumentKind, id: &str, document: &str) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn().execute(
            "INSERT INTO documents (key, kind, profile_id, value, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![document_key(kind, id), kind.to_db_string(), id, document, now],
        )?;
        Ok(())
    }

    fn get_document(&self, kind: DocumentKind, id: &str) -> StorageResult<Option<String>> {
        let document = self
            .conn()
            .query_row(
                "SELECT value FROM documents WHERE key = ?1",
                params![document_key(kind, id)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(document)
    }

    fn list_ids(&self, kind: DocumentKind) -> StorageResult<Vec<String>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT profile_id FROM documents WHERE kind = ?1 ORDER BY profile_id")?;
        let ids = stmt
            .query_map(params![kind.to_db_string()], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProfileRecord;
    use tempfile::TempDir;

    fn record(id: &str, name: &str) -> ProfileRecord {
        let mut record = ProfileRecord::empty(id, format!("https://www.linkedin.com/in/{}", id));
        record.name = name.to_string();
        record
    }

    #[test]
    fn test_profile_roundtrip_in_memory() {
        let store = SqliteStore::new_in_memory().unwrap();
        let original = record("jane-doe", "Jane Doe");

        store.put_profile(&original).unwrap();

        assert_eq!(store.get_profile("jane-doe").unwrap(), Some(original));
        assert_eq!(store.get_profile("someone-else").unwrap(), None);
    }

    #[test]
    fn test_put_replaces_existing() {
        let store = SqliteStore::new_in_memory().unwrap();
        store.put_profile(&record("jane-doe", "Jane")).unwrap();
        store.put_profile(&record("jane-doe", "Jane Doe")).unwrap();

        let loaded = store.get_profile("jane-doe").unwrap().unwrap();
        assert_eq!(loaded.name, "Jane Doe");
        assert_eq!(store.list_ids(DocumentKind::Profile).unwrap(), vec!["jane-doe"]);
    }

    #[test]
    fn test_kinds_are_separate() {
        let store = SqliteStore::new_in_memory().unwrap();
        store.put_profile(&record("jane-doe", "Jane")).unwrap();

        assert!(store.get_analysis("jane-doe").unwrap().is_none());
        assert!(store.list_ids(DocumentKind::Analysis).unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("profiles.db");

        {
            let store = SqliteStore::new(&path).unwrap();
            store.put_profile(&record("b-person", "B")).unwrap();
            store.put_profile(&record("a-person", "A")).unwrap();
        }

        let store = SqliteStore::new(&path).unwrap();
        assert_eq!(
            store.list_ids(DocumentKind::Profile).unwrap(),
            vec!["a-person", "b-person"]
        );
        assert_eq!(store.get_profile("a-person").unwrap().unwrap().name, "A");
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let store = SqliteStore::new_in_memory().unwrap();
        store
            .put_document(DocumentKind::Profile, "broken", "{not json")
            .unwrap();

        assert!(store.get_profile("broken").is_err());
    }
}
