//! Persistence for extracted records and their analyses
//!
//! Everything is stored as JSON documents keyed by profile identity:
//! - `profile:<id>` holds a [`ProfileRecord`](crate::model::ProfileRecord)
//! - `analysis:<id>` holds an [`AnalysisResult`](crate::model::AnalysisResult)
//!
//! A SQLite file backs the store unless `storage.in-memory` is set, in which
//! case documents live in memory for the life of the process.

mod memory;
mod schema;
mod sqlite;
mod traits;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{ProfileStore, StorageError, StorageResult};

use crate::config::StorageConfig;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Kind of stored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Profile,
    Analysis,
}

impl DocumentKind {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Analysis => "analysis",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "profile" => Some(Self::Profile),
            "analysis" => Some(Self::Analysis),
            _ => None,
        }
    }
}

/// Storage key for a document, e.g. `profile:jane-doe`
pub fn document_key(kind: DocumentKind, id: &str) -> String {
    format!("{}:{}", kind.to_db_string(), id)
}

/// Opens the store described by the configuration
pub fn open_store(config: &StorageConfig) -> StorageResult<Arc<dyn ProfileStore>> {
    if config.in_memory {
        info!("Keeping profiles in memory");
        return Ok(Arc::new(MemoryStore::new()));
    }

    info!("Opening profile database at {}", config.database_path);
    Ok(Arc::new(SqliteStore::new(Path::new(&config.database_path))?))
}
