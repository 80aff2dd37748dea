//! Profile-Lens: a polite profile fetcher and heuristic analyzer
//!
//! This crate fetches a public profile page, extracts a structured record from it
//! and scores that record with deterministic, auditable heuristics. Fetching
//! respects robots.txt advice and per-host request spacing, and falls back from a
//! plain HTTP fetch to a headless browser when the page needs rendering.

pub mod analysis;
pub mod config;
pub mod extract;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod robots;
pub mod scrape;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Profile-Lens operations
#[derive(Debug, Error)]
pub enum LensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] UrlError),

    #[error("URL disallowed by robots.txt: {url}")]
    PolicyDenied { url: String },

    #[error("Could not fetch {url}: {}", format_failures(.failures))]
    FetchFailed {
        url: String,
        failures: Vec<scrape::FetchFailure>,
    },

    #[error("Could not process profile at {url}: required fields not found")]
    ExtractionFailed { url: String },

    #[error("Batch of {size} URLs exceeds the maximum of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Export error: {0}")]
    Export(#[from] output::ExportError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LensError {
    /// Stable machine-readable name of the error, used in error responses
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
            Self::PolicyDenied { .. } => "policy_denied",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::ExtractionFailed { .. } => "extraction_failed",
            Self::BatchTooLarge { .. } => "batch_too_large",
            Self::ProfileNotFound(_) => "profile_not_found",
            Self::Storage(_) => "storage",
            Self::Export(_) => "export",
            Self::Reqwest(_) => "http_client",
            Self::Io(_) => "io",
        }
    }
}

fn format_failures(failures: &[scrape::FetchFailure]) -> String {
    if failures.is_empty() {
        return "no strategy produced usable content".to_string();
    }
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Profile URL errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Unexpected host: {0}")]
    InvalidHost(String),

    #[error("Not a profile URL: {0}")]
    NotAProfile(String),
}

/// Result type alias for Profile-Lens operations
pub type Result<T> = std::result::Result<T, LensError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analysis::Analyzer;
pub use config::Config;
pub use extract::Extractor;
pub use model::{AnalysisResult, ProfileRecord};
pub use pipeline::ProfileService;
pub use url::ProfileUrl;
