//! Export of records and analyses
//!
//! Every exporter is a pure function of its inputs and a timestamp, returning
//! an [`Export`] (file name plus contents). Writing to disk is a separate step
//! so exports can be tested without touching the filesystem.

mod csv_output;
mod html_output;
mod json_output;

pub use csv_output::{export_csv, CSV_ANALYSIS_COLUMNS, CSV_PROFILE_COLUMNS};
pub use html_output::export_html_report;
pub use json_output::{export_json, EXPORT_VERSION};

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while producing or writing an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "html" => Ok(Self::Html),
            other => Err(format!("unknown export format '{}' (expected json, csv or html)", other)),
        }
    }
}

/// A rendered export, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub format: ExportFormat,
    pub filename: String,
    pub contents: String,
}

/// File-name-safe form of a display name
///
/// Keeps alphanumerics, spaces, `-` and `_`, then trims trailing spaces.
/// Falls back to `profile` when nothing survives.
pub fn safe_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let trimmed = kept.trim_end();
    if trimmed.is_empty() {
        "profile".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `YYYYmmdd_HHMMSS` stamp used in export file names
pub fn file_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// Writes an export into `dir`, creating the directory if needed
pub fn write_export(dir: &Path, export: &Export) -> ExportResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&export.filename);
    std::fs::write(&path, export.contents.as_bytes())?;
    info!("Wrote {} export to {}", export.format, path.display());
    Ok(path)
}
