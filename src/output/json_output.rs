//! JSON export

use crate::model::{AnalysisResult, ProfileRecord};
use crate::output::{file_timestamp, safe_name, Export, ExportFormat, ExportResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const EXPORT_VERSION: &str = "1.0";

#[derive(Serialize)]
struct Envelope<'a> {
    profile: &'a ProfileRecord,
    analysis: Option<&'a AnalysisResult>,
    exported_at: String,
    export_format: &'static str,
    version: &'static str,
}

/// Field-complete JSON export of a record and, if present, its analysis
pub fn export_json(
    record: &ProfileRecord,
    analysis: Option<&AnalysisResult>,
    now: DateTime<Utc>,
) -> ExportResult<Export> {
    let envelope = Envelope {
        profile: record,
        analysis,
        exported_at: now.to_rfc3339(),
        export_format: "json",
        version: EXPORT_VERSION,
    };

    Ok(Export {
        format: ExportFormat::Json,
        filename: format!("{}_{}.json", safe_name(&record.name), file_timestamp(now)),
        contents: serde_json::to_string_pretty(&envelope)?,
    })
}
