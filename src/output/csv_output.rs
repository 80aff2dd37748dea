//! CSV export, one row per profile

use crate::analysis::years_of_experience;
use crate::model::{AnalysisResult, ProfileRecord};
use crate::output::{file_timestamp, Export, ExportFormat, ExportResult};
use chrono::{DateTime, Utc};

pub const CSV_PROFILE_COLUMNS: &[&str] = &[
    "name",
    "headline",
    "location",
    "current_position",
    "current_company",
    "years_experience",
    "skills_count",
    "education_count",
    "profile_url",
    "scraped_at",
];

pub const CSV_ANALYSIS_COLUMNS: &[&str] = &[
    "career_level",
    "industry_focus",
    "completeness_score",
    "skill_relevance_score",
    "experience_value_score",
    "market_competitiveness_score",
    "market_demand",
];

fn profile_cells(record: &ProfileRecord, now: DateTime<Utc>) -> Vec<String> {
    vec![
        record.name.clone(),
        record.headline.clone(),
        record.location.clone(),
        record.current_position.clone(),
        record.current_company.clone(),
        years_of_experience(record, now).to_string(),
        record.skills.len().to_string(),
        record.education.len().to_string(),
        record.metadata.source_url.clone(),
        record.metadata.extracted_at.to_rfc3339(),
    ]
}

fn analysis_cells(analysis: Option<&AnalysisResult>) -> Vec<String> {
    match analysis {
        Some(a) => vec![
            a.career_level.to_string(),
            a.industry_focus.join(", "),
            a.completeness_score.to_string(),
            a.skill_relevance_score.to_string(),
            a.experience_value_score.to_string(),
            a.market_competitiveness_score.to_string(),
            a.market_demand.to_string(),
        ],
        None => vec![String::new(); CSV_ANALYSIS_COLUMNS.len()],
    }
}

/// Exports profiles as CSV
///
/// Analysis columns are appended only when at least one row has an analysis;
/// rows without one leave those cells empty.
pub fn export_csv(
    rows: &[(ProfileRecord, Option<AnalysisResult>)],
    now: DateTime<Utc>,
) -> ExportResult<Export> {
    let with_analysis = rows.iter().any(|(_, analysis)| analysis.is_some());

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = CSV_PROFILE_COLUMNS.to_vec();
    if with_analysis {
        header.extend_from_slice(CSV_ANALYSIS_COLUMNS);
    }
    writer.write_record(&header)?;

    for (record, analysis) in rows {
        let mut cells = profile_cells(record, now);
        if with_analysis {
            cells.extend(analysis_cells(analysis.as_ref()));
        }
        writer.write_record(&cells)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;

    Ok(Export {
        format: ExportFormat::Csv,
        filename: format!("profiles_{}.csv", file_timestamp(now)),
        contents: String::from_utf8(bytes)?,
    })
}
