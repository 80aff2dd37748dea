//! Heuristic profile analysis
//!
//! Every rule is an independent function over the record (and, where a rule
//! builds on another, that rule's output). All constants come from
//! [`AnalyzerConfig`]; the keyword tables live in [`tables`].

mod career;
mod scores;
mod skills;
pub mod tables;

pub use career::{
    career_level, career_recommendations, has_leadership_title, industry_focus,
    years_of_experience,
};
pub use scores::{
    competitiveness, completeness, confidence, experience_value, market_demand, salary_estimate,
};
pub use skills::{categorize, skill_gaps, skill_recommendations, skill_relevance};

use crate::config::AnalyzerConfig;
use crate::model::{AnalysisResult, ProfileRecord, ANALYSIS_VERSION};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Floors a raw score and clamps it into `0..=100`
pub(crate) fn clamp_score(value: f64) -> u8 {
    value.floor().clamp(0.0, 100.0) as u8
}

/// Produces [`AnalysisResult`]s from records
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes a record as of now
    pub fn analyze(&self, record: &ProfileRecord) -> AnalysisResult {
        self.analyze_at(record, Utc::now())
    }

    /// Analyzes a record as of `now`
    ///
    /// Deterministic: the same record and instant always give the same result.
    pub fn analyze_at(&self, record: &ProfileRecord, now: DateTime<Utc>) -> AnalysisResult {
        let config = &self.config;

        let years = years_of_experience(record, now);
        let level = career_level(record, years, &config.career);
        let industries = industry_focus(record, config.caps.industries);
        let categories = categorize(record);

        let completeness_score = completeness(record, &config.completeness);
        let relevance_score = skill_relevance(record, &config.skill_relevance);
        let experience_score = experience_value(record, years, &config.experience_value);
        let competitiveness_score = competitiveness(
            completeness_score,
            relevance_score,
            experience_score,
            &config.competitiveness,
        );

        debug!(
            "Scores for {}: completeness {}, relevance {}, experience {}, competitiveness {}",
            record.profile_id,
            completeness_score,
            relevance_score,
            experience_score,
            competitiveness_score
        );

        let confidence = confidence(
            completeness_score,
            &industries,
            &categories,
            experience_score,
            &config.confidence,
        );

        AnalysisResult {
            profile_id: record.profile_id.clone(),
            career_level: level,
            years_experience: years,
            skill_recommendations: skill_recommendations(record, &industries, &config.caps),
            skill_gaps: skill_gaps(record, &industries, config.caps.skill_gaps),
            career_recommendations: career_recommendations(level, config.caps.career_recommendations),
            market_demand: market_demand(relevance_score, experience_score, &config.market_demand),
            salary_estimate: salary_estimate(level, years, &industries, &config.salary),
            industry_focus: industries,
            skill_categories: categories,
            completeness_score,
            skill_relevance_score: relevance_score,
            experience_value_score: experience_score,
            market_competitiveness_score: competitiveness_score,
            confidence,
            analyzed_at: now,
            analysis_version: ANALYSIS_VERSION.to_string(),
        }
    }
}
