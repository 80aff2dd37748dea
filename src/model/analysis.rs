use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version stamped on every analysis result
pub const ANALYSIS_VERSION: &str = "1.0";

/// Seniority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CareerLevel {
    #[serde(rename = "Entry-Level")]
    Entry,
    #[serde(rename = "Mid-Level")]
    Mid,
    Senior,
    Executive,
}

impl CareerLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "Entry-Level",
            Self::Mid => "Mid-Level",
            Self::Senior => "Senior",
            Self::Executive => "Executive",
        }
    }
}

impl fmt::Display for CareerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketDemand {
    #[serde(rename = "Very High")]
    VeryHigh,
    High,
    Medium,
    Low,
}

impl MarketDemand {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for MarketDemand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-cased skill names grouped by category
///
/// A skill appears in at most one of technical, soft_skills and
/// domain_specific, may additionally appear in trending, and lands in other
/// only when it matched nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategories {
    pub technical: Vec<String>,
    pub soft_skills: Vec<String>,
    pub domain_specific: Vec<String>,
    pub trending: Vec<String>,
    pub other: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryFactors {
    pub experience_years: u32,
    pub career_level: CareerLevel,
    pub primary_industry: String,
    pub market_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryEstimate {
    pub currency: String,
    pub min_salary: u32,
    pub max_salary: u32,
    pub confidence: String,
    pub factors: SalaryFactors,
}

/// Scores, classifications and recommendations for one record
///
/// Integer scores are in `0..=100`; `confidence` is in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub profile_id: String,
    pub career_level: CareerLevel,
    pub years_experience: u32,
    pub industry_focus: Vec<String>,
    pub skill_categories: SkillCategories,
    pub completeness_score: u8,
    pub skill_relevance_score: u8,
    pub experience_value_score: u8,
    pub market_competitiveness_score: u8,
    pub market_demand: MarketDemand,
    pub salary_estimate: SalaryEstimate,
    pub career_recommendations: Vec<String>,
    pub skill_recommendations: Vec<String>,
    pub skill_gaps: Vec<String>,
    pub confidence: f64,
    pub analyzed_at: DateTime<Utc>,
    pub analysis_version: String,
}
