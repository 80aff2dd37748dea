//! Data model shared by extraction, analysis, storage and export
//!
//! Everything here is plain data with serde derives. The JSON form of these
//! types is what gets persisted and exported.

mod analysis;
mod profile;

pub use analysis::{
    AnalysisResult, CareerLevel, MarketDemand, SalaryEstimate, SalaryFactors, SkillCategories,
    ANALYSIS_VERSION,
};
pub use profile::{
    Certification, Education, Experience, Language, ProfileRecord, Project, RecordMetadata, Skill,
    Volunteer,
};
