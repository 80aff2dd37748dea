//! Numeric scores, market demand, salary and confidence

use crate::analysis::clamp_score;
use crate::analysis::tables::{mentions_any, PRESTIGE_EMPLOYERS, SENIORITY_KEYWORDS};
use crate::config::{
    CompetitivenessWeights, CompletenessWeights, ConfidenceBonuses, ExperienceValueWeights,
    MarketDemandThresholds, SalaryTable,
};
use crate::model::{CareerLevel, MarketDemand, ProfileRecord, SalaryEstimate, SalaryFactors, SkillCategories};

fn present(flag: bool, points: u32) -> u32 {
    if flag {
        points
    } else {
        0
    }
}

fn per_item(count: usize, points: u32, cap: u32) -> u32 {
    (count as u32).saturating_mul(points).min(cap)
}

/// Weighted presence of profile sections
pub fn completeness(record: &ProfileRecord, w: &CompletenessWeights) -> u8 {
    let score = present(!record.name.is_empty(), w.name)
        + present(!record.headline.is_empty(), w.headline)
        + present(!record.summary.is_empty(), w.summary)
        + present(!record.location.is_empty(), w.location)
        + present(!record.profile_image_url.is_empty(), w.profile_image)
        + per_item(record.experience.len(), w.per_experience, w.experience_cap)
        + per_item(record.skills.len(), w.per_skill, w.skills_cap)
        + per_item(record.education.len(), w.per_education, w.education_cap)
        + present(!record.certifications.is_empty(), w.certifications)
        + present(!record.projects.is_empty(), w.projects)
        + present(!record.languages.is_empty(), w.languages)
        + present(!record.volunteer.is_empty(), w.volunteer);

    clamp_score(score as f64)
}

/// Tenure, prestige employers and senior titles, each capped; 0 without experience
pub fn experience_value(record: &ProfileRecord, years: u32, w: &ExperienceValueWeights) -> u8 {
    if record.experience.is_empty() {
        return 0;
    }

    let tenure = years.saturating_mul(w.per_year).min(w.years_cap);

    let prestige_count = record
        .experience
        .iter()
        .filter(|e| !e.company.is_empty())
        .filter(|e| mentions_any(&e.company.to_lowercase(), PRESTIGE_EMPLOYERS))
        .count();
    let prestige = per_item(prestige_count, w.per_prestige_employer, w.prestige_cap);

    let senior_count = record
        .experience
        .iter()
        .filter(|e| mentions_any(&e.title.to_lowercase(), SENIORITY_KEYWORDS))
        .count();
    let seniority = per_item(senior_count, w.per_senior_title, w.seniority_cap);

    clamp_score((tenure + prestige + seniority) as f64)
}

pub fn competitiveness(
    completeness: u8,
    skill_relevance: u8,
    experience_value: u8,
    w: &CompetitivenessWeights,
) -> u8 {
    clamp_score(
        completeness as f64 * w.completeness
            + skill_relevance as f64 * w.skill_relevance
            + experience_value as f64 * w.experience_value,
    )
}

/// Band of the mean of skill relevance and experience value
pub fn market_demand(skill_relevance: u8, experience_value: u8, t: &MarketDemandThresholds) -> MarketDemand {
    let average = (skill_relevance as f64 + experience_value as f64) / 2.0;
    if average >= t.very_high {
        MarketDemand::VeryHigh
    } else if average >= t.high {
        MarketDemand::High
    } else if average >= t.medium {
        MarketDemand::Medium
    } else {
        MarketDemand::Low
    }
}

/// Base band for the tier scaled by the highest matching industry multiplier
pub fn salary_estimate(
    level: CareerLevel,
    years: u32,
    industries: &[String],
    table: &SalaryTable,
) -> SalaryEstimate {
    let band = match level {
        CareerLevel::Entry => table.entry,
        CareerLevel::Mid => table.mid,
        CareerLevel::Senior => table.senior,
        CareerLevel::Executive => table.executive,
    };

    let multiplier = industries
        .iter()
        .filter_map(|industry| {
            table
                .industry_multipliers
                .iter()
                .find(|(name, _)| name == industry)
                .map(|(_, m)| *m)
        })
        .fold(1.0_f64, f64::max);

    SalaryEstimate {
        currency: table.currency.clone(),
        min_salary: (band.min as f64 * multiplier).floor() as u32,
        max_salary: (band.max as f64 * multiplier).floor() as u32,
        confidence: "Medium".to_string(),
        factors: SalaryFactors {
            experience_years: years,
            career_level: level,
            primary_industry: industries
                .first()
                .cloned()
                .unwrap_or_else(|| "General".to_string()),
            market_multiplier: multiplier,
        },
    }
}

/// Completeness fraction plus fixed bonuses, in `[0, 1]` rounded to 2 places
pub fn confidence(
    completeness: u8,
    industries: &[String],
    categories: &SkillCategories,
    experience_value: u8,
    b: &ConfidenceBonuses,
) -> f64 {
    let mut value = completeness as f64 / 100.0;
    if !industries.is_empty() {
        value += b.industry_focus;
    }
    if !categories.technical.is_empty() {
        value += b.technical_skills;
    }
    if experience_value as u32 > b.experience_value_threshold {
        value += b.experience_value;
    }
    if value.is_nan() {
        return 0.0;
    }
    (value.clamp(0.0, 1.0) * 100.0).round() / 100.0
}
