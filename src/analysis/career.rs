//! Tenure, career tier and industry rules

use crate::analysis::tables::{
    mentions_any, ENTRY_RECOMMENDATIONS, INDUSTRIES, LEADERSHIP_KEYWORDS, MID_RECOMMENDATIONS,
    SENIOR_RECOMMENDATIONS,
};
use crate::config::CareerThresholds;
use crate::extract::parse_tenure_months;
use crate::model::{CareerLevel, Experience, ProfileRecord};
use chrono::{DateTime, NaiveDate, Utc};

const DAYS_PER_YEAR: f64 = 365.25;

/// Years one entry contributes, or None when it has nothing usable
fn entry_years(entry: &Experience, today: NaiveDate) -> Option<f64> {
    let from_dates = match (entry.start_date, entry.end_date) {
        (Some(start), Some(end)) => Some((end - start).num_days()),
        (Some(start), None) if entry.is_current => Some((today - start).num_days()),
        _ => None,
    };

    match from_dates {
        Some(days) => Some(days.max(0) as f64 / DAYS_PER_YEAR),
        None => parse_tenure_months(&entry.duration).map(|months| months as f64 / 12.0),
    }
}

/// Whole years of experience across all entries
///
/// Dated entries use their range (ongoing ones run until `now`); undated ones
/// fall back to tenure text such as `2 yrs 3 mos`. The sum is floored.
pub fn years_of_experience(record: &ProfileRecord, now: DateTime<Utc>) -> u32 {
    let today = now.date_naive();
    let total: f64 = record
        .experience
        .iter()
        .filter_map(|entry| entry_years(entry, today))
        .sum();
    total.floor() as u32
}

pub fn has_leadership_title(record: &ProfileRecord) -> bool {
    record
        .experience
        .iter()
        .any(|entry| mentions_any(&entry.title.to_lowercase(), LEADERSHIP_KEYWORDS))
}

/// Executive > Senior > Mid > Entry; a leadership title alone means Executive
pub fn career_level(record: &ProfileRecord, years: u32, thresholds: &CareerThresholds) -> CareerLevel {
    if years >= thresholds.executive_years || has_leadership_title(record) {
        CareerLevel::Executive
    } else if years >= thresholds.senior_years {
        CareerLevel::Senior
    } else if years >= thresholds.mid_years {
        CareerLevel::Mid
    } else {
        CareerLevel::Entry
    }
}

/// Industries whose keywords appear in titles, companies, skills or headline
///
/// Returned in table order, at most `cap` of them.
pub fn industry_focus(record: &ProfileRecord, cap: usize) -> Vec<String> {
    let experience_text = record
        .experience
        .iter()
        .map(|e| format!("{} {}", e.title, e.company))
        .collect::<Vec<_>>()
        .join(" ");
    let skills_text = record.skill_names().collect::<Vec<_>>().join(" ");
    let combined = format!("{} {} {}", experience_text, skills_text, record.headline).to_lowercase();

    INDUSTRIES
        .iter()
        .filter(|(_, keywords)| mentions_any(&combined, keywords))
        .map(|(industry, _)| industry.to_string())
        .take(cap)
        .collect()
}

pub fn career_recommendations(level: CareerLevel, cap: usize) -> Vec<String> {
    let advice: &[&str] = match level {
        CareerLevel::Entry => ENTRY_RECOMMENDATIONS,
        CareerLevel::Mid => MID_RECOMMENDATIONS,
        CareerLevel::Senior => SENIOR_RECOMMENDATIONS,
        CareerLevel::Executive => &[],
    };
    advice.iter().take(cap).map(|s| s.to_string()).collect()
}
