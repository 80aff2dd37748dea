//! Skill categorization, relevance and recommendations

use crate::analysis::tables::{
    mentions_any, DOMAIN_SKILLS, SOFT_SKILLS, TECHNICAL_SKILLS, TECHNOLOGY_REQUIRED_SKILLS,
    TECHNOLOGY_TRACK, TRENDING_SKILLS,
};
use crate::analysis::clamp_score;
use crate::config::{RecommendationCaps, SkillRelevanceWeights};
use crate::model::{ProfileRecord, SkillCategories};

const TECHNOLOGY: &str = "Technology";

fn lowered_skills(record: &ProfileRecord) -> Vec<String> {
    record.skill_names().map(str::to_lowercase).collect()
}

fn is_trending(skill: &str) -> bool {
    mentions_any(skill, TRENDING_SKILLS)
}

fn is_technical(skill: &str) -> bool {
    mentions_any(skill, TECHNICAL_SKILLS)
}

/// Buckets skills by the first matching category, plus trending
pub fn categorize(record: &ProfileRecord) -> SkillCategories {
    let mut categories = SkillCategories::default();

    for skill in lowered_skills(record) {
        let mut matched = true;
        if is_technical(&skill) {
            categories.technical.push(skill.clone());
        } else if mentions_any(&skill, SOFT_SKILLS) {
            categories.soft_skills.push(skill.clone());
        } else if mentions_any(&skill, DOMAIN_SKILLS) {
            categories.domain_specific.push(skill.clone());
        } else {
            matched = false;
        }

        if is_trending(&skill) {
            categories.trending.push(skill);
        } else if !matched {
            categories.other.push(skill);
        }
    }

    categories
}

/// How current the skill set is, 0-100
///
/// Each skill counts at most once as trending and once as technical. No skills
/// means 0.
pub fn skill_relevance(record: &ProfileRecord, weights: &SkillRelevanceWeights) -> u8 {
    let skills = lowered_skills(record);
    if skills.is_empty() {
        return 0;
    }

    let trending = skills.iter().filter(|s| is_trending(s)).count() as f64;
    let technical = skills.iter().filter(|s| is_technical(s)).count() as f64;
    let ratio =
        (trending * weights.trending_weight + technical * weights.technical_weight) / skills.len() as f64;

    clamp_score(ratio * weights.scale)
}

/// Missing trending skills, then technology-track suggestions, capped
pub fn skill_recommendations(
    record: &ProfileRecord,
    industries: &[String],
    caps: &RecommendationCaps,
) -> Vec<String> {
    let skills = lowered_skills(record);
    let mut recommendations: Vec<String> = TRENDING_SKILLS
        .iter()
        .filter(|trending| {
            let needle = trending.to_lowercase();
            !skills.iter().any(|s| s.contains(&needle))
        })
        .map(|trending| format!("Learn {} - High market demand", trending))
        .collect();

    if industries.iter().any(|i| i == TECHNOLOGY) {
        recommendations.extend(
            TECHNOLOGY_TRACK
                .iter()
                .take(caps.technology_track)
                .map(|s| s.to_string()),
        );
    }

    recommendations.truncate(caps.skill_recommendations);
    recommendations
}

/// Required technology skills the record lacks, title-cased
pub fn skill_gaps(record: &ProfileRecord, industries: &[String], cap: usize) -> Vec<String> {
    if !industries.iter().any(|i| i == TECHNOLOGY) {
        return Vec::new();
    }

    let skills = lowered_skills(record);
    TECHNOLOGY_REQUIRED_SKILLS
        .iter()
        .filter(|required| !skills.iter().any(|s| s.contains(*required)))
        .take(cap)
        .map(|required| title_case(required))
        .collect()
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Skill;

    fn record_with_skills(names: &[&str]) -> ProfileRecord {
        let mut record = ProfileRecord::empty("jane", "https://www.linkedin.com/in/jane");
        record.skills = names.iter().map(|n| Skill::named(*n)).collect();
        record
    }

    #[test]
    fn test_categorize() {
        let record = record_with_skills(&["Python", "Leadership", "SEO", "Machine Learning", "Pottery"]);
        let categories = categorize(&record);

        assert_eq!(categories.technical, vec!["python", "machine learning"]);
        assert_eq!(categories.soft_skills, vec!["leadership"]);
        assert_eq!(categories.domain_specific, vec!["seo"]);
        assert_eq!(categories.trending, vec!["machine learning"]);
        assert_eq!(categories.other, vec!["pottery"]);
    }

    #[test]
    fn test_trending_only_skill_is_not_other() {
        let categories = categorize(&record_with_skills(&["Blockchain"]));
        assert_eq!(categories.trending, vec!["blockchain"]);
        assert!(categories.other.is_empty());
    }

    #[test]
    fn test_relevance_empty_is_zero() {
        let weights = SkillRelevanceWeights::default();
        assert_eq!(skill_relevance(&record_with_skills(&[]), &weights), 0);
    }

    #[test]
    fn test_relevance_formula() {
        let weights = SkillRelevanceWeights::default();
        // python: technical; machine learning: technical + trending; pottery: none
        // (1 * 2 + 2 * 1) / 3 * 50 = 66.67
        let record = record_with_skills(&["Python", "Machine Learning", "Pottery"]);
        assert_eq!(skill_relevance(&record, &weights), 66);
    }

    #[test]
    fn test_relevance_is_capped() {
        let weights = SkillRelevanceWeights::default();
        let record = record_with_skills(&["Machine Learning", "DevOps"]);
        assert_eq!(skill_relevance(&record, &weights), 100);
    }

    #[test]
    fn test_recommendations_skip_present_skills() {
        let record = record_with_skills(&["Artificial Intelligence", "Machine Learning"]);
        let recs = skill_recommendations(&record, &[], &RecommendationCaps::default());

        assert_eq!(recs.len(), 5);
        assert_eq!(recs[0], "Learn Cloud Computing - High market demand");
        assert!(recs.iter().all(|r| !r.contains("Machine Learning")));
    }

    #[test]
    fn test_technology_track_added_when_room() {
        let caps = RecommendationCaps {
            skill_recommendations: 20,
            ..RecommendationCaps::default()
        };
        let recs = skill_recommendations(&record_with_skills(&[]), &["Technology".to_string()], &caps);
        assert_eq!(recs.len(), TRENDING_SKILLS.len() + 2);
        assert_eq!(recs.last().map(String::as_str), Some("DevOps and CI/CD"));
    }

    #[test]
    fn test_skill_gaps() {
        let record = record_with_skills(&["Cloud Computing", "Git version control"]);
        let gaps = skill_gaps(&record, &["Technology".to_string()], 5);
        assert_eq!(gaps, vec!["Data Analysis", "Cybersecurity", "Agile Methodology"]);

        assert!(skill_gaps(&record, &["Finance".to_string()], 5).is_empty());
    }
}
