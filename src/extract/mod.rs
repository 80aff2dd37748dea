//! Structured extraction of profile records from fetched pages
//!
//! The extractor is a pure function of the fetched page (plus the timestamp it
//! stamps on the record): the same page always yields the same record.

mod dates;
pub mod rules;

pub use dates::{parse_date_range, parse_tenure_months, years_in, DateRange};

use crate::config::ExtractorConfig;
use crate::model::{
    Certification, Education, Experience, Language, ProfileRecord, Project, RecordMetadata, Skill,
    Volunteer,
};
use crate::scrape::FetchResult;
use chrono::{DateTime, Utc};
use regex::Regex;
use rules::{first_value, section_items, FieldRule};
use scraper::{ElementRef, Html};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Fields whose absence marks a record incomplete
const EXPECTED_FIELDS: &[&str] = &["name", "headline", "location", "experience", "skills", "education"];

/// Profile id for a source URL: the lower-cased `/in/<slug>` segment
///
/// Falls back to the whole URL when there is no slug.
pub fn profile_id_from_url(url: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(r"/in/([A-Za-z0-9-]+)").expect("slug pattern is a valid regex"));

    pattern
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_else(|| url.to_string())
}

/// Maps fetched pages to [`ProfileRecord`]s
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extracts a record, stamping it with the current time
    pub fn extract(&self, page: &FetchResult) -> Option<ProfileRecord> {
        self.extract_at(page, Utc::now())
    }

    /// Extracts a record from `page`
    ///
    /// Returns None when the page lacks a name, or has a name but none of
    /// headline, experience or skills. Any other missing field leaves the
    /// record incomplete but still returned.
    pub fn extract_at(&self, page: &FetchResult, now: DateTime<Utc>) -> Option<ProfileRecord> {
        let document = Html::parse_document(&page.markup);
        let root = document.root_element();
        let title = page.title.as_str();
        let field = |rules: &[FieldRule]| first_value(rules, root, title).unwrap_or_default();

        let experience = self.experience(root);
        let current = experience
            .iter()
            .find(|e| e.is_current)
            .or_else(|| experience.first());
        let current_position = current.map(|e| e.title.clone()).unwrap_or_default();
        let current_company = current.map(|e| e.company.clone()).unwrap_or_default();

        let mut record = ProfileRecord {
            profile_id: profile_id_from_url(&page.url),
            name: field(rules::NAME),
            headline: field(rules::HEADLINE),
            location: field(rules::LOCATION),
            summary: field(rules::SUMMARY),
            profile_image_url: field(rules::PROFILE_IMAGE),
            current_position,
            current_company,
            experience,
            education: self.education(root),
            skills: self.skills(root),
            certifications: self.certifications(root),
            languages: self.languages(root),
            projects: self.projects(root),
            volunteer: self.volunteer(root),
            metadata: RecordMetadata {
                source_url: page.url.clone(),
                extracted_at: now,
                complete: false,
                missing_fields: Vec::new(),
            },
            raw_markup: self.config.retain_markup.then(|| page.markup.clone()),
        };

        if !record.has_minimum_data() {
            warn!("Could not extract minimum profile data from {}", page.url);
            return None;
        }

        let missing = missing_fields(&record);
        record.metadata.complete = missing.is_empty();
        if missing.is_empty() {
            info!("Extracted complete profile from {}", page.url);
        } else {
            warn!(
                "Incomplete profile extracted from {}: missing {}",
                page.url,
                missing.join(", ")
            );
        }
        record.metadata.missing_fields = missing;

        Some(record)
    }

    fn experience(&self, root: ElementRef<'_>) -> Vec<Experience> {
        section_items(rules::EXPERIENCE_ITEMS, root)
            .into_iter()
            .filter_map(|item| {
                let value = |rules: &[FieldRule]| first_value(rules, item, "").unwrap_or_default();
                let title = value(rules::EXPERIENCE_TITLE);
                if title.is_empty() {
                    debug!("Skipping experience entry without a title");
                    return None;
                }
                let duration = value(rules::EXPERIENCE_DURATION);
                let range = parse_date_range(&duration);
                Some(Experience {
                    title,
                    company: value(rules::EXPERIENCE_COMPANY),
                    duration,
                    location: value(rules::EXPERIENCE_LOCATION),
                    description: value(rules::EXPERIENCE_DESCRIPTION),
                    start_date: range.start,
                    end_date: range.end,
                    is_current: range.is_current,
                })
            })
            .take(self.config.max_experience)
            .collect()
    }

    fn education(&self, root: ElementRef<'_>) -> Vec<Education> {
        section_items(rules::EDUCATION_ITEMS, root)
            .into_iter()
            .filter_map(|item| {
                let value = |rules: &[FieldRule]| first_value(rules, item, "").unwrap_or_default();
                let institution = value(rules::EDUCATION_INSTITUTION);
                if institution.is_empty() {
                    return None;
                }
                let years = years_in(&value(rules::EDUCATION_DATES));
                Some(Education {
                    institution,
                    degree: value(rules::EDUCATION_DEGREE),
                    field_of_study: value(rules::EDUCATION_FIELD),
                    start_year: years.first().copied(),
                    end_year: years.get(1).copied(),
                })
            })
            .take(self.config.max_education)
            .collect()
    }

    fn skills(&self, root: ElementRef<'_>) -> Vec<Skill> {
        section_items(rules::SKILL_ITEMS, root)
            .into_iter()
            .filter_map(|item| {
                let name = first_value(rules::SKILL_NAME, item, "")?;
                let endorsements =
                    first_value(rules::SKILL_ENDORSEMENTS, item, "").and_then(|t| leading_number(&t));
                Some(Skill { name, endorsements })
            })
            .take(self.config.max_skills)
            .collect()
    }

    fn certifications(&self, root: ElementRef<'_>) -> Vec<Certification> {
        section_items(rules::CERTIFICATION_ITEMS, root)
            .into_iter()
            .filter_map(|item| {
                Some(Certification {
                    name: first_value(rules::CERTIFICATION_NAME, item, "")?,
                    issuing_organization: first_value(rules::CERTIFICATION_ISSUER, item, "")
                        .unwrap_or_default(),
                })
            })
            .take(self.config.max_certifications)
            .collect()
    }

    fn languages(&self, root: ElementRef<'_>) -> Vec<Language> {
        section_items(rules::LANGUAGE_ITEMS, root)
            .into_iter()
            .filter_map(|item| {
                Some(Language {
                    name: first_value(rules::LANGUAGE_NAME, item, "")?,
                    proficiency: first_value(rules::LANGUAGE_PROFICIENCY, item, "")
                        .unwrap_or_default(),
                })
            })
            .take(self.config.max_languages)
            .collect()
    }

    fn projects(&self, root: ElementRef<'_>) -> Vec<Project> {
        section_items(rules::PROJECT_ITEMS, root)
            .into_iter()
            .filter_map(|item| {
                Some(Project {
                    name: first_value(rules::PROJECT_NAME, item, "")?,
                    description: first_value(rules::PROJECT_DESCRIPTION, item, "")
                        .unwrap_or_default(),
                })
            })
            .take(self.config.max_projects)
            .collect()
    }

    fn volunteer(&self, root: ElementRef<'_>) -> Vec<Volunteer> {
        section_items(rules::VOLUNTEER_ITEMS, root)
            .into_iter()
            .filter_map(|item| {
                Some(Volunteer {
                    role: first_value(rules::VOLUNTEER_ROLE, item, "")?,
                    organization: first_value(rules::VOLUNTEER_ORGANIZATION, item, "")
                        .unwrap_or_default(),
                })
            })
            .take(self.config.max_volunteer)
            .collect()
    }
}

fn missing_fields(record: &ProfileRecord) -> Vec<String> {
    EXPECTED_FIELDS
        .iter()
        .filter(|field| match **field {
            "name" => record.name.is_empty(),
            "headline" => record.headline.is_empty(),
            "location" => record.location.is_empty(),
            "experience" => record.experience.is_empty(),
            "skills" => record.skills.is_empty(),
            "education" => record.education.is_empty(),
            _ => false,
        })
        .map(|field| field.to_string())
        .collect()
}

/// First run of digits in `text`, ignoring thousands separators
fn leading_number(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyKind;
    use chrono::{NaiveDate, TimeZone};

    const PROFILE_PAGE: &str = r#"<html>
      <head>
        <title>Jane Doe - Staff Engineer | LinkedIn</title>
        <meta property="og:image" content="https://media.example.com/jane.jpg">
      </head>
      <body>
        <h1 class="text-heading-xlarge">Jane   Doe</h1>
        <div class="text-body-medium break-words">Staff Engineer at Acme</div>
        <span class="text-body-small inline t-black--light break-words">Berlin, Germany</span>
        <div class="pv-about__summary-text">Builds distributed systems.</div>
        <ul>
          <li class="experience-item">
            <h3>Staff Engineer</h3>
            <p class="experience-item__subtitle">Acme</p>
            <span class="date-range">Jan 2018 - Present · 6 yrs</span>
          </li>
          <li class="experience-item">
            <h3>Software Engineer</h3>
            <p class="experience-item__subtitle">Google</p>
            <span class="date-range">Jun 2014 - Dec 2017</span>
          </li>
          <li class="experience-item"><p>no title here</p></li>
        </ul>
        <ul>
          <li data-test-id="skill"><span data-test-id="skill-name">Rust</span>
              <span data-test-id="skill-endorsements">1,204 endorsements</span></li>
          <li data-test-id="skill"><span data-test-id="skill-name">Leadership</span></li>
        </ul>
        <div data-test-id="education-item">
          <h3>TU Berlin</h3>
          <span data-test-id="education-degree">MSc</span>
          <span data-test-id="education-field">Computer Science</span>
          <span data-test-id="education-dates">2010 – 2014</span>
        </div>
        <div data-test-id="language"><h4>German</h4>
          <span data-test-id="language-proficiency">Native</span></div>
      </body>
    </html>"#;

    fn page(markup: &str) -> FetchResult {
        FetchResult {
            url: "https://www.linkedin.com/in/Jane-Doe".to_string(),
            title: read_title(markup),
            content: String::new(),
            markup: markup.to_string(),
            strategy: StrategyKind::Lightweight,
            status_code: 200,
        }
    }

    fn read_title(markup: &str) -> String {
        crate::scrape::read_page(markup).title
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_extracts_identity_fields() {
        let record = Extractor::default().extract_at(&page(PROFILE_PAGE), now()).unwrap();

        assert_eq!(record.profile_id, "jane-doe");
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.headline, "Staff Engineer at Acme");
        assert_eq!(record.location, "Berlin, Germany");
        assert_eq!(record.summary, "Builds distributed systems.");
        assert_eq!(record.profile_image_url, "https://media.example.com/jane.jpg");
        assert_eq!(record.metadata.extracted_at, now());
    }

    #[test]
    fn test_extracts_sections() {
        let record = Extractor::default().extract_at(&page(PROFILE_PAGE), now()).unwrap();

        assert_eq!(record.experience.len(), 2);
        let current = &record.experience[0];
        assert_eq!(current.company, "Acme");
        assert!(current.is_current);
        assert_eq!(current.start_date, NaiveDate::from_ymd_opt(2018, 1, 1));
        assert_eq!(record.experience[1].end_date, NaiveDate::from_ymd_opt(2017, 12, 1));

        assert_eq!(record.current_position, "Staff Engineer");
        assert_eq!(record.current_company, "Acme");

        assert_eq!(record.skills.len(), 2);
        assert_eq!(record.skills[0].name, "Rust");
        assert_eq!(record.skills[0].endorsements, Some(1204));
        assert_eq!(record.skills[1].endorsements, None);

        assert_eq!(record.education.len(), 1);
        assert_eq!(record.education[0].degree, "MSc");
        assert_eq!(record.education[0].start_year, Some(2010));
        assert_eq!(record.education[0].end_year, Some(2014));

        assert_eq!(record.languages[0].name, "German");
        assert_eq!(record.languages[0].proficiency, "Native");
        assert!(record.projects.is_empty());
        assert!(record.metadata.complete);
        assert!(record.raw_markup.is_none());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = Extractor::default();
        let page = page(PROFILE_PAGE);
        assert_eq!(extractor.extract_at(&page, now()), extractor.extract_at(&page, now()));
    }

    #[test]
    fn test_section_caps() {
        let config = ExtractorConfig {
            max_experience: 1,
            max_skills: 1,
            ..ExtractorConfig::default()
        };
        let record = Extractor::new(config).extract_at(&page(PROFILE_PAGE), now()).unwrap();
        assert_eq!(record.experience.len(), 1);
        assert_eq!(record.skills.len(), 1);
    }

    #[test]
    fn test_caps_count_usable_entries_only() {
        let markup = r#"<html><body>
            <h1 class="text-heading-xlarge">Jane Doe</h1>
            <ul>
              <li class="experience-item"><p>ad slot</p></li>
              <li class="experience-item"><p>sponsored</p></li>
              <li class="experience-item"><h3>Engineer</h3></li>
            </ul>
        </body></html>"#;
        let config = ExtractorConfig {
            max_experience: 1,
            ..ExtractorConfig::default()
        };
        let record = Extractor::new(config).extract_at(&page(markup), now()).unwrap();

        assert_eq!(record.experience.len(), 1);
        assert_eq!(record.experience[0].title, "Engineer");
    }

    #[test]
    fn test_login_wall_is_not_a_profile() {
        let markup = r#"<html><head><title>Sign in | LinkedIn</title></head>
            <body><div class="text-body-medium break-words">Welcome back</div></body></html>"#;
        assert!(Extractor::default().extract_at(&page(markup), now()).is_none());
    }

    #[test]
    fn test_retain_markup() {
        let config = ExtractorConfig {
            retain_markup: true,
            ..ExtractorConfig::default()
        };
        let record = Extractor::new(config).extract_at(&page(PROFILE_PAGE), now()).unwrap();
        assert_eq!(record.raw_markup.as_deref(), Some(PROFILE_PAGE));
    }

    #[test]
    fn test_name_only_is_none() {
        let markup = r#"<html><body><h1 class="text-heading-xlarge">Jane Doe</h1></body></html>"#;
        assert!(Extractor::default().extract_at(&page(markup), now()).is_none());
    }

    #[test]
    fn test_no_name_is_none() {
        let markup = r#"<html><body><div class="text-body-medium break-words">Engineer</div></body></html>"#;
        assert!(Extractor::default().extract_at(&page(markup), now()).is_none());
    }

    #[test]
    fn test_name_and_headline_is_incomplete_record() {
        let markup = r#"<html><body>
            <h1 class="text-heading-xlarge">Jane Doe</h1>
            <div class="text-body-medium break-words">Engineer</div>
        </body></html>"#;
        let record = Extractor::default().extract_at(&page(markup), now()).unwrap();

        assert!(!record.metadata.complete);
        assert_eq!(
            record.metadata.missing_fields,
            vec!["location", "experience", "skills", "education"]
        );
        assert!(record.experience.is_empty());
    }

    #[test]
    fn test_name_from_title_fallback() {
        let markup = r#"<html><head><title>John Roe - Analyst | LinkedIn</title></head>
            <body><div class="text-body-medium break-words">Analyst</div></body></html>"#;
        let record = Extractor::default().extract_at(&page(markup), now()).unwrap();
        assert_eq!(record.name, "John Roe");
    }

    #[test]
    fn test_profile_id_from_url() {
        assert_eq!(profile_id_from_url("https://www.linkedin.com/in/Jane-Doe/"), "jane-doe");
        assert_eq!(profile_id_from_url("http://127.0.0.1:1234/x"), "http://127.0.0.1:1234/x");
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("1,204 endorsements"), Some(1204));
        assert_eq!(leading_number("Endorsed by 12"), Some(12));
        assert_eq!(leading_number("none"), None);
    }
}
