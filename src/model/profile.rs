use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One position in the experience section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    /// Duration as displayed on the page, e.g. `Jan 2018 - Present · 6 yrs`
    pub duration: String,
    pub location: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    pub endorsements: Option<u32>,
}

impl Skill {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endorsements: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub issuing_organization: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub name: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volunteer {
    pub role: String,
    pub organization: String,
}

/// Where and when a record was extracted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub source_url: String,
    pub extracted_at: DateTime<Utc>,
    /// False when some expected fields were not found
    pub complete: bool,
    /// Names of fields the extractor could not fill
    #[serde(default)]
    pub missing_fields: Vec<String>,
}

/// Structured profile extracted from one page
///
/// List fields are always present (possibly empty). Records are built once by
/// the extractor and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Lower-cased URL slug, used as the persistence key
    pub profile_id: String,
    pub name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub profile_image_url: String,
    #[serde(default)]
    pub current_position: String,
    #[serde(default)]
    pub current_company: String,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub volunteer: Vec<Volunteer>,
    pub metadata: RecordMetadata,
    /// Raw page markup, kept only when auditing is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_markup: Option<String>,
}

impl ProfileRecord {
    /// An empty record for `profile_id`; mostly useful for building fixtures
    pub fn empty(profile_id: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
            name: String::new(),
            headline: String::new(),
            location: String::new(),
            summary: String::new(),
            profile_image_url: String::new(),
            current_position: String::new(),
            current_company: String::new(),
            experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            certifications: Vec::new(),
            languages: Vec::new(),
            projects: Vec::new(),
            volunteer: Vec::new(),
            metadata: RecordMetadata {
                source_url: source_url.into(),
                extracted_at: Utc::now(),
                complete: false,
                missing_fields: Vec::new(),
            },
            raw_markup: None,
        }
    }

    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.name.as_str())
    }

    /// Name plus at least one of headline, experience or skills
    pub fn has_minimum_data(&self) -> bool {
        !self.name.is_empty()
            && (!self.headline.is_empty() || !self.experience.is_empty() || !self.skills.is_empty())
    }
}
