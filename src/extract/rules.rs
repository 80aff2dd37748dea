//! Selector rule tables
//!
//! Each field has an ordered list of rules; the first rule producing a
//! non-empty value wins and the rest are not evaluated. List sections name the
//! item containers to try (the first container selector yielding any item is
//! used) and per-subfield rule lists evaluated inside each item.

use crate::scrape::collapse_whitespace;
use scraper::{ElementRef, Selector};
use tracing::debug;

/// How to read one value from a document or section item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Text of the first element matching the selector
    Css(&'static str),
    /// An attribute of the first element matching the selector
    Attr {
        selector: &'static str,
        attr: &'static str,
    },
    /// One ` | ` or ` - ` separated segment of the page title
    TitleSegment(usize),
    /// Text of the scope element itself
    Own,
}

impl FieldRule {
    /// Evaluates the rule inside `scope`; None when it yields nothing
    pub fn apply(&self, scope: ElementRef<'_>, page_title: &str) -> Option<String> {
        let value = match *self {
            Self::Css(selector) => first_match(scope, selector).map(element_text),
            Self::Attr { selector, attr } => first_match(scope, selector)
                .and_then(|el| el.value().attr(attr))
                .map(collapse_whitespace),
            Self::TitleSegment(index) => page_title
                .split(" | ")
                .next()
                .filter(|head| !is_wall_title(head))
                .and_then(|head| head.split(" - ").nth(index))
                .map(collapse_whitespace),
            Self::Own => Some(element_text(scope)),
        };
        value.filter(|v| !v.is_empty())
    }
}

/// Applies rules in order and returns the first non-empty value
pub fn first_value(rules: &[FieldRule], scope: ElementRef<'_>, page_title: &str) -> Option<String> {
    rules.iter().find_map(|rule| rule.apply(scope, page_title))
}

/// Items of a list section under `scope`
///
/// Container selectors are tried in order and every match of the first one
/// with any match is returned. Section caps apply to the entries built from
/// these items, after unusable ones are dropped.
pub fn section_items<'a>(containers: &[&'static str], scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    for container in containers {
        let Some(selector) = parse_selector(container) else {
            continue;
        };
        let items: Vec<_> = scope.select(&selector).collect();
        if !items.is_empty() {
            return items;
        }
    }
    Vec::new()
}

/// Titles of login and sign-up pages served in place of a profile
const WALL_TITLES: &[&str] = &[
    "sign in",
    "sign up",
    "log in",
    "login",
    "join linkedin",
    "linkedin",
    "security verification",
];

fn is_wall_title(head: &str) -> bool {
    let head = collapse_whitespace(head).to_lowercase();
    WALL_TITLES
        .iter()
        .any(|wall| head == *wall || head.starts_with(&format!("{} ", wall)))
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!("Skipping invalid selector {:?}: {:?}", selector, e);
            None
        }
    }
}

fn first_match<'a>(scope: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let selector = parse_selector(selector)?;
    let found = scope.select(&selector).next();
    found
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

pub const NAME: &[FieldRule] = &[
    FieldRule::Css("h1.text-heading-xlarge"),
    FieldRule::Css(".pv-text-details__left-panel h1"),
    FieldRule::Css("[data-test-id=\"profile-name\"]"),
    FieldRule::Css("h1.top-card-layout__title"),
    FieldRule::TitleSegment(0),
];

pub const HEADLINE: &[FieldRule] = &[
    FieldRule::Css(".text-body-medium.break-words"),
    FieldRule::Css(".pv-text-details__left-panel .text-body-medium"),
    FieldRule::Css("[data-test-id=\"profile-headline\"]"),
    FieldRule::Css("h2.top-card-layout__headline"),
];

pub const LOCATION: &[FieldRule] = &[
    FieldRule::Css(".text-body-small.inline.t-black--light.break-words"),
    FieldRule::Css(".pv-text-details__left-panel .text-body-small"),
    FieldRule::Css("[data-test-id=\"profile-location\"]"),
    FieldRule::Css(".top-card__subline-item"),
];

pub const SUMMARY: &[FieldRule] = &[
    FieldRule::Css(".pv-about__summary-text"),
    FieldRule::Css("[data-test-id=\"profile-summary\"]"),
    FieldRule::Css("section.summary .core-section-container__content"),
];

pub const PROFILE_IMAGE: &[FieldRule] = &[
    FieldRule::Attr {
        selector: "img.pv-top-card-profile-picture__image",
        attr: "src",
    },
    FieldRule::Attr {
        selector: "[data-test-id=\"profile-image\"]",
        attr: "src",
    },
    FieldRule::Attr {
        selector: "meta[property=\"og:image\"]",
        attr: "content",
    },
];

pub const EXPERIENCE_ITEMS: &[&str] = &[
    ".pv-entity__summary-info",
    "li.experience-item",
    "[data-test-id=\"experience-item\"]",
];

pub const EXPERIENCE_TITLE: &[FieldRule] = &[
    FieldRule::Css("h3"),
    FieldRule::Css(".experience-item__title"),
    FieldRule::Css("[data-test-id=\"experience-title\"]"),
];

pub const EXPERIENCE_COMPANY: &[FieldRule] = &[
    FieldRule::Css(".pv-entity__secondary-title"),
    FieldRule::Css(".experience-item__subtitle"),
    FieldRule::Css("[data-test-id=\"experience-company\"]"),
];

pub const EXPERIENCE_DURATION: &[FieldRule] = &[
    FieldRule::Css(".pv-entity__date-range"),
    FieldRule::Css(".date-range"),
    FieldRule::Css("[data-test-id=\"experience-duration\"]"),
];

pub const EXPERIENCE_LOCATION: &[FieldRule] = &[
    FieldRule::Css(".pv-entity__location"),
    FieldRule::Css(".experience-item__location"),
    FieldRule::Css("[data-test-id=\"experience-location\"]"),
];

pub const EXPERIENCE_DESCRIPTION: &[FieldRule] = &[
    FieldRule::Css(".pv-entity__description"),
    FieldRule::Css(".experience-item__description"),
    FieldRule::Css("[data-test-id=\"experience-description\"]"),
];

pub const EDUCATION_ITEMS: &[&str] = &[
    ".pv-education-entity",
    "li.education__list-item",
    "[data-test-id=\"education-item\"]",
];

pub const EDUCATION_INSTITUTION: &[FieldRule] = &[
    FieldRule::Css(".pv-entity__school-name"),
    FieldRule::Css("h3"),
    FieldRule::Css("[data-test-id=\"education-school\"]"),
];

pub const EDUCATION_DEGREE: &[FieldRule] = &[
    FieldRule::Css(".pv-entity__degree-name .pv-entity__comma-item"),
    FieldRule::Css(".education__item--degree-info"),
    FieldRule::Css("[data-test-id=\"education-degree\"]"),
];

pub const EDUCATION_FIELD: &[FieldRule] = &[
    FieldRule::Css(".pv-entity__fos .pv-entity__comma-item"),
    FieldRule::Css("[data-test-id=\"education-field\"]"),
];

pub const EDUCATION_DATES: &[FieldRule] = &[
    FieldRule::Css(".pv-entity__dates"),
    FieldRule::Css(".date-range"),
    FieldRule::Css("[data-test-id=\"education-dates\"]"),
];

pub const SKILL_ITEMS: &[&str] = &[
    ".pv-skill-category-entity",
    "[data-test-id=\"skill\"]",
    ".pv-skill-category-entity__name, .skill-category-entity__name",
];

pub const SKILL_NAME: &[FieldRule] = &[
    FieldRule::Css(".pv-skill-category-entity__name-text"),
    FieldRule::Css("[data-test-id=\"skill-name\"]"),
    FieldRule::Own,
];

pub const SKILL_ENDORSEMENTS: &[FieldRule] = &[
    FieldRule::Css(".pv-skill-category-entity__endorsement-count"),
    FieldRule::Css("[data-test-id=\"skill-endorsements\"]"),
];

pub const CERTIFICATION_ITEMS: &[&str] = &[
    ".pv-certification-entity",
    "[data-test-id=\"certification\"]",
];

pub const CERTIFICATION_NAME: &[FieldRule] = &[
    FieldRule::Css("h3"),
    FieldRule::Css("[data-test-id=\"certification-name\"]"),
];

pub const CERTIFICATION_ISSUER: &[FieldRule] = &[
    FieldRule::Css(".pv-entity__secondary-title"),
    FieldRule::Css("[data-test-id=\"certification-issuer\"]"),
];

pub const LANGUAGE_ITEMS: &[&str] = &[
    ".pv-accomplishment-entity--language",
    "[data-test-id=\"language\"]",
];

pub const LANGUAGE_NAME: &[FieldRule] = &[
    FieldRule::Css("h4"),
    FieldRule::Css("[data-test-id=\"language-name\"]"),
];

pub const LANGUAGE_PROFICIENCY: &[FieldRule] = &[
    FieldRule::Css(".pv-accomplishment-entity__proficiency"),
    FieldRule::Css("[data-test-id=\"language-proficiency\"]"),
];

pub const PROJECT_ITEMS: &[&str] = &[
    ".pv-accomplishment-entity--project",
    "[data-test-id=\"project\"]",
];

pub const PROJECT_NAME: &[FieldRule] = &[
    FieldRule::Css("h4"),
    FieldRule::Css("[data-test-id=\"project-name\"]"),
];

pub const PROJECT_DESCRIPTION: &[FieldRule] = &[
    FieldRule::Css(".pv-accomplishment-entity__description"),
    FieldRule::Css("[data-test-id=\"project-description\"]"),
];

pub const VOLUNTEER_ITEMS: &[&str] = &[
    ".pv-volunteering-entity",
    "[data-test-id=\"volunteer\"]",
];

pub const VOLUNTEER_ROLE: &[FieldRule] = &[
    FieldRule::Css("h3"),
    FieldRule::Css("[data-test-id=\"volunteer-role\"]"),
];

pub const VOLUNTEER_ORGANIZATION: &[FieldRule] = &[
    FieldRule::Css(".pv-entity__secondary-title"),
    FieldRule::Css("[data-test-id=\"volunteer-organization\"]"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_first_rule_wins() {
        let doc = Html::parse_document(
            r#"<html><body><h1 class="text-heading-xlarge">First</h1>
               <div data-test-id="profile-name">Second</div></body></html>"#,
        );
        assert_eq!(
            first_value(NAME, doc.root_element(), ""),
            Some("First".to_string())
        );
    }

    #[test]
    fn test_falls_through_empty_matches() {
        let doc = Html::parse_document(
            r#"<html><body><h1 class="text-heading-xlarge">   </h1>
               <div data-test-id="profile-name">Jane  Doe</div></body></html>"#,
        );
        assert_eq!(
            first_value(NAME, doc.root_element(), ""),
            Some("Jane Doe".to_string())
        );
    }

    #[test]
    fn test_title_segment_fallback() {
        let doc = Html::parse_document("<html><body><p>nothing</p></body></html>");
        assert_eq!(
            first_value(NAME, doc.root_element(), "Jane Doe - Staff Engineer - Acme | LinkedIn"),
            Some("Jane Doe".to_string())
        );
        assert_eq!(
            FieldRule::TitleSegment(1).apply(doc.root_element(), "Jane Doe - Staff Engineer | LinkedIn"),
            Some("Staff Engineer".to_string())
        );
    }

    #[test]
    fn test_attr_rule() {
        let doc = Html::parse_document(
            r#"<html><head><meta property="og:image" content="https://cdn.example.com/p.jpg"></head><body></body></html>"#,
        );
        assert_eq!(
            first_value(PROFILE_IMAGE, doc.root_element(), ""),
            Some("https://cdn.example.com/p.jpg".to_string())
        );
    }

    #[test]
    fn test_section_items_ordered() {
        let doc = Html::parse_document(
            r#"<html><body><ul>
               <li data-test-id="skill">A</li><li data-test-id="skill">B</li><li data-test-id="skill">C</li>
               </ul></body></html>"#,
        );
        let items = section_items(SKILL_ITEMS, doc.root_element());
        assert_eq!(items.len(), 3);
        assert_eq!(first_value(SKILL_NAME, items[0], ""), Some("A".to_string()));
    }

    #[test]
    fn test_login_wall_title_is_not_a_name() {
        let doc = Html::parse_document("<html><body><p>nothing</p></body></html>");
        for title in [
            "Sign in | LinkedIn",
            "Sign Up | LinkedIn",
            "LinkedIn Login, Sign in | LinkedIn",
            "LinkedIn",
        ] {
            assert_eq!(first_value(NAME, doc.root_element(), title), None, "{}", title);
        }
    }

    #[test]
    fn test_invalid_selector_is_skipped() {
        let doc = Html::parse_document("<html><body><p>x</p></body></html>");
        assert_eq!(FieldRule::Css("p[").apply(doc.root_element(), ""), None);
    }
}
