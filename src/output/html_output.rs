//! Standalone HTML report for one profile and its analysis

use crate::analysis::years_of_experience;
use crate::model::{AnalysisResult, Experience, ProfileRecord, SkillCategories};
use crate::output::{file_timestamp, safe_name, Export, ExportFormat};
use chrono::{DateTime, Utc};
use std::fmt::Write;

const MAX_EXPERIENCES: usize = 5;
const MAX_SKILLS_PER_CATEGORY: usize = 10;
const DESCRIPTION_PREVIEW_CHARS: usize = 200;

const STYLE: &str = r#"
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: #333; max-width: 1200px; margin: 0 auto; padding: 20px; background-color: #f5f5f5; }
.container { background: white; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
.header { text-align: center; border-bottom: 3px solid #0077b5; padding-bottom: 20px; margin-bottom: 30px; }
.profile-name { color: #0077b5; font-size: 2.5em; margin: 0; }
.headline { font-size: 1.2em; color: #666; margin: 10px 0; }
.section { margin: 30px 0; padding: 20px; border-left: 4px solid #0077b5; background: #f9f9f9; }
.section h2 { color: #0077b5; margin-top: 0; }
.score-card { display: inline-block; background: #0077b5; color: white; padding: 15px 20px; margin: 10px; border-radius: 8px; text-align: center; min-width: 120px; }
.score-value { font-size: 2em; font-weight: bold; }
.score-label { font-size: 0.9em; }
.skills-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; margin: 20px 0; }
.skill-category { background: #e8f4fd; padding: 15px; border-radius: 8px; }
.recommendations { background: #fff3cd; border: 1px solid #ffeaa7; border-radius: 8px; padding: 15px; margin: 10px 0; }
.experience { margin: 15px 0; padding: 15px; border: 1px solid #ddd; border-radius: 5px; }
.footer { text-align: center; margin-top: 40px; padding-top: 20px; border-top: 1px solid #ddd; color: #666; }
"#;

/// Escapes text for use in HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn or_na(text: &str) -> String {
    if text.is_empty() {
        "N/A".to_string()
    } else {
        escape(text)
    }
}

fn score_card(html: &mut String, value: u8, label: &str) {
    let _ = write!(
        html,
        r#"<div class="score-card"><div class="score-value">{}</div><div class="score-label">{}</div></div>"#,
        value, label
    );
}

fn list_items(html: &mut String, items: &[String]) {
    for item in items {
        let _ = write!(html, "<li>{}</li>", escape(item));
    }
}

fn skills_grid(html: &mut String, categories: &SkillCategories) {
    let groups: [(&str, &Vec<String>); 5] = [
        ("Technical", &categories.technical),
        ("Soft Skills", &categories.soft_skills),
        ("Domain Specific", &categories.domain_specific),
        ("Trending", &categories.trending),
        ("Other", &categories.other),
    ];
    for (label, skills) in groups {
        if skills.is_empty() {
            continue;
        }
        let shown: Vec<String> = skills
            .iter()
            .take(MAX_SKILLS_PER_CATEGORY)
            .map(|s| escape(s))
            .collect();
        let _ = write!(
            html,
            r#"<div class="skill-category"><h4>{}</h4><p>{}</p></div>"#,
            label,
            shown.join(", ")
        );
    }
}

fn experience_blocks(html: &mut String, experience: &[Experience]) {
    if experience.is_empty() {
        html.push_str("<p>No experience data available.</p>");
        return;
    }
    for entry in experience.iter().take(MAX_EXPERIENCES) {
        let preview: String = entry.description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        let _ = write!(
            html,
            r#"<div class="experience"><h4>{}</h4><p><strong>{}</strong></p><p>{}</p>"#,
            or_na(&entry.title),
            or_na(&entry.company),
            or_na(&entry.duration)
        );
        if !preview.is_empty() {
            let ellipsis = if entry.description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
                "..."
            } else {
                ""
            };
            let _ = write!(html, "<p>{}{}</p>", escape(&preview), ellipsis);
        }
        html.push_str("</div>");
    }
}

/// Renders the report
///
/// Writing into a `String` cannot fail, so this returns the export directly.
pub fn export_html_report(
    record: &ProfileRecord,
    analysis: &AnalysisResult,
    now: DateTime<Utc>,
) -> Export {
    let mut html = String::new();
    let name = escape(&record.name);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Profile Analysis - {name}</title>
<style>{style}</style>
</head>
<body>
<div class="container">
<div class="header">
<h1 class="profile-name">{name}</h1>
<p class="headline">{headline}</p>
<p>{location}</p>
</div>
"#,
        name = name,
        style = STYLE,
        headline = escape(&record.headline),
        location = escape(&record.location),
    );

    html.push_str("<div class=\"section\"><h2>Analysis Scores</h2>");
    score_card(&mut html, analysis.completeness_score, "Completeness");
    score_card(&mut html, analysis.skill_relevance_score, "Skill Relevance");
    score_card(&mut html, analysis.experience_value_score, "Experience Value");
    score_card(
        &mut html,
        analysis.market_competitiveness_score,
        "Market Competitiveness",
    );
    html.push_str("</div>\n");

    let _ = write!(
        html,
        r#"<div class="section"><h2>Career Analysis</h2>
<p><strong>Career Level:</strong> {}</p>
<p><strong>Industry Focus:</strong> {}</p>
<p><strong>Market Demand:</strong> {}</p>
<p><strong>Years of Experience:</strong> {}</p>
<p><strong>Estimated Salary:</strong> {} {} - {}</p>
</div>
"#,
        analysis.career_level,
        escape(&analysis.industry_focus.join(", ")),
        analysis.market_demand,
        years_of_experience(record, now),
        escape(&analysis.salary_estimate.currency),
        analysis.salary_estimate.min_salary,
        analysis.salary_estimate.max_salary,
    );

    html.push_str("<div class=\"section\"><h2>Skills Analysis</h2><div class=\"skills-grid\">");
    skills_grid(&mut html, &analysis.skill_categories);
    html.push_str("</div></div>\n");

    html.push_str("<div class=\"section\"><h2>Recommendations</h2>");
    html.push_str("<div class=\"recommendations\"><h3>Skill Recommendations</h3><ul>");
    list_items(&mut html, &analysis.skill_recommendations);
    html.push_str("</ul></div>");
    html.push_str("<div class=\"recommendations\"><h3>Career Recommendations</h3><ul>");
    list_items(&mut html, &analysis.career_recommendations);
    html.push_str("</ul></div></div>\n");

    html.push_str("<div class=\"section\"><h2>Experience Summary</h2>");
    experience_blocks(&mut html, &record.experience);
    html.push_str("</div>\n");

    let _ = write!(
        html,
        r#"<div class="footer"><p>Report generated on {}</p><p>Profile-Lens v{}</p></div>
</div>
</body>
</html>
"#,
        now.format("%B %d, %Y at %I:%M %p"),
        env!("CARGO_PKG_VERSION"),
    );

    Export {
        format: ExportFormat::Html,
        filename: format!(
            "{}_report_{}.html",
            safe_name(&record.name),
            file_timestamp(now)
        ),
        contents: html,
    }
}
