//! Keyword and reference tables
//!
//! All matching is case-insensitive substring matching against lower-cased
//! text, so every keyword here is written in lower case. Table order is
//! significant where noted.

/// Industry → keywords, in tie-break order
pub const INDUSTRIES: &[(&str, &[&str])] = &[
    (
        "Technology",
        &["software", "tech", "development", "programming", "digital"],
    ),
    (
        "Finance",
        &["finance", "banking", "investment", "trading", "fintech"],
    ),
    (
        "Healthcare",
        &["healthcare", "medical", "hospital", "pharma", "biotech"],
    ),
    (
        "Education",
        &["education", "university", "school", "teaching", "training"],
    ),
    (
        "Marketing",
        &["marketing", "advertising", "brand", "social media", "seo"],
    ),
    (
        "Consulting",
        &["consulting", "advisory", "strategy", "management consulting"],
    ),
    ("Retail", &["retail", "e-commerce", "sales", "merchandising"]),
    (
        "Manufacturing",
        &["manufacturing", "production", "operations", "supply chain"],
    ),
];

pub const TECHNICAL_SKILLS: &[&str] = &[
    "python",
    "javascript",
    "java",
    "c++",
    "react",
    "node.js",
    "aws",
    "docker",
    "kubernetes",
    "git",
    "sql",
    "mongodb",
    "machine learning",
    "data science",
    "ai",
    "devops",
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "project management",
    "team management",
    "problem solving",
    "strategic planning",
    "negotiation",
    "presentation",
    "critical thinking",
];

pub const DOMAIN_SKILLS: &[&str] = &[
    "digital marketing",
    "seo",
    "content marketing",
    "financial analysis",
    "business analysis",
    "sales",
    "customer service",
    "product management",
    "ux design",
];

/// Skills in high demand, in recommendation order (display casing)
pub const TRENDING_SKILLS: &[&str] = &[
    "Artificial Intelligence",
    "Machine Learning",
    "Cloud Computing",
    "Cybersecurity",
    "Data Engineering",
    "DevOps",
    "Blockchain",
    "IoT",
    "Edge Computing",
    "Quantum Computing",
    "AR/VR",
];

/// Title keywords that put a profile in the executive tier regardless of tenure
pub const LEADERSHIP_KEYWORDS: &[&str] = &[
    "director", "manager", "lead", "head", "chief", "vp", "cto", "ceo",
];

/// Title keywords counted towards the seniority part of experience value
pub const SENIORITY_KEYWORDS: &[&str] = &["senior", "lead", "manager", "director", "head", "chief"];

pub const PRESTIGE_EMPLOYERS: &[&str] = &[
    "google",
    "microsoft",
    "apple",
    "amazon",
    "facebook",
    "meta",
    "netflix",
    "tesla",
    "ibm",
    "oracle",
    "salesforce",
    "adobe",
];

/// Skills expected of anyone whose focus includes Technology
pub const TECHNOLOGY_REQUIRED_SKILLS: &[&str] = &[
    "cloud computing",
    "data analysis",
    "cybersecurity",
    "agile methodology",
    "version control",
];

pub const TECHNOLOGY_TRACK: &[&str] = &[
    "Cloud Computing (AWS/Azure)",
    "DevOps and CI/CD",
    "Data Science and Analytics",
    "Cybersecurity Fundamentals",
];

pub const ENTRY_RECOMMENDATIONS: &[&str] = &[
    "Focus on building core technical skills",
    "Seek mentorship opportunities",
    "Contribute to open-source projects",
    "Build a portfolio of projects",
];

pub const MID_RECOMMENDATIONS: &[&str] = &[
    "Develop leadership and team management skills",
    "Consider specializing in a niche area",
    "Start mentoring junior colleagues",
    "Pursue relevant certifications",
];

pub const SENIOR_RECOMMENDATIONS: &[&str] = &[
    "Focus on strategic thinking and business impact",
    "Build cross-functional collaboration skills",
    "Consider moving into management roles",
    "Expand your professional network",
];

/// True when any keyword occurs in the lower-cased `text`
pub fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(&k.to_lowercase()))
}
