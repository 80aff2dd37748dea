use serde::{Deserialize, Serialize};

/// Main configuration structure for Profile-Lens
///
/// Every section has defaults, so an empty file (or no file at all) yields a
/// working configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub render: RenderConfig,
    pub extractor: ExtractorConfig,
    pub pipeline: PipelineConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
    pub analyzer: AnalyzerConfig,
}

/// Which fetch strategy the orchestrator tries first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    Lightweight,
    Rendered,
}

impl StrategyKind {
    /// The strategy tried after this one
    pub fn other(self) -> Self {
        match self {
            Self::Lightweight => Self::Rendered,
            Self::Rendered => Self::Lightweight,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lightweight => "lightweight",
            Self::Rendered => "rendered",
        }
    }
}

/// HTTP fetching and politeness configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FetcherConfig {
    /// Browser-like User-Agent header sent by both strategies
    pub user_agent: String,

    /// Product token evaluated against robots.txt groups
    pub policy_agent: String,

    /// Whole-request timeout for the lightweight strategy (seconds)
    pub request_timeout_secs: u64,

    /// Connection timeout for the lightweight strategy (seconds)
    pub connect_timeout_secs: u64,

    /// Lower bound of the randomized per-host delay (milliseconds)
    pub min_delay_ms: u64,

    /// Upper bound of the randomized per-host delay (milliseconds)
    pub max_delay_ms: u64,

    /// Content must be longer than this many characters to skip the fallback
    pub min_content_length: usize,

    /// Strategy tried first when the caller gives no hint
    pub default_strategy: StrategyKind,

    /// Consult robots.txt before fetching
    pub check_robots: bool,

    /// Abort when robots.txt disallows the path (otherwise log and proceed)
    pub honor_robots: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
                .to_string(),
            policy_agent: "ProfileLens".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            min_delay_ms: 1000,
            max_delay_ms: 3000,
            min_content_length: 100,
            default_strategy: StrategyKind::Lightweight,
            check_robots: true,
            honor_robots: false,
        }
    }
}

/// Headless browser configuration for the rendered strategy
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RenderConfig {
    /// Number of browser instances; each runs one navigation at a time
    pub pool_size: usize,

    /// Bounded wait for the document body to appear (seconds)
    pub readiness_timeout_secs: u64,

    /// Extra wait after readiness for client-side rendering (milliseconds)
    pub settle_delay_ms: u64,

    pub headless: bool,

    /// Explicit Chrome/Chromium binary; auto-detected when absent
    pub chrome_path: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pool_size: 1,
            readiness_timeout_secs: 10,
            settle_delay_ms: 2000,
            headless: true,
            chrome_path: None,
        }
    }
}

/// Per-section caps applied during extraction
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExtractorConfig {
    pub max_experience: usize,
    pub max_skills: usize,
    pub max_education: usize,
    pub max_certifications: usize,
    pub max_languages: usize,
    pub max_projects: usize,
    pub max_volunteer: usize,

    /// Keep the raw markup on the record for auditing
    pub retain_markup: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_experience: 5,
            max_skills: 20,
            max_education: 5,
            max_certifications: 10,
            max_languages: 10,
            max_projects: 10,
            max_volunteer: 5,
            retain_markup: false,
        }
    }
}

/// Request processing limits
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PipelineConfig {
    /// Maximum number of profile requests processed at once
    pub max_concurrent_requests: usize,

    /// Maximum number of URLs accepted in one batch
    pub max_batch_size: usize,

    /// Capacity of the background analysis queue
    pub analysis_queue_depth: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 4,
            max_batch_size: 10,
            analysis_queue_depth: 64,
        }
    }
}

/// Persistence configuration
///
/// Profiles go to a SQLite file by default so that separate invocations
/// (scrape, then analyze or export) see the same records.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StorageConfig {
    /// SQLite database file
    pub database_path: String,

    /// Keep documents in memory instead; nothing outlives the process
    pub in_memory: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: "./profile-lens.db".to_string(),
            in_memory: false,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OutputConfig {
    pub export_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            export_dir: "./exports".to_string(),
        }
    }
}

/// Every numeric constant used by the analyzer
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AnalyzerConfig {
    pub career: CareerThresholds,
    pub completeness: CompletenessWeights,
    pub skill_relevance: SkillRelevanceWeights,
    pub experience_value: ExperienceValueWeights,
    pub competitiveness: CompetitivenessWeights,
    pub market_demand: MarketDemandThresholds,
    pub salary: SalaryTable,
    pub confidence: ConfidenceBonuses,
    pub caps: RecommendationCaps,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            career: CareerThresholds::default(),
            completeness: CompletenessWeights::default(),
            skill_relevance: SkillRelevanceWeights::default(),
            experience_value: ExperienceValueWeights::default(),
            competitiveness: CompetitivenessWeights::default(),
            market_demand: MarketDemandThresholds::default(),
            salary: SalaryTable::default(),
            confidence: ConfidenceBonuses::default(),
            caps: RecommendationCaps::default(),
        }
    }
}

/// Years of experience needed for each career tier
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CareerThresholds {
    pub executive_years: u32,
    pub senior_years: u32,
    pub mid_years: u32,
}

impl Default for CareerThresholds {
    fn default() -> Self {
        Self {
            executive_years: 15,
            senior_years: 8,
            mid_years: 3,
        }
    }
}

/// Points awarded per profile section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CompletenessWeights {
    pub name: u32,
    pub headline: u32,
    pub summary: u32,
    pub location: u32,
    pub profile_image: u32,
    pub per_experience: u32,
    pub experience_cap: u32,
    pub per_skill: u32,
    pub skills_cap: u32,
    pub per_education: u32,
    pub education_cap: u32,
    pub certifications: u32,
    pub projects: u32,
    pub languages: u32,
    pub volunteer: u32,
}

impl Default for CompletenessWeights {
    fn default() -> Self {
        Self {
            name: 5,
            headline: 5,
            summary: 10,
            location: 5,
            profile_image: 5,
            per_experience: 5,
            experience_cap: 25,
            per_skill: 2,
            skills_cap: 20,
            per_education: 7,
            education_cap: 15,
            certifications: 3,
            projects: 3,
            languages: 2,
            volunteer: 2,
        }
    }
}

/// `(trending * trending_weight + technical * technical_weight) / total * scale`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SkillRelevanceWeights {
    pub trending_weight: f64,
    pub technical_weight: f64,
    pub scale: f64,
}

impl Default for SkillRelevanceWeights {
    fn default() -> Self {
        Self {
            trending_weight: 2.0,
            technical_weight: 1.0,
            scale: 50.0,
        }
    }
}

/// Additive components of the experience value score, each with its own cap
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExperienceValueWeights {
    pub per_year: u32,
    pub years_cap: u32,
    pub per_prestige_employer: u32,
    pub prestige_cap: u32,
    pub per_senior_title: u32,
    pub seniority_cap: u32,
}

impl Default for ExperienceValueWeights {
    fn default() -> Self {
        Self {
            per_year: 3,
            years_cap: 40,
            per_prestige_employer: 10,
            prestige_cap: 30,
            per_senior_title: 5,
            seniority_cap: 30,
        }
    }
}

/// Blend weights for market competitiveness
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CompetitivenessWeights {
    pub completeness: f64,
    pub skill_relevance: f64,
    pub experience_value: f64,
}

impl Default for CompetitivenessWeights {
    fn default() -> Self {
        Self {
            completeness: 0.3,
            skill_relevance: 0.4,
            experience_value: 0.3,
        }
    }
}

/// Lower bounds of the market demand bands
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MarketDemandThresholds {
    pub very_high: f64,
    pub high: f64,
    pub medium: f64,
}

impl Default for MarketDemandThresholds {
    fn default() -> Self {
        Self {
            very_high: 80.0,
            high: 60.0,
            medium: 40.0,
        }
    }
}

/// A salary band in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SalaryBand {
    pub min: u32,
    pub max: u32,
}

/// Base salary bands per tier and industry multipliers
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SalaryTable {
    pub currency: String,
    pub entry: SalaryBand,
    pub mid: SalaryBand,
    pub senior: SalaryBand,
    pub executive: SalaryBand,

    /// `(industry, multiplier)` pairs; industries not listed use 1.0
    pub industry_multipliers: Vec<(String, f64)>,
}

impl Default for SalaryTable {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            entry: SalaryBand {
                min: 45_000,
                max: 70_000,
            },
            mid: SalaryBand {
                min: 70_000,
                max: 110_000,
            },
            senior: SalaryBand {
                min: 110_000,
                max: 160_000,
            },
            executive: SalaryBand {
                min: 160_000,
                max: 300_000,
            },
            industry_multipliers: vec![
                ("Technology".to_string(), 1.2),
                ("Finance".to_string(), 1.15),
                ("Healthcare".to_string(), 1.1),
                ("Consulting".to_string(), 1.1),
            ],
        }
    }
}

/// Bonuses added to the completeness-based confidence
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConfidenceBonuses {
    pub industry_focus: f64,
    pub technical_skills: f64,
    pub experience_value: f64,

    /// Experience value must exceed this for its bonus
    pub experience_value_threshold: u32,
}

impl Default for ConfidenceBonuses {
    fn default() -> Self {
        Self {
            industry_focus: 0.1,
            technical_skills: 0.1,
            experience_value: 0.1,
            experience_value_threshold: 50,
        }
    }
}

/// Output list sizes
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RecommendationCaps {
    pub industries: usize,
    pub skill_recommendations: usize,
    pub technology_track: usize,
    pub career_recommendations: usize,
    pub skill_gaps: usize,
}

impl Default for RecommendationCaps {
    fn default() -> Self {
        Self {
            industries: 3,
            skill_recommendations: 5,
            technology_track: 2,
            career_recommendations: 4,
            skill_gaps: 5,
        }
    }
}
