//! Configuration module for Profile-Lens
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All sections are optional; missing keys fall back to documented defaults.
//!
//! # Example
//!
//! ```no_run
//! use profile_lens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("profile-lens.toml")).unwrap();
//! println!("Batch limit: {}", config.pipeline.max_batch_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AnalyzerConfig, CareerThresholds, CompetitivenessWeights, CompletenessWeights,
    ConfidenceBonuses, Config, ExperienceValueWeights, ExtractorConfig, FetcherConfig,
    MarketDemandThresholds, OutputConfig, PipelineConfig, RecommendationCaps, RenderConfig,
    SalaryBand, SalaryTable, SkillRelevanceWeights, StorageConfig, StrategyKind,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
