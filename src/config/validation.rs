use crate::config::types::{
    AnalyzerConfig, Config, ExtractorConfig, FetcherConfig, PipelineConfig, RenderConfig,
    SalaryBand, StorageConfig,
};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_render_config(&config.render)?;
    validate_extractor_config(&config.extractor)?;
    validate_pipeline_config(&config.pipeline)?;
    validate_storage_config(&config.storage)?;
    validate_analyzer_config(&config.analyzer)?;

    if config.output.export_dir.is_empty() {
        return Err(ConfigError::Validation(
            "export_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.policy_agent.is_empty()
        || !config
            .policy_agent
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "policy_agent must be a non-empty product token, got '{}'",
            config.policy_agent
        )));
    }

    if config.request_timeout_secs == 0 || config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request and connect timeouts must be > 0".to_string(),
        ));
    }

    if config.min_delay_ms > config.max_delay_ms {
        return Err(ConfigError::Validation(format!(
            "min_delay_ms ({}) must not exceed max_delay_ms ({})",
            config.min_delay_ms, config.max_delay_ms
        )));
    }

    Ok(())
}

/// Validates rendered-strategy configuration
fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    if config.pool_size < 1 || config.pool_size > 16 {
        return Err(ConfigError::Validation(format!(
            "render pool_size must be between 1 and 16, got {}",
            config.pool_size
        )));
    }

    if config.readiness_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "readiness_timeout_secs must be > 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates extraction caps
fn validate_extractor_config(config: &ExtractorConfig) -> Result<(), ConfigError> {
    let caps = [
        ("max_experience", config.max_experience),
        ("max_skills", config.max_skills),
        ("max_education", config.max_education),
        ("max_certifications", config.max_certifications),
        ("max_languages", config.max_languages),
        ("max_projects", config.max_projects),
        ("max_volunteer", config.max_volunteer),
    ];

    for (name, cap) in caps {
        if cap > 100 {
            return Err(ConfigError::Validation(format!(
                "{} must be <= 100, got {}",
                name, cap
            )));
        }
    }

    Ok(())
}

/// Validates pipeline limits
fn validate_pipeline_config(config: &PipelineConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 64 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 64, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.max_batch_size < 1 {
        return Err(ConfigError::Validation(
            "max_batch_size must be >= 1".to_string(),
        ));
    }

    if config.analysis_queue_depth < 1 {
        return Err(ConfigError::Validation(
            "analysis_queue_depth must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates persistence settings
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if !config.in_memory && config.database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty unless in_memory is set".to_string(),
        ));
    }

    Ok(())
}

/// Validates the analyzer tuning table
fn validate_analyzer_config(config: &AnalyzerConfig) -> Result<(), ConfigError> {
    let career = &config.career;
    if !(career.mid_years <= career.senior_years && career.senior_years <= career.executive_years)
    {
        return Err(ConfigError::Validation(format!(
            "career thresholds must be ordered mid <= senior <= executive, got {} / {} / {}",
            career.mid_years, career.senior_years, career.executive_years
        )));
    }

    let relevance = &config.skill_relevance;
    let demand = &config.market_demand;
    let bonuses = &config.confidence;
    for (name, value) in [
        ("skill_relevance.trending_weight", relevance.trending_weight),
        ("skill_relevance.technical_weight", relevance.technical_weight),
        ("skill_relevance.scale", relevance.scale),
        ("market_demand.very_high", demand.very_high),
        ("market_demand.high", demand.high),
        ("market_demand.medium", demand.medium),
        ("confidence.industry_focus", bonuses.industry_focus),
        ("confidence.technical_skills", bonuses.technical_skills),
        ("confidence.experience_value", bonuses.experience_value),
    ] {
        validate_weight(name, value)?;
    }

    let blend = &config.competitiveness;
    for weight in [blend.completeness, blend.skill_relevance, blend.experience_value] {
        if !(0.0..=1.0).contains(&weight) {
            return Err(ConfigError::Validation(format!(
                "competitiveness weights must be within [0, 1], got {}",
                weight
            )));
        }
    }

    let salary = &config.salary;
    for (tier, band) in [
        ("entry", salary.entry),
        ("mid", salary.mid),
        ("senior", salary.senior),
        ("executive", salary.executive),
    ] {
        validate_band(tier, band)?;
    }

    for (industry, multiplier) in &salary.industry_multipliers {
        if !multiplier.is_finite() || *multiplier <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "industry multiplier for '{}' must be > 0, got {}",
                industry, multiplier
            )));
        }
    }

    Ok(())
}

/// Weights and bonuses must be finite and non-negative
fn validate_weight(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Validation(format!(
            "{} must be a finite number >= 0, got {}",
            name, value
        )));
    }
    Ok(())
}

fn validate_band(tier: &str, band: SalaryBand) -> Result<(), ConfigError> {
    if band.min > band.max {
        return Err(ConfigError::Validation(format!(
            "salary band '{}' has min {} above max {}",
            tier, band.min, band.max
        )));
    }
    Ok(())
}
