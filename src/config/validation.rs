use crate::config::types::{Config, CrawlerConfig, OutputConfig, PromptLimits, SummarizerConfig};
use crate::url::parse_seed;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_summarizer_config(&config.summarizer)?;
    validate_prompt_limits(&config.prompt)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    parse_seed(&config.seed_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", config.seed_url, e))
    })?;

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    validate_timeout("fetch_timeout_secs", config.fetch_timeout_secs)?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "report_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates summarizer configuration
///
/// The credential itself is not checked here: a dry run must work without it.
fn validate_summarizer_config(config: &SummarizerConfig) -> Result<(), ConfigError> {
    if config.model.trim().is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid summarizer endpoint: {}", e)))?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Summarizer endpoint '{}' must use HTTP or HTTPS",
            config.endpoint
        )));
    }

    if config.api_key_env.trim().is_empty() {
        return Err(ConfigError::Validation(
            "api_key_env cannot be empty".to_string(),
        ));
    }

    validate_timeout("timeout_secs", config.timeout_secs)?;

    Ok(())
}

/// Validates prompt limits
///
/// Zero counts are allowed and reduce a section to its marker. The text
/// budget must be at least 1.
fn validate_prompt_limits(limits: &PromptLimits) -> Result<(), ConfigError> {
    if limits.text_chars == 0 {
        return Err(ConfigError::Validation(
            "text_chars must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_timeout(name: &str, secs: u64) -> Result<(), ConfigError> {
    if secs < 1 || secs > 300 {
        return Err(ConfigError::Validation(format!(
            "{} must be between 1 and 300, got {}",
            name, secs
        )));
    }
    Ok(())
}
