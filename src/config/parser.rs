use crate::config::types::{Config, ConfigOverrides};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sitegist::config::load_config;
///
/// let config = load_config(Path::new("sitegist.toml")).unwrap();
/// println!("Seed: {}", config.crawler.seed_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a report can be tied to the exact config that
/// produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Applies command-line overrides and re-validates the result
///
/// An override that breaks a config rule (an empty report path, for example)
/// is rejected the same way a bad config file value would be.
pub fn apply_overrides(
    config: &mut Config,
    overrides: &ConfigOverrides,
) -> Result<(), ConfigError> {
    if let Some(max_pages) = overrides.max_pages {
        tracing::info!("Overriding max pages: {}", max_pages);
        config.crawler.max_pages = max_pages;
    }
    if let Some(report_path) = &overrides.report_path {
        tracing::info!("Overriding report path: {}", report_path);
        config.output.report_path = report_path.clone();
    }
    validate(config)
}

/// Loads `KEY=value` pairs from an env file into the process environment
///
/// Variables already set in the environment win. A missing file is not an
/// error.
///
/// # Returns
///
/// * `Ok(true)` - The file was found and loaded
/// * `Ok(false)` - There is no file at `path`
/// * `Err(ConfigError::DotEnv)` - The file exists but could not be read or parsed
pub fn load_env_file(path: &Path) -> Result<bool, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e.into()),
    }
}
