//! Sitegist: a single-domain site digester
//!
//! This crate crawls a website from a seed URL without leaving its domain,
//! extracts text, links, images and tables from every page, and hands a
//! bounded digest of the result to a summarization model.

pub mod config;
pub mod crawler;
pub mod pipeline;
pub mod report;
pub mod url;

use thiserror::Error;

/// Main error type for Sitegist operations
#[derive(Debug, Error)]
pub enum GistError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report error: {0}")]
    Report(#[from] report::ReportError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: crawler::CrawlState,
        to: crawler::CrawlState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to load environment file: {0}")]
    DotEnv(#[from] dotenvy::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing API credential: set `summarizer.api-key` or the {env_var} environment variable")]
    MissingCredential { env_var: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Sitegist operations
pub type Result<T> = std::result::Result<T, GistError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, CrawlConfig};
pub use crawler::{Corpus, CrawlSummary, Crawler, PageResult};
pub use report::{build_prompt, PromptLimits, ReportOutcome, Reporter};
pub use crate::url::{allowed_domain, extract_domain, is_same_domain};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: GistError = ConfigError::MissingCredential {
            env_var: "GOOGLE_API_KEY".to_string(),
        }
        .into();

        assert!(matches!(err, GistError::Config(ConfigError::MissingCredential { .. })));
        assert!(err.to_string().starts_with("Configuration error: Missing API credential"));
    }

    #[test]
    fn test_report_error_converts() {
        let err: GistError = report::ReportError::Persist {
            path: "out/report.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();

        assert!(matches!(err, GistError::Report(_)));
        assert!(err.to_string().contains("out/report.txt"));
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = GistError::InvalidTransition {
            from: crawler::CrawlState::Finished,
            to: crawler::CrawlState::Running,
        };
        assert_eq!(
            err.to_string(),
            "Invalid state transition: Finished -> Running"
        );
    }
}
