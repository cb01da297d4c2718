use crate::config::types::{Config, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::url::{allowed_domain, parse_seed};
use crate::ConfigError;
use std::time::Duration;
use url::Url;

/// Immutable parameters of one crawl run
///
/// Built once from the loaded [`Config`] (or directly in tests) and handed to
/// the crawler at construction. Nothing in the crawl reads ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Where the crawl starts
    pub seed_url: Url,

    /// Authority (`host[:port]`) every followed link must match
    pub allowed_domain: String,

    /// Maximum number of fetch attempts, always >= 1
    pub max_pages: usize,

    /// Pause before every fetch attempt
    pub request_delay: Duration,

    /// Timeout applied to each page request
    pub fetch_timeout: Duration,

    /// User-Agent header for page requests
    pub user_agent: String,
}

impl CrawlConfig {
    /// Creates a crawl configuration with default delay, timeout and user agent
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidUrl` - the seed is not an http(s) URL with a host
    /// * `ConfigError::Validation` - `max_pages` is zero
    pub fn new(seed_url: &str, max_pages: usize) -> Result<Self, ConfigError> {
        let invalid = |e: crate::UrlError| {
            ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed_url, e))
        };
        let seed = parse_seed(seed_url).map_err(invalid)?;
        let allowed_domain = allowed_domain(&seed).map_err(invalid)?;

        if max_pages < 1 {
            return Err(ConfigError::Validation(format!(
                "max_pages must be >= 1, got {}",
                max_pages
            )));
        }

        Ok(Self {
            seed_url: seed,
            allowed_domain,
            max_pages,
            request_delay: Duration::from_millis(1000),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Derives the crawl configuration from a loaded config file
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let crawler = &config.crawler;
        let mut crawl = Self::new(&crawler.seed_url, crawler.max_pages as usize)?;
        crawl.request_delay = Duration::from_millis(crawler.request_delay_ms);
        crawl.fetch_timeout = Duration::from_secs(crawler.fetch_timeout_secs);
        crawl.user_agent = crawler.user_agent.clone();
        Ok(crawl)
    }

    /// Sets the politeness delay
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Sets the per-request timeout
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{CrawlerConfig, OutputConfig, PromptLimits, SummarizerConfig};

    #[test]
    fn test_new_derives_allowed_domain() {
        let crawl = CrawlConfig::new("https://Example.com/docs", 5).unwrap();
        assert_eq!(crawl.allowed_domain, "example.com");
        assert_eq!(crawl.seed_url.as_str(), "https://example.com/docs");
        assert_eq!(crawl.max_pages, 5);
        assert_eq!(crawl.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_new_rejects_zero_budget() {
        let result = CrawlConfig::new("https://example.com", 0);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_new_rejects_bad_seed() {
        let result = CrawlConfig::new("example.com", 1);
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_from_config_copies_crawler_settings() {
        let config = Config {
            crawler: CrawlerConfig {
                seed_url: "http://127.0.0.1:8080/".to_string(),
                max_pages: 3,
                request_delay_ms: 250,
                fetch_timeout_secs: 4,
                user_agent: "TestAgent/1.0".to_string(),
            },
            output: OutputConfig {
                report_path: "report.txt".to_string(),
            },
            summarizer: SummarizerConfig::default(),
            prompt: PromptLimits::default(),
        };

        let crawl = CrawlConfig::from_config(&config).unwrap();
        assert_eq!(crawl.allowed_domain, "127.0.0.1:8080");
        assert_eq!(crawl.max_pages, 3);
        assert_eq!(crawl.request_delay, Duration::from_millis(250));
        assert_eq!(crawl.fetch_timeout, Duration::from_secs(4));
        assert_eq!(crawl.user_agent, "TestAgent/1.0");
    }

    #[test]
    fn test_builders() {
        let crawl = CrawlConfig::new("https://example.com", 1)
            .unwrap()
            .with_request_delay(Duration::ZERO)
            .with_fetch_timeout(Duration::from_secs(2));
        assert_eq!(crawl.request_delay, Duration::ZERO);
        assert_eq!(crawl.fetch_timeout, Duration::from_secs(2));
    }
}
