use crate::ConfigError;
use serde::Deserialize;

/// User agent sent with every page request unless the config overrides it
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const DEFAULT_SUMMARIZER_TIMEOUT_SECS: u64 = 60;

/// Main configuration structure for Sitegist
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub prompt: PromptLimits,
}

/// Command-line values that replace their config file counterparts
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_pages: Option<u32>,
    pub report_path: Option<String>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Page the crawl starts from; its host becomes the allowed domain
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum number of pages to fetch (successfully or not)
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Pause before every fetch attempt (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(
        rename = "fetch-timeout-secs",
        default = "default_fetch_timeout_secs"
    )]
    pub fetch_timeout_secs: u64,

    /// User-Agent header sent with page requests
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the text report, overwritten on every run
    #[serde(rename = "report-path")]
    pub report_path: String,
}

/// Summarization model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerConfig {
    /// Model name, e.g. "gemini-1.5-flash"
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative language API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the API key
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,

    /// API key; takes precedence over `api-key-env` when set
    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,

    /// Request timeout for the summarization call (seconds)
    #[serde(
        rename = "timeout-secs",
        default = "default_summarizer_timeout_secs"
    )]
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            api_key: None,
            timeout_secs: default_summarizer_timeout_secs(),
        }
    }
}

impl SummarizerConfig {
    /// Resolves the API credential
    ///
    /// A non-blank `api-key` wins; otherwise the variable named by
    /// `api-key-env` is read. A missing or blank credential is an error.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
            .ok_or_else(|| ConfigError::MissingCredential {
                env_var: self.api_key_env.clone(),
            })
    }
}

/// Limits applied when the corpus is condensed into a prompt
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PromptLimits {
    /// Characters of page text included
    #[serde(rename = "text-chars")]
    pub text_chars: usize,

    /// Links listed before the "...and N more" marker
    #[serde(rename = "max-links")]
    pub max_links: usize,

    /// Images listed before the "...and N more" marker
    #[serde(rename = "max-images")]
    pub max_images: usize,

    /// Tables included
    #[serde(rename = "max-tables")]
    pub max_tables: usize,

    /// Characters kept from each included table
    #[serde(rename = "table-chars")]
    pub table_chars: usize,
}

impl Default for PromptLimits {
    fn default() -> Self {
        Self {
            text_chars: 500,
            max_links: 10,
            max_images: 10,
            max_tables: 3,
            table_chars: 300,
        }
    }
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_summarizer_timeout_secs() -> u64 {
    DEFAULT_SUMMARIZER_TIMEOUT_SECS
}
