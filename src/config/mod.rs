//! Configuration module for Sitegist
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and derives the immutable [`CrawlConfig`] a crawl runs with.
//!
//! # Example
//!
//! ```no_run
//! use sitegist::config::{load_config, CrawlConfig};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitegist.toml")).unwrap();
//! let crawl = CrawlConfig::from_config(&config).unwrap();
//! println!("Crawl stays on {}", crawl.allowed_domain);
//! ```

mod crawl;
mod parser;
mod types;
mod validation;

pub use crawl::CrawlConfig;
pub use types::{
    Config, ConfigOverrides, CrawlerConfig, OutputConfig, PromptLimits, SummarizerConfig, DEFAULT_USER_AGENT,
};

pub use parser::{
    apply_overrides, compute_config_hash, load_config, load_config_with_hash, load_env_file,
    parse_config,
};
