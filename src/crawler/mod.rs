//! Crawler module for page fetching and extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`Fetcher`] seam
//! - Text, link, image and table extraction
//! - Frontier and visited-set tracking
//! - Overall crawl coordination and corpus aggregation

mod coordinator;
mod corpus;
mod extractor;
mod fetcher;
mod frontier;
pub mod tables;

pub use coordinator::{CancelHandle, CrawlState, CrawlSummary, Crawler};
pub use corpus::{Corpus, PageResult, PAGE_SEPARATOR};
pub use extractor::extract;
pub use fetcher::{build_http_client, fetch_url, Fetcher, HttpFetcher, TransportError};
pub use frontier::Frontier;

use crate::config::CrawlConfig;
use crate::GistError;

/// Runs a complete crawl with the production HTTP fetcher
///
/// This is the main entry point for a crawl without a report. It will:
/// 1. Build the HTTP client from the crawl's user agent and timeout
/// 2. Walk the site breadth-first within the allowed domain
/// 3. Return the aggregated corpus and run statistics
///
/// # Arguments
///
/// * `config` - The crawl configuration
/// * `cancel` - Optional handle that stops the crawl between pages
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl finished (possibly with failed pages)
/// * `Err(GistError)` - The HTTP client could not be built
pub async fn crawl(
    config: CrawlConfig,
    cancel: Option<CancelHandle>,
) -> Result<CrawlSummary, GistError> {
    let fetcher = HttpFetcher::new(&config.user_agent, config.fetch_timeout)?;
    let mut crawler = Crawler::new(config, fetcher);
    if let Some(cancel) = cancel {
        crawler = crawler.with_cancel_handle(cancel);
    }
    crawler.run().await
}
