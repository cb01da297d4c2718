//! Crawl controller - the fetch, extract, enqueue loop
//!
//! This module drives one crawl run:
//! - pulling URLs from the frontier until the page budget is spent or the
//!   frontier runs dry
//! - sleeping the politeness delay before every fetch attempt
//! - absorbing transport failures so one bad page never ends the crawl
//! - merging page results into the corpus and feeding links back
//!
//! Pages are processed one at a time, which keeps the budget and the
//! no-refetch rule trivially exact.

use crate::config::CrawlConfig;
use crate::crawler::corpus::Corpus;
use crate::crawler::extractor::extract;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::frontier::Frontier;
use crate::GistError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Lifecycle of a [`Crawler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Constructed, not started
    Idle,
    /// Inside [`Crawler::run`]
    Running,
    /// The run ended; the crawler cannot be reused
    Finished,
}

/// Requests that a running crawl stop at the next iteration boundary
///
/// Cloning shares the flag. A fetch already in flight completes first.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Creates a handle that has not been triggered
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Outcome of a finished crawl run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Aggregated extraction results
    pub corpus: Corpus,

    /// Every attempted URL, in visit order
    pub visited: Vec<String>,

    /// Fetches that returned a page
    pub pages_fetched: usize,

    /// Fetches that failed
    pub pages_failed: usize,

    /// URLs still pending when the run stopped
    pub frontier_remaining: usize,

    /// Whether the run was stopped through a [`CancelHandle`]
    pub cancelled: bool,
}

/// Crawl controller for a single run
pub struct Crawler<F> {
    config: CrawlConfig,
    fetcher: F,
    frontier: Frontier,
    corpus: Corpus,
    state: CrawlState,
    cancel: CancelHandle,
    pages_fetched: usize,
    pages_failed: usize,
}

impl<F: Fetcher> Crawler<F> {
    /// Creates an idle crawler whose frontier holds only the seed
    pub fn new(config: CrawlConfig, fetcher: F) -> Self {
        let frontier = Frontier::new(config.seed_url.as_str());
        Self {
            config,
            fetcher,
            frontier,
            corpus: Corpus::new(),
            state: CrawlState::Idle,
            cancel: CancelHandle::new(),
            pages_fetched: 0,
            pages_failed: 0,
        }
    }

    /// Replaces the crawler's cancellation flag with a shared one
    pub fn with_cancel_handle(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns a handle that can stop the run between iterations
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Current lifecycle state
    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// The frontier, for inspection
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Runs the crawl to completion
    ///
    /// # Loop
    ///
    /// 1. Stop if cancelled, the frontier is empty, or `max_pages` URLs
    ///    have been attempted
    /// 2. Pop a URL; skip it (no delay, no budget) if already visited
    /// 3. Sleep `request_delay`
    /// 4. Fetch; on failure mark visited and continue
    /// 5. Extract, mark visited, merge into the corpus, offer the links
    ///
    /// # Errors
    ///
    /// * `GistError::InvalidTransition` - the crawler was already run
    pub async fn run(&mut self) -> Result<CrawlSummary, GistError> {
        if self.state != CrawlState::Idle {
            return Err(GistError::InvalidTransition {
                from: self.state,
                to: CrawlState::Running,
            });
        }
        self.state = CrawlState::Running;

        tracing::info!(
            "Starting crawl of {} (domain: {}, max pages: {}, delay: {:?})",
            self.config.seed_url,
            self.config.allowed_domain,
            self.config.max_pages,
            self.config.request_delay
        );

        let start_time = Instant::now();

        loop {
            if self.cancel.is_cancelled() {
                tracing::info!("Crawl cancelled, stopping");
                break;
            }

            if !self.frontier.should_continue(self.config.max_pages) {
                if self.frontier.is_empty() {
                    tracing::info!("Frontier is empty, crawl complete");
                } else {
                    tracing::info!(
                        "Page budget of {} reached, {} URLs left unvisited",
                        self.config.max_pages,
                        self.frontier.len()
                    );
                }
                break;
            }

            let Some(url) = self.frontier.pop() else {
                break;
            };

            if self.frontier.is_visited(&url) {
                tracing::debug!("Skipping already visited URL: {}", url);
                continue;
            }

            tokio::time::sleep(self.config.request_delay).await;

            self.process_url(url).await;
        }

        self.state = CrawlState::Finished;

        tracing::info!(
            "Crawl finished: visited {} pages ({} fetched, {} failed) in {:?}",
            self.frontier.visited_count(),
            self.pages_fetched,
            self.pages_failed,
            start_time.elapsed()
        );

        Ok(CrawlSummary {
            corpus: std::mem::take(&mut self.corpus),
            visited: self.frontier.visited().to_vec(),
            pages_fetched: self.pages_fetched,
            pages_failed: self.pages_failed,
            frontier_remaining: self.frontier.len(),
            cancelled: self.cancel.is_cancelled(),
        })
    }

    /// Fetches, extracts and merges a single URL
    ///
    /// The URL is marked visited whatever happens, so it is never retried.
    async fn process_url(&mut self, url_str: String) {
        tracing::info!("Fetching: {}", url_str);

        let url = match Url::parse(&url_str) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Skipping unparseable URL {}: {}", url_str, e);
                self.frontier.mark_visited(&url_str);
                self.pages_failed += 1;
                return;
            }
        };

        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Error fetching {}: {}", url_str, e);
                self.frontier.mark_visited(&url_str);
                self.pages_failed += 1;
                return;
            }
        };

        let page = extract(&body, &url, &self.config.allowed_domain);
        self.frontier.mark_visited(&url_str);
        self.pages_fetched += 1;

        let links: Vec<String> = page.links.iter().cloned().collect();
        tracing::debug!(
            "Extracted from {}: {} chars, {} links, {} images, {} tables",
            url_str,
            page.text.len(),
            page.links.len(),
            page.images.len(),
            page.tables.len()
        );

        self.corpus.merge(page);

        let added = self.frontier.offer(links);
        tracing::debug!("Queued {} new URLs, frontier size {}", added, self.frontier.len());
    }
}
