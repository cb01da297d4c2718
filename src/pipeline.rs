//! End-to-end run: credential check, crawl, report
//!
//! The summarizer credential is resolved before anything touches the
//! network, so a missing key fails the run without a single fetch.

use crate::config::{Config, CrawlConfig};
use crate::crawler::{CancelHandle, CrawlSummary, Crawler, Fetcher};
use crate::report::{ReportOutcome, Reporter, Summarizer};
use crate::GistError;
use std::path::PathBuf;

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Crawl statistics and the aggregated corpus
    pub crawl: CrawlSummary,

    /// What the report step produced
    pub report: ReportOutcome,

    /// Where the report was written
    pub report_path: PathBuf,
}

/// Runs the crawl and the report for a loaded configuration
///
/// # Arguments
///
/// * `config` - Loaded and validated configuration
/// * `fetcher` - Page transport
/// * `make_summarizer` - Builds the summarizer from the resolved API key
/// * `cancel` - Optional handle that stops the crawl between pages
///
/// # Returns
///
/// * `Ok(RunOutcome)` - The report was persisted (even if summarization failed)
/// * `Err(GistError::Config)` - Missing credential or invalid crawl settings;
///   nothing was fetched
/// * `Err(GistError::Report)` - The report could not be written
pub async fn run_pipeline<F, S, M>(
    config: &Config,
    fetcher: F,
    make_summarizer: M,
    cancel: Option<CancelHandle>,
) -> Result<RunOutcome, GistError>
where
    F: Fetcher,
    S: Summarizer,
    M: FnOnce(&str) -> Result<S, GistError>,
{
    let api_key = config.summarizer.resolve_api_key()?;
    let crawl_config = CrawlConfig::from_config(config)?;
    let summarizer = make_summarizer(&api_key)?;

    let seed = crawl_config.seed_url.to_string();

    let mut crawler = Crawler::new(crawl_config, fetcher);
    if let Some(cancel) = cancel {
        crawler = crawler.with_cancel_handle(cancel);
    }
    let crawl = crawler.run().await?;

    let report_path = PathBuf::from(&config.output.report_path);
    let reporter = Reporter::new(summarizer, config.prompt, &report_path);
    let report = reporter.report(&crawl.corpus, &seed).await?;

    Ok(RunOutcome {
        crawl,
        report,
        report_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::crawler::TransportError;
    use crate::report::SummarizeError;
    use crate::ConfigError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;
    use url::Url;

    #[derive(Default)]
    struct StubSite {
        pages: HashMap<String, String>,
        fetches: AtomicUsize,
    }

    impl StubSite {
        fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetcher for StubSite {
        async fn fetch(&self, url: &Url) -> Result<String, TransportError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(url.as_str())
                .cloned()
                .ok_or_else(|| TransportError::Network {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                })
        }
    }

    #[derive(Default)]
    struct EchoSummarizer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Summarizer for EchoSummarizer {
        async fn summarize(&self, prompt: &str) -> Result<String, SummarizeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("summary of {} chars", prompt.chars().count()))
        }
    }

    fn config(dir: &TempDir, max_pages: u32, api_key: Option<&str>) -> Config {
        let report = dir.path().join("report.txt");
        let key_line = api_key
            .map(|k| format!("api-key = \"{}\"", k))
            .unwrap_or_default();
        let toml = format!(
            r#"
[crawler]
seed-url = "https://example.com/"
max-pages = {}
request-delay-ms = 0

[output]
report-path = "{}"

[summarizer]
api-key-env = "SITEGIST_PIPELINE_TEST_KEY_NEVER_SET"
{}
"#,
            max_pages,
            report.display(),
            key_line
        );
        parse_config(&toml).unwrap()
    }

    fn site() -> StubSite {
        StubSite::default()
            .with_page(
                "https://example.com/",
                r#"<h1>Home</h1><a href="/next">next</a>
                   <a href="https://other.org/">other</a>
                   <img src="https://images.other.org/pic.png">"#,
            )
            .with_page("https://example.com/next", "<p>Next page</p>")
    }

    #[tokio::test]
    async fn test_missing_credential_fetches_nothing() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir, 5, None);
        let site = Arc::new(site());

        let result = run_pipeline(
            &config,
            site.clone(),
            |_| Ok(EchoSummarizer::default()),
            None,
        )
        .await;

        assert!(matches!(
            result,
            Err(GistError::Config(ConfigError::MissingCredential { .. }))
        ));
        assert_eq!(site.fetches(), 0);
        assert!(!dir.path().join("report.txt").exists());
    }

    #[tokio::test]
    async fn test_full_run_persists_summary() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir, 5, Some("test-key"));
        let summarizer = Arc::new(EchoSummarizer::default());
        let handle = summarizer.clone();

        let outcome = run_pipeline(
            &config,
            site(),
            move |key| {
                assert_eq!(key, "test-key");
                Ok(handle)
            },
            None,
        )
        .await
        .unwrap();

        assert_eq!(outcome.crawl.visited.len(), 2);
        assert!(outcome.report.is_summarized());
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);

        let written = std::fs::read_to_string(&outcome.report_path).unwrap();
        assert!(written.starts_with("summary of "));

        let corpus = &outcome.crawl.corpus;
        assert!(!corpus.all_links.contains("https://other.org/"));
        assert!(corpus.all_images.contains("https://images.other.org/pic.png"));
    }

    #[tokio::test]
    async fn test_budget_of_one_fetches_once() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir, 1, Some("k"));
        let site = Arc::new(site());

        let outcome = run_pipeline(
            &config,
            site.clone(),
            |_| Ok(EchoSummarizer::default()),
            None,
        )
        .await
        .unwrap();

        assert_eq!(site.fetches(), 1);
        assert_eq!(outcome.crawl.visited, vec!["https://example.com/"]);
    }

    #[tokio::test]
    async fn test_failed_seed_reports_no_data() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir, 5, Some("k"));
        let site = Arc::new(StubSite::default());
        let summarizer = Arc::new(EchoSummarizer::default());
        let handle = summarizer.clone();

        let outcome = run_pipeline(&config, site.clone(), move |_| Ok(handle), None)
            .await
            .unwrap();

        assert_eq!(site.fetches(), 1);
        assert_eq!(outcome.crawl.visited, vec!["https://example.com/"]);
        assert!(outcome.crawl.corpus.is_empty());
        assert_eq!(outcome.report, ReportOutcome::NoData);
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);

        let written = std::fs::read_to_string(&outcome.report_path).unwrap();
        assert!(written.contains("No data was scraped"));
    }

    #[tokio::test]
    async fn test_cancelled_run_still_reports() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir, 5, Some("k"));
        let site = Arc::new(site());
        let cancel = CancelHandle::new();
        cancel.cancel();

        let outcome = run_pipeline(
            &config,
            site.clone(),
            |_| Ok(EchoSummarizer::default()),
            Some(cancel),
        )
        .await
        .unwrap();

        assert!(outcome.crawl.cancelled);
        assert_eq!(site.fetches(), 0);
        assert_eq!(outcome.report, ReportOutcome::NoData);
        assert!(outcome.report_path.exists());
    }
}
