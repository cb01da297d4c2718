//! Report module for turning a crawl corpus into a persisted summary
//!
//! This module handles:
//! - Condensing the corpus into a bounded prompt
//! - Dispatching the prompt to the summarization collaborator
//! - Writing the resulting report to disk

mod persist;
mod prompt;
mod summarizer;

pub use crate::config::PromptLimits;
pub use persist::persist;
pub use prompt::build_prompt;
pub use summarizer::{GeminiSummarizer, SummarizeError, Summarizer};

use crate::crawler::Corpus;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing the report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report to {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// What the report step produced
///
/// Every variant has been persisted by the time it is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The corpus was empty; the summarizer was not called
    NoData,

    /// The summarizer returned this text
    Summarized(String),

    /// The summarizer failed; this message became the report
    SummarizationFailed(String),
}

impl ReportOutcome {
    /// Returns true if a model summary was produced
    pub fn is_summarized(&self) -> bool {
        matches!(self, Self::Summarized(_))
    }
}

/// Formats, dispatches and persists the report for one crawl
pub struct Reporter<S> {
    summarizer: S,
    limits: PromptLimits,
    destination: PathBuf,
}

impl<S: Summarizer> Reporter<S> {
    /// Creates a reporter writing to `destination`
    pub fn new(summarizer: S, limits: PromptLimits, destination: impl Into<PathBuf>) -> Self {
        Self {
            summarizer,
            limits,
            destination: destination.into(),
        }
    }

    /// Sends a prompt to the summarizer
    pub async fn dispatch(&self, prompt: &str) -> Result<String, SummarizeError> {
        self.summarizer.summarize(prompt).await
    }

    /// Runs the report step for a finished crawl of `seed`
    ///
    /// # Behavior
    ///
    /// | Corpus | Summarizer | Persisted text | Outcome |
    /// |--------|------------|----------------|---------|
    /// | empty | not called | "No data was scraped..." | `NoData` |
    /// | non-empty | `Ok(text)` | `text` | `Summarized` |
    /// | non-empty | `Err(e)` | "Error during LLM processing: e" | `SummarizationFailed` |
    ///
    /// # Errors
    ///
    /// * `ReportError::Persist` - the report file could not be written
    pub async fn report(&self, corpus: &Corpus, seed: &str) -> Result<ReportOutcome, ReportError> {
        if corpus.is_empty() {
            tracing::warn!("No data was scraped from {}, skipping summarization", seed);
            persist(&no_data_report(seed), &self.destination)?;
            return Ok(ReportOutcome::NoData);
        }

        let prompt = build_prompt(corpus, seed, &self.limits);
        tracing::info!("Sending {} pages of data to the summarizer", corpus.page_count());

        let outcome = match self.dispatch(&prompt).await {
            Ok(summary) => {
                tracing::info!("Summary received ({} chars)", summary.chars().count());
                persist(&summary, &self.destination)?;
                ReportOutcome::Summarized(summary)
            }
            Err(e) => {
                tracing::error!("Error calling summarizer: {}", e);
                let message = format!("Error during LLM processing: {}", e);
                persist(&message, &self.destination)?;
                ReportOutcome::SummarizationFailed(message)
            }
        };

        Ok(outcome)
    }
}

/// Report text written when the crawl produced nothing
pub fn no_data_report(seed: &str) -> String {
    format!("No data was scraped successfully from {}.\n", seed)
}
