//! Summarization collaborator
//!
//! The reporter hands the prompt to a [`Summarizer`] and gets text back.
//! [`GeminiSummarizer`] is the production implementation; it calls the
//! Generative Language `generateContent` endpoint once, with no retry.

use crate::config::SummarizerConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Header carrying the API credential; it never appears in the request URL
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Errors from the summarization call
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Summarizer request failed: {0}")]
    Request(String),

    #[error("Summarizer request timed out")]
    Timeout,

    #[error("Summarizer API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Summarizer returned no text")]
    EmptyResponse,
}

/// Capability to turn a prompt into summary text
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizeError>;
}

#[async_trait]
impl<T: Summarizer + ?Sized> Summarizer for Arc<T> {
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizeError> {
        (**self).summarize(prompt).await
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// [`Summarizer`] for Gemini models over the REST API
#[derive(Debug, Clone)]
pub struct GeminiSummarizer {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiSummarizer {
    /// Creates a summarizer with its own HTTP client
    ///
    /// # Arguments
    ///
    /// * `endpoint` - API base, e.g. `https://generativelanguage.googleapis.com/v1beta`
    /// * `model` - Model name, e.g. `gemini-1.5-flash`
    /// * `api_key` - Resolved API credential
    /// * `timeout` - Whole-request timeout
    pub fn new(
        endpoint: &str,
        model: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Creates a summarizer from the `[summarizer]` config section
    pub fn from_config(
        config: &SummarizerConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.endpoint,
            &config.model,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// The `generateContent` URL for the configured model
    pub fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizeError> {
        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        tracing::debug!(
            "Requesting summary from {} ({} prompt chars)",
            self.model,
            prompt.chars().count()
        );

        let response = self
            .client
            .post(self.request_url())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await.map_err(classify_error)?;
        extract_text(parsed)
    }
}

/// Concatenates the text parts of the first candidate
fn extract_text(response: GenerateResponse) -> Result<String, SummarizeError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(SummarizeError::EmptyResponse);
    }
    Ok(text)
}

/// Maps a client error, dropping the request URL from the message
fn classify_error(error: reqwest::Error) -> SummarizeError {
    if error.is_timeout() {
        SummarizeError::Timeout
    } else {
        SummarizeError::Request(error.without_url().to_string())
    }
}
