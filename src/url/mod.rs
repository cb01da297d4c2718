//! URL handling module for Sitegist
//!
//! This module provides seed validation, link resolution and the same-domain
//! rule that keeps a crawl on one site.

mod domain;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::{allowed_domain, extract_domain, is_same_domain};

/// Parses and validates a seed URL
///
/// The seed must be an absolute http(s) URL with a host.
///
/// # Examples
///
/// ```
/// use sitegist::url::parse_seed;
///
/// assert!(parse_seed("https://example.com").is_ok());
/// assert!(parse_seed("ftp://example.com").is_err());
/// ```
pub fn parse_seed(seed: &str) -> UrlResult<Url> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Resolves an attribute value against the page URL
///
/// This is plain URL-join: no fragment stripping, no trailing-slash or
/// query normalization. Returns None for empty values and values that do
/// not join into a valid URL.
pub fn resolve(base: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    base.join(reference).ok()
}
