use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitegist::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Derives the crawl's allowed domain from the seed URL
///
/// The allowed domain is the seed's host, followed by `:port` when the seed
/// names a port other than the scheme default. Two servers on one host but
/// different ports are different sites.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitegist::url::allowed_domain;
///
/// let seed = Url::parse("https://example.com/start").unwrap();
/// assert_eq!(allowed_domain(&seed).unwrap(), "example.com");
///
/// let seed = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(allowed_domain(&seed).unwrap(), "127.0.0.1:8080");
/// ```
pub fn allowed_domain(seed: &Url) -> UrlResult<String> {
    authority(seed).ok_or(UrlError::MissingDomain)
}

/// Returns true if `url` is an http(s) URL whose authority is exactly `allowed`
///
/// Subdomains do not match: `blog.example.com` is not `example.com`.
pub fn is_same_domain(url: &Url, allowed: &str) -> bool {
    matches!(url.scheme(), "http" | "https") && authority(url).as_deref() == Some(allowed)
}

fn authority(url: &Url) -> Option<String> {
    let host = extract_domain(url)?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_mixed_case() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_allowed_domain_drops_default_port() {
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(allowed_domain(&url).unwrap(), "example.com");
    }

    #[test]
    fn test_allowed_domain_keeps_explicit_port() {
        let url = Url::parse("http://localhost:3000/index.html").unwrap();
        assert_eq!(allowed_domain(&url).unwrap(), "localhost:3000");
    }

    #[test]
    fn test_allowed_domain_requires_host() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert!(matches!(allowed_domain(&url), Err(UrlError::MissingDomain)));
    }

    #[test]
    fn test_same_domain_accepts_both_http_schemes() {
        let https = Url::parse("https://example.com/a").unwrap();
        let http = Url::parse("http://example.com/b").unwrap();
        assert!(is_same_domain(&https, "example.com"));
        assert!(is_same_domain(&http, "example.com"));
    }

    #[test]
    fn test_same_domain_rejects_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert!(!is_same_domain(&url, "example.com"));
    }

    #[test]
    fn test_same_domain_rejects_other_port() {
        let url = Url::parse("http://127.0.0.1:9000/").unwrap();
        assert!(!is_same_domain(&url, "127.0.0.1:8000"));
    }

    #[test]
    fn test_same_domain_rejects_non_http_scheme() {
        let url = Url::parse("ftp://example.com/file").unwrap();
        assert!(!is_same_domain(&url, "example.com"));
    }
}
