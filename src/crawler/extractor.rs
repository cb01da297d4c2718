//! Page extractor
//!
//! Turns one page's raw markup into a [`PageResult`]:
//! - visible text, whitespace-normalized
//! - same-domain outbound links (from `<a href>`)
//! - image references (from `<img src>`), from any domain
//! - rendered tables
//!
//! Extraction never fails. Broken markup is parsed as far as the HTML parser
//! allows, and anything unusable is simply absent from the result.

use crate::crawler::corpus::PageResult;
use crate::crawler::tables::render_tables;
use crate::url::{is_same_domain, resolve};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Elements whose text content is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracts text, links, images and tables from a page
///
/// # Link Rules
///
/// Every `<a href>` is joined against `page_url`. A link is kept only if the
/// result is http(s) and its authority equals `allowed_domain` exactly, so
/// subdomains and other ports are dropped. Images get no domain filter.
///
/// # Example
///
/// ```
/// use sitegist::crawler::extract;
/// use url::Url;
///
/// let html = r#"<p>Hello</p><a href="/next">Next</a><a href="https://other.org/">Out</a>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let page = extract(html, &page_url, "example.com");
/// assert_eq!(page.text, "Hello Next Out");
/// assert!(page.links.contains("https://example.com/next"));
/// assert_eq!(page.links.len(), 1);
/// ```
pub fn extract(html: &str, page_url: &Url, allowed_domain: &str) -> PageResult {
    let document = Html::parse_document(html);

    PageResult {
        url: page_url.to_string(),
        text: extract_text(&document),
        links: extract_links(&document, page_url, allowed_domain),
        images: extract_images(&document, page_url),
        tables: render_tables(&document),
    }
}

/// Collects visible text nodes, joined by single spaces
fn extract_text(document: &Html) -> String {
    let mut words: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|el| HIDDEN_ELEMENTS.contains(&el.value().name()));
        if hidden {
            continue;
        }

        words.extend(text.split_whitespace());
    }

    words.join(" ")
}

/// Extracts same-domain links from `<a href>` elements
fn extract_links(document: &Html, page_url: &Url, allowed_domain: &str) -> BTreeSet<String> {
    resolved_attrs(document, "a[href]", "href", page_url)
        .into_iter()
        .filter(|url| is_same_domain(url, allowed_domain))
        .map(String::from)
        .collect()
}

/// Extracts image sources from `<img src>` elements
fn extract_images(document: &Html, page_url: &Url) -> BTreeSet<String> {
    resolved_attrs(document, "img[src]", "src", page_url)
        .into_iter()
        .map(String::from)
        .collect()
}

/// Resolves `attr` of every element matching `selector` against the page URL
fn resolved_attrs(document: &Html, selector: &str, attr: &str, page_url: &Url) -> Vec<Url> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .filter_map(|value| resolve(page_url, value))
        .collect()
}
