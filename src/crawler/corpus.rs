//! Per-page results and the aggregate corpus of a crawl

use std::collections::BTreeSet;

/// Separator appended after each page's text in the corpus
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Everything extracted from one successfully fetched page
///
/// Created once by the extractor and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    /// URL the page was fetched from
    pub url: String,

    /// Visible text, whitespace-normalized
    pub text: String,

    /// Absolute same-domain http(s) links
    pub links: BTreeSet<String>,

    /// Absolute image sources, any domain
    pub images: BTreeSet<String>,

    /// Rendered tables, numbered from 1 within the page
    pub tables: Vec<String>,
}

/// Aggregated extraction results of one crawl run
///
/// Merge semantics:
/// - text is appended, each page followed by [`PAGE_SEPARATOR`]
/// - link and image sets are unioned
/// - tables are appended in page order, keeping each page's own numbering
///
/// Pages are merged in visit order, so text and tables follow the crawl
/// order while sets iterate lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    pub all_text: String,
    pub all_links: BTreeSet<String>,
    pub all_images: BTreeSet<String>,
    pub all_tables: Vec<String>,
    pages: usize,
}

impl Corpus {
    /// Creates an empty corpus
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one page into the corpus
    pub fn merge(&mut self, page: PageResult) {
        self.all_text.push_str(&page.text);
        self.all_text.push_str(PAGE_SEPARATOR);
        self.all_links.extend(page.links);
        self.all_images.extend(page.images);
        self.all_tables.extend(page.tables);
        self.pages += 1;
    }

    /// Number of pages merged so far
    pub fn page_count(&self) -> usize {
        self.pages
    }

    /// True if no page contributed any text, link, image or table
    pub fn is_empty(&self) -> bool {
        self.all_text.trim().is_empty()
            && self.all_links.is_empty()
            && self.all_images.is_empty()
            && self.all_tables.is_empty()
    }
}
