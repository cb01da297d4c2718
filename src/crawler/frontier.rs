//! Frontier and visited-set tracking
//!
//! The frontier holds URLs that were discovered but not fetched yet; the
//! visited set holds every URL the crawl has attempted, whether the fetch
//! succeeded or not. The two are kept disjoint: a visited URL is never
//! offered back into the frontier.
//!
//! URLs are handed out first-in, first-out, which makes the crawl
//! breadth-first and its order reproducible.

use std::collections::{HashSet, VecDeque};

/// Pending and visited URL sets for one crawl run
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    /// FIFO of pending URLs
    queue: VecDeque<String>,

    /// Membership index for `queue`
    pending: HashSet<String>,

    /// URLs already attempted, in visit order
    visited_order: Vec<String>,

    /// Membership index for `visited_order`
    visited: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier holding only the seed, with nothing visited
    pub fn new(seed: impl Into<String>) -> Self {
        let mut frontier = Self::default();
        frontier.push(seed.into());
        frontier
    }

    /// Removes and returns the oldest pending URL
    pub fn pop(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.pending.remove(&url);
        Some(url)
    }

    /// Records `url` as attempted
    ///
    /// Idempotent. A URL marked visited is also dropped from the pending set
    /// if it was still queued.
    pub fn mark_visited(&mut self, url: &str) {
        if self.visited.insert(url.to_string()) {
            self.visited_order.push(url.to_string());
        }
        if self.pending.remove(url) {
            self.queue.retain(|queued| queued != url);
        }
    }

    /// Adds every URL that is neither visited nor already pending
    ///
    /// Returns the number of URLs actually added.
    pub fn offer<I, S>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for url in urls {
            let url = url.into();
            if self.visited.contains(&url) || self.pending.contains(&url) {
                continue;
            }
            self.push(url);
            added += 1;
        }
        added
    }

    /// True iff there is pending work and the page budget is not spent
    pub fn should_continue(&self, max_pages: usize) -> bool {
        !self.queue.is_empty() && self.visited_count() < max_pages
    }

    /// Returns true if `url` has been attempted
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Returns true if `url` is waiting in the frontier
    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    /// Number of URLs attempted so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Attempted URLs in visit order
    pub fn visited(&self) -> &[String] {
        &self.visited_order
    }

    /// Number of pending URLs
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn push(&mut self, url: String) {
        self.pending.insert(url.clone());
        self.queue.push_back(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "https://example.com/";

    #[test]
    fn test_new_frontier_holds_seed() {
        let frontier = Frontier::new(SEED);
        assert_eq!(frontier.len(), 1);
        assert!(frontier.is_pending(SEED));
        assert_eq!(frontier.visited_count(), 0);
    }

    #[test]
    fn test_pop_is_fifo() {
        let mut frontier = Frontier::new(SEED);
        frontier.offer(["https://example.com/a", "https://example.com/b"]);

        assert_eq!(frontier.pop().as_deref(), Some(SEED));
        assert_eq!(frontier.pop().as_deref(), Some("https://example.com/a"));
        assert_eq!(frontier.pop().as_deref(), Some("https://example.com/b"));
        assert_eq!(frontier.pop(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_offer_same_url_twice_adds_once() {
        let mut frontier = Frontier::new(SEED);
        let added = frontier.offer(["https://example.com/x", "https://example.com/x"]);
        assert_eq!(added, 1);
        assert_eq!(frontier.offer(["https://example.com/x"]), 0);
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn test_offer_never_readds_visited() {
        let mut frontier = Frontier::new(SEED);
        let url = frontier.pop().unwrap();
        frontier.mark_visited(&url);

        assert_eq!(frontier.offer([SEED]), 0);
        assert!(frontier.is_empty());
        assert!(!frontier.is_pending(SEED));
    }

    #[test]
    fn test_mark_visited_is_idempotent() {
        let mut frontier = Frontier::new(SEED);
        frontier.mark_visited(SEED);
        frontier.mark_visited(SEED);
        assert_eq!(frontier.visited_count(), 1);
        assert_eq!(frontier.visited(), &[SEED.to_string()]);
    }

    #[test]
    fn test_mark_visited_keeps_sets_disjoint() {
        let mut frontier = Frontier::new(SEED);
        frontier.offer(["https://example.com/a"]);

        frontier.mark_visited("https://example.com/a");

        assert!(!frontier.is_pending("https://example.com/a"));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.pop().as_deref(), Some(SEED));
    }

    #[test]
    fn test_should_continue() {
        let mut frontier = Frontier::new(SEED);
        assert!(frontier.should_continue(1));

        let url = frontier.pop().unwrap();
        frontier.mark_visited(&url);
        frontier.offer(["https://example.com/next"]);

        // budget of one page is spent even though work remains
        assert!(!frontier.should_continue(1));
        assert!(frontier.should_continue(2));

        frontier.pop();
        assert!(!frontier.should_continue(10));
    }

    #[test]
    fn test_each_offered_url_popped_exactly_once() {
        let mut frontier = Frontier::new(SEED);
        frontier.offer((0..50).map(|i| format!("https://example.com/{}", i % 20)));

        let mut seen = HashSet::new();
        while let Some(url) = frontier.pop() {
            assert!(seen.insert(url.clone()), "popped twice: {}", url);
            frontier.mark_visited(&url);
        }
        assert_eq!(seen.len(), 21);
    }
}
