//! Feed state machine: accumulated pages, fetch status, end detection.

use bevy::prelude::*;

use crate::api::Wallpaper;

use super::query::FeedQuery;

/// Where the feed is in its fetch lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    /// Nothing fetched yet and nothing in flight.
    Idle,
    /// The query has an empty search term; waiting for the user.
    AwaitingQuery,
    /// Page 1 is in flight.
    LoadingFirst,
    /// A later page is in flight.
    LoadingNext,
    /// Last fetch applied successfully.
    Settled,
    /// Last fetch failed. Terminal for the attempt; a retry request
    /// re-enters a loading state through the normal path.
    Error(String),
}

impl FeedStatus {
    /// True while a fetch is outstanding. `begin_next` refuses to
    /// start another one in this state.
    pub fn is_loading(&self) -> bool {
        matches!(self, FeedStatus::LoadingFirst | FeedStatus::LoadingNext)
    }
}

/// A fetch the feed has committed to. Carries the generation so the
/// completion can be matched back against the feed that issued it.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub generation: u64,
    pub page: u32,
    pub query: FeedQuery,
}

/// The active pagination sequence.
///
/// Pages are append-only and kept in fetch order. `generation` is
/// bumped whenever the query changes, so completions of fetches
/// started under an earlier query are recognized as stale and dropped
/// instead of leaking into the new sequence.
#[derive(Resource)]
pub struct WallFeed {
    query: FeedQuery,
    pages: Vec<Vec<Wallpaper>>,
    status: FeedStatus,
    has_more: bool,
    generation: u64,
}

impl Default for WallFeed {
    fn default() -> Self {
        Self {
            query: FeedQuery::default(),
            pages: Vec::new(),
            status: FeedStatus::Idle,
            has_more: true,
            generation: 0,
        }
    }
}

impl WallFeed {
    pub fn query(&self) -> &FeedQuery {
        &self.query
    }

    pub fn status(&self) -> &FeedStatus {
        &self.status
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Number of pages successfully fetched so far.
    pub fn fetched_pages(&self) -> usize {
        self.pages.len()
    }

    /// All accumulated wallpapers, page order then within-page order.
    pub fn walls(&self) -> impl Iterator<Item = &Wallpaper> {
        self.pages.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(Vec::is_empty)
    }

    /// Bind the feed to a new query, discarding the old sequence.
    /// Setting the query it already holds is a no-op so that several
    /// views sharing the feed never restart each other's sequence.
    pub fn set_query(&mut self, query: FeedQuery) {
        if query == self.query {
            return;
        }

        self.query = query;
        self.pages.clear();
        self.generation += 1;
        self.has_more = true;
        self.status = if self.query.awaits_input() {
            FeedStatus::AwaitingQuery
        } else {
            FeedStatus::Idle
        };
    }

    /// Commit to fetching the next page, or refuse.
    ///
    /// Returns `None` while a fetch is in flight, once the feed is
    /// exhausted, or while awaiting a search term. Otherwise marks the
    /// feed loading (synchronously, before any I/O starts) and returns
    /// the request to execute. A failed page does not advance the page
    /// counter, so a retry refetches the same page number.
    pub fn begin_next(&mut self) -> Option<PageRequest> {
        if self.status.is_loading() || !self.has_more {
            return None;
        }
        if matches!(self.status, FeedStatus::AwaitingQuery) {
            return None;
        }

        self.status = if self.pages.is_empty() {
            FeedStatus::LoadingFirst
        } else {
            FeedStatus::LoadingNext
        };

        Some(PageRequest {
            generation: self.generation,
            page: self.pages.len() as u32 + 1,
            query: self.query.clone(),
        })
    }

    /// Apply a successful page fetch. Completions from a superseded
    /// query (generation mismatch) are dropped. An empty page marks
    /// the end of the sequence; `has_more` latches false and never
    /// reverts for this query.
    pub fn apply_page(&mut self, generation: u64, items: Vec<Wallpaper>) {
        if generation != self.generation {
            debug!("discarding stale page for superseded query");
            return;
        }

        self.has_more = self.has_more && !items.is_empty();
        if !items.is_empty() {
            self.pages.push(items);
        }
        self.status = FeedStatus::Settled;
    }

    /// Apply a failed page fetch, unless it is stale.
    pub fn apply_error(&mut self, generation: u64, message: String) {
        if generation != self.generation {
            debug!("discarding stale error for superseded query");
            return;
        }
        self.status = FeedStatus::Error(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Thumbs;

    fn wall(id: &str) -> Wallpaper {
        Wallpaper {
            id: id.to_string(),
            thumbs: Thumbs {
                small: format!("https://th.wallhaven.cc/small/{}/{}.jpg", &id[..2], id),
                large: None,
                original: None,
            },
            resolution: None,
            category: None,
            tags: Vec::new(),
            views: None,
            downloads: None,
            created_at: None,
        }
    }

    fn page_of(prefix: &str, count: usize) -> Vec<Wallpaper> {
        (0..count)
            .map(|i| wall(&format!("{}{:02}", prefix, i)))
            .collect()
    }

    #[test]
    fn test_pages_accumulate_in_fetch_order() {
        let mut feed = WallFeed::default();

        for n in 1..=3u32 {
            let request = feed.begin_next().expect("fetch should be allowed");
            assert_eq!(request.page, n);
            feed.apply_page(request.generation, page_of(&format!("p{}", n), 4));
        }

        assert_eq!(feed.fetched_pages(), 3);
        assert_eq!(feed.len(), 12);
        let ids: Vec<_> = feed.walls().map(|w| w.id.as_str()).collect();
        assert_eq!(&ids[..4], &["p100", "p101", "p102", "p103"]);
        assert_eq!(&ids[8..], &["p300", "p301", "p302", "p303"]);
    }

    #[test]
    fn test_begin_next_is_noop_while_loading() {
        let mut feed = WallFeed::default();

        let request = feed.begin_next().unwrap();
        assert_eq!(*feed.status(), FeedStatus::LoadingFirst);
        // In-flight guard: the sentinel may fire every frame
        assert!(feed.begin_next().is_none());
        assert!(feed.begin_next().is_none());

        feed.apply_page(request.generation, page_of("a", 2));
        assert_eq!(*feed.status(), FeedStatus::Settled);
        assert_eq!(feed.begin_next().unwrap().page, 2);
        assert_eq!(*feed.status(), FeedStatus::LoadingNext);
    }

    #[test]
    fn test_empty_page_exhausts_feed_permanently() {
        let mut feed = WallFeed::default();

        let first = feed.begin_next().unwrap();
        feed.apply_page(first.generation, page_of("a", 24));
        assert!(feed.has_more());

        let second = feed.begin_next().unwrap();
        assert_eq!(second.page, 2);
        feed.apply_page(second.generation, Vec::new());

        assert!(!feed.has_more());
        assert_eq!(feed.len(), 24);
        // Exhausted: every further request is a no-op
        assert!(feed.begin_next().is_none());
        assert!(feed.begin_next().is_none());
        assert_eq!(feed.len(), 24);
    }

    #[test]
    fn test_query_change_discards_pages_and_stale_completions() {
        let mut feed = WallFeed::default();

        let request = feed.begin_next().unwrap();
        // Query changes while page 1 of the old query is in flight
        feed.set_query(FeedQuery::search("mountains"));
        assert_eq!(feed.len(), 0);

        // The old completion lands afterwards and must not leak in
        feed.apply_page(request.generation, page_of("a", 10));
        assert_eq!(feed.len(), 0);
        assert_eq!(*feed.status(), FeedStatus::Idle);

        // The new query starts from page 1
        let fresh = feed.begin_next().unwrap();
        assert_eq!(fresh.page, 1);
        assert_eq!(fresh.query, FeedQuery::search("mountains"));
    }

    #[test]
    fn test_stale_error_is_dropped() {
        let mut feed = WallFeed::default();
        let request = feed.begin_next().unwrap();
        feed.set_query(FeedQuery::latest());

        feed.apply_error(request.generation, "boom".to_string());
        assert_eq!(*feed.status(), FeedStatus::Idle);
    }

    #[test]
    fn test_error_then_retry_refetches_same_page() {
        let mut feed = WallFeed::default();

        let first = feed.begin_next().unwrap();
        feed.apply_page(first.generation, page_of("a", 5));

        let second = feed.begin_next().unwrap();
        assert_eq!(second.page, 2);
        feed.apply_error(second.generation, "all API hosts failed".to_string());
        assert!(matches!(feed.status(), FeedStatus::Error(_)));

        // Retry goes through the same gate and asks for page 2 again
        let retry = feed.begin_next().unwrap();
        assert_eq!(retry.page, 2);
        assert_eq!(*feed.status(), FeedStatus::LoadingNext);
    }

    #[test]
    fn test_empty_search_awaits_input_and_fetches_nothing() {
        let mut feed = WallFeed::default();
        feed.set_query(FeedQuery::search(""));
        assert_eq!(*feed.status(), FeedStatus::AwaitingQuery);
        assert!(feed.begin_next().is_none());
    }

    #[test]
    fn test_setting_same_query_keeps_sequence() {
        let mut feed = WallFeed::default();
        let request = feed.begin_next().unwrap();
        feed.apply_page(request.generation, page_of("a", 6));

        feed.set_query(FeedQuery::home());
        assert_eq!(feed.len(), 6);
        assert_eq!(*feed.status(), FeedStatus::Settled);
    }

    #[test]
    fn test_scenario_search_two_pages_then_noop() {
        let mut feed = WallFeed::default();
        feed.set_query(FeedQuery::search("mountains"));

        let p1 = feed.begin_next().unwrap();
        feed.apply_page(p1.generation, page_of("m1", 24));
        assert!(feed.has_more());
        assert_eq!(feed.len(), 24);

        let p2 = feed.begin_next().unwrap();
        feed.apply_page(p2.generation, Vec::new());
        assert!(!feed.has_more());

        // No network call happens and the sequence stays at 24
        assert!(feed.begin_next().is_none());
        assert_eq!(feed.len(), 24);
    }
}
