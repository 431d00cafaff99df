//! Feed query identity: which endpoint, which filter, which order.

use serde::{Deserialize, Serialize};

use crate::api::endpoints;

/// Which wallpaper listing the feed is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WallSource {
    Home,
    Latest,
    Top,
    Random,
    /// Free-text search. An empty (or whitespace) term means the feed
    /// is waiting for input and fetches nothing.
    Search { term: String },
    /// Category browsing reuses the search endpoint with the slug as
    /// the search term, the way the web client does.
    Category { slug: String },
}

/// Result ordering for search-backed sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMode {
    #[default]
    Relevance,
    Latest,
    Popular,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Relevance, SortMode::Latest, SortMode::Popular];

    /// Human-readable name for the sort combo box.
    pub fn display_name(&self) -> &'static str {
        match self {
            SortMode::Relevance => "Relevance",
            SortMode::Latest => "Latest",
            SortMode::Popular => "Most Popular",
        }
    }

    /// Value sent as the `sort` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::Latest => "latest",
            SortMode::Popular => "popular",
        }
    }
}

/// Identity of one independent pagination sequence. Two equal queries
/// share one page sequence; a different query starts from page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub source: WallSource,
    pub sort: SortMode,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self::home()
    }
}

impl FeedQuery {
    pub fn home() -> Self {
        Self {
            source: WallSource::Home,
            sort: SortMode::default(),
        }
    }

    pub fn latest() -> Self {
        Self {
            source: WallSource::Latest,
            sort: SortMode::default(),
        }
    }

    pub fn top() -> Self {
        Self {
            source: WallSource::Top,
            sort: SortMode::default(),
        }
    }

    pub fn random() -> Self {
        Self {
            source: WallSource::Random,
            sort: SortMode::default(),
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            source: WallSource::Search { term: term.into() },
            sort: SortMode::default(),
        }
    }

    pub fn category(slug: impl Into<String>) -> Self {
        Self {
            source: WallSource::Category { slug: slug.into() },
            sort: SortMode::default(),
        }
    }

    /// API path this query paginates.
    pub fn endpoint(&self) -> &'static str {
        match &self.source {
            WallSource::Home => endpoints::HOME,
            WallSource::Latest => endpoints::LATEST,
            WallSource::Top => endpoints::TOP,
            WallSource::Random => endpoints::RANDOM,
            WallSource::Search { .. } | WallSource::Category { .. } => endpoints::SEARCH,
        }
    }

    /// Query parameters for fetching `page`. Parameters that do not
    /// apply to this source are `None` and never serialized.
    pub fn params(&self, page: u32) -> Vec<(&'static str, Option<String>)> {
        let term = match &self.source {
            WallSource::Search { term } => Some(term.trim().to_string()),
            WallSource::Category { slug } => Some(slug.clone()),
            _ => None,
        };
        let sort = self
            .supports_sort()
            .then(|| self.sort.as_param().to_string());

        vec![("q", term), ("page", Some(page.to_string())), ("sort", sort)]
    }

    /// True for search-backed sources where the `sort` parameter is
    /// meaningful.
    pub fn supports_sort(&self) -> bool {
        matches!(
            self.source,
            WallSource::Search { .. } | WallSource::Category { .. }
        )
    }

    /// A search with an empty term has nothing to fetch yet.
    pub fn awaits_input(&self) -> bool {
        matches!(&self.source, WallSource::Search { term } if term.trim().is_empty())
    }

    /// Heading shown above the grid.
    pub fn title(&self) -> String {
        match &self.source {
            WallSource::Home => "Discover Amazing Wallpapers".to_string(),
            WallSource::Latest => "Latest Wallpapers".to_string(),
            WallSource::Top => "Top Wallpapers".to_string(),
            WallSource::Random => "Random Wallpapers".to_string(),
            WallSource::Search { term } => format!("Results for \"{}\"", term.trim()),
            WallSource::Category { slug } => {
                let mut chars = slug.chars();
                let name = match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                };
                format!("{} Wallpapers", name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_sources_send_only_page() {
        for query in [
            FeedQuery::home(),
            FeedQuery::latest(),
            FeedQuery::top(),
            FeedQuery::random(),
        ] {
            let params = query.params(3);
            let present: Vec<_> = params
                .iter()
                .filter_map(|(k, v)| v.as_ref().map(|v| (*k, v.clone())))
                .collect();
            assert_eq!(present, vec![("page", "3".to_string())]);
        }
    }

    #[test]
    fn test_search_sends_term_page_and_sort() {
        let mut query = FeedQuery::search("misty mountains");
        query.sort = SortMode::Popular;
        let params = query.params(1);
        assert!(params.contains(&("q", Some("misty mountains".to_string()))));
        assert!(params.contains(&("page", Some("1".to_string()))));
        assert!(params.contains(&("sort", Some("popular".to_string()))));
        assert_eq!(query.endpoint(), "/api/wallhaven/search");
    }

    #[test]
    fn test_category_uses_search_endpoint_with_slug() {
        let query = FeedQuery::category("nature");
        assert_eq!(query.endpoint(), "/api/wallhaven/search");
        assert!(query.params(1).contains(&("q", Some("nature".to_string()))));
    }

    #[test]
    fn test_empty_search_awaits_input() {
        assert!(FeedQuery::search("").awaits_input());
        assert!(FeedQuery::search("   ").awaits_input());
        assert!(!FeedQuery::search("cars").awaits_input());
        assert!(!FeedQuery::home().awaits_input());
    }

    #[test]
    fn test_queries_with_different_sort_are_distinct() {
        let relevance = FeedQuery::search("cars");
        let mut popular = FeedQuery::search("cars");
        popular.sort = SortMode::Popular;
        assert_ne!(relevance, popular);
        assert_eq!(relevance, FeedQuery::search("cars"));
    }

    #[test]
    fn test_sort_mode_params() {
        assert_eq!(SortMode::Relevance.as_param(), "relevance");
        assert_eq!(SortMode::Latest.as_param(), "latest");
        assert_eq!(SortMode::Popular.as_param(), "popular");
    }
}
