//! Wire models for the paginated wallpaper endpoints.

use serde::Deserialize;

/// Thumbnail URL set for one wallpaper. `small` is always present;
/// the larger variants depend on what the upstream indexed.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct Thumbs {
    pub small: String,
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

/// One wallpaper reference as returned by the API.
///
/// Never mutated after deserialization; a re-fetch produces a fresh
/// value rather than updating an old one.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct Wallpaper {
    pub id: String,
    pub thumbs: Thumbs,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub downloads: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Wallpaper {
    /// Best available full-resolution URL, falling back to the small
    /// thumbnail when nothing larger was indexed.
    pub fn full_url(&self) -> &str {
        self.thumbs
            .large
            .as_deref()
            .or(self.thumbs.original.as_deref())
            .unwrap_or(&self.thumbs.small)
    }

    /// Reconstruct a reference from a bare wallhaven ID using the
    /// site's URL layout (`th.wallhaven.cc/small/<id[0..2]>/<id>.jpg`).
    ///
    /// Used by the favorites view, which only persists IDs. The URLs
    /// are a reconstruction, not data returned by the API, and no
    /// metadata is invented for them.
    pub fn from_favorite_id(id: &str) -> Self {
        let prefix: String = id.chars().take(2).collect();
        Self {
            id: id.to_string(),
            thumbs: Thumbs {
                small: format!("https://th.wallhaven.cc/small/{}/{}.jpg", prefix, id),
                large: Some(format!(
                    "https://w.wallhaven.cc/full/{}/wallhaven-{}.jpg",
                    prefix, id
                )),
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
}

/// One page of results. An absent or empty `data` array marks the end
/// of the sequence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WallPage {
    #[serde(default)]
    pub data: Vec<Wallpaper>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallpaper_parsing_full() {
        let json = r#"{
            "id": "x8gjmz",
            "thumbs": {
                "small": "https://th.wallhaven.cc/small/x8/x8gjmz.jpg",
                "large": "https://th.wallhaven.cc/lg/x8/x8gjmz.jpg",
                "original": "https://th.wallhaven.cc/orig/x8/x8gjmz.jpg"
            },
            "resolution": "2560x1440",
            "category": "Nature",
            "tags": ["forest", "mist"],
            "views": 4021,
            "downloads": 233,
            "created_at": "2024-11-02T09:12:44.000Z"
        }"#;

        let wall: Wallpaper = serde_json::from_str(json).unwrap();
        assert_eq!(wall.id, "x8gjmz");
        assert_eq!(wall.resolution.as_deref(), Some("2560x1440"));
        assert_eq!(wall.tags.len(), 2);
        assert_eq!(wall.views, Some(4021));
        assert_eq!(wall.full_url(), "https://th.wallhaven.cc/lg/x8/x8gjmz.jpg");
    }

    #[test]
    fn test_wallpaper_parsing_minimal() {
        let json = r#"{
            "id": "q2k5v7",
            "thumbs": { "small": "https://th.wallhaven.cc/small/q2/q2k5v7.jpg" }
        }"#;

        let wall: Wallpaper = serde_json::from_str(json).unwrap();
        assert!(wall.resolution.is_none());
        assert!(wall.tags.is_empty());
        assert!(wall.views.is_none());
        // Falls back to the small thumb when nothing larger exists
        assert_eq!(wall.full_url(), wall.thumbs.small);
    }

    #[test]
    fn test_page_parsing_missing_data_is_empty() {
        let page: WallPage = serde_json::from_str("{}").unwrap();
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_from_favorite_id_uses_id_prefix() {
        let wall = Wallpaper::from_favorite_id("x8gjmz");
        assert_eq!(
            wall.thumbs.small,
            "https://th.wallhaven.cc/small/x8/x8gjmz.jpg"
        );
        assert!(wall.views.is_none());
        assert!(wall.category.is_none());
    }
}
