//! HTTP client for the HeavenWalls API.
//!
//! The API is a thin wallhaven proxy deployed on several hosts; any of
//! them can serve any request, so the client walks an ordered candidate
//! list until one answers.

mod client;
mod models;

pub use client::{ApiClient, ApiError};
pub use models::{Thumbs, WallPage, Wallpaper};

/// Env var that overrides the primary API host.
pub const PRIMARY_URL_ENV: &str = "WALLGAZER_API_URL";

/// Known API deployments, in preference order. The first entry doubles
/// as the default primary host.
pub const FALLBACK_URLS: [&str; 3] = [
    "https://heavenwallsapi.vercel.app",
    "https://heavenwalls-api.vercel.app",
    "https://heaven-walls-api.vercel.app",
];

/// User-Agent sent with every request
pub const USER_AGENT: &str = concat!("wallgazer/", env!("CARGO_PKG_VERSION"));

/// Paginated wallpaper endpoints. Each accepts a 1-based `page` query
/// parameter and returns `{ "data": [...] }`.
pub mod endpoints {
    pub const RANDOM: &str = "/api/wallhaven/random";
    pub const LATEST: &str = "/api/wallhaven/latest";
    pub const TOP: &str = "/api/wallhaven/topwalls";
    pub const HOME: &str = "/api/wallhaven/home";
    pub const SEARCH: &str = "/api/wallhaven/search";
}
