//! Paginated wallpaper feed.
//!
//! One feed is active at a time, bound to a [`FeedQuery`]. Pages are
//! fetched sequentially through the API client on the async compute
//! pool and accumulated in fetch order. The feed's status guard is
//! what makes a repeatedly firing scroll sentinel safe: a next-page
//! request while a fetch is in flight, or after the feed is exhausted,
//! is a no-op.

mod query;
mod state;
mod systems;

pub use query::{FeedQuery, SortMode, WallSource};
pub use state::{FeedStatus, WallFeed};

use bevy::prelude::*;

use crate::api::ApiClient;

/// Message to replace the active query. The previous page sequence is
/// discarded; page 1 of the new query is requested automatically.
#[derive(Message)]
pub struct SetFeedQuery {
    pub query: FeedQuery,
}

/// Message requesting the next page of the active query. Safe to fire
/// redundantly; the feed ignores it while loading or exhausted.
#[derive(Message)]
pub struct RequestNextPage;

pub struct FeedPlugin;

impl Plugin for FeedPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ApiClient>()
            .init_resource::<WallFeed>()
            .add_message::<SetFeedQuery>()
            .add_message::<RequestNextPage>()
            .add_systems(Startup, systems::kick_initial_fetch)
            .add_systems(
                Update,
                (
                    systems::handle_set_query.run_if(on_message::<SetFeedQuery>),
                    systems::handle_request_next.run_if(on_message::<RequestNextPage>),
                    systems::poll_page_fetches,
                )
                    .chain(),
            );
    }
}
