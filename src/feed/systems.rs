//! Bevy systems driving page fetches for the active feed.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;

use crate::api::{ApiClient, ApiError, WallPage, Wallpaper};

use super::state::{PageRequest, WallFeed};
use super::{RequestNextPage, SetFeedQuery};

/// Completed page fetch, tagged so the feed can match it against the
/// query that was active when the fetch started.
pub struct PageFetchOutcome {
    generation: u64,
    page: u32,
    result: Result<Vec<Wallpaper>, String>,
}

/// Background task for one page fetch
#[derive(Component)]
pub struct PageFetchTask(Task<PageFetchOutcome>);

fn fetch_page(client: &ApiClient, request: &PageRequest) -> Result<Vec<Wallpaper>, ApiError> {
    let params = request.query.params(request.page);
    let page: WallPage = client.get_json(request.query.endpoint(), &params)?;
    Ok(page.data)
}

/// Spawn the fetch the feed just committed to.
fn spawn_fetch(commands: &mut Commands, client: &ApiClient, request: PageRequest) {
    let client = client.clone();
    let generation = request.generation;
    let page = request.page;

    let task_pool = AsyncComputeTaskPool::get();
    let task = task_pool.spawn(async move {
        let result = fetch_page(&client, &request).map_err(|e| e.to_string());
        PageFetchOutcome {
            generation,
            page,
            result,
        }
    });

    commands.spawn(PageFetchTask(task));
}

/// Startup system requesting page 1 of the default query.
pub fn kick_initial_fetch(mut next_events: MessageWriter<RequestNextPage>) {
    next_events.write(RequestNextPage);
}

/// System applying query changes and kicking off the new first page.
pub fn handle_set_query(
    mut events: MessageReader<SetFeedQuery>,
    mut feed: ResMut<WallFeed>,
    mut next_events: MessageWriter<RequestNextPage>,
) {
    for event in events.read() {
        info!("feed query set to {:?}", event.query);
        feed.set_query(event.query.clone());
    }
    next_events.write(RequestNextPage);
}

/// System serving next-page requests.
///
/// Any number of queued requests collapse into at most one fetch: the
/// feed's status is flipped to loading in this system, synchronously,
/// before the task is spawned, so a second request the same frame (or
/// any later frame while in flight) sees the guard and is refused.
pub fn handle_request_next(
    mut events: MessageReader<RequestNextPage>,
    mut feed: ResMut<WallFeed>,
    client: Res<ApiClient>,
    mut commands: Commands,
) {
    if events.read().count() == 0 {
        return;
    }

    if let Some(request) = feed.begin_next() {
        debug!(
            "fetching page {} of {:?}",
            request.page, request.query
        );
        spawn_fetch(&mut commands, &client, request);
    }
}

/// System polling in-flight page fetches and applying completions.
pub fn poll_page_fetches(
    mut commands: Commands,
    mut feed: ResMut<WallFeed>,
    mut tasks: Query<(Entity, &mut PageFetchTask)>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(outcome) = future::block_on(future::poll_once(&mut task.0)) {
            match outcome.result {
                Ok(items) => {
                    info!("page {} returned {} wallpapers", outcome.page, items.len());
                    feed.apply_page(outcome.generation, items);
                }
                Err(message) => {
                    warn!("page {} fetch failed: {}", outcome.page, message);
                    feed.apply_error(outcome.generation, message);
                }
            }
            commands.entity(entity).despawn();
        }
    }
}
