//! Saving wallpapers to the local downloads folder.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;

use crate::api::USER_AGENT;

/// Message requesting that one wallpaper be saved to disk.
#[derive(Message)]
pub struct RequestWallpaperDownload {
    pub id: String,
    pub url: String,
}

/// Download progress surfaced to the UI.
#[derive(Resource, Default)]
pub struct DownloadStatus {
    /// Number of downloads currently running
    pub in_flight: usize,
    /// Where the most recent download landed
    pub last_saved: Option<PathBuf>,
    /// Most recent failure message
    pub last_error: Option<String>,
}

struct DownloadOutcome {
    id: String,
    result: Result<PathBuf, String>,
}

/// Background task for saving one wallpaper
#[derive(Component)]
struct WallpaperDownloadTask(Task<DownloadOutcome>);

/// Fetch `url` and write it to the downloads folder.
fn save_wallpaper(id: &str, url: &str) -> Result<PathBuf, String> {
    let path = crate::paths::downloads_dir().join(format!("wallpaper-{}.jpg", id));

    let response = ureq::get(url)
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| format!("Download failed: {}", e))?;

    let mut file =
        std::fs::File::create(&path).map_err(|e| format!("Failed to create file: {}", e))?;

    if let Err(e) = std::io::copy(&mut response.into_reader(), &mut file) {
        // Clean up partial file
        let _ = std::fs::remove_file(&path);
        return Err(format!("Download failed: {}", e));
    }

    Ok(path)
}

/// System spawning a download task per request.
fn handle_download_requests(
    mut events: MessageReader<RequestWallpaperDownload>,
    mut status: ResMut<DownloadStatus>,
    mut commands: Commands,
) {
    for event in events.read() {
        status.in_flight += 1;
        status.last_error = None;

        let id = event.id.clone();
        let url = event.url.clone();

        let task_pool = AsyncComputeTaskPool::get();
        let task = task_pool.spawn(async move {
            let result = save_wallpaper(&id, &url);
            DownloadOutcome { id, result }
        });

        commands.spawn(WallpaperDownloadTask(task));
    }
}

/// System polling in-flight downloads.
fn poll_download_tasks(
    mut commands: Commands,
    mut status: ResMut<DownloadStatus>,
    mut tasks: Query<(Entity, &mut WallpaperDownloadTask)>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(outcome) = future::block_on(future::poll_once(&mut task.0)) {
            status.in_flight = status.in_flight.saturating_sub(1);

            match outcome.result {
                Ok(path) => {
                    info!("wallpaper {} saved to {:?}", outcome.id, path);
                    status.last_saved = Some(path);
                }
                Err(message) => {
                    warn!("wallpaper {} download failed: {}", outcome.id, message);
                    status.last_error = Some(message);
                }
            }

            commands.entity(entity).despawn();
        }
    }
}

pub struct DownloadPlugin;

impl Plugin for DownloadPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DownloadStatus>()
            .add_message::<RequestWallpaperDownload>()
            .add_systems(
                Update,
                (
                    handle_download_requests.run_if(on_message::<RequestWallpaperDownload>),
                    poll_download_tasks,
                ),
            );
    }
}
