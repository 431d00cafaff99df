//! Thumbnail fetching and egui texture registration.
//!
//! Cards ask the cache for a URL; a bounded number of downloads run on
//! the async compute pool, get decoded with the `image` crate, and are
//! registered as egui textures. Failures are remembered so a broken
//! URL is not refetched every frame.

use std::collections::{HashMap, HashSet};
use std::io::Read;

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiTextureHandle, EguiUserTextures};
use futures_lite::future;

use crate::api::USER_AGENT;
use crate::constants::{
    MAX_THUMBNAILS_IN_FLIGHT, MAX_THUMBNAIL_BYTES, MAX_THUMBNAIL_STARTS_PER_FRAME,
};

/// URL-keyed thumbnail texture cache.
#[derive(Resource, Default)]
pub struct ThumbnailCache {
    /// Keeps the decoded images alive in `Assets<Image>`
    handles: HashMap<String, Handle<Image>>,
    /// egui texture ids for loaded thumbnails
    texture_ids: HashMap<String, egui::TextureId>,
    /// URLs that failed to download or decode
    failed: HashSet<String>,
    /// URLs requested by the UI but not yet started
    wanted: HashSet<String>,
    /// URLs with a download currently running
    in_flight: HashSet<String>,
}

impl ThumbnailCache {
    /// Texture for `url`, when it has finished loading.
    pub fn texture_id(&self, url: &str) -> Option<egui::TextureId> {
        self.texture_ids.get(url).copied()
    }

    pub fn has_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    /// Ask for `url` to be fetched. Safe to call every frame; URLs
    /// already loaded, failed, queued, or in flight are ignored.
    pub fn request(&mut self, url: &str) {
        if self.texture_ids.contains_key(url)
            || self.failed.contains(url)
            || self.in_flight.contains(url)
            || self.wanted.contains(url)
        {
            return;
        }
        self.wanted.insert(url.to_string());
    }
}

/// Decoded RGBA pixels, or None when the fetch or decode failed.
type FetchedPixels = Option<(u32, u32, Vec<u8>)>;

/// Background task for one thumbnail download
#[derive(Component)]
pub struct ThumbFetchTask(Task<(String, FetchedPixels)>);

fn fetch_thumbnail(url: &str) -> FetchedPixels {
    let response = ureq::get(url).set("User-Agent", USER_AGENT).call().ok()?;

    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_THUMBNAIL_BYTES)
        .read_to_end(&mut bytes)
        .ok()?;

    let decoded = image::load_from_memory(&bytes).ok()?;
    let rgba = decoded.to_rgba8();
    Some((rgba.width(), rgba.height(), rgba.into_raw()))
}

/// Build a bevy image from raw RGBA pixels.
fn rgba_image(width: u32, height: u32, data: Vec<u8>) -> Image {
    Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}

/// System starting queued thumbnail downloads within the frame and
/// in-flight budgets.
pub fn start_thumbnail_fetches(mut cache: ResMut<ThumbnailCache>, mut commands: Commands) {
    if cache.in_flight.len() >= MAX_THUMBNAILS_IN_FLIGHT {
        return;
    }

    let budget =
        MAX_THUMBNAIL_STARTS_PER_FRAME.min(MAX_THUMBNAILS_IN_FLIGHT - cache.in_flight.len());
    let urls: Vec<String> = cache.wanted.iter().take(budget).cloned().collect();

    let task_pool = AsyncComputeTaskPool::get();
    for url in urls {
        cache.wanted.remove(&url);
        cache.in_flight.insert(url.clone());

        let task_url = url.clone();
        let task = task_pool.spawn(async move {
            let pixels = fetch_thumbnail(&task_url);
            (task_url, pixels)
        });
        commands.spawn(ThumbFetchTask(task));
    }
}

/// System polling downloads and registering finished thumbnails with
/// egui.
pub fn poll_thumbnail_fetches(
    mut commands: Commands,
    mut cache: ResMut<ThumbnailCache>,
    mut images: ResMut<Assets<Image>>,
    mut egui_textures: ResMut<EguiUserTextures>,
    mut tasks: Query<(Entity, &mut ThumbFetchTask)>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some((url, pixels)) = future::block_on(future::poll_once(&mut task.0)) {
            cache.in_flight.remove(&url);

            match pixels {
                Some((width, height, data)) => {
                    let handle = images.add(rgba_image(width, height, data));
                    let texture_id = egui_textures.add_image(EguiTextureHandle::Weak(handle.id()));
                    cache.handles.insert(url.clone(), handle);
                    cache.texture_ids.insert(url, texture_id);
                }
                None => {
                    warn!("thumbnail fetch failed for {}", url);
                    cache.failed.insert(url);
                }
            }

            commands.entity(entity).despawn();
        }
    }
}

// ============================================================================
// Failure placeholder
// ============================================================================

/// Texture shown in place of thumbnails that failed to load.
#[derive(Resource)]
pub struct FailedThumbTexture {
    #[allow(dead_code)]
    handle: Handle<Image>,
    pub texture_id: egui::TextureId,
}

/// Placeholder edge length in pixels.
const PLACEHOLDER_SIZE: u32 = 64;

/// Create a red placeholder image with an X pattern.
fn create_placeholder_image() -> Image {
    let size = PLACEHOLDER_SIZE as usize;
    let mut data = vec![0u8; size * size * 4];

    let red: [u8; 4] = [200, 50, 50, 255];
    let dark_red: [u8; 4] = [120, 30, 30, 255];

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;

            let is_border = x < 2 || x >= size - 2 || y < 2 || y >= size - 2;
            let on_diagonal = (x as i32 - y as i32).abs() <= 2
                || ((size - 1 - x) as i32 - y as i32).abs() <= 2;

            let color = if is_border || on_diagonal { red } else { dark_red };
            data[idx..idx + 4].copy_from_slice(&color);
        }
    }

    rgba_image(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, data)
}

/// Startup system creating and registering the failure placeholder.
pub fn setup_failed_thumb_texture(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut egui_textures: ResMut<EguiUserTextures>,
) {
    let handle = images.add(create_placeholder_image());
    let texture_id = egui_textures.add_image(EguiTextureHandle::Weak(handle.id()));
    commands.insert_resource(FailedThumbTexture { handle, texture_id });
}
