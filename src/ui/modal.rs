//! Wallpaper detail window, opened by clicking a grid card.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::api::Wallpaper;
use crate::download::RequestWallpaperDownload;
use crate::stores::Favorites;
use crate::theme;

use super::thumbnails::ThumbnailCache;
use super::SelectedWallpaper;

const PREVIEW_SIZE: egui::Vec2 = egui::vec2(640.0, 400.0);

pub fn wall_detail_ui(
    mut contexts: EguiContexts,
    mut selected: ResMut<SelectedWallpaper>,
    mut thumbnails: ResMut<ThumbnailCache>,
    mut favorites: ResMut<Favorites>,
    mut download_events: MessageWriter<RequestWallpaperDownload>,
) -> Result {
    let Some(wall) = selected.wall.clone() else {
        return Ok(());
    };
    let ctx = contexts.ctx_mut()?;

    let mut open = true;
    egui::Window::new(format!("Wallpaper {}", wall.id))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            preview(ui, &wall, &mut thumbnails);
            ui.add_space(8.0);
            metadata(ui, &wall);
            ui.separator();

            ui.horizontal(|ui| {
                let favorited = favorites.is_favorite(&wall.id);
                let heart = if favorited {
                    egui::RichText::new("♥ Favorited").color(theme::ui::FAVORITE_ACTIVE)
                } else {
                    egui::RichText::new("♡ Favorite")
                };
                if ui.button(heart).clicked() {
                    favorites.toggle(&wall.id);
                }

                if ui.button("⬇ Download").clicked() {
                    download_events.write(RequestWallpaperDownload {
                        id: wall.id.clone(),
                        url: wall.full_url().to_string(),
                    });
                }

                if ui.button("Open in Browser").clicked()
                    && let Err(e) = open::that(wall.full_url())
                {
                    warn!("Failed to open browser: {}", e);
                }
            });
        });

    if !open {
        selected.wall = None;
    }

    Ok(())
}

/// The large preview, falling back to the grid thumbnail while it
/// loads.
fn preview(ui: &mut egui::Ui, wall: &Wallpaper, thumbnails: &mut ThumbnailCache) {
    let preview_url = wall
        .thumbs
        .large
        .as_deref()
        .unwrap_or(wall.thumbs.small.as_str());
    thumbnails.request(preview_url);

    let texture_id = thumbnails
        .texture_id(preview_url)
        .or_else(|| thumbnails.texture_id(&wall.thumbs.small));

    match texture_id {
        Some(texture_id) => {
            ui.add(
                egui::Image::new(egui::load::SizedTexture::new(texture_id, PREVIEW_SIZE))
                    .fit_to_exact_size(PREVIEW_SIZE)
                    .corner_radius(4.0),
            );
        }
        None => {
            let (rect, _) = ui.allocate_exact_size(PREVIEW_SIZE, egui::Sense::hover());
            ui.painter()
                .rect_filled(rect, 4.0, theme::ui::THUMB_PENDING);
            ui.put(rect, egui::Spinner::new());
        }
    }
}

/// Fields the listing did not include stay hidden.
fn metadata(ui: &mut egui::Ui, wall: &Wallpaper) {
    if let Some(resolution) = &wall.resolution {
        ui.label(format!("Resolution: {}", resolution));
    }
    if let Some(category) = &wall.category {
        ui.label(format!("Category: {}", category));
    }
    if let Some(views) = wall.views {
        ui.label(format!("Views: {}", views));
    }
    if let Some(downloads) = wall.downloads {
        ui.label(format!("Downloads: {}", downloads));
    }
    if let Some(created_at) = &wall.created_at {
        ui.label(format!("Added: {}", created_at));
    }
    if !wall.tags.is_empty() {
        ui.horizontal_wrapped(|ui| {
            for tag in &wall.tags {
                ui.label(
                    egui::RichText::new(tag)
                        .small()
                        .color(theme::ui::HINT_TEXT),
                );
            }
        });
    }
}
