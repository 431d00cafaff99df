//! The wallpaper grid: browse view with infinite scroll, and the
//! favorites view.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::api::Wallpaper;
use crate::constants::{CARD_WIDTH, GRID_SPACING};
use crate::download::RequestWallpaperDownload;
use crate::feed::{FeedStatus, RequestNextPage, WallFeed};
use crate::stores::{Favorites, WallsCart};
use crate::theme;

use super::card::wall_card;
use super::thumbnails::{FailedThumbTexture, ThumbnailCache};
use super::{SelectedWallpaper, ViewMode, ViewState};

/// Bundle of everything the grid reads and mutates.
#[derive(SystemParam)]
pub struct GridParams<'w> {
    pub feed: Res<'w, WallFeed>,
    pub favorites: ResMut<'w, Favorites>,
    pub cart: ResMut<'w, WallsCart>,
    pub thumbnails: ResMut<'w, ThumbnailCache>,
    pub failed_texture: Res<'w, FailedThumbTexture>,
    pub selected: ResMut<'w, SelectedWallpaper>,
    pub view: ResMut<'w, ViewState>,
    pub next_events: MessageWriter<'w, RequestNextPage>,
    pub download_events: MessageWriter<'w, RequestWallpaperDownload>,
}

/// Main grid UI system.
pub fn wall_grid_ui(mut contexts: EguiContexts, mut params: GridParams) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::CentralPanel::default().show(ctx, |ui| match params.view.mode {
        ViewMode::Browse => browse_view(ui, &mut params),
        ViewMode::Favorites => favorites_view(ui, &mut params),
    });

    Ok(())
}

fn browse_view(ui: &mut egui::Ui, params: &mut GridParams) {
    let GridParams {
        feed,
        favorites,
        cart,
        thumbnails,
        failed_texture,
        selected,
        next_events,
        download_events,
        ..
    } = params;

    match feed.status() {
        FeedStatus::AwaitingQuery => {
            centered_note(ui, |ui| {
                ui.heading("Search Wallpapers");
                ui.label(
                    egui::RichText::new("Type a search term above to find your perfect wallpaper")
                        .color(theme::ui::HINT_TEXT),
                );
            });
            return;
        }
        FeedStatus::LoadingFirst => {
            centered_note(ui, |ui| {
                ui.spinner();
                ui.label("Loading wallpapers...");
            });
            return;
        }
        FeedStatus::Error(message) if feed.is_empty() => {
            let message = message.clone();
            centered_note(ui, |ui| {
                ui.colored_label(theme::ui::ERROR_TEXT, "Failed to load wallpapers");
                ui.label(egui::RichText::new(message).color(theme::ui::HINT_TEXT));
                if ui.button("Try Again").clicked() {
                    next_events.write(RequestNextPage);
                }
            });
            return;
        }
        _ => {}
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add_space(4.0);
            ui.heading(feed.query().title());
            ui.add_space(8.0);

            let columns = (((ui.available_width() + GRID_SPACING)
                / (CARD_WIDTH + GRID_SPACING))
                .floor() as usize)
                .max(1);

            let walls: Vec<&Wallpaper> = feed.walls().collect();
            for row in walls.chunks(columns) {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = GRID_SPACING;
                    for wall in row {
                        if wall_card(
                            ui,
                            wall,
                            thumbnails,
                            failed_texture,
                            favorites,
                            cart,
                            download_events,
                        ) {
                            selected.wall = Some((*wall).clone());
                        }
                    }
                });
                ui.add_space(GRID_SPACING);
            }

            // Footer: progress, retry, or end-of-feed
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                match feed.status() {
                    FeedStatus::LoadingNext => {
                        ui.spinner();
                        ui.colored_label(theme::ui::ACCENT, "Loading more wallpapers...");
                    }
                    FeedStatus::Error(message) => {
                        ui.colored_label(theme::ui::ERROR_TEXT, "Failed to load more wallpapers");
                        ui.label(
                            egui::RichText::new(message.clone()).color(theme::ui::HINT_TEXT),
                        );
                        if ui.button("Try Again").clicked() {
                            next_events.write(RequestNextPage);
                        }
                    }
                    _ if !feed.has_more() => {
                        ui.label(
                            egui::RichText::new("You've seen all available wallpapers!")
                                .color(theme::ui::HINT_TEXT),
                        );
                    }
                    _ => {}
                }
                ui.add_space(12.0);
            });

            // Off-screen sentinel: whenever it scrolls into view, ask
            // for the next page. The feed ignores redundant requests.
            let (sentinel, _) = ui.allocate_exact_size(
                egui::vec2(ui.available_width().max(1.0), 1.0),
                egui::Sense::hover(),
            );
            if ui.is_rect_visible(sentinel) {
                next_events.write(RequestNextPage);
            }
        });
}

fn favorites_view(ui: &mut egui::Ui, params: &mut GridParams) {
    let GridParams {
        favorites,
        cart,
        thumbnails,
        failed_texture,
        selected,
        view,
        download_events,
        ..
    } = params;

    if favorites.is_empty() {
        centered_note(ui, |ui| {
            ui.heading("No Favorites Yet");
            ui.label(
                egui::RichText::new(
                    "Browse wallpapers and click the heart icon to add them here",
                )
                .color(theme::ui::HINT_TEXT),
            );
        });
        return;
    }

    // Only IDs persist, so the references (and their thumbnail URLs)
    // are reconstructed from the wallhaven ID pattern.
    let mut ids = favorites.list();
    ids.sort();
    let walls: Vec<Wallpaper> = ids.iter().map(|id| Wallpaper::from_favorite_id(id)).collect();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading(format!("Your Favorites ({})", walls.len()));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Clear All").clicked() {
                        view.confirm_clear_favorites = true;
                    }
                });
            });
            ui.add_space(8.0);

            let columns = (((ui.available_width() + GRID_SPACING)
                / (CARD_WIDTH + GRID_SPACING))
                .floor() as usize)
                .max(1);

            for row in walls.chunks(columns) {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = GRID_SPACING;
                    for wall in row {
                        if wall_card(
                            ui,
                            wall,
                            thumbnails,
                            failed_texture,
                            favorites,
                            cart,
                            download_events,
                        ) {
                            selected.wall = Some(wall.clone());
                        }
                    }
                });
                ui.add_space(GRID_SPACING);
            }
        });
}

/// A vertically centered block for empty/loading/error states.
fn centered_note(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.35);
        add_contents(ui);
    });
}
