//! One wallpaper card in the grid.

use bevy::prelude::MessageWriter;
use bevy_egui::egui;

use crate::api::Wallpaper;
use crate::constants::{CARD_THUMB_HEIGHT, CARD_WIDTH};
use crate::download::RequestWallpaperDownload;
use crate::stores::{Favorites, WallsCart};
use crate::theme;

use super::thumbnails::{FailedThumbTexture, ThumbnailCache};

/// Render one card. Returns true when the thumbnail was clicked (the
/// caller opens the detail modal).
pub fn wall_card(
    ui: &mut egui::Ui,
    wall: &Wallpaper,
    thumbnails: &mut ThumbnailCache,
    failed_texture: &FailedThumbTexture,
    favorites: &mut Favorites,
    cart: &mut WallsCart,
    download_events: &mut MessageWriter<RequestWallpaperDownload>,
) -> bool {
    let mut clicked = false;
    let thumb_size = egui::vec2(CARD_WIDTH, CARD_THUMB_HEIGHT);

    ui.allocate_ui(egui::vec2(CARD_WIDTH, CARD_THUMB_HEIGHT + 28.0), |ui| {
        ui.vertical(|ui| {
            thumbnails.request(&wall.thumbs.small);

            let response = if let Some(texture_id) = thumbnails.texture_id(&wall.thumbs.small) {
                ui.add(
                    egui::Image::new(egui::load::SizedTexture::new(texture_id, thumb_size))
                        .fit_to_exact_size(thumb_size)
                        .corner_radius(4.0)
                        .sense(egui::Sense::click()),
                )
            } else if thumbnails.has_failed(&wall.thumbs.small) {
                ui.add(
                    egui::Image::new(egui::load::SizedTexture::new(
                        failed_texture.texture_id,
                        thumb_size,
                    ))
                    .fit_to_exact_size(thumb_size)
                    .corner_radius(4.0)
                    .sense(egui::Sense::click()),
                )
                .on_hover_text("Thumbnail failed to load")
            } else {
                // Still downloading
                let (rect, response) = ui.allocate_exact_size(thumb_size, egui::Sense::click());
                ui.painter()
                    .rect_filled(rect, 4.0, theme::ui::THUMB_PENDING);
                response
            };

            if response.clicked() {
                clicked = true;
            }

            ui.horizontal(|ui| {
                let mut selected = cart.is_selected(&wall.id);
                if ui
                    .checkbox(&mut selected, "")
                    .on_hover_text("Select for batch download")
                    .changed()
                {
                    cart.toggle(&wall.id);
                }

                let heart_color = if favorites.is_favorite(&wall.id) {
                    theme::ui::FAVORITE_ACTIVE
                } else {
                    theme::ui::HINT_TEXT
                };
                if ui
                    .button(egui::RichText::new("♥").color(heart_color))
                    .on_hover_text("Favorite")
                    .clicked()
                {
                    favorites.toggle(&wall.id);
                }

                if let Some(resolution) = &wall.resolution {
                    ui.label(egui::RichText::new(resolution).small());
                }
                if let Some(category) = &wall.category {
                    ui.label(
                        egui::RichText::new(category)
                            .small()
                            .color(theme::ui::HINT_TEXT),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(egui::RichText::new("⬇").small())
                        .on_hover_text("Download wallpaper")
                        .clicked()
                    {
                        download_events.write(RequestWallpaperDownload {
                            id: wall.id.clone(),
                            url: wall.full_url().to_string(),
                        });
                    }
                });
            });
        });
    });

    clicked
}
