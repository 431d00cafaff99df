//! Top navigation bar: source tabs, search, sort, favorites, the
//! download cart and the theme toggle.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::api::Wallpaper;
use crate::config::{AppConfig, SetThemeRequest};
use crate::download::{DownloadStatus, RequestWallpaperDownload};
use crate::feed::{FeedQuery, SetFeedQuery, SortMode, WallFeed, WallSource};
use crate::stores::{Favorites, WallsCart};
use crate::theme;

use super::{TopBarState, ViewMode, ViewState};

/// Category slugs offered in the Categories menu.
const CATEGORIES: &[&str] = &[
    "nature", "anime", "cars", "space", "city", "minimal", "abstract", "fantasy",
];

#[derive(SystemParam)]
pub struct TopBarParams<'w> {
    pub feed: Res<'w, WallFeed>,
    pub favorites: Res<'w, Favorites>,
    pub cart: ResMut<'w, WallsCart>,
    pub downloads: Res<'w, DownloadStatus>,
    pub config: Res<'w, AppConfig>,
    pub view: ResMut<'w, ViewState>,
    pub query_events: MessageWriter<'w, SetFeedQuery>,
    pub theme_events: MessageWriter<'w, SetThemeRequest>,
    pub download_events: MessageWriter<'w, RequestWallpaperDownload>,
}

pub fn top_bar_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<TopBarState>,
    mut params: TopBarParams,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let system_theme = ctx.input(|i| i.raw.system_theme);

    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.heading(egui::RichText::new("Wallgazer").color(theme::ui::ACCENT));
            ui.separator();

            source_tabs(ui, &mut params);
            ui.separator();

            search_controls(ui, &mut state, &mut params);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mode = theme::resolve(params.config.data.theme, system_theme);
                if ui
                    .button(mode.toggle_label())
                    .on_hover_text("Switch color theme")
                    .clicked()
                {
                    params.theme_events.write(SetThemeRequest {
                        theme: mode.toggled(),
                    });
                }

                let favorites_label = format!("♥ Favorites ({})", params.favorites.len());
                let showing_favorites = params.view.mode == ViewMode::Favorites;
                if ui
                    .selectable_label(showing_favorites, favorites_label)
                    .clicked()
                {
                    params.view.mode = if showing_favorites {
                        ViewMode::Browse
                    } else {
                        ViewMode::Favorites
                    };
                }

                cart_controls(ui, &mut params);
            });
        });
        ui.add_space(4.0);
    });

    Ok(())
}

fn source_tabs(ui: &mut egui::Ui, params: &mut TopBarParams) {
    let tabs: [(&str, FeedQuery); 4] = [
        ("Home", FeedQuery::home()),
        ("Latest", FeedQuery::latest()),
        ("Top", FeedQuery::top()),
        ("Random", FeedQuery::random()),
    ];

    let current = params.feed.query().clone();
    for (label, query) in tabs {
        let active =
            params.view.mode == ViewMode::Browse && current.source == query.source;
        if ui.selectable_label(active, label).clicked() {
            params.view.mode = ViewMode::Browse;
            params.query_events.write(SetFeedQuery { query });
        }
    }

    ui.menu_button("Categories", |ui| {
        for slug in CATEGORIES {
            if ui.button(FeedQuery::category(*slug).title()).clicked() {
                params.view.mode = ViewMode::Browse;
                params.query_events.write(SetFeedQuery {
                    query: FeedQuery::category(*slug),
                });
                ui.close();
            }
        }
    });
}

fn search_controls(ui: &mut egui::Ui, state: &mut TopBarState, params: &mut TopBarParams) {
    let response = ui.add(
        egui::TextEdit::singleline(&mut state.search_input)
            .hint_text("Search wallpapers...")
            .desired_width(220.0),
    );
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    if ui.button("Search").clicked() || submitted {
        params.view.mode = ViewMode::Browse;
        let mut query = FeedQuery::search(state.search_input.clone());
        query.sort = params.feed.query().sort;
        params.query_events.write(SetFeedQuery { query });
    }

    // Sort order only applies to search-backed feeds
    if params.feed.query().supports_sort() {
        let current = params.feed.query().clone();
        let mut sort = current.sort;
        egui::ComboBox::from_id_salt("sort_mode")
            .selected_text(sort.display_name())
            .show_ui(ui, |ui| {
                for mode in SortMode::ALL {
                    ui.selectable_value(&mut sort, mode, mode.display_name());
                }
            });
        if sort != current.sort {
            let mut query = current;
            query.sort = sort;
            params.query_events.write(SetFeedQuery { query });
        }
    }
}

fn cart_controls(ui: &mut egui::Ui, params: &mut TopBarParams) {
    if !params.cart.is_empty() {
        if ui
            .button(format!("Download {} selected", params.cart.len()))
            .on_hover_text("Download every selected wallpaper")
            .clicked()
        {
            for id in params.cart.list() {
                let wall = Wallpaper::from_favorite_id(&id);
                params.download_events.write(RequestWallpaperDownload {
                    id,
                    url: wall.full_url().to_string(),
                });
            }
            params.cart.clear();
        }
        if ui.button("Clear selection").clicked() {
            params.cart.clear();
        }
    }

    if params.downloads.in_flight > 0 {
        ui.spinner();
        ui.colored_label(
            theme::ui::ACCENT,
            format!("Downloading {}...", params.downloads.in_flight),
        );
    } else if let Some(path) = &params.downloads.last_saved {
        if let Some(name) = path.file_name() {
            ui.colored_label(
                theme::ui::SUCCESS_TEXT,
                format!("Saved {}", name.to_string_lossy()),
            );
        }
    } else if let Some(error) = &params.downloads.last_error {
        ui.colored_label(theme::ui::ERROR_TEXT, error)
            .on_hover_text("Most recent download failure");
    }
}
