mod card;
mod dialogs;
mod grid;
mod modal;
mod thumbnails;
mod topbar;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass};

use crate::api::Wallpaper;
use crate::config::AppConfig;
use crate::theme::{self, ThemeMode};

/// Which collection the grid is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Browse,
    Favorites,
}

/// Top-level view state for the main window.
#[derive(Resource, Default)]
pub struct ViewState {
    pub mode: ViewMode,
    /// True while the "clear all favorites" confirmation is open
    pub confirm_clear_favorites: bool,
}

/// Text being typed into the search box.
#[derive(Resource, Default)]
pub struct TopBarState {
    pub search_input: String,
}

/// The wallpaper whose detail window is open, if any.
#[derive(Resource, Default)]
pub struct SelectedWallpaper {
    pub wall: Option<Wallpaper>,
}

/// Apply the effective theme to egui. Runs every frame but only
/// touches the style when the resolved mode changes.
fn apply_theme(
    mut contexts: EguiContexts,
    config: Res<AppConfig>,
    mut applied: Local<Option<ThemeMode>>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let system_theme = ctx.input(|i| i.raw.system_theme);
    let mode = theme::resolve(config.data.theme, system_theme);

    if *applied != Some(mode) {
        ctx.set_visuals(mode.visuals());
        *applied = Some(mode);
    }

    Ok(())
}

/// Keep repainting while feed pages or thumbnails are loading, so task
/// results show up without waiting for input.
fn request_repaint_while_busy(
    mut contexts: EguiContexts,
    feed: Res<crate::feed::WallFeed>,
    downloads: Res<crate::download::DownloadStatus>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    if feed.status().is_loading() || downloads.in_flight > 0 {
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
    Ok(())
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewState>()
            .init_resource::<TopBarState>()
            .init_resource::<SelectedWallpaper>()
            .init_resource::<thumbnails::ThumbnailCache>()
            .add_systems(Startup, thumbnails::setup_failed_thumb_texture)
            // Thumbnail downloads run outside the egui pass
            .add_systems(
                Update,
                (
                    thumbnails::start_thumbnail_fetches,
                    thumbnails::poll_thumbnail_fetches,
                ),
            )
            // Panels first, then overlays
            .add_systems(
                EguiPrimaryContextPass,
                (
                    apply_theme,
                    topbar::top_bar_ui,
                    grid::wall_grid_ui,
                    modal::wall_detail_ui,
                    dialogs::config_reset_dialog,
                    dialogs::clear_favorites_dialog,
                    request_repaint_while_busy,
                )
                    .chain(),
            );
    }
}
