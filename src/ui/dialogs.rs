//! Confirmation and notification dialogs.

use bevy_egui::{egui, EguiContexts};

use bevy::prelude::*;

use crate::config::ConfigResetNotification;
use crate::stores::Favorites;
use crate::theme;

use super::ViewState;

/// Shown when the config file could not be read and defaults took over.
pub fn config_reset_dialog(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(4.0);
                ui.label(egui::RichText::new(reason).small().color(theme::ui::HINT_TEXT));
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}

/// Clearing favorites is destructive, so ask first.
pub fn clear_favorites_dialog(
    mut contexts: EguiContexts,
    mut view: ResMut<ViewState>,
    mut favorites: ResMut<Favorites>,
) -> Result {
    if !view.confirm_clear_favorites {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Clear All Favorites?")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!(
                "This removes all {} favorites. There is no undo.",
                favorites.len()
            ));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .button(egui::RichText::new("Clear All").color(theme::ui::ERROR_TEXT))
                    .clicked()
                {
                    favorites.clear();
                    view.confirm_clear_favorites = false;
                }
                if ui.button("Cancel").clicked() {
                    view.confirm_clear_favorites = false;
                }
            });
        });

    Ok(())
}
