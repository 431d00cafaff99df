//! Color theme for the application.
//!
//! The chosen mode persists in the config record; when no choice was
//! ever made the window manager's reported preference wins, and dark
//! is the fallback when nothing is reported.

use bevy_egui::egui;
use serde::{Deserialize, Serialize};

/// The two supported color schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    /// The opposite mode, for the toggle button.
    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// egui visuals for this mode.
    pub fn visuals(&self) -> egui::Visuals {
        match self {
            ThemeMode::Dark => egui::Visuals::dark(),
            ThemeMode::Light => egui::Visuals::light(),
        }
    }

    /// Label for the toggle button (names the mode you would switch to).
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "Light mode",
            ThemeMode::Light => "Dark mode",
        }
    }
}

/// Pick the effective mode: an explicit persisted choice wins, then
/// the system preference, then dark.
pub fn resolve(persisted: Option<ThemeMode>, system: Option<egui::Theme>) -> ThemeMode {
    persisted.unwrap_or(match system {
        Some(egui::Theme::Light) => ThemeMode::Light,
        Some(egui::Theme::Dark) | None => ThemeMode::Dark,
    })
}

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Accent color for links, active controls and the loading note
    pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(96, 156, 255);

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(235, 80, 80);

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Heart color for favorited wallpapers
    pub const FAVORITE_ACTIVE: egui::Color32 = egui::Color32::from_rgb(230, 60, 80);

    /// Placeholder fill while a thumbnail is still downloading
    pub const THUMB_PENDING: egui::Color32 = egui::Color32::from_rgb(60, 60, 60);

    /// Green for completed downloads
    pub const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_serializes_as_lowercase() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::from_str::<ThemeMode>("\"light\"").unwrap(),
            ThemeMode::Light
        );
    }

    #[test]
    fn test_toggled_flips_mode() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
    }

    #[test]
    fn test_resolve_prefers_persisted_choice() {
        assert_eq!(
            resolve(Some(ThemeMode::Light), Some(egui::Theme::Dark)),
            ThemeMode::Light
        );
        assert_eq!(resolve(None, Some(egui::Theme::Light)), ThemeMode::Light);
        assert_eq!(resolve(None, None), ThemeMode::Dark);
    }
}
