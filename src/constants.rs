//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Width of one wallpaper card in the grid, in logical pixels
pub const CARD_WIDTH: f32 = 248.0;

/// Height of the thumbnail area of a card
pub const CARD_THUMB_HEIGHT: f32 = 150.0;

/// Gap between cards in the grid
pub const GRID_SPACING: f32 = 12.0;

/// Maximum number of new thumbnail fetches to start per frame.
/// Higher values fill the grid faster but spike the task pool.
pub const MAX_THUMBNAIL_STARTS_PER_FRAME: usize = 3;

/// Maximum number of thumbnail downloads allowed in flight at once
pub const MAX_THUMBNAILS_IN_FLIGHT: usize = 8;

/// Upper bound on a downloaded thumbnail body, in bytes.
/// Anything larger is treated as a failed fetch.
pub const MAX_THUMBNAIL_BYTES: u64 = 8 * 1024 * 1024;
