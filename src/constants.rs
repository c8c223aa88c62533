//! Shared application-wide constants.
//! Centralizes tweakable values used across canvas interaction and rendering.

use eframe::egui;

// Grid
/// Grid cell size in scene units. Node positions are always multiples of this.
pub const GRID_SIZE: i32 = 20;
/// Spacing between major (darker) grid lines in scene units.
pub const MAJOR_GRID_SIZE: i32 = 100;

// Scene
/// Half extent of the square scene rectangle centred on the origin.
pub const SCENE_HALF_EXTENT: f32 = 2000.0;

/// The fixed scene rectangle: (-2000, -2000) with size 4000 x 4000.
pub fn scene_rect() -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(-SCENE_HALF_EXTENT, -SCENE_HALF_EXTENT),
        egui::pos2(SCENE_HALF_EXTENT, SCENE_HALF_EXTENT),
    )
}

// Node dimensions
/// Node width in scene units.
pub const NODE_WIDTH: f32 = 150.0;
/// Node height in scene units.
pub const NODE_HEIGHT: f32 = 100.0;
/// Height of the opaque header band.
pub const NODE_HEADER_HEIGHT: f32 = 25.0;
/// Corner radius of the node body.
pub const NODE_CORNER_RADIUS: f32 = 10.0;
/// Opacity of the node body below the header.
pub const NODE_BODY_OPACITY: f32 = 0.6;
/// Font size of the node title at 100% zoom.
pub const NODE_TITLE_FONT_SIZE: f32 = 14.0;

// Zoom
/// Smallest zoom percentage.
pub const ZOOM_MIN: u32 = 50;
/// Largest zoom percentage (also the initial zoom).
pub const ZOOM_MAX: u32 = 100;
/// Zoom change per wheel notch, in percent.
pub const ZOOM_STEP: u32 = 10;

// Canvas interactions
/// Pointer travel (screen pixels) before a held button turns into a drag.
pub const DRAG_THRESHOLD: f32 = 3.0;

// Colors
/// Canvas background.
pub const BACKGROUND_COLOR: egui::Color32 = egui::Color32::from_rgb(38, 38, 38);
/// Axis lines through the origin.
pub const AXIS_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 0, 0);
/// Major grid lines.
pub const MAJOR_LINE_COLOR: egui::Color32 = egui::Color32::from_rgb(22, 22, 22);
/// Minor grid lines.
pub const MINOR_LINE_COLOR: egui::Color32 = egui::Color32::from_rgb(52, 52, 52);
/// Border drawn around selected nodes.
pub const SELECTED_BORDER_COLOR: egui::Color32 = egui::Color32::from_rgb(241, 176, 0);
