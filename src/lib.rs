//! # Blueprint
//!
//! A visual node-graph canvas. Nodes representing program operations are
//! placed on a pannable, zoomable grid and can be dragged, multi-selected,
//! grouped and deleted. Supported node kinds:
//! - **Print**
//! - **Branch**
//!
//! ## Features
//! - Right-click context menus for creating and destroying nodes
//! - Grid-snapped node placement and dragging
//! - Ctrl/Cmd-click and rubber-band multi-selection into a selection group
//! - Group drag and group delete
//! - Right-drag panning and wheel zoom between 50% and 100%

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod canvas;
mod config;
mod constants;
mod grid;
mod selection;
mod types;
mod ui;

// Re-export public types and functions
pub use canvas::*;
pub use config::{AppConfig, Settings};
pub use grid::{snap_scene_pos, snap_to_grid, GridPoint};
pub use selection::SelectionGroup;
pub use types::*;
use ui::BlueprintApp;

/// Runs the blueprint editor window.
///
/// # Arguments
///
/// * `config` - Startup configuration, usually parsed from the command line
///
/// # Returns
///
/// Returns `Ok(())` when the window is closed, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use blueprint::{run_app, AppConfig};
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app(AppConfig::default())
/// }
/// ```
pub fn run_app(config: AppConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Blueprint")
            .with_inner_size([800.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Blueprint",
        options,
        Box::new(move |cc| Ok(Box::new(BlueprintApp::new(config, cc.storage)))),
    )
}
