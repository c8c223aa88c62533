//! Application state.
//!
//! Holds the canvas model together with the settings and the bits of view state
//! that only matter to the egui front end.

use crate::canvas::Canvas;
use crate::config::{AppConfig, Settings};
use eframe::egui;

/// The main application structure.
///
/// This struct implements the `eframe::App` trait and hosts the canvas.
pub struct BlueprintApp {
    /// The node canvas being edited
    pub canvas: Canvas,
    /// Persisted settings, with the startup configuration applied
    pub settings: Settings,
    /// Whether the scene origin has been centred in the viewport yet
    pub(crate) centered: bool,
    /// Screen rectangle of the open context menu as of the last frame
    pub(crate) menu_rect: Option<egui::Rect>,
}

impl Default for BlueprintApp {
    fn default() -> Self {
        Self::new(AppConfig::default(), None)
    }
}

impl BlueprintApp {
    /// Creates the app from the startup configuration and any stored settings.
    pub fn new(config: AppConfig, storage: Option<&dyn eframe::Storage>) -> Self {
        let mut settings = Settings::load(storage);
        settings.apply(&config);
        log::debug!("starting with {settings:?}");
        Self {
            canvas: Canvas::new(),
            settings,
            centered: false,
            menu_rect: None,
        }
    }

    /// Whether debug mode is on.
    pub fn debug(&self) -> bool {
        self.settings.debug
    }
}
