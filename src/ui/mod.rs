//! User interface components and rendering logic for the blueprint canvas.
//!
//! This module contains the egui front end: the main application struct,
//! canvas input handling, context menus and rendering.
//!
//! # Module Organization
//!
//! - `state` - Application state and the main BlueprintApp
//! - `canvas` - Input translation, the context menu popup and keyboard shortcuts
//! - `rendering` - Drawing the grid, nodes and selection visuals

mod canvas;
mod rendering;
mod state;

pub use state::BlueprintApp;

use eframe::egui;

impl eframe::App for BlueprintApp {
    /// Persist settings between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.store(storage);
    }

    /// Main update function called by egui for each frame.
    ///
    /// The canvas fills the whole window; keyboard shortcuts are handled
    /// before it is drawn.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `_frame` - The eframe frame (unused)
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_delete_key(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_canvas(ui);
            });
    }
}
