//! Canvas widget: allocation, input translation and the context menu popup.
//!
//! Raw egui input events are turned into [`CanvasEvent`]s and fed to the
//! [`Canvas`](crate::canvas::Canvas) state machine, which decides what each
//! press, move, release and wheel turn means.

use super::state::BlueprintApp;
use crate::canvas::{CanvasEvent, Gesture};
use eframe::egui;

impl BlueprintApp {
    /// Renders the canvas area and handles its pointer input.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    pub(crate) fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let viewport = response.rect;

        // Centre the scene origin on the first frame
        if !self.centered {
            self.canvas.center_on_origin(viewport);
            self.centered = true;
        }

        for event in self.collect_canvas_events(ui, viewport) {
            self.canvas.handle_event(event);
        }
        self.canvas.clamp_offset(viewport);

        if response.hovered() || self.canvas.gesture() != Gesture::Idle {
            ui.ctx().set_cursor_icon(self.canvas.cursor_icon());
        }

        self.paint_canvas(&painter, viewport);

        if self.canvas.context_menu().is_some() {
            self.draw_context_menu(ui);
        } else {
            self.menu_rect = None;
        }
    }

    /// Translates this frame's raw input into canvas events.
    ///
    /// Presses must start inside the viewport; moves and releases are always
    /// forwarded so drags that leave the canvas still finish. Pointer events on
    /// an open context menu belong to the menu and are skipped.
    fn collect_canvas_events(&self, ui: &egui::Ui, viewport: egui::Rect) -> Vec<CanvasEvent> {
        let menu_rect = self.canvas.context_menu().and(self.menu_rect);
        let on_menu = |pos: egui::Pos2| menu_rect.is_some_and(|r| r.contains(pos));

        ui.input(|i| {
            let hover = i.pointer.hover_pos();
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::PointerMoved(pos) => Some(CanvasEvent::PointerMoved { pos: *pos }),
                    egui::Event::PointerButton {
                        pos,
                        button,
                        pressed: true,
                        modifiers,
                    } if viewport.contains(*pos) && !on_menu(*pos) => {
                        Some(CanvasEvent::PointerPressed {
                            pos: *pos,
                            button: *button,
                            modifiers: *modifiers,
                        })
                    }
                    egui::Event::PointerButton {
                        pos,
                        button,
                        pressed: false,
                        ..
                    } if !on_menu(*pos) => Some(CanvasEvent::PointerReleased {
                        pos: *pos,
                        button: *button,
                    }),
                    egui::Event::MouseWheel { delta, .. }
                        if delta.y != 0.0 && hover.is_some_and(|p| viewport.contains(p)) =>
                    {
                        Some(CanvasEvent::Wheel {
                            pos: hover,
                            delta_y: delta.y,
                        })
                    }
                    _ => None,
                })
                .collect()
        })
    }

    /// Renders the open context menu at its anchor position.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    fn draw_context_menu(&mut self, ui: &mut egui::Ui) {
        let Some(menu) = self.canvas.context_menu().copied() else {
            return;
        };

        let mut chosen = None;
        let area_response = egui::Area::new(egui::Id::new("canvas_context_menu"))
            .fixed_pos(menu.screen_pos)
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.vertical(|ui| {
                        for action in menu.actions() {
                            if ui.button(action.label()).clicked() {
                                chosen = Some(action);
                            }
                        }
                    });
                })
            });
        self.menu_rect = Some(area_response.response.rect);

        if let Some(action) = chosen {
            log::debug!("context menu action {action:?}");
            self.canvas.apply_menu_action(action);
            self.menu_rect = None;
        }
    }

    /// Handles the Delete key unless a text field has keyboard focus.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context for checking input
    pub(crate) fn handle_delete_key(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Delete)) {
            self.canvas.handle_event(CanvasEvent::DeletePressed);
        }
    }
}
