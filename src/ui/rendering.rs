//! Canvas rendering for the grid background, nodes and selection visuals.
//!
//! Painting only reads the canvas; all mutation happens in event handling.

use super::state::BlueprintApp;
use crate::canvas::Canvas;
use crate::constants::{
    scene_rect, AXIS_COLOR, BACKGROUND_COLOR, GRID_SIZE, MAJOR_GRID_SIZE, MAJOR_LINE_COLOR,
    MINOR_LINE_COLOR, NODE_BODY_OPACITY, NODE_CORNER_RADIUS, NODE_HEADER_HEIGHT,
    NODE_TITLE_FONT_SIZE, SCENE_HALF_EXTENT, SELECTED_BORDER_COLOR,
};
use crate::types::Node;
use eframe::egui;
use eframe::epaint::StrokeKind;

impl BlueprintApp {
    /// Renders everything on the canvas.
    ///
    /// Elements are drawn in layers: background grid, group outline, nodes,
    /// rubber band, then the zoom label and (in debug mode) the state overlay.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `viewport` - The screen-space rectangle of the canvas area
    pub(crate) fn paint_canvas(&self, painter: &egui::Painter, viewport: egui::Rect) {
        let canvas = &self.canvas;
        draw_background(painter, viewport, canvas);

        if let Some(rect) = canvas.group().bounding_rect(canvas.scene()) {
            let screen_rect = egui::Rect::from_min_max(
                canvas.scene_to_screen(rect.min),
                canvas.scene_to_screen(rect.max),
            );
            painter.rect_stroke(
                screen_rect,
                0.0,
                egui::Stroke::new(1.0, egui::Color32::from_gray(160)),
                StrokeKind::Outside,
            );
        }

        for node in canvas.scene().nodes() {
            draw_node(painter, canvas, node);
        }

        if let Some(rect) = canvas.rubber_band_rect() {
            let fill = egui::Color32::from_rgba_unmultiplied(100, 150, 255, 40);
            let stroke = egui::Stroke::new(1.0, egui::Color32::from_rgb(100, 150, 255));
            painter.rect_filled(rect, 0.0, fill);
            painter.rect_stroke(rect, 0.0, stroke, StrokeKind::Inside);
        }

        painter.text(
            viewport.min + egui::vec2(4.0, 10.0),
            egui::Align2::LEFT_CENTER,
            canvas.zoom_label(),
            egui::FontId::proportional(12.0),
            egui::Color32::GRAY,
        );

        if self.debug() {
            painter.text(
                viewport.left_bottom() + egui::vec2(4.0, -4.0),
                egui::Align2::LEFT_BOTTOM,
                canvas.debug_summary(),
                egui::FontId::monospace(11.0),
                egui::Color32::GRAY,
            );
        }
    }
}

/// Scene coordinates of the grid lines drawn every `spacing` units across the
/// scene rectangle, from its negative edge up to (not including) its positive edge.
pub(crate) fn grid_line_positions(spacing: i32) -> impl Iterator<Item = i32> {
    let half = SCENE_HALF_EXTENT as i32;
    (-half..half).step_by(spacing as usize)
}

/// Fills the background and draws minor grid lines, major grid lines and the
/// two axes through the origin.
fn draw_background(painter: &egui::Painter, viewport: egui::Rect, canvas: &Canvas) {
    painter.rect_filled(viewport, 0.0, BACKGROUND_COLOR);

    let scene = scene_rect();
    let top_left = canvas.scene_to_screen(scene.min);
    let bottom_right = canvas.scene_to_screen(scene.max);
    let (y_min, y_max) = (top_left.y.max(viewport.min.y), bottom_right.y.min(viewport.max.y));
    let (x_min, x_max) = (top_left.x.max(viewport.min.x), bottom_right.x.min(viewport.max.x));

    let draw_lines = |spacing: i32, color: egui::Color32| {
        let stroke = egui::Stroke::new(1.0, color);
        for v in grid_line_positions(spacing) {
            let screen = canvas.scene_to_screen(egui::pos2(v as f32, v as f32));
            if (viewport.min.x..=viewport.max.x).contains(&screen.x) {
                painter.line_segment(
                    [egui::pos2(screen.x, y_min), egui::pos2(screen.x, y_max)],
                    stroke,
                );
            }
            if (viewport.min.y..=viewport.max.y).contains(&screen.y) {
                painter.line_segment(
                    [egui::pos2(x_min, screen.y), egui::pos2(x_max, screen.y)],
                    stroke,
                );
            }
        }
    };
    draw_lines(GRID_SIZE, MINOR_LINE_COLOR);
    draw_lines(MAJOR_GRID_SIZE, MAJOR_LINE_COLOR);

    let origin = canvas.scene_to_screen(egui::Pos2::ZERO);
    let axis = egui::Stroke::new(1.0, AXIS_COLOR);
    painter.line_segment([egui::pos2(origin.x, y_min), egui::pos2(origin.x, y_max)], axis);
    painter.line_segment([egui::pos2(x_min, origin.y), egui::pos2(x_max, origin.y)], axis);
}

/// Draws a node: a semi-transparent rounded body, an opaque gradient header
/// band with the node name, and a highlighted border when selected.
fn draw_node(painter: &egui::Painter, canvas: &Canvas, node: &Node) {
    let factor = canvas.zoom_factor();
    let bounds = node.bounding_rect();
    let rect = egui::Rect::from_min_max(
        canvas.scene_to_screen(bounds.min),
        canvas.scene_to_screen(bounds.max),
    )
    .shrink(factor);
    let radius = NODE_CORNER_RADIUS * factor;
    let header_height = NODE_HEADER_HEIGHT * factor;

    // Body
    let body_alpha = (255.0 * NODE_BODY_OPACITY) as u8;
    painter.rect_filled(rect, radius, egui::Color32::from_black_alpha(body_alpha));

    // Header: rounded cap in the top color, then the gradient down to the body
    let (top, bottom) = node.kind.gradient();
    let r = radius.round() as u8;
    let cap = egui::Rect::from_min_size(rect.min, egui::vec2(rect.width(), radius));
    painter.rect_filled(
        cap,
        egui::CornerRadius {
            nw: r,
            ne: r,
            sw: 0,
            se: 0,
        },
        top,
    );
    let band = egui::Rect::from_min_max(
        egui::pos2(rect.min.x, rect.min.y + radius),
        egui::pos2(rect.max.x, rect.min.y + header_height),
    );
    let band_top = lerp_color(top, bottom, radius / header_height);
    painter.add(egui::Shape::mesh(vertical_gradient(band, band_top, bottom)));

    painter.text(
        egui::pos2(rect.min.x + 5.0 * factor, rect.min.y + header_height / 2.0),
        egui::Align2::LEFT_CENTER,
        node.name(),
        egui::FontId::proportional(NODE_TITLE_FONT_SIZE * factor),
        egui::Color32::WHITE,
    );

    if node.selected {
        painter.rect_stroke(
            rect.expand(factor),
            radius,
            egui::Stroke::new(1.0, SELECTED_BORDER_COLOR),
            StrokeKind::Outside,
        );
    }
}

/// A rectangle mesh shading from `top` to `bottom`.
fn vertical_gradient(
    rect: egui::Rect,
    top: egui::Color32,
    bottom: egui::Color32,
) -> egui::epaint::Mesh {
    let mut mesh = egui::epaint::Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}

/// Linear interpolation between two opaque colors.
fn lerp_color(a: egui::Color32, b: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    egui::Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}
