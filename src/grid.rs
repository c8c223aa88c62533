//! Grid coordinate mapping.
//!
//! Every node position on the canvas lives on a fixed grid of
//! [`GRID_SIZE`](crate::constants::GRID_SIZE) scene units. This module holds the
//! integer point type used for those positions and the snapping function that
//! maps arbitrary pointer coordinates onto the grid.

use crate::constants::GRID_SIZE;
use eframe::egui;
use std::ops::{Add, Sub};

/// An integer point in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPoint {
    /// Horizontal scene coordinate
    pub x: i32,
    /// Vertical scene coordinate
    pub y: i32,
}

impl GridPoint {
    /// Creates a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Floors a floating point scene position to integer coordinates.
    pub fn from_scene(pos: egui::Pos2) -> Self {
        Self {
            x: pos.x.floor() as i32,
            y: pos.y.floor() as i32,
        }
    }

    /// Converts the point into an egui position.
    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x as f32, self.y as f32)
    }

    /// Returns `true` if both axes are multiples of the grid cell size.
    pub fn is_grid_aligned(self) -> bool {
        self.x.rem_euclid(GRID_SIZE) == 0 && self.y.rem_euclid(GRID_SIZE) == 0
    }
}

impl Add for GridPoint {
    type Output = GridPoint;

    fn add(self, rhs: GridPoint) -> GridPoint {
        GridPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridPoint {
    type Output = GridPoint;

    fn sub(self, rhs: GridPoint) -> GridPoint {
        GridPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Snaps a point to the grid by flooring each axis to the nearest lower
/// multiple of the grid cell size.
///
/// Negative coordinates floor toward negative infinity, so `-1` maps to `-20`.
///
/// # Example
///
/// ```
/// use blueprint::{snap_to_grid, GridPoint};
///
/// assert_eq!(snap_to_grid(GridPoint::new(105, 187)), GridPoint::new(100, 180));
/// ```
pub fn snap_to_grid(point: GridPoint) -> GridPoint {
    GridPoint::new(
        point.x - point.x.rem_euclid(GRID_SIZE),
        point.y - point.y.rem_euclid(GRID_SIZE),
    )
}

/// Snaps a floating point scene position to the grid.
pub fn snap_scene_pos(pos: egui::Pos2) -> GridPoint {
    snap_to_grid(GridPoint::from_scene(pos))
}
