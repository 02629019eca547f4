//! Conversion between grid space and drawing-surface space.
//!
//! Grid space has its origin at the center of the surface with y pointing up.
//! Surface space has its origin at the top-left corner with y pointing down.

use crate::constants::GRID_SIZE;
use crate::types::Point;
use eframe::egui;

/// Maps points between grid space and a square surface of known extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    extent: f32,
    cell: f32,
}

impl CoordinateMapper {
    /// Creates a mapper for a square surface using the default grid cell size.
    pub fn new(extent: f32) -> Self {
        Self::with_cell_size(extent, GRID_SIZE)
    }

    /// Creates a mapper with an explicit grid cell size.
    pub fn with_cell_size(extent: f32, cell: f32) -> Self {
        Self { extent, cell }
    }

    /// Width and height of the surface.
    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Size of one grid cell on the surface.
    pub fn cell_size(&self) -> f32 {
        self.cell
    }

    fn half(&self) -> f64 {
        f64::from(self.extent) / 2.0
    }

    /// Snaps a surface position to the nearest grid intersection.
    ///
    /// Ties round away from zero.
    pub fn to_grid(&self, surface: egui::Pos2) -> Point {
        let half = self.half();
        let cell = f64::from(self.cell);
        Point::new(
            ((f64::from(surface.x) - half) / cell).round(),
            ((half - f64::from(surface.y)) / cell).round(),
        )
    }

    /// Converts a grid point to its surface position.
    pub fn to_surface(&self, point: Point) -> egui::Pos2 {
        let half = self.half();
        let cell = f64::from(self.cell);
        egui::pos2(
            (half + point.x * cell) as f32,
            (half - point.y * cell) as f32,
        )
    }
}
