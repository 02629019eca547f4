//! Canvas interaction: mapping the pointer to grid points, hover preview and clicks.

use super::rendering::PainterSurface;
use super::state::SandboxApp;
use crate::constants::SURFACE_EXTENT;
use crate::mapper::CoordinateMapper;
use crate::session::ClickOutcome;
use eframe::egui;

impl SandboxApp {
    /// Mapper for the fixed-size drawing surface.
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(SURFACE_EXTENT)
    }

    /// Converts a screen position to the grid point under it, if it lies on the canvas.
    pub fn screen_to_grid(&self, screen_pos: egui::Pos2) -> Option<crate::types::Point> {
        let rect = self.canvas.last_rect?;
        if !rect.contains(screen_pos) {
            return None;
        }
        Some(self.mapper().to_grid((screen_pos - rect.min).to_pos2()))
    }

    /// Allocates the canvas, handles pointer input and paints the scene.
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(
            egui::vec2(SURFACE_EXTENT, SURFACE_EXTENT),
            egui::Sense::click(),
        );
        self.canvas.last_rect = Some(response.rect);

        self.handle_canvas_hover(&response);
        self.handle_canvas_click(&response);

        let mapper = self.mapper();
        let mut surface = PainterSurface::new(&painter, response.rect.min, mapper.extent());
        self.render_scene(&mut surface, &mapper);
    }

    /// Tracks the grid point under the pointer; cleared when the pointer leaves.
    fn handle_canvas_hover(&mut self, response: &egui::Response) {
        self.canvas.hover = response
            .hover_pos()
            .and_then(|pos| self.screen_to_grid(pos));
    }

    /// Clicks are ignored while an alert is waiting to be acknowledged.
    fn handle_canvas_click(&mut self, response: &egui::Response) {
        if !response.clicked() || self.alert.is_some() {
            return;
        }
        let Some(grid) = response
            .interact_pointer_pos()
            .and_then(|pos| self.screen_to_grid(pos))
        else {
            return;
        };

        if let ClickOutcome::CenterSet(center) = self.session.click(grid) {
            self.inputs.set_center(center);
        }
    }
}
