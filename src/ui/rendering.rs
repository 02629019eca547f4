//! Scene rendering: grid, center marker, ghost of the previous shape, rays and the
//! labeled current shape.
//!
//! Drawing goes through the small [`Surface`] trait so the scene logic does not depend on
//! where the primitives end up. [`PainterSurface`] forwards them to an `egui::Painter`.

use super::state::SandboxApp;
use crate::constants::{
    AXIS_LABEL_STEP, GRID_RANGE, LABEL_FONT_SIZE, POINT_RADIUS, SHAPE_STROKE_WIDTH,
};
use crate::fraction::parse_center;
use crate::mapper::CoordinateMapper;
use crate::types::{Point, Shape};
use eframe::egui;

const BACKGROUND: egui::Color32 = egui::Color32::WHITE;
const GRID_LINE: egui::Color32 = egui::Color32::from_rgb(204, 204, 204);
const AXIS_LINE: egui::Color32 = egui::Color32::BLACK;
const CENTER_MARKER: egui::Color32 = egui::Color32::from_rgb(0, 128, 0);
const RAY: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 64, 0, 128);
const SHAPE_LINE: egui::Color32 = egui::Color32::BLUE;
const SHAPE_POINT: egui::Color32 = egui::Color32::RED;
const GHOST_LINE: egui::Color32 = egui::Color32::GRAY;
const GHOST_POINT: egui::Color32 = egui::Color32::from_rgb(240, 128, 128);
const HOVER_POINT: egui::Color32 = egui::Color32::from_rgba_premultiplied(128, 0, 0, 128);
const LABEL_TEXT: egui::Color32 = egui::Color32::BLACK;

/// Drawing primitives in surface coordinates (origin top-left, y down).
pub trait Surface {
    /// Fills the whole surface.
    fn clear(&mut self, color: egui::Color32);
    /// Draws a straight line.
    fn line(&mut self, from: egui::Pos2, to: egui::Pos2, stroke: egui::Stroke);
    /// Draws text anchored at `pos`.
    fn text(&mut self, pos: egui::Pos2, anchor: egui::Align2, text: &str, color: egui::Color32);
    /// Draws a filled disc.
    fn arc(&mut self, center: egui::Pos2, radius: f32, color: egui::Color32);
    /// Fills a rectangle.
    fn fill_rect(&mut self, rect: egui::Rect, color: egui::Color32);
}

/// A [`Surface`] backed by an egui painter, offset to where the canvas sits on screen.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Vec2,
    extent: f32,
}

impl<'a> PainterSurface<'a> {
    /// Wraps `painter`; surface position (0, 0) lands on `origin` in screen space.
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2, extent: f32) -> Self {
        Self {
            painter,
            origin: origin.to_vec2(),
            extent,
        }
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self, color: egui::Color32) {
        let rect = egui::Rect::from_min_size(
            self.origin.to_pos2(),
            egui::vec2(self.extent, self.extent),
        );
        self.painter.rect_filled(rect, 0.0, color);
    }

    fn line(&mut self, from: egui::Pos2, to: egui::Pos2, stroke: egui::Stroke) {
        self.painter
            .line_segment([from + self.origin, to + self.origin], stroke);
    }

    fn text(&mut self, pos: egui::Pos2, anchor: egui::Align2, text: &str, color: egui::Color32) {
        self.painter.text(
            pos + self.origin,
            anchor,
            text,
            egui::FontId::proportional(LABEL_FONT_SIZE),
            color,
        );
    }

    fn arc(&mut self, center: egui::Pos2, radius: f32, color: egui::Color32) {
        self.painter.circle_filled(center + self.origin, radius, color);
    }

    fn fill_rect(&mut self, rect: egui::Rect, color: egui::Color32) {
        self.painter.rect_filled(rect.translate(self.origin), 0.0, color);
    }
}

/// Everything one frame of the canvas shows.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// The current shape
    pub shape: &'a Shape,
    /// The shape before the last change, drawn muted
    pub previous: Option<&'a Shape>,
    /// Center of dilation, if the center fields hold valid numbers
    pub center: Option<Point>,
    /// Whether rays from the center are drawn
    pub dilated: bool,
    /// Grid point under the pointer
    pub hover: Option<Point>,
}

/// Draws a complete scene, back to front.
pub fn draw_scene(surface: &mut impl Surface, mapper: &CoordinateMapper, scene: &Scene<'_>) {
    draw_grid(surface, mapper);

    if let Some(center) = scene.center {
        surface.arc(mapper.to_surface(center), POINT_RADIUS, CENTER_MARKER);
    }

    if scene.dilated {
        if let Some(previous) = scene.previous {
            draw_shape(surface, mapper, previous, true);
        }
        if let Some(center) = scene.center {
            draw_rays(surface, mapper, center, scene.shape);
        }
    }

    draw_shape(surface, mapper, scene.shape, false);

    if let Some(hover) = scene.hover {
        let pos = mapper.to_surface(hover);
        surface.arc(pos, POINT_RADIUS, HOVER_POINT);
        surface.text(
            pos + egui::vec2(10.0, 0.0),
            egui::Align2::LEFT_CENTER,
            &hover.to_string(),
            SHAPE_POINT,
        );
    }
}

/// Grid lines for every cell in range, numbered axes, and the two axes on top.
fn draw_grid(surface: &mut impl Surface, mapper: &CoordinateMapper) {
    surface.clear(BACKGROUND);

    let extent = mapper.extent();
    let half = extent / 2.0;
    let cell = mapper.cell_size();
    let grid_stroke = egui::Stroke::new(1.0, GRID_LINE);

    for i in -GRID_RANGE..=GRID_RANGE {
        let offset = i as f32 * cell;
        let x = half + offset;
        let y = half - offset;
        surface.line(egui::pos2(x, 0.0), egui::pos2(x, extent), grid_stroke);
        surface.line(egui::pos2(0.0, y), egui::pos2(extent, y), grid_stroke);

        if i != 0 && i % AXIS_LABEL_STEP == 0 {
            let label = i.to_string();
            surface.text(egui::pos2(x, half + 5.0), egui::Align2::CENTER_TOP, &label, LABEL_TEXT);
            surface.text(egui::pos2(half + 5.0, y), egui::Align2::LEFT_CENTER, &label, LABEL_TEXT);
        }
    }

    let axis_stroke = egui::Stroke::new(2.0, AXIS_LINE);
    surface.line(egui::pos2(0.0, half), egui::pos2(extent, half), axis_stroke);
    surface.line(egui::pos2(half, 0.0), egui::pos2(half, extent), axis_stroke);
}

fn draw_rays(surface: &mut impl Surface, mapper: &CoordinateMapper, center: Point, shape: &Shape) {
    let from = mapper.to_surface(center);
    let stroke = egui::Stroke::new(1.0, RAY);
    for point in shape.points() {
        surface.line(from, mapper.to_surface(*point), stroke);
    }
}

/// Outline and vertex dots of a shape; labels only for the current (non-muted) shape.
///
/// A closed shape already ends on its first point, so its outline returns to the start.
fn draw_shape(surface: &mut impl Surface, mapper: &CoordinateMapper, shape: &Shape, muted: bool) {
    let (line_color, point_color) = if muted {
        (GHOST_LINE, GHOST_POINT)
    } else {
        (SHAPE_LINE, SHAPE_POINT)
    };
    let stroke = egui::Stroke::new(SHAPE_STROKE_WIDTH, line_color);

    for pair in shape.points().windows(2) {
        surface.line(mapper.to_surface(pair[0]), mapper.to_surface(pair[1]), stroke);
    }
    for point in shape.points() {
        surface.arc(mapper.to_surface(*point), POINT_RADIUS, point_color);
    }

    if muted {
        return;
    }
    for (label, point) in shape.labeled_points() {
        let pos = mapper.to_surface(point);
        surface.fill_rect(
            egui::Rect::from_min_size(pos + egui::vec2(8.0, 2.0), egui::vec2(15.0, 15.0)),
            BACKGROUND,
        );
        surface.text(
            pos + egui::vec2(10.0, 0.0),
            egui::Align2::LEFT_CENTER,
            &label.to_string(),
            LABEL_TEXT,
        );
    }
}

impl SandboxApp {
    /// Builds the scene for the current session and input fields.
    ///
    /// The center marker and rays are left out while the center fields do not parse.
    pub fn scene(&self) -> Scene<'_> {
        let center = parse_center(&self.inputs.center_x, &self.inputs.center_y).ok();
        let shape = self.session.shape();
        let hover = self
            .canvas
            .hover
            .filter(|_| !self.session.is_setting_center() && !shape.is_full());
        Scene {
            shape,
            previous: self.session.previous_shape(),
            center,
            dilated: self.session.has_dilated(),
            hover,
        }
    }

    /// Renders the current scene onto `surface`.
    pub fn render_scene(&self, surface: &mut impl Surface, mapper: &CoordinateMapper) {
        draw_scene(surface, mapper, &self.scene());
    }
}
