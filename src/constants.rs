//! Shared application-wide constants.
//! Centralizes tweakable values used across the engine, rendering and interactions.

// Grid
/// Size of one grid cell in surface units.
pub const GRID_SIZE: f32 = 20.0;
/// Largest absolute grid coordinate a clicked point may have.
pub const GRID_RANGE: i32 = 17;
/// Width and height of the square drawing surface in surface units.
pub const SURFACE_EXTENT: f32 = 700.0;
/// Axis labels are drawn every this many grid cells.
pub const AXIS_LABEL_STEP: i32 = 2;

// Shape
/// Maximum number of points in a shape (one per label A-Z).
pub const POINT_MAX_COUNT: usize = 26;

// Undo
/// Maximum number of undo snapshots to retain.
pub const MAX_UNDO_HISTORY: usize = 20;

// Drawing
/// Radius of vertex dots, the center marker and the hover preview.
pub const POINT_RADIUS: f32 = 5.0;
/// Stroke width of shape outlines.
pub const SHAPE_STROKE_WIDTH: f32 = 2.0;
/// Font size of labels drawn on the surface.
pub const LABEL_FONT_SIZE: f32 = 10.0;

// Persistence
/// Storage key of the explicitly saved shape.
pub const SAVED_SHAPE_KEY: &str = "savedShape";
/// Storage key of the persisted UI preferences.
pub const APP_STATE_KEY: &str = "app_state";
