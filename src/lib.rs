//! # Dilation Sandbox
//!
//! An interactive coordinate-grid editor for exploring dilations. Users build a polygon by
//! clicking grid points, then scale it about a chosen center with independent x and y
//! factors given as numbers or fractions such as `3/2`.
//!
//! ## Features
//! - Click-to-place vertices snapped to a 35x35 integer grid, labeled A..Z
//! - Closing a shape by clicking its first vertex again
//! - Dilation about any center, picked by typing or by clicking the grid
//! - Ghost of the pre-dilation shape and rays from the center
//! - Bounded undo history and a transformation log
//! - Saving and loading one shape through the app's persistent storage

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
mod fraction;
mod history;
mod mapper;
mod session;
mod transform_log;
mod types;
mod ui;

#[cfg(test)]
mod test_storage;

// Re-export public types and functions
pub use fraction::{parse_center, parse_fraction, InputError, ScaleFactor};
pub use history::{ShapeHistory, Snapshot};
pub use mapper::CoordinateMapper;
pub use session::{ClickOutcome, DilationRequest, Session, SessionError};
pub use transform_log::{LogEntry, TransformationLog};
pub use types::*;
pub use ui::{draw_scene, CanvasState, InputFields, PainterSurface, SandboxApp, Scene, Surface};

/// Runs the dilation sandbox with a window sized to fit the canvas and control panel.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use dilation_sandbox::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1020.0, 780.0])
            .with_title("Dilation Sandbox"),
        ..Default::default()
    };
    eframe::run_native(
        "Dilation Sandbox",
        options,
        Box::new(|cc| Ok(Box::new(SandboxApp::new(cc.storage)))),
    )
}
