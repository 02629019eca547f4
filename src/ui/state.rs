//! Application state management structures.
//!
//! This module contains the state structures that track the application's current UI
//! state: the text of the input fields, the canvas hover preview, pending alerts, and the
//! editing session itself.

use crate::session::{DilationRequest, Session};
use crate::types::Point;
use eframe::egui;
use serde::{Deserialize, Serialize};

/// Text of the numeric input fields, read on demand when an operation needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFields {
    /// X scale factor (number or fraction)
    pub x_scale: String,
    /// Y scale factor (number or fraction)
    pub y_scale: String,
    /// X coordinate of the center of dilation
    pub center_x: String,
    /// Y coordinate of the center of dilation
    pub center_y: String,
}

impl Default for InputFields {
    fn default() -> Self {
        Self {
            x_scale: String::new(),
            y_scale: String::new(),
            center_x: "0".to_string(),
            center_y: "0".to_string(),
        }
    }
}

impl InputFields {
    /// Borrows the fields as a dilation request.
    pub fn dilation_request(&self) -> DilationRequest<'_> {
        DilationRequest {
            x_scale: &self.x_scale,
            y_scale: &self.y_scale,
            center_x: &self.center_x,
            center_y: &self.center_y,
        }
    }

    /// Writes a point into the center fields.
    pub fn set_center(&mut self, center: Point) {
        self.center_x = format!("{}", center.x + 0.0);
        self.center_y = format!("{}", center.y + 0.0);
    }
}

/// State of the drawing surface between frames.
#[derive(Debug, Clone, Default)]
pub struct CanvasState {
    /// Grid point under the pointer, if the pointer is over the canvas
    pub hover: Option<Point>,
    /// Screen rectangle the canvas occupied last frame
    pub last_rect: Option<egui::Rect>,
}

/// The main application structure containing UI state and the editing session.
///
/// This struct implements the `eframe::App` trait and handles all user interface
/// rendering and interaction logic.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxApp {
    /// Shape, history, log and mode flags
    #[serde(skip)]
    pub session: Session,
    /// Contents of the numeric input fields
    pub inputs: InputFields,
    /// Canvas hover and layout state
    #[serde(skip)]
    pub canvas: CanvasState,
    /// Message waiting to be acknowledged in the alert window
    #[serde(skip)]
    pub alert: Option<String>,
    /// Whether dark mode visuals are enabled for the panels
    pub dark_mode: bool,
}

impl Default for SandboxApp {
    fn default() -> Self {
        Self {
            session: Session::new(),
            inputs: InputFields::default(),
            canvas: CanvasState::default(),
            alert: None,
            dark_mode: false,
        }
    }
}

impl SandboxApp {
    /// Creates the app, restoring persisted preferences when storage holds them.
    pub fn new(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|storage| storage.get_string(crate::constants::APP_STATE_KEY))
            .and_then(|json| match Self::from_json(&json) {
                Ok(app) => Some(app),
                Err(err) => {
                    log::warn!("Discarding unreadable app state: {err}");
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Serializes the persisted preferences to JSON.
    ///
    /// # Returns
    ///
    /// A JSON string representation of the app state, or an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes persisted preferences from JSON.
    ///
    /// # Arguments
    ///
    /// * `json` - JSON string containing the serialized app state
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Queues a message for the alert window.
    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("alert: {message}");
        self.alert = Some(message);
    }
}
