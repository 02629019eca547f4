//! Append-only record of everything the user did to the shape.
//!
//! Entries are stored as structured records and only turned into text when displayed,
//! so a dilation keeps its numeric parameters alongside the text the user typed.

use crate::types::Point;
use std::fmt;

/// One event in the transformation log.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    /// A vertex was appended
    PointAdded {
        /// The new vertex
        point: Point,
    },
    /// The shape was closed back onto its first vertex
    ShapeClosed {
        /// The first vertex, repeated at the end
        point: Point,
    },
    /// Every point was dilated about a center
    Dilated {
        /// X scale as shown to the user
        x_label: String,
        /// Y scale as shown to the user
        y_label: String,
        /// Effective x scale
        x_scale: f64,
        /// Effective y scale
        y_scale: f64,
        /// Center of dilation
        center: Point,
    },
    /// The most recent change was undone
    Undo,
    /// The center of dilation was picked on the canvas
    CenterSet {
        /// The picked grid point
        point: Point,
    },
    /// The center of dilation was reset to the origin
    CenterReset,
    /// The shape was written to storage
    ShapeSaved,
    /// A shape was read from storage
    ShapeLoaded,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::PointAdded { point } => write!(f, "Added point {point}"),
            LogEntry::ShapeClosed { point } => write!(f, "Closed shape at Point A {point}"),
            LogEntry::Dilated {
                x_label, y_label, ..
            } => write!(f, "Dilated by x-scale {x_label}, y-scale {y_label}"),
            LogEntry::Undo => f.write_str("Undo"),
            LogEntry::CenterSet { point } => write!(f, "Set center to {point}"),
            LogEntry::CenterReset => f.write_str("Reset center to (0, 0)"),
            LogEntry::ShapeSaved => f.write_str("Saved shape"),
            LogEntry::ShapeLoaded => f.write_str("Loaded shape"),
        }
    }
}

/// The ordered list of log entries plus its visibility toggle.
#[derive(Debug, Clone, Default)]
pub struct TransformationLog {
    entries: Vec<LogEntry>,
    visible: bool,
}

impl TransformationLog {
    /// Creates an empty, hidden log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn append(&mut self, entry: LogEntry) {
        log::debug!("transformation log: {entry}");
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry. Visibility is left as is.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether the log is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flips visibility and returns the new value.
    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Label for the button that toggles the log.
    pub fn toggle_label(&self) -> &'static str {
        if self.visible {
            "Hide Transformation History"
        } else {
            "Show Transformation History"
        }
    }

    /// All entries joined with `, `, or `None` when empty.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return "None".to_string();
        }
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
