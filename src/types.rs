//! Core data types for the dilation sandbox.
//!
//! This module defines the grid point and the shape (the ordered point store), together with
//! the insertion and closure rules that govern how clicks grow a shape.

use crate::constants::{GRID_RANGE, POINT_MAX_COUNT};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A point in grid space (origin at the surface center, y pointing up).
///
/// Coordinates are whole numbers when a point is placed by a click and may become
/// arbitrary reals once a transformation has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal grid coordinate
    #[serde(serialize_with = "serialize_coord")]
    pub x: f64,
    /// Vertical grid coordinate
    #[serde(serialize_with = "serialize_coord")]
    pub y: f64,
}

impl Point {
    /// The grid origin.
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Creates a point from real coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a point from integer grid coordinates.
    pub fn grid(x: i32, y: i32) -> Self {
        Self {
            x: f64::from(x),
            y: f64::from(y),
        }
    }

    /// Returns true if both coordinates are whole numbers.
    pub fn is_integral(&self) -> bool {
        self.x.fract() == 0.0 && self.y.fract() == 0.0
    }

    /// Returns true if neither coordinate is infinite or NaN.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns true if both coordinates lie within `[-GRID_RANGE, GRID_RANGE]`.
    pub fn in_grid_range(&self) -> bool {
        let range = f64::from(GRID_RANGE);
        self.x.abs() <= range && self.y.abs() <= range
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Adding zero folds -0.0 into 0.0 so dilated points never print as "-0"
        write!(f, "({}, {})", self.x + 0.0, self.y + 0.0)
    }
}

/// Writes whole-number coordinates as JSON integers and everything else as reals.
fn serialize_coord<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Returns the vertex label for a position in the shape, cycling through A-Z.
pub fn label_for_index(index: usize) -> char {
    char::from(b'A' + (index % POINT_MAX_COUNT) as u8)
}

/// Why a candidate point was not added to a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The shape already holds the maximum number of points
    Full,
    /// The candidate does not sit on a grid intersection
    OffGrid,
    /// The candidate lies outside the grid range
    OutOfRange,
    /// The candidate coincides with an existing point
    Duplicate,
}

/// What a click on a candidate grid point does to a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointInsertion {
    /// Append a copy of the first point, closing the shape
    Close,
    /// Append the candidate as a new vertex
    Append,
    /// Leave the shape untouched
    Reject(RejectReason),
}

/// An ordered sequence of points; insertion order is label order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape {
    points: Vec<Point>,
}

impl Shape {
    /// Creates an empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shape from an existing point sequence.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Serialize the shape to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a shape from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The points in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points, including a closing duplicate.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the shape has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true if no further point can be added.
    pub fn is_full(&self) -> bool {
        self.points.len() >= POINT_MAX_COUNT
    }

    /// The first point, if any.
    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Returns true if the shape has at least two points and ends where it starts.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() >= 2 && first == last,
            _ => false,
        }
    }

    /// Returns true if any point has exactly the given coordinates.
    pub fn contains(&self, point: Point) -> bool {
        self.points.iter().any(|p| *p == point)
    }

    /// Decides what clicking `candidate` should do, without mutating the shape.
    ///
    /// Clicking the first point of an open shape with at least two points closes it.
    /// Any other candidate is appended only if it is integral, within the grid range
    /// and not already present.
    pub fn classify(&self, candidate: Point) -> PointInsertion {
        if self.is_full() {
            return PointInsertion::Reject(RejectReason::Full);
        }
        if self.points.len() >= 2 && !self.is_closed() && self.first() == Some(candidate) {
            return PointInsertion::Close;
        }
        if !candidate.is_integral() {
            PointInsertion::Reject(RejectReason::OffGrid)
        } else if !candidate.in_grid_range() {
            PointInsertion::Reject(RejectReason::OutOfRange)
        } else if self.contains(candidate) {
            PointInsertion::Reject(RejectReason::Duplicate)
        } else {
            PointInsertion::Append
        }
    }

    /// Appends a point without validation.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Appends a copy of the first point. Does nothing on an empty shape.
    pub fn close(&mut self) {
        if let Some(first) = self.first() {
            self.points.push(first);
        }
    }

    /// Replaces every point with the result of `f`.
    pub fn map_points(&mut self, mut f: impl FnMut(Point) -> Point) {
        for point in &mut self.points {
            *point = f(*point);
        }
    }

    /// Points paired with their display labels.
    ///
    /// A point whose coordinates were already labeled is skipped, so the closing
    /// duplicate of a closed shape carries no label of its own.
    pub fn labeled_points(&self) -> Vec<(char, Point)> {
        let mut labeled: Vec<(char, Point)> = Vec::with_capacity(self.points.len());
        for point in &self.points {
            if labeled.iter().any(|(_, p)| p == point) {
                continue;
            }
            labeled.push((label_for_index(labeled.len()), *point));
        }
        labeled
    }

    /// Human-readable coordinate list, e.g. `A (0, 0), B (4, 0)`, or `None` when empty.
    pub fn formatted_coordinates(&self) -> String {
        if self.points.is_empty() {
            return "None".to_string();
        }
        let unique = if self.is_closed() {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points[..]
        };
        unique
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{} {}", label_for_index(i), p))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
