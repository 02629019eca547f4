//! The editing session: shape, undo history, transformation log and mode flags.
//!
//! All user-facing operations go through [`Session`]. Every operation that changes the
//! shape snapshots it first, so each one can be undone, and records what it did in the
//! transformation log.

use crate::constants::{POINT_MAX_COUNT, SAVED_SHAPE_KEY};
use crate::fraction::{parse_center, InputError, ScaleFactor};
use crate::history::{ShapeHistory, Snapshot};
use crate::transform_log::{LogEntry, TransformationLog};
use crate::types::{Point, PointInsertion, RejectReason, Shape};
use thiserror::Error;

/// Reasons a session operation did not change anything.
#[derive(Debug, Error)]
pub enum SessionError {
    /// One of the input fields holds invalid text
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    /// Both scale factors resolved to 1 although scale text was entered
    #[error("Both scale factors resolve to 1; nothing to dilate.")]
    VacuousTransform,
    /// The transform would push a coordinate beyond the representable range
    #[error("The result is too large to represent; the shape was left unchanged.")]
    Overflow,
    /// The undo history is empty
    #[error("Nothing to undo.")]
    EmptyUndo,
    /// Storage holds no usable shape
    #[error("No saved shape found.")]
    EmptyLoad,
    /// The shape could not be serialized
    #[error("Failed to save shape: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SessionError {
    /// Returns true for errors that should not be shown to the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, SessionError::VacuousTransform)
    }
}

/// What a canvas click did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Center-setting mode consumed the click; the caller should show this center
    CenterSet(Point),
    /// The shape was closed
    Closed,
    /// A vertex was added
    Added,
    /// Nothing changed
    Ignored(RejectReason),
}

/// Raw text of the fields a dilation reads.
#[derive(Debug, Clone, Copy)]
pub struct DilationRequest<'a> {
    /// X scale factor text
    pub x_scale: &'a str,
    /// Y scale factor text
    pub y_scale: &'a str,
    /// X coordinate of the center of dilation
    pub center_x: &'a str,
    /// Y coordinate of the center of dilation
    pub center_y: &'a str,
}

/// Owns all mutable editing state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    shape: Shape,
    history: ShapeHistory,
    log: TransformationLog,
    has_dilated: bool,
    setting_center: bool,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The undo history.
    pub fn history(&self) -> &ShapeHistory {
        &self.history
    }

    /// The transformation log.
    pub fn log(&self) -> &TransformationLog {
        &self.log
    }

    /// Mutable access to the log, for toggling its visibility.
    pub fn log_mut(&mut self) -> &mut TransformationLog {
        &mut self.log
    }

    /// Whether a dilation is currently in effect.
    pub fn has_dilated(&self) -> bool {
        self.has_dilated
    }

    /// The shape before the last change, shown as a ghost while a dilation is in effect.
    pub fn previous_shape(&self) -> Option<&Shape> {
        if self.has_dilated {
            self.history.peek().map(|snapshot| &snapshot.shape)
        } else {
            None
        }
    }

    /// Whether the next click sets the center of dilation.
    pub fn is_setting_center(&self) -> bool {
        self.setting_center
    }

    /// Turns center-setting mode on or off and returns the new state.
    pub fn toggle_center_mode(&mut self) -> bool {
        self.setting_center = !self.setting_center;
        self.setting_center
    }

    /// Label for the center-setting button.
    pub fn center_mode_label(&self) -> &'static str {
        if self.setting_center {
            "Click to Set Center"
        } else {
            "Set Center by Click"
        }
    }

    fn snapshot(&mut self) {
        self.history.push(Snapshot {
            shape: self.shape.clone(),
            has_dilated: self.has_dilated,
        });
    }

    /// Handles a click on a grid point.
    ///
    /// In center-setting mode the click picks the center and the mode switches off.
    /// Otherwise the click closes the shape, adds a vertex, or is ignored.
    pub fn click(&mut self, grid: Point) -> ClickOutcome {
        if self.setting_center {
            self.setting_center = false;
            self.log.append(LogEntry::CenterSet { point: grid });
            log::info!("Center of dilation set to {grid}");
            return ClickOutcome::CenterSet(grid);
        }

        match self.shape.classify(grid) {
            PointInsertion::Close => {
                self.snapshot();
                self.shape.close();
                self.log.append(LogEntry::ShapeClosed { point: grid });
                log::info!("Closed shape at {grid}");
                ClickOutcome::Closed
            }
            PointInsertion::Append => {
                self.snapshot();
                self.shape.push(grid);
                self.log.append(LogEntry::PointAdded { point: grid });
                log::info!("Added point {grid} ({} total)", self.shape.len());
                ClickOutcome::Added
            }
            PointInsertion::Reject(reason) => {
                log::debug!("Ignored click at {grid}: {reason:?}");
                ClickOutcome::Ignored(reason)
            }
        }
    }

    /// Applies a center-relative transform to every point.
    ///
    /// Snapshots the shape, maps each point through `transform(point, center)` and
    /// records `entry` in the log. If any mapped point would not be finite, nothing changes.
    pub fn apply_transformation(
        &mut self,
        center: Point,
        transform: impl Fn(Point, Point) -> Point,
        entry: LogEntry,
    ) -> Result<(), SessionError> {
        let overflows = self
            .shape
            .points()
            .iter()
            .any(|point| !transform(*point, center).is_finite());
        if overflows {
            log::warn!("Rejected transform: {entry} would overflow a coordinate");
            return Err(SessionError::Overflow);
        }

        self.snapshot();
        self.shape.map_points(|point| transform(point, center));
        self.log.append(entry);
        Ok(())
    }

    /// Dilates the shape about the requested center.
    ///
    /// Invalid scale text aborts before anything changes. So does a request whose scales
    /// both resolve to 1 while some scale text was typed, before the center is read; leaving
    /// both scale fields empty is an explicit identity dilation and is applied. Invalid
    /// center text and results too large to represent abort as well.
    pub fn dilate(&mut self, request: &DilationRequest<'_>) -> Result<(), SessionError> {
        let x = ScaleFactor::parse(request.x_scale);
        let y = ScaleFactor::parse(request.y_scale);
        if let Some(err) = x.error.as_ref().or(y.error.as_ref()) {
            log::warn!("Rejected scale factors {:?}, {:?}: {err}", x.text, y.text);
            return Err(err.clone().into());
        }

        if x.value == 1.0 && y.value == 1.0 && !(x.is_blank() && y.is_blank()) {
            log::debug!("Skipped vacuous dilation ({:?}, {:?})", x.text, y.text);
            return Err(SessionError::VacuousTransform);
        }

        let center = parse_center(request.center_x, request.center_y).map_err(|err| {
            log::warn!(
                "Rejected center of dilation ({:?}, {:?}): {err}",
                request.center_x,
                request.center_y
            );
            err
        })?;

        let (x_scale, y_scale) = (x.value, y.value);
        let entry = LogEntry::Dilated {
            x_label: x.label(),
            y_label: y.label(),
            x_scale,
            y_scale,
            center,
        };
        self.apply_transformation(
            center,
            |p, c| Point::new(c.x + x_scale * (p.x - c.x), c.y + y_scale * (p.y - c.y)),
            entry,
        )?;
        self.has_dilated = true;
        log::info!("Dilated by ({x_scale}, {y_scale}) about {center}");
        Ok(())
    }

    /// Restores the most recent snapshot, including its dilation flag.
    ///
    /// Undo itself is not recorded in the history.
    pub fn undo(&mut self) -> Result<(), SessionError> {
        let snapshot = self.history.pop().ok_or(SessionError::EmptyUndo)?;
        self.shape = snapshot.shape;
        self.has_dilated = snapshot.has_dilated;
        self.log.append(LogEntry::Undo);
        log::info!("Undo ({} snapshots left)", self.history.len());
        Ok(())
    }

    /// Empties the shape, the history and the log.
    pub fn clear(&mut self) {
        self.shape = Shape::new();
        self.history.clear();
        self.log.clear();
        self.has_dilated = false;
        log::info!("Cleared session");
    }

    /// Records a reset of the center of dilation and returns the new center.
    pub fn reset_center(&mut self) -> Point {
        self.log.append(LogEntry::CenterReset);
        log::info!("Center of dilation reset to the origin");
        Point::ORIGIN
    }

    /// Writes the current shape to storage under the saved-shape key.
    pub fn save_shape(&mut self, storage: &mut dyn eframe::Storage) -> Result<(), SessionError> {
        let json = self.shape.to_json()?;
        storage.set_string(SAVED_SHAPE_KEY, json);
        storage.flush();
        self.log.append(LogEntry::ShapeSaved);
        log::info!("Saved shape with {} points", self.shape.len());
        Ok(())
    }

    /// Replaces the current shape with the one in storage.
    ///
    /// A missing, unreadable or oversized saved shape counts as no saved shape.
    /// Loading is undoable and clears the dilation flag.
    pub fn load_shape(&mut self, storage: &dyn eframe::Storage) -> Result<(), SessionError> {
        let json = storage
            .get_string(SAVED_SHAPE_KEY)
            .ok_or(SessionError::EmptyLoad)?;
        let shape = Shape::from_json(&json).map_err(|err| {
            log::warn!("Ignoring unreadable saved shape: {err}");
            SessionError::EmptyLoad
        })?;
        if shape.len() > POINT_MAX_COUNT {
            log::warn!("Ignoring saved shape with {} points", shape.len());
            return Err(SessionError::EmptyLoad);
        }

        self.snapshot();
        self.shape = shape;
        self.has_dilated = false;
        self.log.append(LogEntry::ShapeLoaded);
        log::info!("Loaded shape with {} points", self.shape.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GRID_RANGE, MAX_UNDO_HISTORY};
    use crate::test_storage::MemoryStorage;

    fn request<'a>(x_scale: &'a str, y_scale: &'a str) -> DilationRequest<'a> {
        DilationRequest {
            x_scale,
            y_scale,
            center_x: "0",
            center_y: "0",
        }
    }

    fn session_with(points: &[(i32, i32)]) -> Session {
        let mut session = Session::new();
        for &(x, y) in points {
            assert_eq!(session.click(Point::grid(x, y)), ClickOutcome::Added);
        }
        session
    }

    fn grid_points(shape: &Shape) -> Vec<(f64, f64)> {
        shape.points().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_dilate_triangle_about_origin() {
        let mut session = session_with(&[(0, 0), (4, 0), (4, 3)]);
        let log_len = session.log().len();
        let history_len = session.history().len();

        session.dilate(&request("2", "2")).unwrap();

        assert_eq!(grid_points(session.shape()), vec![(0.0, 0.0), (8.0, 0.0), (8.0, 6.0)]);
        assert_eq!(session.log().len(), log_len + 1);
        assert_eq!(
            session.log().entries().last().map(ToString::to_string).as_deref(),
            Some("Dilated by x-scale 2, y-scale 2")
        );
        assert_eq!(session.history().len(), history_len + 1);
        let before = session.history().peek().unwrap();
        assert_eq!(grid_points(&before.shape), vec![(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)]);
        assert!(session.has_dilated());
    }

    #[test]
    fn test_undo_after_dilation_restores_triangle() {
        let mut session = Session::new();
        for p in [(0, 0), (4, 0), (4, 3)] {
            session.click(Point::grid(p.0, p.1));
        }
        // Drop the insertion snapshots so only the dilation is left to undo
        session.history.clear();
        session.dilate(&request("2", "2")).unwrap();

        session.undo().unwrap();

        assert_eq!(grid_points(session.shape()), vec![(0.0, 0.0), (4.0, 0.0), (4.0, 3.0)]);
        assert_eq!(session.log().entries().last(), Some(&LogEntry::Undo));
        assert!(session.history().is_empty());
        assert!(!session.has_dilated());
    }

    #[test]
    fn test_identity_dilation_with_blank_scales() {
        let mut session = session_with(&[(1, 2), (-3, 5)]);
        let before = session.shape().clone();
        session
            .dilate(&DilationRequest {
                x_scale: "",
                y_scale: "",
                center_x: "7",
                center_y: "-4",
            })
            .unwrap();
        assert_eq!(session.shape(), &before);
        assert_eq!(
            session.log().entries().last().map(ToString::to_string).as_deref(),
            Some("Dilated by x-scale 1, y-scale 1")
        );
    }

    #[test]
    fn test_vacuous_dilation_is_skipped_silently() {
        let mut session = session_with(&[(1, 1)]);
        let log_len = session.log().len();
        let history_len = session.history().len();

        let err = session.dilate(&request("1", "")).unwrap_err();
        assert!(matches!(err, SessionError::VacuousTransform));
        assert!(err.is_silent());

        let err = session.dilate(&request("2/2", "1")).unwrap_err();
        assert!(matches!(err, SessionError::VacuousTransform));

        assert_eq!(session.log().len(), log_len);
        assert_eq!(session.history().len(), history_len);
        assert!(!session.has_dilated());
    }

    #[test]
    fn test_invalid_scale_aborts_before_mutation() {
        let mut session = session_with(&[(1, 1), (2, 3)]);
        let before = session.shape().clone();
        let history_len = session.history().len();

        let err = session.dilate(&request("3/0", "2")).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidInput(InputError::ZeroDenominator { .. })
        ));
        assert!(!err.is_silent());

        let err = session.dilate(&request("2", "zero")).unwrap_err();
        assert!(matches!(err, SessionError::InvalidInput(InputError::InvalidScale { .. })));

        assert_eq!(session.shape(), &before);
        assert_eq!(session.history().len(), history_len);
    }

    #[test]
    fn test_invalid_center_aborts_before_mutation() {
        let mut session = session_with(&[(1, 1)]);
        let history_len = session.history().len();
        let err = session
            .dilate(&DilationRequest {
                x_scale: "2",
                y_scale: "2",
                center_x: "",
                center_y: "0",
            })
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidInput(InputError::InvalidCenter)));
        assert_eq!(session.history().len(), history_len);
        assert_eq!(session.shape().points(), &[Point::grid(1, 1)]);
    }

    #[test]
    fn test_vacuous_dilation_skips_center_validation() {
        let mut session = session_with(&[(1, 1)]);
        let err = session
            .dilate(&DilationRequest {
                x_scale: "1",
                y_scale: "",
                center_x: "left",
                center_y: "0",
            })
            .unwrap_err();
        assert!(matches!(err, SessionError::VacuousTransform));

        // Scale errors still come before anything else
        let err = session
            .dilate(&DilationRequest {
                x_scale: "3/0",
                y_scale: "",
                center_x: "left",
                center_y: "0",
            })
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidInput(InputError::ZeroDenominator { .. })
        ));
    }

    #[test]
    fn test_overflowing_scale_leaves_shape_unchanged() {
        let mut session = session_with(&[(1, 1)]);
        let huge = format!("1{}/1", "0".repeat(400));
        let err = session.dilate(&request(&huge, "2")).unwrap_err();
        assert!(matches!(err, SessionError::InvalidInput(InputError::InvalidScale { .. })));
        assert_eq!(session.shape().points(), &[Point::grid(1, 1)]);
    }

    #[test]
    fn test_repeated_dilation_overflow_aborts_before_snapshot() {
        let mut storage = MemoryStorage::default();
        let mut session = session_with(&[(1, 1)]);
        session.dilate(&request("1e300", "2")).unwrap();
        let before = session.shape().clone();
        let history_len = session.history().len();
        let log_len = session.log().len();

        let err = session.dilate(&request("1e300", "2")).unwrap_err();
        assert!(matches!(err, SessionError::Overflow));
        assert!(!err.is_silent());
        assert_eq!(session.shape(), &before);
        assert_eq!(session.history().len(), history_len);
        assert_eq!(session.log().len(), log_len);

        // What is left in the shape still survives a save/load cycle
        session.save_shape(&mut storage).unwrap();
        let mut other = Session::new();
        other.load_shape(&storage).unwrap();
        assert_eq!(other.shape(), &before);
    }

    #[test]
    fn test_dilation_about_off_origin_center_with_fractions() {
        let mut session = session_with(&[(4, 4), (6, 2)]);
        session
            .dilate(&DilationRequest {
                x_scale: "1/2",
                y_scale: "-2",
                center_x: "2",
                center_y: "2",
            })
            .unwrap();
        assert_eq!(grid_points(session.shape()), vec![(3.0, -2.0), (4.0, 2.0)]);
        match session.log().entries().last() {
            Some(LogEntry::Dilated {
                x_label,
                x_scale,
                y_scale,
                center,
                ..
            }) => {
                assert_eq!(x_label, "1/2");
                assert_eq!((*x_scale, *y_scale), (0.5, -2.0));
                assert_eq!(*center, Point::grid(2, 2));
            }
            other => panic!("unexpected log entry {other:?}"),
        }
    }

    #[test]
    fn test_history_bound_and_oldest_snapshot() {
        let mut session = Session::new();
        let total = MAX_UNDO_HISTORY + 5;
        for i in 0..total as i32 {
            session.click(Point::grid(i - 12, 1));
        }
        assert_eq!(session.shape().len(), total);
        assert_eq!(session.history().len(), MAX_UNDO_HISTORY);

        for _ in 0..MAX_UNDO_HISTORY {
            session.undo().unwrap();
        }
        // The oldest retained snapshot was taken before the sixth insertion
        assert_eq!(session.shape().len(), total - MAX_UNDO_HISTORY);
        assert!(matches!(session.undo(), Err(SessionError::EmptyUndo)));
        assert_eq!(session.shape().len(), total - MAX_UNDO_HISTORY);
    }

    #[test]
    fn test_closure_and_duplicate_rejection() {
        let mut session = session_with(&[(0, 0), (3, 0), (0, 3)]);
        assert_eq!(session.click(Point::grid(0, 0)), ClickOutcome::Closed);
        assert!(session.shape().is_closed());
        assert_eq!(session.shape().points().last(), Some(&Point::grid(0, 0)));
        assert_eq!(
            session.log().entries().last().map(ToString::to_string).as_deref(),
            Some("Closed shape at Point A (0, 0)")
        );

        let len = session.shape().len();
        assert_eq!(
            session.click(Point::grid(0, 0)),
            ClickOutcome::Ignored(RejectReason::Duplicate)
        );
        assert_eq!(
            session.click(Point::grid(3, 0)),
            ClickOutcome::Ignored(RejectReason::Duplicate)
        );
        assert_eq!(session.shape().len(), len);
    }

    #[test]
    fn test_boundary_rejection_leaves_no_trace() {
        let mut session = Session::new();
        let edge = GRID_RANGE + 1;
        for candidate in [
            Point::grid(edge, 0),
            Point::grid(0, -edge),
            Point::new(1.5, 2.0),
        ] {
            assert!(matches!(session.click(candidate), ClickOutcome::Ignored(_)));
        }
        assert!(session.shape().is_empty());
        assert!(session.history().is_empty());
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_undo_restores_dilation_flag_from_snapshot() {
        let mut session = session_with(&[(1, 0), (0, 1)]);
        session.dilate(&request("2", "2")).unwrap();
        session.click(Point::grid(5, 5));
        assert!(session.has_dilated());

        // Undoing the insertion returns to a dilated state
        session.undo().unwrap();
        assert!(session.has_dilated());
        assert!(session.previous_shape().is_some());

        // Undoing the dilation returns to an undilated state even though snapshots remain
        session.undo().unwrap();
        assert!(!session.has_dilated());
        assert!(session.history().can_undo());
        assert!(session.previous_shape().is_none());
    }

    #[test]
    fn test_center_mode_consumes_one_click() {
        let mut session = session_with(&[(1, 1)]);
        assert!(session.toggle_center_mode());
        assert_eq!(session.center_mode_label(), "Click to Set Center");

        let history_len = session.history().len();
        assert_eq!(
            session.click(Point::grid(-2, 4)),
            ClickOutcome::CenterSet(Point::grid(-2, 4))
        );
        assert!(!session.is_setting_center());
        assert_eq!(session.center_mode_label(), "Set Center by Click");
        assert_eq!(session.shape().len(), 1);
        assert_eq!(session.history().len(), history_len);
        assert_eq!(
            session.log().entries().last().map(ToString::to_string).as_deref(),
            Some("Set center to (-2, 4)")
        );

        assert_eq!(session.click(Point::grid(-2, 4)), ClickOutcome::Added);
    }

    #[test]
    fn test_reset_center_is_logged() {
        let mut session = Session::new();
        assert_eq!(session.reset_center(), Point::ORIGIN);
        assert_eq!(session.log().render(), "Reset center to (0, 0)");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = session_with(&[(1, 1), (2, 2)]);
        session.dilate(&request("3", "3")).unwrap();
        session.clear();
        assert!(session.shape().is_empty());
        assert!(session.history().is_empty());
        assert!(session.log().is_empty());
        assert!(!session.has_dilated());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let mut storage = MemoryStorage::default();
        let mut session = session_with(&[(0, 0), (4, 0), (4, 3)]);
        session
            .dilate(&DilationRequest {
                x_scale: "1/3",
                y_scale: "7/9",
                center_x: "1",
                center_y: "1",
            })
            .unwrap();
        let saved = session.shape().clone();
        session.save_shape(&mut storage).unwrap();
        assert_eq!(session.log().entries().last(), Some(&LogEntry::ShapeSaved));

        let mut other = session_with(&[(9, 9)]);
        other.load_shape(&storage).unwrap();
        assert_eq!(other.shape(), &saved);
        assert!(!other.has_dilated());
        assert_eq!(other.log().entries().last(), Some(&LogEntry::ShapeLoaded));

        // Loading is undoable
        other.undo().unwrap();
        assert_eq!(other.shape().points(), &[Point::grid(9, 9)]);
    }

    #[test]
    fn test_load_without_saved_shape() {
        let storage = MemoryStorage::default();
        let mut session = session_with(&[(1, 1)]);
        let history_len = session.history().len();
        assert!(matches!(session.load_shape(&storage), Err(SessionError::EmptyLoad)));
        assert_eq!(session.history().len(), history_len);
        assert_eq!(session.shape().len(), 1);
    }

    #[test]
    fn test_load_rejects_unreadable_or_oversized_shape() {
        let mut storage = MemoryStorage::default();
        let mut session = Session::new();

        eframe::Storage::set_string(&mut storage, SAVED_SHAPE_KEY, "not json".into());
        assert!(matches!(session.load_shape(&storage), Err(SessionError::EmptyLoad)));

        let oversized = Shape::from_points(
            (0..=POINT_MAX_COUNT as i32).map(|i| Point::grid(i, 0)).collect(),
        );
        eframe::Storage::set_string(&mut storage, SAVED_SHAPE_KEY, oversized.to_json().unwrap());
        assert!(matches!(session.load_shape(&storage), Err(SessionError::EmptyLoad)));
        assert!(session.history().is_empty());
    }
}
