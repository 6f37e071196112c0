//! In-flight drag gesture

use crate::animation::KeyframeSelection;
use crate::axis::{AxisMapper, Point};
use crate::collection::BandId;

/// A band thumb being dragged
///
/// The keyframes are picked once on drag start and every move writes into
/// them, so a drag never creates keyframes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub band: BandId,
    pub frequency: KeyframeSelection,
    pub gain: KeyframeSelection,
    /// Top-left corner of the thumb
    pub origin: Point,
    pub thumb_size: f64,
}

impl DragState {
    pub fn center(&self) -> Point {
        self.origin + Point::new(self.thumb_size / 2.0, self.thumb_size / 2.0)
    }

    /// Move the thumb by a screen delta, keeping it inside the viewport
    pub fn apply_delta(&mut self, dx: f64, dy: f64, axis: &AxisMapper) {
        let max_x = (axis.width - self.thumb_size).max(0.0);
        let max_y = (axis.height - self.thumb_size).max(0.0);
        self.origin = Point::new(
            (self.origin.x + dx).clamp(0.0, max_x),
            (self.origin.y + dy).clamp(0.0, max_y),
        );
    }

    /// (frequency, gain) under the thumb center
    pub fn values(&self, axis: &AxisMapper) -> (f64, f64) {
        axis.from_screen(self.center())
    }
}
