//! Field-coordinate projection for touch-map geometry.
//!
//! Pure functions only: identical inputs always produce identical outputs,
//! and nothing here touches state.

use serde::{Deserialize, Serialize};

/// A projected point in field coordinates (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Physical field bounds in meters.
///
/// Defaults match a full field with endzones: 40m wide, 110m deep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 40.0,
            y_min: 0.0,
            y_max: 110.0,
        }
    }
}

impl FieldBounds {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn depth(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Projects a normalized unit-square coordinate into field coordinates.
    ///
    /// The y axis is flipped: normalized y = 1 is the back of our own
    /// endzone, which renders at the bottom of the field.
    pub fn project(&self, x: f64, y: f64) -> Point {
        Point {
            x: self.x_min + x * (self.x_max - self.x_min),
            y: self.y_max + y * (self.y_min - self.y_max),
        }
    }

    /// Absolute-mode geometry for one pass.
    pub fn segment(&self, sx: f64, sy: f64, ex: f64, ey: f64) -> (Point, Point) {
        (self.project(sx, sy), self.project(ex, ey))
    }

    /// Origin-relative geometry: start pinned at (0, 0), end is the scaled
    /// delta. Used to compare pass shapes independent of field position.
    pub fn segment_relative(&self, sx: f64, sy: f64, ex: f64, ey: f64) -> (Point, Point) {
        (
            Point { x: 0.0, y: 0.0 },
            Point {
                x: (ex - sx) * (self.x_max - self.x_min),
                y: (ey - sy) * (self.y_min - self.y_max),
            },
        )
    }
}
