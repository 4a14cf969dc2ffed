//! Toolhead position tracking.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current toolhead position in 3D space.
///
/// The generator threads one of these through every move-emitting
/// operation so that each emitted absolute coordinate reflects the
/// accumulated relative moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Toolhead {
    /// X-axis position (mm)
    pub x: f64,
    /// Y-axis position (mm)
    pub y: f64,
    /// Z-axis position (mm)
    pub z: f64,
}

impl Toolhead {
    /// Create a new position with X, Y, Z coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Shift the XY position by a relative delta.
    pub fn advance(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Raise the Z position by one layer.
    pub fn raise(&mut self, dz: f64) {
        self.z += dz;
    }

    /// Planar (XY) distance covered by a relative delta.
    pub fn planar_length(dx: f64, dy: f64) -> f64 {
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Toolhead {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl fmt::Display for Toolhead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:{:.3} Y:{:.3} Z:{:.3}", self.x, self.y, self.z)
    }
}
