//! Common value types produced by the decoders

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Set of 0-based row indices selecting the cells that belong to one
/// component tag
pub type RowSet = HashSet<usize>;

/// A 3D point with double-precision coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3d {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Vec3d {
    fn from(arr: [f64; 3]) -> Self {
        Self { x: arr[0], y: arr[1], z: arr[2] }
    }
}

impl From<Vec3d> for [f64; 3] {
    fn from(v: Vec3d) -> Self {
        [v.x, v.y, v.z]
    }
}

/// A labeled marker placed at a point in model space
///
/// Decoded from semicolon-delimited highlight cells: position, label, and
/// an RGBA color in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightLocation {
    /// Position in model coordinates
    pub position: Vec3d,

    /// Display label
    pub label: String,

    /// RGBA color, each channel in [0.0, 1.0]
    pub color: [f64; 4],
}

impl HighlightLocation {
    pub fn new(position: Vec3d, label: impl Into<String>, color: [f64; 4]) -> Self {
        Self {
            position,
            label: label.into(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3d_conversions() {
        let v = Vec3d::new(1.0, 2.0, 3.0);
        assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(Vec3d::from([1.0, 2.0, 3.0]), v);
    }
}
