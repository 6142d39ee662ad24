//! Basic types for reliefmesh

use crate::Vector3Ext;
use nalgebra::Vector3;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 24-bit RGB color, one byte per channel
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorRgb24 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorRgb24 {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn gray(value: u8) -> Self {
        Self {
            r: value,
            g: value,
            b: value,
        }
    }

    /// Channel-average brightness, rounded down to [0, 255].
    pub fn brightness(&self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }
}

/// An oriented triangle face: three vertices in winding order plus a normal.
///
/// Construct with [`Triangle::new`] to derive the normal from the vertices,
/// or with [`Triangle::with_normal`] when the normal is known a priori
/// (axis-aligned faces). The explicit normal is stored verbatim and never
/// recomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    pub normal: Vector3<f32>,
    pub v1: Vector3<f32>,
    pub v2: Vector3<f32>,
    pub v3: Vector3<f32>,
}

impl Triangle {
    /// Create a triangle, computing the normal from the winding order.
    pub fn new(v1: Vector3<f32>, v2: Vector3<f32>, v3: Vector3<f32>) -> Self {
        let normal = (v2 - v1).cross(&(v3 - v1)).normalized_or_up();
        Self { normal, v1, v2, v3 }
    }

    /// Create a triangle with an explicit normal.
    pub fn with_normal(
        normal: Vector3<f32>,
        v1: Vector3<f32>,
        v2: Vector3<f32>,
        v3: Vector3<f32>,
    ) -> Self {
        Self { normal, v1, v2, v3 }
    }

    /// The normal implied by the vertex winding, ignoring the stored one.
    pub fn computed_normal(&self) -> Vector3<f32> {
        (self.v2 - self.v1).cross(&(self.v3 - self.v1)).normalized_or_up()
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Triangle[normal=({:.2}, {:.2}, {:.2}), v1=({:.2}, {:.2}, {:.2}), v2=({:.2}, {:.2}, {:.2}), v3=({:.2}, {:.2}, {:.2})]",
            self.normal.x, self.normal.y, self.normal.z,
            self.v1.x, self.v1.y, self.v1.z,
            self.v2.x, self.v2.y, self.v2.z,
            self.v3.x, self.v3.y, self.v3.z,
        )
    }
}

/// Axis-aligned 3D bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BBox3 {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl BBox3 {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// An empty box that any included point will replace.
    pub fn empty() -> Self {
        Self {
            min: Vector3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Vector3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Grow the box to contain a point.
    pub fn include(&mut self, point: Vector3<f32>) {
        self.min = self.min.inf(&point);
        self.max = self.max.sup(&point);
    }

    pub fn size(&self) -> Vector3<f32> {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            self.max - self.min
        }
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }
}

impl fmt::Display for BBox3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BBox3[({:.2}, {:.2}, {:.2}) - ({:.2}, {:.2}, {:.2})]",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_rounds_down() {
        assert_eq!(ColorRgb24::new(255, 255, 255).brightness(), 255);
        assert_eq!(ColorRgb24::new(0, 0, 0).brightness(), 0);
        assert_eq!(ColorRgb24::new(1, 1, 2).brightness(), 1);
    }

    #[test]
    fn test_triangle_normal_from_winding() {
        // Counter-clockwise in the XY plane, seen from +Z
        let tri = Triangle::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        );
        assert_eq!(tri.normal, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_degenerate_triangle_normal() {
        let p = Vector3::new(1.0, 2.0, 3.0);
        let tri = Triangle::new(p, p, p);
        assert_eq!(tri.normal, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_explicit_normal_is_not_recomputed() {
        let n = Vector3::new(0.0, 1.0, 0.0);
        let tri = Triangle::with_normal(
            n,
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        );
        assert_eq!(tri.normal, n);
        // Winding implies (0, -1, 0); the stored normal wins.
        assert_ne!(tri.normal, tri.computed_normal());
    }

    #[test]
    fn test_bbox_include() {
        let mut bbox = BBox3::empty();
        assert!(bbox.is_empty());
        bbox.include(Vector3::new(1.0, 2.0, 3.0));
        bbox.include(Vector3::new(-1.0, 0.0, 5.0));
        assert_eq!(bbox.min, Vector3::new(-1.0, 0.0, 3.0));
        assert_eq!(bbox.max, Vector3::new(1.0, 2.0, 5.0));
        assert_eq!(bbox.size(), Vector3::new(2.0, 2.0, 2.0));
    }
}
