//! Vector3 extensions

use nalgebra::Vector3;

/// Extension methods for Vector3
pub trait Vector3Ext {
    /// Return the normalized vector, falling back to +Z for degenerate input.
    ///
    /// The fallback keeps axis-aligned geometry out of NaN territory when a
    /// cross product collapses to zero.
    fn normalized_or_up(self) -> Vector3<f32>;
}

impl Vector3Ext for Vector3<f32> {
    fn normalized_or_up(self) -> Vector3<f32> {
        let norm = self.norm();
        if norm <= f32::EPSILON {
            Vector3::new(0.0, 0.0, 1.0)
        } else {
            self / norm
        }
    }
}
