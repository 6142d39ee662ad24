//! Triangle mesh representation

use crate::{BBox3, Result, Triangle};
use std::path::Path;

mod io; // STL I/O implementation

/// Triangle mesh
///
/// Represents geometry as a flat collection of oriented triangles, the
/// facet-soup form STL serializes. Triangles carry no ordering
/// requirement; each is independently valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Get the bounding box of all vertices
    pub fn bounding_box(&self) -> BBox3 {
        let mut bbox = BBox3::empty();
        for tri in &self.triangles {
            bbox.include(tri.v1);
            bbox.include(tri.v2);
            bbox.include(tri.v3);
        }
        bbox
    }

    /// Save to binary STL
    ///
    /// The file is exactly `84 + 50 * triangle_count()` bytes: an 80-byte
    /// header, a little-endian u32 count, and 50 bytes per triangle.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nalgebra::Vector3;
    /// use reliefmesh::{Mesh, Triangle};
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.push(Triangle::new(
    ///     Vector3::new(0.0, 0.0, 0.0),
    ///     Vector3::new(10.0, 0.0, 0.0),
    ///     Vector3::new(5.0, 10.0, 0.0),
    /// ));
    /// mesh.save_stl("triangle.stl")?;
    /// # Ok::<(), reliefmesh::Error>(())
    /// ```
    pub fn save_stl<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        io::save_binary(self, path)
    }

    /// Save to ASCII STL under the given solid name
    pub fn save_stl_ascii<P: AsRef<Path>>(&self, path: P, name: &str) -> Result<()> {
        io::save_ascii(self, path, name)
    }

    /// Load from binary STL file
    pub fn load_stl<P: AsRef<Path>>(path: P) -> Result<Self> {
        io::load_binary(path)
    }
}

impl FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new();
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.is_empty());
        assert!(mesh.bounding_box().is_empty());
    }

    #[test]
    fn test_bounding_box_spans_all_vertices() {
        let mut mesh = Mesh::new();
        mesh.push(Triangle::new(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(10.0, 0.0, 0.0),
            Vector3::new(5.0, 10.0, -2.0),
        ));
        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, Vector3::new(0.0, 0.0, -2.0));
        assert_eq!(bbox.max, Vector3::new(10.0, 10.0, 0.0));
    }
}
