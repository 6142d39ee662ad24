//! Mesh generation: height-field quad meshing and voxel cube face culling

use crate::{HeightField, Mesh, Triangle, VoxelGrid, DEPTH_RESOLUTION};
use nalgebra::Vector3;

/// Generation stage reported through the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshStage {
    Heights,
    Surfaces,
    Walls,
    Cubes,
}

/// Progress notification emitted while a generator runs.
///
/// Purely observational: generators behave identically whether or not
/// anyone listens.
#[derive(Debug, Clone, Copy)]
pub struct MeshProgress {
    pub stage: MeshStage,
    pub completed: usize,
    pub total: usize,
}

/// Strategy interface for turning an occupancy grid into a triangle mesh.
///
/// Implementations emit only exposed surfaces and guarantee the result is
/// a closed 2-manifold: every directed edge appears exactly once, and so
/// does its reverse. The one exception is an entirely empty grid, which
/// yields an empty mesh.
pub trait MeshGenerator {
    /// Generate a mesh from the grid at the given voxel edge length.
    fn generate(&self, grid: &VoxelGrid, voxel_size: f32) -> Mesh {
        self.generate_with_progress(grid, voxel_size, &mut |_| {})
    }

    /// Generate, reporting coarse progress through `progress`.
    fn generate_with_progress(
        &self,
        grid: &VoxelGrid,
        voxel_size: f32,
        progress: &mut dyn FnMut(MeshProgress),
    ) -> Mesh;
}

/// Height-field strategy: one quad per 2x2 block of positive column
/// heights, with a ruled top surface, flat bottom, and boundary walls.
///
/// This is the preferred strategy for relief prints; it produces smooth
/// tops where neighboring columns differ slightly in height.
pub struct HeightFieldMesher;

impl HeightFieldMesher {
    /// Mesh a height field directly.
    pub fn mesh_from_heights(heights: &HeightField, voxel_size: f32) -> Mesh {
        Self::mesh_from_heights_with_progress(heights, voxel_size, &mut |_| {})
    }

    pub fn mesh_from_heights_with_progress(
        heights: &HeightField,
        voxel_size: f32,
        progress: &mut dyn FnMut(MeshProgress),
    ) -> Mesh {
        let quads_x = heights.width().saturating_sub(1);
        let quads_y = heights.height().saturating_sub(1);

        let mut mesh = Mesh::new();
        if quads_x == 0 || quads_y == 0 {
            return mesh;
        }

        // A quad exists only if all four corner heights are strictly
        // positive; one zero corner suppresses the whole quad.
        let mut quad_exists = vec![false; quads_x * quads_y];

        // Top and bottom surfaces
        for x in 0..quads_x {
            for y in 0..quads_y {
                let z00 = heights.get(x, y);
                let z10 = heights.get(x + 1, y);
                let z01 = heights.get(x, y + 1);
                let z11 = heights.get(x + 1, y + 1);

                if z00 <= 0.0 || z10 <= 0.0 || z01 <= 0.0 || z11 <= 0.0 {
                    continue;
                }
                quad_exists[x * quads_y + y] = true;

                let x0 = x as f32 * voxel_size;
                let y0 = y as f32 * voxel_size;
                let x1 = (x + 1) as f32 * voxel_size;
                let y1 = (y + 1) as f32 * voxel_size;

                // Ruled top: every corner keeps its own height
                let v00 = Vector3::new(x0, y0, z00);
                let v10 = Vector3::new(x1, y0, z10);
                let v01 = Vector3::new(x0, y1, z01);
                let v11 = Vector3::new(x1, y1, z11);

                mesh.push(Triangle::new(v00, v10, v11));
                mesh.push(Triangle::new(v00, v11, v01));

                // Flat bottom at z = 0, winding reversed
                let b00 = Vector3::new(x0, y0, 0.0);
                let b10 = Vector3::new(x1, y0, 0.0);
                let b01 = Vector3::new(x0, y1, 0.0);
                let b11 = Vector3::new(x1, y1, 0.0);

                let down = Vector3::new(0.0, 0.0, -1.0);
                mesh.push(Triangle::with_normal(down, b00, b11, b10));
                mesh.push(Triangle::with_normal(down, b00, b01, b11));
            }
            progress(MeshProgress {
                stage: MeshStage::Surfaces,
                completed: x + 1,
                total: quads_x,
            });
        }

        // Walls wherever a 4-connected neighbor quad is missing; this is
        // what keeps the mesh watertight without internal seams.
        for x in 0..quads_x {
            for y in 0..quads_y {
                if !quad_exists[x * quads_y + y] {
                    continue;
                }

                let x0 = x as f32 * voxel_size;
                let y0 = y as f32 * voxel_size;
                let x1 = (x + 1) as f32 * voxel_size;
                let y1 = (y + 1) as f32 * voxel_size;

                let z00 = heights.get(x, y);
                let z10 = heights.get(x + 1, y);
                let z01 = heights.get(x, y + 1);
                let z11 = heights.get(x + 1, y + 1);

                let has_bottom_neighbor = y > 0 && quad_exists[x * quads_y + y - 1];
                if !has_bottom_neighbor {
                    let v1 = Vector3::new(x0, y0, z00);
                    let v2 = Vector3::new(x1, y0, z10);
                    let v3 = Vector3::new(x0, y0, 0.0);
                    let v4 = Vector3::new(x1, y0, 0.0);
                    let n = Vector3::new(0.0, -1.0, 0.0);
                    mesh.push(Triangle::with_normal(n, v1, v3, v4));
                    mesh.push(Triangle::with_normal(n, v1, v4, v2));
                }

                let has_top_neighbor = y < quads_y - 1 && quad_exists[x * quads_y + y + 1];
                if !has_top_neighbor {
                    let v1 = Vector3::new(x0, y1, z01);
                    let v2 = Vector3::new(x1, y1, z11);
                    let v3 = Vector3::new(x0, y1, 0.0);
                    let v4 = Vector3::new(x1, y1, 0.0);
                    let n = Vector3::new(0.0, 1.0, 0.0);
                    mesh.push(Triangle::with_normal(n, v1, v4, v3));
                    mesh.push(Triangle::with_normal(n, v1, v2, v4));
                }

                let has_left_neighbor = x > 0 && quad_exists[(x - 1) * quads_y + y];
                if !has_left_neighbor {
                    let v1 = Vector3::new(x0, y0, z00);
                    let v2 = Vector3::new(x0, y1, z01);
                    let v3 = Vector3::new(x0, y0, 0.0);
                    let v4 = Vector3::new(x0, y1, 0.0);
                    let n = Vector3::new(-1.0, 0.0, 0.0);
                    mesh.push(Triangle::with_normal(n, v1, v4, v3));
                    mesh.push(Triangle::with_normal(n, v1, v2, v4));
                }

                let has_right_neighbor = x < quads_x - 1 && quad_exists[(x + 1) * quads_y + y];
                if !has_right_neighbor {
                    let v1 = Vector3::new(x1, y0, z10);
                    let v2 = Vector3::new(x1, y1, z11);
                    let v3 = Vector3::new(x1, y0, 0.0);
                    let v4 = Vector3::new(x1, y1, 0.0);
                    let n = Vector3::new(1.0, 0.0, 0.0);
                    mesh.push(Triangle::with_normal(n, v1, v3, v4));
                    mesh.push(Triangle::with_normal(n, v1, v4, v2));
                }
            }
            progress(MeshProgress {
                stage: MeshStage::Walls,
                completed: x + 1,
                total: quads_x,
            });
        }

        mesh
    }
}

impl MeshGenerator for HeightFieldMesher {
    fn generate_with_progress(
        &self,
        grid: &VoxelGrid,
        voxel_size: f32,
        progress: &mut dyn FnMut(MeshProgress),
    ) -> Mesh {
        let heights = HeightField::from_grid(grid, voxel_size);
        progress(MeshProgress {
            stage: MeshStage::Heights,
            completed: grid.width(),
            total: grid.width(),
        });
        Self::mesh_from_heights_with_progress(&heights, voxel_size, progress)
    }
}

/// Full-voxel strategy: one quad per exposed cube face.
///
/// Coarser than the height-field strategy but works on any occupancy
/// grid, not just bottom-filled columns. Cell z-extent is
/// `voxel_size / height_scale_divisor`, uniform across the grid so that
/// shared faces line up exactly and culling them leaves no gaps; a column
/// with k filled cells spans `voxel_size * k / divisor`.
pub struct VoxelCubeMesher {
    height_scale_divisor: f32,
}

impl VoxelCubeMesher {
    pub fn new(height_scale_divisor: f32) -> Self {
        debug_assert!(height_scale_divisor > 0.0);
        Self {
            height_scale_divisor,
        }
    }
}

impl Default for VoxelCubeMesher {
    fn default() -> Self {
        Self::new(DEPTH_RESOLUTION as f32)
    }
}

impl MeshGenerator for VoxelCubeMesher {
    fn generate_with_progress(
        &self,
        grid: &VoxelGrid,
        voxel_size: f32,
        progress: &mut dyn FnMut(MeshProgress),
    ) -> Mesh {
        let s = voxel_size;
        let t = voxel_size / self.height_scale_divisor;
        let mut mesh = Mesh::new();

        for x in 0..grid.width() {
            for y in 0..grid.height() {
                for z in 0..grid.depth() {
                    if !grid.filled(x, y, z) {
                        continue;
                    }

                    let x0 = x as f32 * s;
                    let x1 = (x + 1) as f32 * s;
                    let y0 = y as f32 * s;
                    let y1 = (y + 1) as f32 * s;
                    let z0 = z as f32 * t;
                    let z1 = (z + 1) as f32 * t;

                    // One quad per face whose far side is empty or
                    // out of grid; shared internal faces never appear.
                    if x == 0 || !grid.filled(x - 1, y, z) {
                        push_quad(
                            &mut mesh,
                            Vector3::new(-1.0, 0.0, 0.0),
                            Vector3::new(x0, y0, z0),
                            Vector3::new(x0, y0, z1),
                            Vector3::new(x0, y1, z1),
                            Vector3::new(x0, y1, z0),
                        );
                    }
                    if !grid.filled(x + 1, y, z) {
                        push_quad(
                            &mut mesh,
                            Vector3::new(1.0, 0.0, 0.0),
                            Vector3::new(x1, y0, z0),
                            Vector3::new(x1, y1, z0),
                            Vector3::new(x1, y1, z1),
                            Vector3::new(x1, y0, z1),
                        );
                    }
                    if y == 0 || !grid.filled(x, y - 1, z) {
                        push_quad(
                            &mut mesh,
                            Vector3::new(0.0, -1.0, 0.0),
                            Vector3::new(x0, y0, z0),
                            Vector3::new(x1, y0, z0),
                            Vector3::new(x1, y0, z1),
                            Vector3::new(x0, y0, z1),
                        );
                    }
                    if !grid.filled(x, y + 1, z) {
                        push_quad(
                            &mut mesh,
                            Vector3::new(0.0, 1.0, 0.0),
                            Vector3::new(x0, y1, z0),
                            Vector3::new(x0, y1, z1),
                            Vector3::new(x1, y1, z1),
                            Vector3::new(x1, y1, z0),
                        );
                    }
                    if z == 0 || !grid.filled(x, y, z - 1) {
                        push_quad(
                            &mut mesh,
                            Vector3::new(0.0, 0.0, -1.0),
                            Vector3::new(x0, y0, z0),
                            Vector3::new(x0, y1, z0),
                            Vector3::new(x1, y1, z0),
                            Vector3::new(x1, y0, z0),
                        );
                    }
                    if !grid.filled(x, y, z + 1) {
                        push_quad(
                            &mut mesh,
                            Vector3::new(0.0, 0.0, 1.0),
                            Vector3::new(x0, y0, z1),
                            Vector3::new(x1, y0, z1),
                            Vector3::new(x1, y1, z1),
                            Vector3::new(x0, y1, z1),
                        );
                    }
                }
            }
            progress(MeshProgress {
                stage: MeshStage::Cubes,
                completed: x + 1,
                total: grid.width(),
            });
        }

        mesh
    }
}

/// Emit a quad as two triangles sharing the a-c diagonal, with the given
/// outward normal. Corners a, b, c, d wind counter-clockwise seen from
/// outside.
fn push_quad(
    mesh: &mut Mesh,
    normal: Vector3<f32>,
    a: Vector3<f32>,
    b: Vector3<f32>,
    c: Vector3<f32>,
    d: Vector3<f32>,
) {
    mesh.push(Triangle::with_normal(normal, a, b, c));
    mesh.push(Triangle::with_normal(normal, a, c, d));
}
