//! # reliefmesh
//!
//! Convert a 2D raster image into a printable 3D relief solid: each
//! pixel's brightness becomes a column height, the height field is
//! voxelized, and a watertight triangle mesh bounding only the exposed
//! surfaces is written as a binary STL file.
//!
//! ## Pipeline
//!
//! - [`ImageRgb24`] holds the input raster (decode files via
//!   [`image_io::load_image`])
//! - [`VoxelGrid::from_image`] quantizes brightness into a boolean
//!   occupancy grid
//! - a [`MeshGenerator`] ([`HeightFieldMesher`] or [`VoxelCubeMesher`])
//!   emits the exposed surface as a [`Mesh`]
//! - [`Mesh::save_stl`] serializes the standard 50-bytes-per-triangle
//!   binary layout
//! - [`export_stl`] wires the whole pipeline together from physical
//!   target dimensions
//!
//! ## Example
//!
//! ```rust,no_run
//! use reliefmesh::{export_stl, ExportOptions, ImageRgb24};
//!
//! let image = ImageRgb24::new(64, 64);
//! let options = ExportOptions::for_image(&image);
//! let report = export_stl(&image, &options, "relief.stl")?;
//! println!("{} triangles", report.triangle_count);
//! # Ok::<(), reliefmesh::Error>(())
//! ```

pub mod error;
pub mod export;
pub mod filters;
pub mod heightfield;
pub mod image;
pub mod image_io;
pub mod log;
pub mod mesh;
pub mod meshgen;
pub mod types;
pub mod utils;
pub mod vector_ext;
pub mod voxels;

/// Convenience imports for common traits/extensions.
pub mod prelude {
    pub use crate::{MeshGenerator, Vector3Ext};
}

// Re-exports
pub use error::{Error, Result};
pub use export::{
    export_stl, export_stl_background, export_stl_logged, export_stl_with_progress,
    ExportOptions, ExportReport, MeshStrategy, DEFAULT_THICKNESS_MM, MAX_SCALE_PERCENT,
    MIN_SCALE_PERCENT,
};
pub use heightfield::HeightField;
pub use crate::image::ImageRgb24;
pub use log::LogFile;
pub use mesh::Mesh;
pub use meshgen::{HeightFieldMesher, MeshGenerator, MeshProgress, MeshStage, VoxelCubeMesher};
pub use types::{BBox3, ColorRgb24, Triangle};
pub use utils::{TempFolder, Utils};
pub use vector_ext::Vector3Ext;
pub use voxels::{VoxelGrid, DEPTH_RESOLUTION};
