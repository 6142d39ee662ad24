//! STL export orchestration: image -> voxels -> mesh -> file

use crate::{
    Error, HeightFieldMesher, ImageRgb24, LogFile, MeshGenerator, MeshProgress, Result,
    VoxelCubeMesher, VoxelGrid, DEPTH_RESOLUTION,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Smallest accepted scale percentage.
pub const MIN_SCALE_PERCENT: f64 = 1.0;
/// Largest accepted scale percentage.
pub const MAX_SCALE_PERCENT: f64 = 300.0;

/// Default model thickness in millimeters (the maximum RGB brightness,
/// so one brightness step maps to about one millimeter before scaling).
pub const DEFAULT_THICKNESS_MM: f64 = 255.0;

/// Which mesh generation strategy the exporter runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeshStrategy {
    /// Quad meshing over the derived height field (preferred)
    #[default]
    HeightField,
    /// Exposed-face culling over the raw voxel cubes
    VoxelCubes,
}

impl MeshStrategy {
    /// The generator implementing this strategy.
    pub fn generator(&self) -> Box<dyn MeshGenerator> {
        match self {
            MeshStrategy::HeightField => Box::new(HeightFieldMesher),
            MeshStrategy::VoxelCubes => Box::new(VoxelCubeMesher::default()),
        }
    }
}

/// Target physical dimensions and mapping flags for one export.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportOptions {
    pub width_mm: f64,
    pub height_mm: f64,
    pub thickness_mm: f64,
    /// Multiplicative percentage applied to all three dimensions, 1-300.
    pub scale_percent: f64,
    /// False (default): darker pixels are taller. True: brighter pixels
    /// are taller.
    pub invert_heights: bool,
    /// False (default): the model is mirrored left-right to match the
    /// physical print orientation. True disables the mirror.
    pub flip_left_right: bool,
    pub strategy: MeshStrategy,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            width_mm: 100.0,
            height_mm: 100.0,
            thickness_mm: 100.0,
            scale_percent: 100.0,
            invert_heights: false,
            flip_left_right: false,
            strategy: MeshStrategy::default(),
        }
    }
}

impl ExportOptions {
    /// Options pre-populated from the image: one millimeter per pixel,
    /// with the default thickness.
    pub fn for_image(image: &ImageRgb24) -> Self {
        Self {
            width_mm: image.width() as f64,
            height_mm: image.height() as f64,
            thickness_mm: DEFAULT_THICKNESS_MM,
            ..Self::default()
        }
    }

    /// Reject out-of-range dimensions before any computation starts.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width_mm", self.width_mm),
            ("height_mm", self.height_mm),
            ("thickness_mm", self.thickness_mm),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if !self.scale_percent.is_finite()
            || self.scale_percent < MIN_SCALE_PERCENT
            || self.scale_percent > MAX_SCALE_PERCENT
        {
            return Err(Error::InvalidParameter(format!(
                "scale_percent must be between {} and {}, got {}",
                MIN_SCALE_PERCENT, MAX_SCALE_PERCENT, self.scale_percent
            )));
        }

        Ok(())
    }

    /// Final dimensions after applying the scale percentage.
    pub fn scaled_dimensions(&self) -> (f64, f64, f64) {
        let factor = self.scale_percent / 100.0;
        (
            self.width_mm * factor,
            self.height_mm * factor,
            self.thickness_mm * factor,
        )
    }
}

/// Summary of a completed export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Path actually written, with the `.stl` extension applied.
    pub path: PathBuf,
    pub triangle_count: usize,
    /// Uniform voxel edge length used for the model.
    pub voxel_size_mm: f32,
    pub width_mm: f64,
    pub height_mm: f64,
    pub thickness_mm: f64,
    pub elapsed: Duration,
}

/// Run the full pipeline and write a binary STL file.
///
/// # Example
///
/// ```rust,no_run
/// use reliefmesh::{export_stl, ExportOptions, ImageRgb24};
///
/// let image = ImageRgb24::new(64, 64);
/// let options = ExportOptions::for_image(&image);
/// let report = export_stl(&image, &options, "relief.stl")?;
/// println!("{} triangles -> {}", report.triangle_count, report.path.display());
/// # Ok::<(), reliefmesh::Error>(())
/// ```
pub fn export_stl<P: AsRef<Path>>(
    image: &ImageRgb24,
    options: &ExportOptions,
    path: P,
) -> Result<ExportReport> {
    run(image, options, path.as_ref(), &mut |_| {}, None)
}

/// Like [`export_stl`], reporting mesh generation progress.
pub fn export_stl_with_progress<P: AsRef<Path>>(
    image: &ImageRgb24,
    options: &ExportOptions,
    path: P,
    progress: &mut dyn FnMut(MeshProgress),
) -> Result<ExportReport> {
    run(image, options, path.as_ref(), progress, None)
}

/// Like [`export_stl`], recording pipeline stages to a log file.
pub fn export_stl_logged<P: AsRef<Path>>(
    image: &ImageRgb24,
    options: &ExportOptions,
    path: P,
    log: &LogFile,
) -> Result<ExportReport> {
    run(image, options, path.as_ref(), &mut |_| {}, Some(log))
}

/// Run the pipeline on a background thread.
///
/// The export is computationally heavy for large images, so interactive
/// callers should keep it off their event thread. The result arrives
/// through the returned one-shot channel; there is no cancellation, the
/// operation runs to completion or fails outright.
pub fn export_stl_background(
    image: ImageRgb24,
    options: ExportOptions,
    path: PathBuf,
) -> mpsc::Receiver<Result<ExportReport>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(export_stl(&image, &options, &path));
    });
    rx
}

fn run(
    image: &ImageRgb24,
    options: &ExportOptions,
    path: &Path,
    progress: &mut dyn FnMut(MeshProgress),
    log: Option<&LogFile>,
) -> Result<ExportReport> {
    options.validate()?;

    let started = Instant::now();
    let (width_mm, height_mm, thickness_mm) = options.scaled_dimensions();
    let path = ensure_stl_extension(path);

    if let Some(log) = log {
        let _ = log.log("Starting STL export");
        let _ = log.log(format!(
            "Image size: {} x {} pixels",
            image.width(),
            image.height()
        ));
        let _ = log.log(format!(
            "Final dimensions: {:.2} x {:.2} x {:.2} mm (scale {}%)",
            width_mm, height_mm, thickness_mm, options.scale_percent
        ));
        let _ = log.log(format!(
            "Height mapping: {}",
            if options.invert_heights {
                "white = highest"
            } else {
                "black = highest (default)"
            }
        ));
    }

    let grid = VoxelGrid::from_image(
        image,
        options.invert_heights,
        options.flip_left_right,
        DEPTH_RESOLUTION,
    );

    let voxel_size = voxel_edge_length(&grid, width_mm, height_mm, thickness_mm);
    if let Some(log) = log {
        let _ = log.log(format!(
            "Voxel grid: {} x {} x {}, {} cells filled",
            grid.width(),
            grid.height(),
            grid.depth(),
            grid.fill_count()
        ));
        let _ = log.log(format!("Voxel size: {} mm (uniform cubes)", voxel_size));
    }

    let mesh = options
        .strategy
        .generator()
        .generate_with_progress(&grid, voxel_size, progress);

    mesh.save_stl(&path)?;

    let report = ExportReport {
        path,
        triangle_count: mesh.triangle_count(),
        voxel_size_mm: voxel_size,
        width_mm,
        height_mm,
        thickness_mm,
        elapsed: started.elapsed(),
    };

    if let Some(log) = log {
        let _ = log.log(format!(
            "Wrote {} triangles to {} in {:.2} s",
            report.triangle_count,
            report.path.display(),
            report.elapsed.as_secs_f64()
        ));
    }

    Ok(report)
}

/// Uniform voxel edge length: the per-axis physical extent divided by the
/// grid extent, minimized over the three axes. The model therefore stays
/// cubic-voxeled and fits inside the nominal box, slightly undershooting
/// the two non-limiting axes.
fn voxel_edge_length(grid: &VoxelGrid, width_mm: f64, height_mm: f64, thickness_mm: f64) -> f32 {
    let per_axis = |physical: f64, cells: usize| {
        if cells == 0 {
            f64::INFINITY
        } else {
            physical / cells as f64
        }
    };

    let x = per_axis(width_mm, grid.width());
    let y = per_axis(height_mm, grid.height());
    let z = per_axis(thickness_mm, grid.depth());

    x.min(y).min(z) as f32
}

fn ensure_stl_extension(path: &Path) -> PathBuf {
    match path.extension().and_then(OsStr::to_str) {
        Some(ext) if ext.eq_ignore_ascii_case("stl") => path.to_path_buf(),
        _ => {
            let mut os = path.as_os_str().to_os_string();
            os.push(".stl");
            PathBuf::from(os)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_non_positive_dimensions() {
        let mut options = ExportOptions::default();
        options.thickness_mm = 0.0;
        assert!(options.validate().is_err());

        options.thickness_mm = -3.0;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_scale_out_of_range() {
        let mut options = ExportOptions::default();
        options.scale_percent = 0.5;
        assert!(options.validate().is_err());

        options.scale_percent = 301.0;
        assert!(options.validate().is_err());

        options.scale_percent = 300.0;
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_scale_identity_at_100_percent() {
        let options = ExportOptions {
            width_mm: 120.0,
            height_mm: 80.0,
            thickness_mm: 40.0,
            ..ExportOptions::default()
        };
        assert_eq!(options.scaled_dimensions(), (120.0, 80.0, 40.0));
    }

    #[test]
    fn test_scale_applies_to_all_axes() {
        let options = ExportOptions {
            width_mm: 100.0,
            height_mm: 100.0,
            thickness_mm: 50.0,
            scale_percent: 50.0,
            ..ExportOptions::default()
        };
        assert_eq!(options.scaled_dimensions(), (50.0, 50.0, 25.0));
    }

    #[test]
    fn test_voxel_edge_length_takes_minimum_axis() {
        let grid = VoxelGrid::new(100, 50, 64);
        // 1.0 per x cell, 2.0 per y cell, 4.0 per z cell
        let size = voxel_edge_length(&grid, 100.0, 100.0, 256.0);
        assert_eq!(size, 1.0);
    }

    #[test]
    fn test_for_image_defaults() {
        let image = ImageRgb24::new(30, 20);
        let options = ExportOptions::for_image(&image);
        assert_eq!(options.width_mm, 30.0);
        assert_eq!(options.height_mm, 20.0);
        assert_eq!(options.thickness_mm, DEFAULT_THICKNESS_MM);
        assert_eq!(options.scale_percent, 100.0);
    }

    #[test]
    fn test_stl_extension_is_appended() {
        assert_eq!(
            ensure_stl_extension(Path::new("out")),
            PathBuf::from("out.stl")
        );
        assert_eq!(
            ensure_stl_extension(Path::new("out.png")),
            PathBuf::from("out.png.stl")
        );
        assert_eq!(
            ensure_stl_extension(Path::new("out.stl")),
            PathBuf::from("out.stl")
        );
        assert_eq!(
            ensure_stl_extension(Path::new("OUT.STL")),
            PathBuf::from("OUT.STL")
        );
    }
}
