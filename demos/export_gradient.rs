//! Export a synthetic radial gradient as a relief STL with both mesh
//! strategies.
//!
//! Run with: cargo run --example export_gradient

use reliefmesh::{export_stl, ColorRgb24, ExportOptions, ImageRgb24, MeshStrategy};

fn main() -> reliefmesh::Result<()> {
    let size = 96usize;
    let mut image = ImageRgb24::new(size, size);

    let center = (size as f64 - 1.0) / 2.0;
    for y in 0..size {
        for x in 0..size {
            let dx = x as f64 - center;
            let dy = y as f64 - center;
            let distance = (dx * dx + dy * dy).sqrt() / center;
            let value = (distance.min(1.0) * 255.0) as u8;
            image.set_pixel(x, y, ColorRgb24::gray(value));
        }
    }

    for (file, strategy) in [
        ("gradient_heightfield.stl", MeshStrategy::HeightField),
        ("gradient_cubes.stl", MeshStrategy::VoxelCubes),
    ] {
        let options = ExportOptions {
            strategy,
            ..ExportOptions::for_image(&image)
        };
        let report = export_stl(&image, &options, file)?;
        println!(
            "{}: {} triangles, voxel size {:.3} mm, {:.2} s",
            report.path.display(),
            report.triangle_count,
            report.voxel_size_mm,
            report.elapsed.as_secs_f64()
        );
    }

    Ok(())
}
