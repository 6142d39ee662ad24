//! Convert an image file into a relief STL from the command line.
//!
//! Run with: cargo run --example image_to_stl -- input.png output.stl

use reliefmesh::{export_stl_logged, filters, image_io, ExportOptions, LogFile};
use std::env;
use std::process;

fn main() -> reliefmesh::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: image_to_stl <input image> <output.stl>");
        process::exit(2);
    }

    let image = image_io::load_image(&args[1])?;
    println!("Loaded {} ({} x {})", args[1], image.width(), image.height());

    // Brightness is all that matters for the relief, so flatten to gray
    let image = filters::monochrome(&image);

    let log_path = format!("{}.log", args[2].trim_end_matches(".stl"));
    let log = LogFile::new(Some(&log_path), true)?;

    let options = ExportOptions::for_image(&image);
    let report = export_stl_logged(&image, &options, &args[2], &log)?;

    println!(
        "Done: {} triangles -> {}",
        report.triangle_count,
        report.path.display()
    );
    Ok(())
}
