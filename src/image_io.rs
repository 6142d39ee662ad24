//! Image file loading and saving
//!
//! Thin wrapper over the `image` codec crate: decode whatever the codec
//! recognizes (PNG, JPEG, GIF, BMP, ...) into [`ImageRgb24`], and encode
//! by file extension on save.

use crate::{ColorRgb24, Error, ImageRgb24, Result};
use std::path::Path;

/// Load an image file into an RGB raster.
///
/// Alpha and palette formats are flattened to 8-bit RGB.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<ImageRgb24> {
    let path = path.as_ref();
    let decoded = image::open(path)
        .map_err(|e| Error::FileLoad(format!("Unable to read {}: {}", path.display(), e)))?
        .to_rgb8();

    let (width, height) = decoded.dimensions();
    let mut result = ImageRgb24::new(width as usize, height as usize);
    for (x, y, pixel) in decoded.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        result.set_pixel(x as usize, y as usize, ColorRgb24::new(r, g, b));
    }

    Ok(result)
}

/// Save an RGB raster to a file; the format follows the extension
/// (e.g. `.png`, `.jpg`).
pub fn save_image<P: AsRef<Path>>(image: &ImageRgb24, path: P) -> Result<()> {
    let path = path.as_ref();

    let mut raw = Vec::with_capacity(image.width() * image.height() * 3);
    for pixel in image.pixels() {
        raw.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
    }

    let buffer = image::RgbImage::from_raw(image.width() as u32, image.height() as u32, raw)
        .ok_or_else(|| {
            Error::OperationFailed("Image dimensions do not match pixel buffer".to_string())
        })?;

    buffer
        .save(path)
        .map_err(|e| Error::FileSave(format!("Unable to write {}: {}", path.display(), e)))
}
