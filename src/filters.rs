//! Per-pixel image filters: posterize, monochrome, resize

use crate::{ColorRgb24, Error, ImageRgb24, Result};

/// Posterize to four levels per channel: 0, 85, 170, 255.
pub fn posterize(source: &ImageRgb24) -> ImageRgb24 {
    map_pixels(source, |p| {
        ColorRgb24::new(
            posterize_channel(p.r),
            posterize_channel(p.g),
            posterize_channel(p.b),
        )
    })
}

fn posterize_channel(value: u8) -> u8 {
    match value {
        0..=42 => 0,
        43..=127 => 85,
        128..=212 => 170,
        _ => 255,
    }
}

/// Convert to monochrome by averaging the RGB channels.
pub fn monochrome(source: &ImageRgb24) -> ImageRgb24 {
    map_pixels(source, |p| ColorRgb24::gray(p.brightness()))
}

fn map_pixels(source: &ImageRgb24, f: impl Fn(ColorRgb24) -> ColorRgb24) -> ImageRgb24 {
    let mut result = ImageRgb24::new(source.width(), source.height());
    for y in 0..source.height() {
        for x in 0..source.width() {
            result.set_pixel(x, y, f(source.pixel(x, y)));
        }
    }
    result
}

/// Resize to new dimensions.
///
/// Upscaling uses bilinear interpolation; downscaling uses area averaging
/// (box filter), which keeps thin features from aliasing away.
pub fn resize(source: &ImageRgb24, new_width: usize, new_height: usize) -> Result<ImageRgb24> {
    if source.is_empty() {
        return Err(Error::InvalidParameter(
            "cannot resize an empty image".to_string(),
        ));
    }
    if new_width == 0 || new_height == 0 {
        return Err(Error::InvalidParameter(format!(
            "target dimensions must be positive, got {}x{}",
            new_width, new_height
        )));
    }

    let upscaling = new_width > source.width() || new_height > source.height();
    let result = if upscaling {
        resize_bilinear(source, new_width, new_height)
    } else {
        resize_area_average(source, new_width, new_height)
    };
    Ok(result)
}

fn resize_bilinear(source: &ImageRgb24, new_width: usize, new_height: usize) -> ImageRgb24 {
    let src_width = source.width();
    let src_height = source.height();
    let mut result = ImageRgb24::new(new_width, new_height);

    for y in 0..new_height {
        for x in 0..new_width {
            // Map the destination pixel center back into source
            // coordinates; min before max so 1-pixel sources land on 0
            let src_x = ((x as f64 + 0.5) * src_width as f64 / new_width as f64 - 0.5)
                .min(src_width as f64 - 1.001)
                .max(0.0);
            let src_y = ((y as f64 + 0.5) * src_height as f64 / new_height as f64 - 0.5)
                .min(src_height as f64 - 1.001)
                .max(0.0);

            let x0 = src_x.floor() as usize;
            let y0 = src_y.floor() as usize;
            let x1 = (x0 + 1).min(src_width - 1);
            let y1 = (y0 + 1).min(src_height - 1);

            let wx = src_x - x0 as f64;
            let wy = src_y - y0 as f64;

            let p00 = source.pixel(x0, y0);
            let p10 = source.pixel(x1, y0);
            let p01 = source.pixel(x0, y1);
            let p11 = source.pixel(x1, y1);

            let lerp2 = |c00: u8, c10: u8, c01: u8, c11: u8| -> u8 {
                let top = c00 as f64 * (1.0 - wx) + c10 as f64 * wx;
                let bottom = c01 as f64 * (1.0 - wx) + c11 as f64 * wx;
                (top * (1.0 - wy) + bottom * wy).round() as u8
            };

            result.set_pixel(
                x,
                y,
                ColorRgb24::new(
                    lerp2(p00.r, p10.r, p01.r, p11.r),
                    lerp2(p00.g, p10.g, p01.g, p11.g),
                    lerp2(p00.b, p10.b, p01.b, p11.b),
                ),
            );
        }
    }
    result
}

fn resize_area_average(source: &ImageRgb24, new_width: usize, new_height: usize) -> ImageRgb24 {
    let src_width = source.width();
    let src_height = source.height();
    let x_ratio = src_width as f64 / new_width as f64;
    let y_ratio = src_height as f64 / new_height as f64;
    let mut result = ImageRgb24::new(new_width, new_height);

    for dest_y in 0..new_height {
        for dest_x in 0..new_width {
            // Source region covered by this destination pixel
            let src_x0 = dest_x as f64 * x_ratio;
            let src_y0 = dest_y as f64 * y_ratio;
            let src_x1 = (dest_x + 1) as f64 * x_ratio;
            let src_y1 = (dest_y + 1) as f64 * y_ratio;

            let x0 = (src_x0.floor() as usize).min(src_width);
            let y0 = (src_y0.floor() as usize).min(src_height);
            let x1 = (src_x1.ceil() as usize).min(src_width);
            let y1 = (src_y1.ceil() as usize).min(src_height);

            let mut sum = [0.0f64; 3];
            let mut total_weight = 0.0f64;

            for sy in y0..y1 {
                for sx in x0..x1 {
                    let x_overlap = src_x1.min(sx as f64 + 1.0) - src_x0.max(sx as f64);
                    let y_overlap = src_y1.min(sy as f64 + 1.0) - src_y0.max(sy as f64);
                    let weight = x_overlap * y_overlap;

                    let p = source.pixel(sx, sy);
                    sum[0] += p.r as f64 * weight;
                    sum[1] += p.g as f64 * weight;
                    sum[2] += p.b as f64 * weight;
                    total_weight += weight;
                }
            }

            let channel = |s: f64| (s / total_weight).round().clamp(0.0, 255.0) as u8;
            result.set_pixel(
                dest_x,
                dest_y,
                ColorRgb24::new(channel(sum[0]), channel(sum[1]), channel(sum[2])),
            );
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posterize_levels() {
        assert_eq!(posterize_channel(0), 0);
        assert_eq!(posterize_channel(42), 0);
        assert_eq!(posterize_channel(43), 85);
        assert_eq!(posterize_channel(127), 85);
        assert_eq!(posterize_channel(128), 170);
        assert_eq!(posterize_channel(212), 170);
        assert_eq!(posterize_channel(213), 255);
        assert_eq!(posterize_channel(255), 255);
    }

    #[test]
    fn test_monochrome_averages_channels() {
        let mut img = ImageRgb24::new(1, 1);
        img.set_pixel(0, 0, ColorRgb24::new(10, 20, 31));
        let mono = monochrome(&img);
        assert_eq!(mono.pixel(0, 0), ColorRgb24::gray(20));
    }

    #[test]
    fn test_resize_identity_dimensions() {
        let mut img = ImageRgb24::new(3, 3);
        img.set_pixel(1, 1, ColorRgb24::new(200, 100, 50));
        let resized = resize(&img, 3, 3).unwrap();
        assert_eq!(resized.pixel(1, 1), ColorRgb24::new(200, 100, 50));
    }

    #[test]
    fn test_downscale_uniform_image_stays_uniform() {
        let img = ImageRgb24::filled(8, 8, ColorRgb24::gray(77));
        let resized = resize(&img, 2, 2).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(resized.pixel(x, y), ColorRgb24::gray(77));
            }
        }
    }

    #[test]
    fn test_upscale_uniform_image_stays_uniform() {
        let img = ImageRgb24::filled(2, 2, ColorRgb24::gray(130));
        let resized = resize(&img, 7, 5).unwrap();
        for y in 0..5 {
            for x in 0..7 {
                assert_eq!(resized.pixel(x, y), ColorRgb24::gray(130));
            }
        }
    }

    #[test]
    fn test_resize_rejects_zero_target() {
        let img = ImageRgb24::new(4, 4);
        assert!(resize(&img, 0, 4).is_err());
    }
}
