//! Shared test utilities: fixture images written into temp directories.
//!
//! Fixtures are generated rather than checked in so every test gets exact,
//! known dimensions and pixel content.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Gradient JPEG of the given size.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
    .save_with_format(path, image::ImageFormat::Jpeg)
    .unwrap();
}

/// RGBA PNG: opaque blue center, fully transparent 2px border.
pub fn write_png_with_transparent_border(path: &Path, width: u32, height: u32) {
    transparent_border(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// GIF with the same layout as [`write_png_with_transparent_border`].
pub fn write_gif(path: &Path, width: u32, height: u32) {
    transparent_border(width, height)
        .save_with_format(path, image::ImageFormat::Gif)
        .unwrap();
}

fn transparent_border(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if x < 2 || y < 2 || x + 2 >= width || y + 2 >= height {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([0, 0, 255, 255])
        }
    })
}
