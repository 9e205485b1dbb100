//! High-level pixel operations.
//!
//! These functions combine a [`CropPlan`] with actual pixel work: crop the
//! visible source region, resample it to the target box with Lanczos3, and
//! composite onto a fresh destination buffer.

use super::calculations::CropPlan;
use super::format::MimeFormat;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage, RgbImage};
use tracing::debug;

/// Backdrop for alpha-capable thumbnails: white at zero opacity.
const TRANSPARENT: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Render a crop-to-fill thumbnail of exactly `plan.target_width × plan.target_height`.
///
/// PNG and GIF sources get a transparent RGBA destination and the resampled
/// pixels replace it outright, so source alpha survives unblended. JPEG
/// sources get an opaque RGB destination.
pub fn render_crop_to_fill(
    source: &DynamicImage,
    plan: &CropPlan,
    format: MimeFormat,
) -> DynamicImage {
    let (width, height) = (plan.target_width, plan.target_height);
    let region = plan.source_region((source.width(), source.height()));
    debug!(?region, width, height, "resampling source region");

    let resampled = source
        .crop_imm(region.x, region.y, region.width, region.height)
        .resize_exact(width, height, FilterType::Lanczos3);

    if format.keeps_alpha() {
        let mut canvas = RgbaImage::from_pixel(width, height, TRANSPARENT);
        imageops::replace(&mut canvas, &resampled.to_rgba8(), 0, 0);
        DynamicImage::ImageRgba8(canvas)
    } else {
        let mut canvas = RgbImage::new(width, height);
        imageops::replace(&mut canvas, &resampled.to_rgb8(), 0, 0);
        DynamicImage::ImageRgb8(canvas)
    }
}
