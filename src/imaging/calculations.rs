//! Pure calculation functions for crop-to-fill and quality mapping.
//!
//! All functions here are pure and testable without any I/O or images.

use thiserror::Error;

/// A zero width or height was given where an aspect ratio is needed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("image dimensions must be non-zero, got {width}x{height}")]
pub struct DegenerateDimension {
    pub width: u32,
    pub height: u32,
}

/// Where a crop-to-fill resize reads from the source.
///
/// `scale` maps source pixels to destination pixels. `size_w`/`size_h` are the
/// full source dimensions after scaling (one matches the target, the other
/// overflows it). `pos_x`/`pos_y` are the crop offsets in *source* pixels that
/// center the overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropPlan {
    pub target_width: u32,
    pub target_height: u32,
    pub scale: f64,
    pub size_w: f64,
    pub size_h: f64,
    pub pos_x: f64,
    pub pos_y: f64,
}

/// Integer source rectangle to crop before resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Plan a crop-to-fill ("cover") resize of `source` into `target`.
///
/// The result always fills the target box exactly: the binding dimension is
/// scaled to fit and the other one is cropped symmetrically.
///
/// # Examples
/// ```
/// # use cropfill::imaging::plan_crop_to_fill;
/// // 800x600 into 100x100: height binds, 100px trimmed from each side
/// let plan = plan_crop_to_fill((800, 600), (100, 100)).unwrap();
/// assert_eq!(plan.pos_x.round(), 100.0);
/// assert_eq!(plan.pos_y, 0.0);
/// ```
pub fn plan_crop_to_fill(
    source: (u32, u32),
    target: (u32, u32),
) -> Result<CropPlan, DegenerateDimension> {
    let (src_w, src_h) = source;
    let (new_w, new_h) = target;

    if src_w == 0 || src_h == 0 {
        return Err(DegenerateDimension {
            width: src_w,
            height: src_h,
        });
    }
    if new_w == 0 || new_h == 0 {
        return Err(DegenerateDimension {
            width: new_w,
            height: new_h,
        });
    }

    let (src_wf, src_hf) = (src_w as f64, src_h as f64);
    let (new_wf, new_hf) = (new_w as f64, new_h as f64);

    let src_aspect = src_wf / src_hf;
    let target_aspect = new_wf / new_hf;

    let (scale, size_w, size_h, pos_x, pos_y) = if src_aspect < target_aspect {
        // Source is taller: width binds, crop top and bottom
        let scale = new_wf / src_wf;
        let pos_y = (src_hf * scale - new_hf) / scale / 2.0;
        (scale, new_wf, new_wf / src_aspect, 0.0, pos_y)
    } else if src_aspect > target_aspect {
        // Source is wider: height binds, crop left and right
        let scale = new_hf / src_hf;
        let pos_x = (src_wf * scale - new_wf) / scale / 2.0;
        (scale, new_hf * src_aspect, new_hf, pos_x, 0.0)
    } else {
        (new_wf / src_wf, new_wf, new_hf, 0.0, 0.0)
    };

    Ok(CropPlan {
        target_width: new_w,
        target_height: new_h,
        scale,
        size_w: size_w.max(1.0),
        size_h: size_h.max(1.0),
        pos_x,
        pos_y,
    })
}

impl CropPlan {
    /// Whether any part of the source is cut away.
    pub fn crops(&self) -> bool {
        self.pos_x > 0.0 || self.pos_y > 0.0
    }

    /// The visible source rectangle, rounded to whole pixels and clipped to
    /// the source bounds. Never empty.
    pub fn source_region(&self, source: (u32, u32)) -> SourceRegion {
        let (src_w, src_h) = source;
        let visible_w = self.size_w.min(self.target_width as f64) / self.scale;
        let visible_h = self.size_h.min(self.target_height as f64) / self.scale;

        let x = (self.pos_x.round() as u32).min(src_w.saturating_sub(1));
        let y = (self.pos_y.round() as u32).min(src_h.saturating_sub(1));
        let width = (visible_w.round() as u32).clamp(1, src_w - x);
        let height = (visible_h.round() as u32).clamp(1, src_h - y);

        SourceRegion {
            x,
            y,
            width,
            height,
        }
    }
}

/// Rescale a `[0, 100]` quality onto PNG's `0..=9` compression levels.
///
/// Rounds half away from zero, so 50 maps to 5.
pub fn png_compression_level(quality: f64) -> u8 {
    ((quality / 100.0) * 9.0).round().clamp(0.0, 9.0) as u8
}

/// JPEG quality passed through as an integer.
///
/// Fractions are truncated; 0 is raised to 1, the encoder's lowest setting.
pub fn jpeg_quality(quality: f64) -> u8 {
    (quality.trunc().clamp(0.0, 100.0) as u8).max(1)
}
