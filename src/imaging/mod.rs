//! Image processing in pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Validate** | extension allow-list + `std::fs` checks |
//! | **Detect** | `ImageReader::with_guessed_format` (magic bytes) |
//! | **Crop-to-fill** | [`plan_crop_to_fill`] + `crop_imm` / `resize_exact` (Lanczos3) |
//! | **Encode** | JPEG / PNG / GIF encoders from `image::codecs` |
//!
//! The module is split into:
//! - **Validate**: the input gate ([`validate_source`])
//! - **Format**: [`MimeFormat`] and its JPEG fallback rule
//! - **Calculations**: Pure functions for crop geometry and quality mapping (unit testable)
//! - **Parameters**: [`Quality`] and [`EncodeSettings`]
//! - **Backend**: [`Codec`] trait + [`RustCodec`]
//! - **Operations**: Pixel compositing driven by a [`CropPlan`]

pub mod backend;
mod calculations;
mod format;
pub mod operations;
mod params;
pub mod rust_backend;
pub mod validate;

pub use backend::{Codec, CodecError};
pub use calculations::{
    CropPlan, DegenerateDimension, SourceRegion, jpeg_quality, plan_crop_to_fill,
    png_compression_level,
};
pub use format::MimeFormat;
pub use operations::render_crop_to_fill;
pub use params::{EncodeSettings, InvalidQuality, Quality};
pub use rust_backend::RustCodec;
pub use validate::{ALLOWED_EXTENSIONS, ValidationError, validate_source};
