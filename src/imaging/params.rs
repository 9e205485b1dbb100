//! Parameter types for image operations.
//!
//! These describe *what* to encode, not *how*. [`EncodeSettings`] is the
//! interface between the emitter (which picks settings from the source format
//! and a [`Quality`]) and the [`Codec`](super::backend::Codec) that writes the
//! bytes, so a mock codec can check the chosen settings without encoding.
//!
//! ## Types
//!
//! - [`Quality`]: caller-facing quality knob (0–100, integer or real). Rejected, never clamped.
//! - [`EncodeSettings`]: per-format encoder settings derived from a quality.

use super::calculations::{jpeg_quality, png_compression_level};
use super::format::MimeFormat;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("image quality must be a number from 0 to 100, got {0}")]
pub struct InvalidQuality(pub String);

/// Output quality in `[0, 100]`.
///
/// Meaning depends on the source format: JPEG quality, PNG compression level
/// (rescaled to 0–9), ignored for GIF.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Quality(f64);

impl Quality {
    pub fn new(value: f64) -> Result<Self, InvalidQuality> {
        if value.is_finite() && (0.0..=100.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidQuality(value.to_string()))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(100.0)
    }
}

impl TryFrom<f64> for Quality {
    type Error = InvalidQuality;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Quality {
    type Error = InvalidQuality;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=100).contains(&value) {
            Ok(Self(value as f64))
        } else {
            Err(InvalidQuality(value.to_string()))
        }
    }
}

impl FromStr for Quality {
    type Err = InvalidQuality;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| InvalidQuality(s.to_string()))?;
        Self::new(value).map_err(|_| InvalidQuality(s.to_string()))
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encoder settings for one emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeSettings {
    /// Lossless GIF; quality has no effect.
    Gif,
    /// PNG with a zlib compression level in `0..=9`.
    Png { compression: u8 },
    /// JPEG with the encoder's native quality in `1..=100`.
    Jpeg { quality: u8 },
}

impl EncodeSettings {
    /// Pick settings for the given source format.
    pub fn for_format(format: MimeFormat, quality: Quality) -> Self {
        match format {
            MimeFormat::Gif => Self::Gif,
            MimeFormat::Png => Self::Png {
                compression: png_compression_level(quality.value()),
            },
            MimeFormat::Jpeg => Self::Jpeg {
                quality: jpeg_quality(quality.value()),
            },
        }
    }
}
