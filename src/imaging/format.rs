//! The three raster formats this crate reads and writes.
//!
//! Detection is content-based: the codec sniffs the file's magic bytes and
//! reports a mime string, which [`MimeFormat::from_mime`] maps onto a format.
//! Anything that is not GIF or PNG is handled as JPEG. That fallback is kept on
//! purpose so a mislabelled file goes through the JPEG decoder and fails there
//! with a decode error instead of being accepted under some other format.

use serde::Serialize;
use tracing::warn;

/// Detected encoding of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MimeFormat {
    Jpeg,
    Png,
    Gif,
}

impl MimeFormat {
    /// Map a detected mime string onto a format, defaulting to JPEG.
    pub fn from_mime(mime: &str) -> Self {
        match mime {
            "image/gif" => Self::Gif,
            "image/png" => Self::Png,
            "image/jpeg" => Self::Jpeg,
            other => {
                warn!(mime = other, "unexpected mime type, treating as JPEG");
                Self::Jpeg
            }
        }
    }

    /// Mime type used for the `Content-Type` header.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }

    /// Whether thumbnails keep an alpha channel (transparent backdrop).
    pub fn keeps_alpha(self) -> bool {
        matches!(self, Self::Png | Self::Gif)
    }

    /// The `image` crate format whose decoder/encoder handles this variant.
    pub fn codec_format(self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
            Self::Gif => image::ImageFormat::Gif,
        }
    }
}

impl std::fmt::Display for MimeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mime_type())
    }
}
