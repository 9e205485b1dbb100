//! Codec built on the `image` crate: pure Rust, statically linked.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Sniff mime | `ImageReader::with_guessed_format` + `ImageFormat::to_mime_type` |
//! | Decode (JPEG, PNG, GIF) | `ImageReader` with the format forced by [`MimeFormat`] |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (RGB8) |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (RGBA8, adaptive filter) |
//! | Encode → GIF | `image::codecs::gif::GifEncoder` (RGBA8) |

use super::backend::{Codec, CodecError};
use super::format::MimeFormat;
use super::params::EncodeSettings;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

const UNKNOWN_MIME: &str = "application/octet-stream";

/// Codec backed by the `image` crate's pure-Rust decoders and encoders.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

/// Open a reader with no format hint, so nothing is inferred from the extension.
fn open_reader(path: &Path) -> Result<ImageReader<BufReader<File>>, CodecError> {
    let file = File::open(path).map_err(CodecError::Io)?;
    Ok(ImageReader::new(BufReader::new(file)))
}

fn encode_failed(format: &str, err: image::ImageError) -> CodecError {
    CodecError::ProcessingFailed(format!("{format} encode failed: {err}"))
}

impl Codec for RustCodec {
    fn detect_mime(&self, path: &Path) -> Result<String, CodecError> {
        let reader = open_reader(path)?.with_guessed_format()?;
        let mime = reader
            .format()
            .map(|f| f.to_mime_type())
            .unwrap_or(UNKNOWN_MIME);
        debug!(path = %path.display(), mime, "detected mime type");
        Ok(mime.to_string())
    }

    fn decode(&self, path: &Path, format: MimeFormat) -> Result<DynamicImage, CodecError> {
        let mut reader = open_reader(path)?;
        reader.set_format(format.codec_format());
        reader.decode().map_err(|e| {
            CodecError::ProcessingFailed(format!(
                "Failed to decode {} as {}: {}",
                path.display(),
                format,
                e
            ))
        })
    }

    fn encode(
        &self,
        image: &DynamicImage,
        settings: EncodeSettings,
    ) -> Result<Vec<u8>, CodecError> {
        let mut buffer = Vec::new();
        match settings {
            EncodeSettings::Gif => {
                let rgba = image.to_rgba8();
                // The encoder writes the GIF trailer when dropped
                let mut encoder = GifEncoder::new(&mut buffer);
                encoder
                    .encode(
                        rgba.as_raw(),
                        rgba.width(),
                        rgba.height(),
                        ExtendedColorType::Rgba8,
                    )
                    .map_err(|e| encode_failed("GIF", e))?;
            }
            EncodeSettings::Png { compression } => {
                let compression = if compression == 0 {
                    CompressionType::Uncompressed
                } else {
                    CompressionType::Level(compression)
                };
                let rgba = image.to_rgba8();
                PngEncoder::new_with_quality(&mut buffer, compression, PngFilter::Adaptive)
                    .write_image(
                        rgba.as_raw(),
                        rgba.width(),
                        rgba.height(),
                        ExtendedColorType::Rgba8,
                    )
                    .map_err(|e| encode_failed("PNG", e))?;
            }
            EncodeSettings::Jpeg { quality } => {
                let rgb = image.to_rgb8();
                let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
                encoder
                    .encode(
                        rgb.as_raw(),
                        rgb.width(),
                        rgb.height(),
                        ExtendedColorType::Rgb8,
                    )
                    .map_err(|e| encode_failed("JPEG", e))?;
            }
        }
        debug!(?settings, bytes = buffer.len(), "encoded image");
        Ok(buffer)
    }
}
