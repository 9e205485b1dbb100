//! Codec trait and shared error type.
//!
//! The [`Codec`] trait defines the three operations the thumbnail pipeline
//! needs from an image library: sniff the mime type, decode with the decoder
//! for a given format, and encode a buffer with given settings.
//!
//! The production implementation is
//! [`RustCodec`](super::rust_backend::RustCodec), built on the `image` crate.
//! Pixel work (crop, resample, backdrop) lives in
//! [`operations`](super::operations), not in the codec.

use super::format::MimeFormat;
use super::params::EncodeSettings;
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Decode/encode collaborator for the thumbnail pipeline.
pub trait Codec {
    /// Detect the mime type from file content.
    ///
    /// Unrecognised content is reported as `application/octet-stream`.
    fn detect_mime(&self, path: &Path) -> Result<String, CodecError>;

    /// Decode the file with the decoder for `format`.
    fn decode(&self, path: &Path, format: MimeFormat) -> Result<DynamicImage, CodecError>;

    /// Encode a buffer into bytes.
    fn encode(&self, image: &DynamicImage, settings: EncodeSettings)
    -> Result<Vec<u8>, CodecError>;
}
