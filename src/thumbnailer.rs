//! One image, one pipeline: open → optional thumbnail → encode → release.
//!
//! A [`Thumbnailer`] owns the decoded source buffer and at most one derived
//! thumbnail buffer. Which one is emitted is tracked by [`ActiveBuffer`]:
//!
//! ```text
//! OriginalOnly(original)
//!     │ thumbnail(w, h)
//!     ▼
//! Thumbnailed { original, derived } ──thumbnail(w, h)──▶ (derived replaced)
//!     │ release()
//!     ▼
//! Released ──release()──▶ DoubleRelease error
//! ```
//!
//! Every instance is independent. A host handling many requests opens one
//! per request; nothing is shared or pooled.

use crate::emit::ResponseHeaders;
use crate::imaging::{
    Codec, CodecError, DegenerateDimension, EncodeSettings, InvalidQuality, MimeFormat, Quality,
    RustCodec, ValidationError, plan_crop_to_fill, render_crop_to_fill, validate_source,
};
use crate::metadata::SourceImage;
use image::DynamicImage;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    InvalidQuality(#[from] InvalidQuality),
    #[error(transparent)]
    DegenerateDimension(#[from] DegenerateDimension),
    #[error("image buffer already released")]
    DoubleRelease,
    #[error("image buffer has been released")]
    Released,
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ThumbnailError>;

/// The buffer(s) an instance currently holds.
#[derive(Debug, Clone)]
pub enum ActiveBuffer {
    OriginalOnly(DynamicImage),
    Thumbnailed {
        original: DynamicImage,
        derived: DynamicImage,
    },
    Released,
}

impl ActiveBuffer {
    /// The buffer eligible for emission: the thumbnail if there is one.
    pub fn active(&self) -> Option<&DynamicImage> {
        match self {
            Self::OriginalOnly(original) => Some(original),
            Self::Thumbnailed { derived, .. } => Some(derived),
            Self::Released => None,
        }
    }

    pub fn original(&self) -> Option<&DynamicImage> {
        match self {
            Self::OriginalOnly(original) | Self::Thumbnailed { original, .. } => Some(original),
            Self::Released => None,
        }
    }

    pub fn is_thumbnailed(&self) -> bool {
        matches!(self, Self::Thumbnailed { .. })
    }

    fn with_derived(self, derived: DynamicImage) -> Self {
        match self {
            Self::OriginalOnly(original) | Self::Thumbnailed { original, .. } => {
                Self::Thumbnailed { original, derived }
            }
            Self::Released => Self::Released,
        }
    }
}

/// A decoded source image plus its active buffer.
#[derive(Debug)]
pub struct Thumbnailer<C: Codec = RustCodec> {
    codec: C,
    source: SourceImage,
    buffer: ActiveBuffer,
}

impl Thumbnailer<RustCodec> {
    /// Validate and decode `path` with the default codec.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(RustCodec::new(), path)
    }
}

impl<C: Codec> Thumbnailer<C> {
    /// Validate and decode `path` with the given codec.
    ///
    /// Validation happens before the codec sees the file, so an unsupported
    /// extension never reaches a decoder.
    pub fn open_with(codec: C, path: impl AsRef<Path>) -> Result<Self> {
        let path = validate_source(path.as_ref())?;
        let mime = codec.detect_mime(path)?;
        let format = MimeFormat::from_mime(&mime);
        let original = codec.decode(path, format)?;
        let source = SourceImage::from_path(path, original.width(), original.height(), format)?;
        debug!(
            path = %path.display(),
            width = source.width,
            height = source.height,
            format = %source.format,
            "opened source image"
        );

        Ok(Self {
            codec,
            source,
            buffer: ActiveBuffer::OriginalOnly(original),
        })
    }

    /// Crop-to-fill the source into exactly `width × height`.
    ///
    /// The result becomes the active buffer. Calling this again replaces the
    /// previous thumbnail; each one is computed from the original.
    pub fn thumbnail(&mut self, width: u32, height: u32) -> Result<()> {
        let original = self.buffer.original().ok_or(ThumbnailError::Released)?;
        let plan = plan_crop_to_fill((self.source.width, self.source.height), (width, height))?;
        debug!(?plan, "planned crop-to-fill");

        let derived = render_crop_to_fill(original, &plan, self.source.format);
        let buffer = std::mem::replace(&mut self.buffer, ActiveBuffer::Released);
        self.buffer = buffer.with_derived(derived);
        Ok(())
    }

    /// Encode the active buffer in the source's format.
    pub fn encode(&self, quality: Quality) -> Result<Vec<u8>> {
        let image = self.buffer.active().ok_or(ThumbnailError::Released)?;
        let settings = EncodeSettings::for_format(self.source.format, quality);
        Ok(self.codec.encode(image, settings)?)
    }

    /// Encode the active buffer and write the bytes to `writer`.
    ///
    /// Returns the headers a host should send ahead of the bytes.
    pub fn write_to<W: Write>(&self, writer: &mut W, quality: Quality) -> Result<ResponseHeaders> {
        let bytes = self.encode(quality)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(self.response_headers())
    }

    pub fn response_headers(&self) -> ResponseHeaders {
        ResponseHeaders::for_source(&self.source)
    }

    /// Free the held buffers. A second call fails with
    /// [`ThumbnailError::DoubleRelease`].
    pub fn release(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.buffer, ActiveBuffer::Released) {
            ActiveBuffer::Released => Err(ThumbnailError::DoubleRelease),
            held => {
                debug!(thumbnailed = held.is_thumbnailed(), "released image buffer");
                drop(held);
                Ok(())
            }
        }
    }

    pub fn source(&self) -> &SourceImage {
        &self.source
    }

    pub fn buffer(&self) -> &ActiveBuffer {
        &self.buffer
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn name(&self) -> &str {
        &self.source.name
    }

    pub fn width(&self) -> u32 {
        self.source.width
    }

    pub fn height(&self) -> u32 {
        self.source.height
    }

    pub fn format(&self) -> MimeFormat {
        self.source.format
    }

    pub fn directory(&self) -> &str {
        &self.source.directory
    }

    pub fn basename(&self) -> &str {
        &self.source.basename
    }

    pub fn extension(&self) -> &str {
        &self.source.extension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockCodec, RecordedOp};
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// A placeholder file that passes validation; the mock codec never reads it.
    fn placeholder(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, b"stub").unwrap();
        path
    }

    fn open_mock(mime: &str, name: &str, width: u32, height: u32) -> (TempDir, Thumbnailer<MockCodec>) {
        let tmp = TempDir::new().unwrap();
        let path = placeholder(&tmp, name);
        let thumb =
            Thumbnailer::open_with(MockCodec::with_size(mime, width, height), &path).unwrap();
        (tmp, thumb)
    }

    fn q(value: f64) -> Quality {
        Quality::new(value).unwrap()
    }

    // =========================================================================
    // open
    // =========================================================================

    #[test]
    fn open_populates_metadata() {
        let (tmp, thumb) = open_mock("image/png", "Logo.png", 320, 200);
        assert_eq!(thumb.name(), "Logo");
        assert_eq!(thumb.basename(), "Logo.png");
        assert_eq!(thumb.extension(), ".png");
        assert_eq!(thumb.directory(), tmp.path().to_string_lossy());
        assert_eq!((thumb.width(), thumb.height()), (320, 200));
        assert_eq!(thumb.format(), MimeFormat::Png);
        assert!(!thumb.buffer().is_thumbnailed());
    }

    #[test]
    fn open_decodes_with_detected_format() {
        let (_tmp, thumb) = open_mock("image/gif", "a.gif", 10, 10);
        let ops = thumb.codec().get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(&ops[0], RecordedOp::DetectMime(_)));
        assert!(matches!(&ops[1], RecordedOp::Decode(_, MimeFormat::Gif)));
    }

    #[test]
    fn open_unknown_mime_decodes_as_jpeg() {
        let (_tmp, thumb) = open_mock("image/webp", "a.png", 10, 10);
        assert_eq!(thumb.format(), MimeFormat::Jpeg);
        assert!(matches!(
            &thumb.codec().get_operations()[1],
            RecordedOp::Decode(_, MimeFormat::Jpeg)
        ));
    }

    #[test]
    fn open_rejects_bmp_before_codec() {
        let tmp = TempDir::new().unwrap();
        let path = placeholder(&tmp, "image.bmp");
        let err = Thumbnailer::open_with(MockCodec::with_size("image/bmp", 4, 4), &path).unwrap_err();
        assert!(matches!(
            err,
            ThumbnailError::Validation(ValidationError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn open_rejects_empty_path() {
        let err = Thumbnailer::open("").unwrap_err();
        assert!(matches!(
            err,
            ThumbnailError::Validation(ValidationError::MissingInput)
        ));
    }

    #[test]
    fn open_rejects_zero_sized_decode() {
        let tmp = TempDir::new().unwrap();
        let path = placeholder(&tmp, "empty.png");
        let codec = MockCodec::new("image/png", DynamicImage::new_rgba8(0, 0));
        let err = Thumbnailer::open_with(codec, &path).unwrap_err();
        assert!(matches!(err, ThumbnailError::DegenerateDimension(_)));
    }

    // =========================================================================
    // thumbnail
    // =========================================================================

    #[test]
    fn thumbnail_produces_exact_box() {
        let (_tmp, mut thumb) = open_mock("image/jpeg", "a.jpg", 800, 600);
        thumb.thumbnail(100, 100).unwrap();

        let active = thumb.buffer().active().unwrap();
        assert_eq!((active.width(), active.height()), (100, 100));
        assert!(thumb.buffer().is_thumbnailed());
    }

    #[test]
    fn thumbnail_keeps_source_metadata_and_original() {
        let (_tmp, mut thumb) = open_mock("image/jpeg", "a.jpg", 800, 600);
        thumb.thumbnail(50, 80).unwrap();

        assert_eq!((thumb.width(), thumb.height()), (800, 600));
        let original = thumb.buffer().original().unwrap();
        assert_eq!((original.width(), original.height()), (800, 600));
    }

    #[test]
    fn second_thumbnail_replaces_first() {
        let (_tmp, mut thumb) = open_mock("image/png", "a.png", 400, 400);
        thumb.thumbnail(100, 50).unwrap();
        thumb.thumbnail(30, 60).unwrap();

        let active = thumb.buffer().active().unwrap();
        assert_eq!((active.width(), active.height()), (30, 60));
        let original = thumb.buffer().original().unwrap();
        assert_eq!((original.width(), original.height()), (400, 400));
    }

    #[test]
    fn thumbnail_zero_box_is_degenerate() {
        let (_tmp, mut thumb) = open_mock("image/jpeg", "a.jpg", 800, 600);
        let err = thumb.thumbnail(100, 0).unwrap_err();
        assert!(matches!(
            err,
            ThumbnailError::DegenerateDimension(DegenerateDimension {
                width: 100,
                height: 0
            })
        ));
        assert!(!thumb.buffer().is_thumbnailed());
    }

    // =========================================================================
    // encode
    // =========================================================================

    #[test]
    fn encode_uses_original_before_thumbnail() {
        let (_tmp, thumb) = open_mock("image/jpeg", "a.jpg", 64, 48);
        thumb.encode(q(80.0)).unwrap();
        assert_eq!(
            thumb.codec().encodes(),
            vec![RecordedOp::Encode {
                width: 64,
                height: 48,
                settings: EncodeSettings::Jpeg { quality: 80 }
            }]
        );
    }

    #[test]
    fn encode_uses_thumbnail_when_present() {
        let (_tmp, mut thumb) = open_mock("image/jpeg", "a.jpg", 64, 48);
        thumb.thumbnail(16, 16).unwrap();
        thumb.encode(q(100.0)).unwrap();
        assert!(matches!(
            &thumb.codec().encodes()[0],
            RecordedOp::Encode {
                width: 16,
                height: 16,
                ..
            }
        ));
    }

    #[test]
    fn encode_png_maps_quality_to_compression_level() {
        let (_tmp, thumb) = open_mock("image/png", "a.png", 8, 8);
        for (quality, level) in [(0.0, 0), (50.0, 5), (100.0, 9)] {
            thumb.encode(q(quality)).unwrap();
            assert!(matches!(
                thumb.codec().encodes().last(),
                Some(RecordedOp::Encode { settings: EncodeSettings::Png { compression }, .. })
                    if *compression == level
            ));
        }
    }

    #[test]
    fn encode_gif_ignores_quality() {
        let (_tmp, thumb) = open_mock("image/gif", "a.gif", 8, 8);
        thumb.encode(q(0.0)).unwrap();
        thumb.encode(q(100.0)).unwrap();
        let settings: Vec<_> = thumb
            .codec()
            .encodes()
            .into_iter()
            .map(|op| match op {
                RecordedOp::Encode { settings, .. } => settings,
                other => panic!("unexpected op {other:?}"),
            })
            .collect();
        assert_eq!(settings, vec![EncodeSettings::Gif, EncodeSettings::Gif]);
    }

    #[test]
    fn write_to_writes_bytes_and_returns_headers() {
        let (_tmp, thumb) = open_mock("image/png", "Banner.png", 8, 8);
        let mut out = Vec::new();
        let headers = thumb.write_to(&mut out, q(90.0)).unwrap();
        assert_eq!(out, vec![0xAB; 4]);
        assert_eq!(headers.content_type, "image/png");
        assert_eq!(headers.content_disposition, "inline; filename=\"Banner.png\"");
    }

    // =========================================================================
    // release
    // =========================================================================

    #[test]
    fn release_once_succeeds() {
        let (_tmp, mut thumb) = open_mock("image/jpeg", "a.jpg", 8, 8);
        thumb.thumbnail(4, 4).unwrap();
        thumb.release().unwrap();
        assert!(thumb.buffer().active().is_none());
        assert!(thumb.buffer().original().is_none());
    }

    #[test]
    fn double_release_is_an_error() {
        let (_tmp, mut thumb) = open_mock("image/jpeg", "a.jpg", 8, 8);
        thumb.release().unwrap();
        assert!(matches!(thumb.release(), Err(ThumbnailError::DoubleRelease)));
    }

    #[test]
    fn operations_after_release_fail() {
        let (_tmp, mut thumb) = open_mock("image/png", "a.png", 8, 8);
        thumb.release().unwrap();
        assert!(matches!(thumb.thumbnail(2, 2), Err(ThumbnailError::Released)));
        assert!(matches!(thumb.encode(q(50.0)), Err(ThumbnailError::Released)));
        // Metadata outlives the pixels
        assert_eq!(thumb.name(), "a");
        assert_eq!(thumb.width(), 8);
    }
}
