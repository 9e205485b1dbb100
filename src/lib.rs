//! # cropfill
//!
//! Crop-to-fill thumbnails for JPEG, PNG and GIF images.
//!
//! A thumbnail always has exactly the requested width and height. The source
//! is scaled until it covers the box, and whatever overflows is cropped evenly
//! from both sides. Nothing is stretched and nothing is letterboxed.
//!
//! ```no_run
//! use cropfill::{Quality, Thumbnailer};
//!
//! # fn main() -> Result<(), cropfill::ThumbnailError> {
//! let mut thumb = Thumbnailer::open("photos/sunset.jpg")?;
//! thumb.thumbnail(200, 200)?;
//! let bytes = thumb.encode(Quality::new(85.0)?)?;
//! let headers = thumb.response_headers();
//! thumb.release()?;
//! # let _ = (bytes, headers);
//! # Ok(())
//! # }
//! ```
//!
//! # Pipeline
//!
//! ```text
//! open(path) ─▶ validate ─▶ detect mime ─▶ decode ─▶ SourceImage
//!                                                       │
//!                                     thumbnail(w, h) (optional)
//!                                                       │
//!                                  encode(quality) / write_to ─▶ release()
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Validation, format detection, crop geometry, codec, pixel compositing |
//! | [`metadata`] | [`SourceImage`]: dimensions, format and path parts |
//! | [`thumbnailer`] | [`Thumbnailer`] lifecycle and the active-buffer state |
//! | [`emit`] | [`ResponseHeaders`] for hosts that serve images over HTTP |
//! | [`config`] | `cropfill.toml` loading, merging and validation for the CLI |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the CLI |
//!
//! # Design Decisions
//!
//! ## Errors, Not Exits
//!
//! Every failure, from a missing path to a double release, is a
//! [`ThumbnailError`] returned to the caller. A host serving many requests
//! decides what a bad image means for it.
//!
//! ## Format Follows Content
//!
//! The extension only gates which files are accepted. The decoder and encoder
//! are chosen from the sniffed content, with anything that is not GIF or PNG
//! handled as JPEG (see [`MimeFormat::from_mime`]).
//!
//! ## Bytes and Headers Are Separate
//!
//! [`Thumbnailer::encode`] returns bytes only. The `Content-Disposition` and
//! `Content-Type` values are available from [`Thumbnailer::response_headers`]
//! for hosts that want them.

pub mod config;
pub mod emit;
pub mod imaging;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod thumbnailer;

pub use emit::ResponseHeaders;
pub use imaging::{MimeFormat, Quality};
pub use metadata::SourceImage;
pub use thumbnailer::{ActiveBuffer, ThumbnailError, Thumbnailer};

#[cfg(test)]
pub(crate) mod test_helpers;
