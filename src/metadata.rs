//! Source image metadata.
//!
//! A [`SourceImage`] is built once when a file is opened, from the validated
//! path and the dimensions of the decoded buffer. It never changes afterwards,
//! even when a thumbnail replaces the active buffer.
//!
//! ## Path parts
//!
//! For `/photos/2024/Sunset.JPEG`:
//!
//! | Field | Value |
//! |---|---|
//! | `name` | `Sunset` |
//! | `directory` | `/photos/2024` |
//! | `basename` | `Sunset.JPEG` |
//! | `extension` | `.jpeg` |
//!
//! A bare file name has directory `.`.

use crate::imaging::{DegenerateDimension, MimeFormat};
use serde::Serialize;
use std::path::Path;

/// Facts about the decoded input image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceImage {
    /// File name without extension.
    pub name: String,
    /// Containing directory.
    pub directory: String,
    /// File name with extension.
    pub basename: String,
    /// Lowercased extension with a leading dot.
    pub extension: String,
    pub width: u32,
    pub height: u32,
    pub format: MimeFormat,
}

impl SourceImage {
    /// Derive metadata for a decoded image. Zero dimensions are rejected.
    pub fn from_path(
        path: &Path,
        width: u32,
        height: u32,
        format: MimeFormat,
    ) -> Result<Self, DegenerateDimension> {
        if width == 0 || height == 0 {
            return Err(DegenerateDimension { width, height });
        }

        let lossy = |s: Option<&std::ffi::OsStr>| {
            s.map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                parent.to_string_lossy().into_owned()
            }
            _ => ".".to_string(),
        };

        Ok(Self {
            name: lossy(path.file_stem()),
            directory,
            basename: lossy(path.file_name()),
            extension: format!(".{}", lossy(path.extension()).to_lowercase()),
            width,
            height,
            format,
        })
    }

    /// Mime type string, e.g. `image/png`.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// File name used in the `Content-Disposition` header.
    pub fn download_name(&self) -> String {
        format!("{}{}", self.name, self.extension)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}
