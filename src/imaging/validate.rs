//! Input gate run before any decoding.
//!
//! Checks, in order: a path was given, it is a readable regular file, and its
//! extension is one of [`ALLOWED_EXTENSIONS`]. The extension match is
//! case-sensitive (`photo.JPG` is rejected).

use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions accepted by [`validate_source`].
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("image not found: no input path given")]
    MissingInput,
    #[error("image file is missing or invalid: {0}")]
    InvalidFile(PathBuf),
    #[error("unsupported image format '{0}': only JPG, JPEG, PNG and GIF files are allowed")]
    UnsupportedFormat(String),
}

/// Validate a candidate source path, returning it unchanged on success.
pub fn validate_source(path: &Path) -> Result<&Path, ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::MissingInput);
    }

    let is_file = path.metadata().map(|m| m.is_file()).unwrap_or(false);
    if !is_file || File::open(path).is_err() {
        return Err(ValidationError::InvalidFile(path.to_path_buf()));
    }

    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !ALLOWED_EXTENSIONS.contains(&extension) {
        return Err(ValidationError::UnsupportedFormat(extension.to_string()));
    }

    Ok(path)
}
