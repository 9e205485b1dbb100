//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper. Format functions are pure and do no I/O.
//!
//! ## Info
//!
//! ```text
//! Sunset.jpg
//!     Format: image/jpeg
//!     Size: 800x600
//!     Directory: /photos
//! ```
//!
//! ## Thumbnail
//!
//! ```text
//! Sunset.jpg 800x600 → 100x100 (image/jpeg, quality 90)
//! ```
//!
//! Summaries and headers go to stderr so they never mix with image bytes
//! written to stdout.

use crate::emit::ResponseHeaders;
use crate::imaging::Quality;
use crate::metadata::SourceImage;

/// Multi-line description of a source image.
pub fn format_source_info(source: &SourceImage) -> Vec<String> {
    vec![
        source.basename.clone(),
        format!("    Format: {}", source.mime_type()),
        format!("    Size: {}x{}", source.width, source.height),
        format!("    Directory: {}", source.directory),
    ]
}

/// Print source info to stdout.
pub fn print_source_info(source: &SourceImage) {
    for line in format_source_info(source) {
        println!("{}", line);
    }
}

/// One-line summary of an emitted image.
///
/// `target` is `None` when the original was re-encoded without a resize.
pub fn format_emit_summary(
    source: &SourceImage,
    target: Option<(u32, u32)>,
    quality: Quality,
    bytes: usize,
) -> String {
    let size = match target {
        Some((w, h)) => format!("{}x{} → {}x{}", source.width, source.height, w, h),
        None => format!("{}x{}", source.width, source.height),
    };
    format!(
        "{} {} ({}, quality {}, {} bytes)",
        source.basename,
        size,
        source.mime_type(),
        quality,
        bytes
    )
}

/// Print an emit summary to stderr.
pub fn print_emit_summary(
    source: &SourceImage,
    target: Option<(u32, u32)>,
    quality: Quality,
    bytes: usize,
) {
    eprintln!("{}", format_emit_summary(source, target, quality, bytes));
}

/// Print response header lines to stderr.
pub fn print_headers(headers: &ResponseHeaders) {
    for line in headers.lines() {
        eprintln!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::MimeFormat;
    use std::path::Path;

    fn sunset() -> SourceImage {
        SourceImage::from_path(Path::new("/photos/Sunset.jpg"), 800, 600, MimeFormat::Jpeg)
            .unwrap()
    }

    #[test]
    fn info_lists_format_size_and_directory() {
        assert_eq!(
            format_source_info(&sunset()),
            vec![
                "Sunset.jpg",
                "    Format: image/jpeg",
                "    Size: 800x600",
                "    Directory: /photos",
            ]
        );
    }

    #[test]
    fn summary_with_resize() {
        let line = format_emit_summary(
            &sunset(),
            Some((100, 100)),
            Quality::new(90.0).unwrap(),
            2048,
        );
        assert_eq!(
            line,
            "Sunset.jpg 800x600 → 100x100 (image/jpeg, quality 90, 2048 bytes)"
        );
    }

    #[test]
    fn summary_without_resize() {
        let line = format_emit_summary(&sunset(), None, Quality::new(12.5).unwrap(), 10);
        assert_eq!(
            line,
            "Sunset.jpg 800x600 (image/jpeg, quality 12.5, 10 bytes)"
        );
    }
}
