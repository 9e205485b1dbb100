//! Response header values for an emitted image.
//!
//! Encoding and header emission are separate: [`Thumbnailer::encode`] returns
//! bytes only, and the host decides whether and how to send these headers.
//!
//! [`Thumbnailer::encode`]: crate::Thumbnailer::encode

use crate::metadata::SourceImage;

/// The two advisory headers that accompany an emitted image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHeaders {
    /// `inline; filename="<name><extension>"`
    pub content_disposition: String,
    /// Mime type of the source format.
    pub content_type: &'static str,
}

impl ResponseHeaders {
    pub fn for_source(source: &SourceImage) -> Self {
        Self {
            content_disposition: format!(
                "inline; filename=\"{}\"",
                source.download_name().replace('"', "\\\"")
            ),
            content_type: source.mime_type(),
        }
    }

    /// Header lines in `Name: value` form, disposition first.
    pub fn lines(&self) -> [String; 2] {
        [
            format!("Content-Disposition: {}", self.content_disposition),
            format!("Content-Type: {}", self.content_type),
        ]
    }
}
