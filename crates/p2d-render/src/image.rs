//! Rendered image container.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

use crate::format::DiagramFormat;

/// Rendered diagram image with its format.
///
/// Holds the raw bytes produced by the renderer (SVG text or PNG data) just
/// long enough to embed them into an output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    /// Format of the image data.
    pub format: DiagramFormat,
    /// Raw image bytes as produced by the renderer.
    pub data: Vec<u8>,
}

impl RenderedImage {
    /// Create a rendered image from raw renderer output.
    #[must_use]
    pub fn new(format: DiagramFormat, data: Vec<u8>) -> Self {
        Self { format, data }
    }

    /// Encode the image as a data URI suitable for a Draw.io style string.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!(
            "{}{}",
            self.format.data_uri_prefix(),
            BASE64_STANDARD.encode(&self.data)
        )
    }
}
