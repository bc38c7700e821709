//! Placeholder image synthesis for failed renders.

use crate::format::DiagramFormat;
use crate::image::RenderedImage;

/// Synthesize a placeholder SVG for a diagram that could not be rendered.
///
/// The image shows the diagram's base name on a neutral background together
/// with a note that the embedded PlantUML source should be used instead.
/// Deterministic; no external renderer involved.
#[must_use]
pub fn placeholder_image(name: &str) -> RenderedImage {
    let label = xml_escape(name);
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300" viewBox="0 0 400 300">
  <rect width="400" height="300" fill="#f8f9fa" stroke="#dee2e6"/>
  <text x="200" y="150" text-anchor="middle" font-family="Arial" font-size="14" fill="#6c757d">PlantUML diagram: {label}</text>
  <text x="200" y="170" text-anchor="middle" font-family="Arial" font-size="12" fill="#6c757d">(image unavailable - use the embedded PlantUML source)</text>
</svg>
"##
    );
    RenderedImage::new(DiagramFormat::Svg, svg.into_bytes())
}

/// Escape the characters with special meaning in XML text and attributes.
fn xml_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
