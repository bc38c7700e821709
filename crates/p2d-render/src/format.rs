//! Output format definitions for rendered diagrams.

/// Output format for rendered diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagramFormat {
    /// SVG text (default, scales cleanly when embedded).
    #[default]
    Svg,
    /// PNG bytes (raster, no interactivity).
    Png,
}

impl DiagramFormat {
    /// Parse format from a configuration or CLI value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Return format as string representation.
    ///
    /// Doubles as the file extension the renderer produces.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }

    /// Format flag understood by the PlantUML executable (`-tsvg`, `-tpng`).
    #[must_use]
    pub fn renderer_flag(self) -> &'static str {
        match self {
            Self::Svg => "-tsvg",
            Self::Png => "-tpng",
        }
    }

    /// Data URI prefix used when embedding a base64 payload of this format.
    ///
    /// Both forms omit the `;base64` marker: a semicolon would terminate the
    /// style field the URI is embedded in, and Draw.io treats the bare comma
    /// form as base64.
    #[must_use]
    pub fn data_uri_prefix(self) -> &'static str {
        match self {
            Self::Svg => "data:image/svg+xml,",
            Self::Png => "data:image/png,",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_default() {
        assert_eq!(DiagramFormat::default(), DiagramFormat::Svg);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(DiagramFormat::parse("svg"), Some(DiagramFormat::Svg));
        assert_eq!(DiagramFormat::parse("png"), Some(DiagramFormat::Png));
        assert_eq!(DiagramFormat::parse("jpeg"), None);
        assert_eq!(DiagramFormat::parse("SVG"), None);
        assert_eq!(DiagramFormat::parse(""), None);
    }

    #[test]
    fn test_format_renderer_flag() {
        assert_eq!(DiagramFormat::Svg.renderer_flag(), "-tsvg");
        assert_eq!(DiagramFormat::Png.renderer_flag(), "-tpng");
    }

    #[test]
    fn test_format_data_uri_prefix() {
        assert_eq!(DiagramFormat::Svg.data_uri_prefix(), "data:image/svg+xml,");
        assert_eq!(DiagramFormat::Png.data_uri_prefix(), "data:image/png,");
    }
}
