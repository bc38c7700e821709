//! Assembly of the fixed `mxfile` document skeleton.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use quick_xml::escape::escape;

use p2d_render::RenderedImage;

/// Assemble a Draw.io document from a diagram's source, rendered image and
/// base name.
///
/// Pure function: the same inputs always produce the same document. The
/// diagram name becomes the page name and the container object's id and
/// label; the image and the original source are embedded base64-encoded in
/// the container's style string.
#[must_use]
pub fn assemble(source: &str, image: &RenderedImage, name: &str) -> String {
    let source_b64 = BASE64_STANDARD.encode(source.as_bytes());
    let image_uri = image.data_uri();
    let name_attr = escape(name);

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<mxfile host="app.diagrams.net" agent="p2d" version="1.0" etag="plantuml-diagram" type="device">
  <diagram id="plantuml-{name_attr}" name="{name_attr}">
    <mxGraphModel dx="1422" dy="794" grid="1" gridSize="10" guides="1" tooltips="1" connect="1" arrows="1" fold="1" page="1" pageScale="1" pageWidth="827" pageHeight="1169" math="0" shadow="0">
      <root>
        <mxCell id="0" />
        <mxCell id="1" parent="0" />
        <mxCell id="{name_attr}" value="{name_attr}" style="shape=image;html=1;verticalAlign=top;verticalLabelPosition=bottom;labelBackgroundColor=#ffffff;imageAspect=0;aspect=fixed;image={image_uri};plantuml={source_b64};" vertex="1" parent="1">
          <mxGeometry x="40" y="40" width="400" height="300" as="geometry" />
        </mxCell>
      </root>
    </mxGraphModel>
  </diagram>
</mxfile>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use p2d_render::DiagramFormat;
    use pretty_assertions::assert_eq;
    use quick_xml::events::Event;
    use quick_xml::reader::Reader;

    fn svg_image() -> RenderedImage {
        RenderedImage::new(DiagramFormat::Svg, b"<svg/>".to_vec())
    }

    /// Walk every event; quick-xml errors on malformed documents.
    fn assert_well_formed(document: &str) {
        let mut reader = Reader::from_str(document);
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("document is not well-formed XML: {e}"),
            }
            buf.clear();
        }
    }

    #[test]
    fn test_assemble_is_well_formed() {
        let document = assemble("@startuml\nA -> B\n@enduml\n", &svg_image(), "seq");
        assert_well_formed(&document);
    }

    #[test]
    fn test_assemble_embeds_name_as_label() {
        let document = assemble("src", &svg_image(), "auth-flow");
        assert!(document.contains(r#"name="auth-flow""#));
        assert!(document.contains(r#"value="auth-flow""#));
        assert!(document.contains(r#"id="plantuml-auth-flow""#));
    }

    #[test]
    fn test_assemble_escapes_name() {
        let document = assemble("src", &svg_image(), "a<b>&\"c\"");
        assert_well_formed(&document);
        assert!(document.contains("a&lt;b&gt;&amp;&quot;c&quot;"));
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let a = assemble("src", &svg_image(), "n");
        let b = assemble("src", &svg_image(), "n");
        assert_eq!(a, b);
    }

    #[test]
    fn test_assemble_svg_style_fields() {
        let document = assemble("src", &svg_image(), "n");
        assert!(document.contains("image=data:image/svg+xml,PHN2Zy8+;"));
        assert!(document.contains(&format!(
            "plantuml={};",
            base64::prelude::BASE64_STANDARD.encode("src")
        )));
    }

    #[test]
    fn test_assemble_png_style_fields() {
        let image = RenderedImage::new(DiagramFormat::Png, b"\x89PNG\r\n\x1a\n".to_vec());
        let document = assemble("src", &image, "n");
        assert!(document.contains("image=data:image/png,"));
    }
}
