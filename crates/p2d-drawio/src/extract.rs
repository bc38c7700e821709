//! Recovery of embedded payloads from an assembled document.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use p2d_render::{DiagramFormat, RenderedImage};

/// Style field carrying the base64-encoded PlantUML source.
const SOURCE_FIELD: &str = "plantuml";

/// Style field carrying the embedded image data URI.
const IMAGE_FIELD: &str = "image";

/// Payloads recovered from a Draw.io document produced by [`crate::assemble`].
#[derive(Debug)]
pub struct DocumentPayloads {
    /// Container object's label (the diagram base name).
    pub name: String,
    /// Decoded PlantUML source.
    pub source: String,
    /// Decoded embedded image.
    pub image: RenderedImage,
}

/// Payload extraction error.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Document is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// No container object with an embedded source was found.
    #[error("no diagram container object found")]
    MissingContainer,
    /// A required style field is absent.
    #[error("style field missing: {0}")]
    MissingField(&'static str),
    /// The image data URI has an unrecognized media type.
    #[error("unsupported image data URI: {0}")]
    UnsupportedImage(String),
    /// A base64 payload failed to decode.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded source is not valid UTF-8.
    #[error("embedded source is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Extract the embedded source and image payloads from a document.
///
/// Scans for the first `mxCell` whose style string carries a `plantuml=`
/// field and base64-decodes both payloads.
///
/// # Errors
///
/// Returns [`ExtractError::MissingContainer`] when no such cell exists, and
/// decoding errors when the payloads are malformed.
pub fn extract_payloads(document: &str) -> Result<DocumentPayloads, ExtractError> {
    let mut reader = Reader::from_str(document);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => {
                if e.name().as_ref() == b"mxCell" {
                    if let Some(payloads) = payloads_from_cell(&e)? {
                        return Ok(payloads);
                    }
                }
            }
            Event::Eof => return Err(ExtractError::MissingContainer),
            _ => {}
        }
        buf.clear();
    }
}

/// Decode the payloads of one `mxCell`, if it is the diagram container.
fn payloads_from_cell(e: &BytesStart<'_>) -> Result<Option<DocumentPayloads>, ExtractError> {
    let mut style = None;
    let mut value = None;
    for attr in e.attributes().flatten() {
        let attr_value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        match attr.key.as_ref() {
            b"style" => style = Some(attr_value),
            b"value" => value = Some(attr_value),
            _ => {}
        }
    }

    let Some(style) = style else {
        return Ok(None);
    };
    let Some(source_b64) = style_field(&style, SOURCE_FIELD) else {
        return Ok(None);
    };

    let source = String::from_utf8(BASE64_STANDARD.decode(source_b64)?)?;
    let image_uri =
        style_field(&style, IMAGE_FIELD).ok_or(ExtractError::MissingField(IMAGE_FIELD))?;
    let image = decode_data_uri(image_uri)?;

    Ok(Some(DocumentPayloads {
        name: value.unwrap_or_default(),
        source,
        image,
    }))
}

/// Look up one `key=value` field in a Draw.io style string.
fn style_field<'a>(style: &'a str, key: &str) -> Option<&'a str> {
    style
        .split(';')
        .filter_map(|field| field.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// Decode an embedded image data URI back into format and bytes.
fn decode_data_uri(uri: &str) -> Result<RenderedImage, ExtractError> {
    for format in [DiagramFormat::Svg, DiagramFormat::Png] {
        if let Some(payload) = uri.strip_prefix(format.data_uri_prefix()) {
            return Ok(RenderedImage::new(format, BASE64_STANDARD.decode(payload)?));
        }
    }
    Err(ExtractError::UnsupportedImage(uri.to_owned()))
}
