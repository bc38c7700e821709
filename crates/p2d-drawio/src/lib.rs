//! Draw.io document assembly for p2d.
//!
//! This crate produces and inspects the `.drawio` files the converter writes:
//! - [`assemble`] splices a rendered image and its PlantUML source into the
//!   fixed `mxfile` skeleton as base64 payloads
//! - [`extract_payloads`] parses a produced document and recovers the exact
//!   embedded payloads
//!
//! The output contains a single image-shaped container object; the diagram is
//! not decomposed into editable shapes. Its style string carries
//! `image=data:image/svg+xml,<base64>` (or the PNG equivalent) plus a custom
//! `plantuml=<base64>` field with the original source.

mod document;
mod extract;

pub use document::assemble;
pub use extract::{DocumentPayloads, ExtractError, extract_payloads};
