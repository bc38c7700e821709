//! Diagram discovery and conversion pipeline for p2d.
//!
//! This crate composes the renderer and document assembly into the
//! file-level operations the CLI exposes:
//! - [`Converter::convert_file`] converts one `.puml` file to one `.drawio`
//!   document, substituting a placeholder image when rendering fails
//! - [`Converter::convert_directory`] walks a source tree, converts every
//!   diagram file and mirrors the relative paths under the destination
//!
//! Processing is sequential: each file is read, rendered, assembled and
//! written before the next begins.

mod consts;
mod error;
mod pipeline;
mod scanner;

pub use consts::{DIAGRAM_EXTENSION, OUTPUT_EXTENSION};
pub use error::ConvertError;
pub use pipeline::{BatchSummary, Converter, FileFailure, ensure_output_extension};
