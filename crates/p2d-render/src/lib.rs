//! External PlantUML renderer invocation for p2d.
//!
//! This crate turns PlantUML diagram source into rendered image bytes by
//! shelling out to an external renderer:
//! - [`Renderer`] drives the two-tier invocation: a direct executable first,
//!   then an optional configured fallback command
//! - [`placeholder_image`] synthesizes a stand-in SVG when both attempts fail
//!
//! # Architecture
//!
//! The crate is organized into modules:
//! - [`format`]: Output format definitions ([`DiagramFormat`])
//! - [`image`]: Rendered image container ([`RenderedImage`])
//! - `exec`: Direct renderer invocation over a stdin pipe
//! - `fallback`: Fallback command invocation through a scoped temp directory
//! - [`placeholder`]: Placeholder SVG synthesis
//!
//! # Example
//!
//! ```ignore
//! use p2d_render::{DiagramFormat, Renderer};
//!
//! let renderer = Renderer::new("plantuml");
//! let image = renderer.render(path, &source, DiagramFormat::Svg)?;
//! ```

mod error;
mod exec;
mod fallback;
mod format;
mod image;
mod placeholder;
mod renderer;

pub use error::RenderError;
pub use fallback::{FORMAT_PLACEHOLDER, INPUT_PLACEHOLDER, OUTPUT_DIR_PLACEHOLDER};
pub use format::DiagramFormat;
pub use image::RenderedImage;
pub use placeholder::placeholder_image;
pub use renderer::Renderer;
