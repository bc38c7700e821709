//! Two-tier renderer invocation.

use std::path::Path;

use crate::error::RenderError;
use crate::exec::render_direct;
use crate::fallback::render_fallback;
use crate::format::DiagramFormat;
use crate::image::RenderedImage;

/// External diagram renderer with an optional fallback command.
///
/// Rendering first pipes the diagram source through the configured executable.
/// If that attempt fails (executable missing, non-zero exit) and a fallback
/// command template is configured, the fallback is run against a temporary
/// copy of the source file. Callers decide what to do when both attempts
/// fail; see [`crate::placeholder_image`].
///
/// # Example
///
/// ```ignore
/// let renderer = Renderer::new("plantuml")
///     .fallback_command(vec!["render-via-build-tool".into(), "{input}".into()]);
/// ```
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Renderer executable invoked directly.
    command: String,
    /// Extra arguments placed before the format and pipe flags.
    args: Vec<String>,
    /// Fallback argv template; empty disables the fallback attempt.
    fallback_command: Vec<String>,
}

impl Renderer {
    /// Create a renderer invoking the given executable.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            fallback_command: Vec::new(),
        }
    }

    /// Set extra arguments passed to the executable before the format flag.
    #[must_use]
    pub fn args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Set the fallback argv template run when the direct attempt fails.
    ///
    /// `{input}`, `{output-dir}` and `{format}` placeholders in the template
    /// are substituted at invocation time.
    #[must_use]
    pub fn fallback_command(mut self, template: Vec<String>) -> Self {
        self.fallback_command = template;
        self
    }

    /// Render a diagram file to image bytes in the requested format.
    ///
    /// `source` must be the content of `input`; it is piped to the direct
    /// renderer, while the fallback command re-reads the file from disk.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt when every attempt failed.
    pub fn render(
        &self,
        input: &Path,
        source: &str,
        format: DiagramFormat,
    ) -> Result<RenderedImage, RenderError> {
        tracing::debug!(
            command = %self.command,
            input = %input.display(),
            format = format.as_str(),
            "Invoking renderer"
        );

        match render_direct(&self.command, &self.args, source, format) {
            Ok(data) => Ok(RenderedImage::new(format, data)),
            Err(err) if !self.fallback_command.is_empty() => {
                tracing::warn!(
                    command = %self.command,
                    error = %err,
                    "Direct renderer invocation failed, trying fallback command"
                );
                render_fallback(&self.fallback_command, input, format)
                    .map(|data| RenderedImage::new(format, data))
            }
            Err(err) => Err(err),
        }
    }
}
