//! Renderer invocation error types.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Error from a renderer invocation attempt.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The renderer executable could not be found.
    #[error("renderer executable not found: {0}")]
    NotFound(String),

    /// The renderer ran but exited with a non-zero status.
    #[error("renderer failed ({status}): {stderr}")]
    Failed {
        /// Exit status of the renderer process.
        status: ExitStatus,
        /// Captured standard error output.
        stderr: String,
    },

    /// The fallback command completed but the expected output file is absent.
    #[error("renderer produced no output file: {}", .0.display())]
    MissingOutput(PathBuf),

    /// I/O error while driving the renderer process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
