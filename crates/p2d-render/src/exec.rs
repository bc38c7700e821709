//! Direct renderer invocation over a stdin pipe.
//!
//! Runs the renderer executable with the format flag and `-pipe`, writes the
//! diagram source to its standard input, and captures standard output as the
//! rendered image bytes.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use crate::error::RenderError;
use crate::format::DiagramFormat;

/// Render diagram source by piping it through the renderer executable.
///
/// # Errors
///
/// Returns [`RenderError::NotFound`] if the executable does not exist,
/// [`RenderError::Failed`] if it exits non-zero, and [`RenderError::Io`] for
/// pipe failures.
pub(crate) fn render_direct(
    command: &str,
    args: &[String],
    source: &str,
    format: DiagramFormat,
) -> Result<Vec<u8>, RenderError> {
    let mut child = Command::new(command)
        .args(args)
        .arg(format.renderer_flag())
        .arg("-pipe")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                RenderError::NotFound(command.to_owned())
            } else {
                RenderError::Io(e)
            }
        })?;

    // Write the source, then drop the handle so the child sees EOF.
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(source.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(RenderError::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(output.stdout)
}
