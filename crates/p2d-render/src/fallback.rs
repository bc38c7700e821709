//! Fallback renderer invocation through a scoped temporary directory.
//!
//! When the direct executable is unavailable, a configured command template is
//! run instead. The diagram source is copied into a fresh temporary directory,
//! the `{input}`, `{output-dir}` and `{format}` placeholders are substituted
//! into the template, and the rendered file is read back from the directory.
//! The directory is removed when the invocation completes or fails.

use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

use crate::error::RenderError;
use crate::format::DiagramFormat;

/// Placeholder replaced with the temporary copy of the diagram source.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Placeholder replaced with the temporary output directory.
pub const OUTPUT_DIR_PLACEHOLDER: &str = "{output-dir}";

/// Placeholder replaced with the requested image format (`svg`, `png`).
pub const FORMAT_PLACEHOLDER: &str = "{format}";

/// Base name of the temporary diagram copy; the rendered file is expected at
/// the same stem with the format's extension.
const TEMP_BASENAME: &str = "diagram";

/// Render a diagram by running the configured fallback command template.
///
/// # Errors
///
/// Returns [`RenderError::NotFound`] if the command's program does not exist,
/// [`RenderError::Failed`] if it exits non-zero, and
/// [`RenderError::MissingOutput`] if the expected output file never appeared.
pub(crate) fn render_fallback(
    template: &[String],
    input: &Path,
    format: DiagramFormat,
) -> Result<Vec<u8>, RenderError> {
    let temp = tempfile::tempdir()?;
    let temp_input = temp.path().join(format!("{TEMP_BASENAME}.puml"));
    fs::copy(input, &temp_input)?;

    let argv: Vec<String> = template
        .iter()
        .map(|arg| substitute(arg, &temp_input, temp.path(), format))
        .collect();
    let Some((program, args)) = argv.split_first() else {
        return Err(RenderError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "empty fallback command template",
        )));
    };

    let output = Command::new(program).args(args).output().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            RenderError::NotFound(program.clone())
        } else {
            RenderError::Io(e)
        }
    })?;
    if !output.status.success() {
        return Err(RenderError::Failed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let expected = temp
        .path()
        .join(format!("{TEMP_BASENAME}.{}", format.as_str()));
    if !expected.exists() {
        return Err(RenderError::MissingOutput(expected));
    }
    Ok(fs::read(&expected)?)
}

/// Substitute the template placeholders into one argument.
fn substitute(arg: &str, input: &Path, output_dir: &Path, format: DiagramFormat) -> String {
    arg.replace(INPUT_PLACEHOLDER, &input.to_string_lossy())
        .replace(OUTPUT_DIR_PLACEHOLDER, &output_dir.to_string_lossy())
        .replace(FORMAT_PLACEHOLDER, format.as_str())
}
