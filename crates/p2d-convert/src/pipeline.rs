//! Single-file and batch conversion.

use std::fs;
use std::path::{Path, PathBuf};

use p2d_drawio::assemble;
use p2d_render::{DiagramFormat, Renderer, placeholder_image};

use crate::consts::OUTPUT_EXTENSION;
use crate::error::ConvertError;
use crate::scanner::{Scanner, has_diagram_extension};

/// One failed file in a batch run.
#[derive(Debug)]
pub struct FileFailure {
    /// Input diagram path.
    pub input: PathBuf,
    /// What went wrong.
    pub error: ConvertError,
}

/// Outcome of a batch conversion.
#[derive(Debug)]
pub struct BatchSummary {
    /// Number of diagram files discovered.
    pub total: usize,
    /// Number of files converted successfully.
    pub converted: usize,
    /// Per-file failures, in processing order.
    pub failures: Vec<FileFailure>,
}

impl BatchSummary {
    /// Whether every discovered file converted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Diagram-to-document converter.
///
/// Composes the renderer (with placeholder recovery) and document assembly,
/// and owns the filesystem side of conversion: reading sources, creating
/// parent directories and writing output documents.
pub struct Converter {
    renderer: Renderer,
    format: DiagramFormat,
}

impl Converter {
    /// Create a converter using the given renderer and output image format.
    #[must_use]
    pub fn new(renderer: Renderer, format: DiagramFormat) -> Self {
        Self { renderer, format }
    }

    /// Convert a single diagram file to a Draw.io document.
    ///
    /// A renderer failure is recovered by embedding a placeholder image; the
    /// output document is written either way.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::WrongExtension`] without invoking the renderer
    /// when the input is not a `.puml` file, and I/O variants for
    /// unreadable input or unwritable output.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<(), ConvertError> {
        if !has_diagram_extension(input) {
            return Err(ConvertError::WrongExtension(input.to_path_buf()));
        }

        let source = fs::read_to_string(input).map_err(|e| ConvertError::ReadInput {
            path: input.to_path_buf(),
            source: e,
        })?;
        let name = diagram_name(input);

        let image = match self.renderer.render(input, &source, self.format) {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!(
                    input = %input.display(),
                    error = %err,
                    "Rendering failed, embedding placeholder image"
                );
                placeholder_image(&name)
            }
        };

        let document = assemble(&source, &image, &name);
        write_document(output, &document)?;

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            "Converted diagram"
        );
        Ok(())
    }

    /// Convert every diagram file under `source_dir` into `dest_dir`.
    ///
    /// Destination paths mirror the relative source paths with the extension
    /// swapped to `.drawio`. A failing file is reported in the summary and
    /// does not stop the remaining files.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::SourceDirMissing`] or
    /// [`ConvertError::NoDiagrams`] before any file is converted; per-file
    /// errors are collected in the returned [`BatchSummary`].
    pub fn convert_directory(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
    ) -> Result<BatchSummary, ConvertError> {
        if !source_dir.is_dir() {
            return Err(ConvertError::SourceDirMissing(source_dir.to_path_buf()));
        }

        let diagrams = Scanner::new(source_dir).scan();
        if diagrams.is_empty() {
            return Err(ConvertError::NoDiagrams(source_dir.to_path_buf()));
        }
        tracing::info!(
            count = diagrams.len(),
            source = %source_dir.display(),
            "Found diagram files"
        );

        let mut failures = Vec::new();
        for diagram in &diagrams {
            let output = dest_dir.join(diagram.relative.with_extension(OUTPUT_EXTENSION));
            if let Err(error) = self.convert_file(&diagram.path, &output) {
                failures.push(FileFailure {
                    input: diagram.path.clone(),
                    error,
                });
            }
        }

        Ok(BatchSummary {
            total: diagrams.len(),
            converted: diagrams.len() - failures.len(),
            failures,
        })
    }
}

/// Force the output extension onto a single-file destination path.
#[must_use]
pub fn ensure_output_extension(output: &Path) -> PathBuf {
    if output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OUTPUT_EXTENSION))
    {
        output.to_path_buf()
    } else {
        output.with_extension(OUTPUT_EXTENSION)
    }
}

/// Diagram base name derived from the input file stem.
fn diagram_name(input: &Path) -> String {
    input
        .file_stem()
        .map_or_else(String::new, |stem| stem.to_string_lossy().into_owned())
}

/// Write the document, creating parent directories as needed.
fn write_document(output: &Path, document: &str) -> Result<(), ConvertError> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ConvertError::WriteOutput {
                path: output.to_path_buf(),
                source: e,
            })?;
        }
    }
    fs::write(output, document).map_err(|e| ConvertError::WriteOutput {
        path: output.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use p2d_drawio::extract_payloads;
    use pretty_assertions::assert_eq;

    /// Converter whose renderer never exists, forcing the placeholder path.
    fn placeholder_converter() -> Converter {
        Converter::new(Renderer::new("p2d-no-such-renderer"), DiagramFormat::Svg)
    }

    /// Converter whose "renderer" echoes the piped source back as the image.
    fn echo_converter() -> Converter {
        Converter::new(
            Renderer::new("sh").args(vec!["-c".to_owned(), "cat".to_owned()]),
            DiagramFormat::Svg,
        )
    }

    fn write_diagram(path: &Path, source: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, source).expect("write diagram");
    }

    #[test]
    fn test_convert_file_embeds_source_and_image() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("seq.puml");
        let output = dir.path().join("seq.drawio");
        write_diagram(&input, "@startuml\nA -> B\n@enduml\n");

        echo_converter()
            .convert_file(&input, &output)
            .expect("convert");

        let document = fs::read_to_string(&output).expect("read output");
        let payloads = extract_payloads(&document).expect("extract");
        assert_eq!(payloads.name, "seq");
        assert_eq!(payloads.source, "@startuml\nA -> B\n@enduml\n");
        assert_eq!(payloads.image.data, b"@startuml\nA -> B\n@enduml\n");
    }

    #[test]
    fn test_convert_file_placeholder_when_renderer_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("flow.puml");
        let output = dir.path().join("flow.drawio");
        write_diagram(&input, "@startuml\nA -> B\n@enduml\n");

        placeholder_converter()
            .convert_file(&input, &output)
            .expect("convert");

        let document = fs::read_to_string(&output).expect("read output");
        let payloads = extract_payloads(&document).expect("extract");
        assert_eq!(payloads.name, "flow");
        let svg = String::from_utf8(payloads.image.data).expect("svg utf-8");
        assert!(svg.contains("PlantUML diagram: flow"));
    }

    #[test]
    fn test_convert_file_rejects_wrong_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("notes.txt");
        write_diagram(&input, "not a diagram");

        let err = placeholder_converter()
            .convert_file(&input, &dir.path().join("out.drawio"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::WrongExtension(_)));
    }

    #[test]
    fn test_convert_file_missing_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = placeholder_converter()
            .convert_file(
                &dir.path().join("ghost.puml"),
                &dir.path().join("out.drawio"),
            )
            .unwrap_err();
        assert!(matches!(err, ConvertError::ReadInput { .. }));
    }

    #[test]
    fn test_convert_file_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("seq.puml");
        let output = dir.path().join("out/a/b/seq.drawio");
        write_diagram(&input, "@startuml\n@enduml\n");

        placeholder_converter()
            .convert_file(&input, &output)
            .expect("convert");
        assert!(output.is_file());
    }

    #[test]
    fn test_convert_directory_mirrors_tree() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = dir.path().join("src");
        let out = dir.path().join("out");
        write_diagram(&src.join("a/b/diagram1.puml"), "@startuml\nA\n@enduml\n");
        write_diagram(&src.join("top.puml"), "@startuml\nB\n@enduml\n");
        write_diagram(&src.join("a/readme.md"), "not a diagram");

        let summary = placeholder_converter()
            .convert_directory(&src, &out)
            .expect("batch");

        assert_eq!(summary.total, 2);
        assert_eq!(summary.converted, 2);
        assert!(summary.is_success());
        assert!(out.join("a/b/diagram1.drawio").is_file());
        assert!(out.join("top.drawio").is_file());
        assert!(!out.join("a/readme.drawio").exists());
    }

    #[test]
    fn test_convert_directory_missing_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = placeholder_converter()
            .convert_directory(&dir.path().join("ghost"), &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::SourceDirMissing(_)));
    }

    #[test]
    fn test_convert_directory_no_diagrams() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = dir.path().join("src");
        fs::create_dir_all(&src).expect("create src");
        fs::write(src.join("readme.md"), "x").expect("write file");

        let out = dir.path().join("out");
        let err = placeholder_converter()
            .convert_directory(&src, &out)
            .unwrap_err();
        assert!(matches!(err, ConvertError::NoDiagrams(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_ensure_output_extension() {
        assert_eq!(
            ensure_output_extension(Path::new("out/seq.drawio")),
            PathBuf::from("out/seq.drawio")
        );
        assert_eq!(
            ensure_output_extension(Path::new("out/seq.xml")),
            PathBuf::from("out/seq.drawio")
        );
        assert_eq!(
            ensure_output_extension(Path::new("out/seq")),
            PathBuf::from("out/seq.drawio")
        );
    }

    #[test]
    fn test_diagram_name() {
        assert_eq!(diagram_name(Path::new("a/b/auth-flow.puml")), "auth-flow");
        assert_eq!(diagram_name(Path::new("x.puml")), "x");
    }
}
