//! Conversion error types.

use std::path::PathBuf;

/// Conversion error.
///
/// Renderer failures are not represented here: they are recovered inside the
/// pipeline by embedding a placeholder image.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Input path does not exist.
    #[error("input not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Single-file input does not carry the diagram extension.
    #[error("input file must have the .puml extension: {}", .0.display())]
    WrongExtension(PathBuf),

    /// Input file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    ReadInput {
        /// Input file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Output file or its parent directory could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    WriteOutput {
        /// Output file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Batch source directory does not exist.
    #[error("source directory not found: {}", .0.display())]
    SourceDirMissing(PathBuf),

    /// Batch source directory contains no diagram files.
    #[error("no .puml files found in {}", .0.display())]
    NoDiagrams(PathBuf),
}
