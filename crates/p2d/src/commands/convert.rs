//! `p2d convert` command implementation.

use std::path::PathBuf;

use clap::Args;

use p2d_config::{CliSettings, Config};
use p2d_convert::{ConvertError, Converter, ensure_output_extension};
use p2d_render::{DiagramFormat, Renderer};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Input .puml file or directory tree.
    input: PathBuf,

    /// Output .drawio file or directory (mirrors the input tree).
    output: PathBuf,

    /// Output image format: svg or png (overrides config).
    #[arg(long)]
    format: Option<String>,

    /// Renderer executable (overrides config).
    #[arg(long)]
    renderer: Option<String>,

    /// Path to configuration file (default: auto-discover p2d.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ConvertArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            renderer: self.renderer.clone(),
            format: self.format.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let renderer_config = &config.renderer_resolved;

        let format = DiagramFormat::parse(&renderer_config.format).ok_or_else(|| {
            CliError::Validation(format!(
                "unsupported image format: {}",
                renderer_config.format
            ))
        })?;
        let renderer = Renderer::new(&renderer_config.command)
            .args(renderer_config.args.clone())
            .fallback_command(renderer_config.fallback_command.clone());
        let converter = Converter::new(renderer, format);

        if self.input.is_file() {
            self.convert_single(&converter, &output)
        } else if self.input.is_dir() {
            self.convert_batch(&converter, &output)
        } else {
            Err(CliError::Convert(ConvertError::MissingInput(
                self.input.clone(),
            )))
        }
    }

    /// Convert one diagram file.
    fn convert_single(&self, converter: &Converter, output: &Output) -> Result<(), CliError> {
        let dest = ensure_output_extension(&self.output);
        converter.convert_file(&self.input, &dest)?;
        output.success(&format!(
            "Converted {} -> {}",
            self.input.display(),
            dest.display()
        ));
        Ok(())
    }

    /// Convert a directory tree, reporting per-file failures.
    fn convert_batch(&self, converter: &Converter, output: &Output) -> Result<(), CliError> {
        output.info(&format!("Source: {}", self.input.display()));
        output.info(&format!("Output: {}", self.output.display()));

        let summary = converter.convert_directory(&self.input, &self.output)?;
        for failure in &summary.failures {
            output.error(&format!("{}: {}", failure.input.display(), failure.error));
        }

        if summary.is_success() {
            output.success(&format!(
                "Converted {} of {} diagram files",
                summary.converted, summary.total
            ));
            Ok(())
        } else {
            output.warning(&format!(
                "Converted {} of {} diagram files",
                summary.converted, summary.total
            ));
            Err(CliError::Validation(format!(
                "{} of {} files failed to convert",
                summary.failures.len(),
                summary.total
            )))
        }
    }
}
