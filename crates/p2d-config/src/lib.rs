//! Configuration management for p2d.
//!
//! Parses `p2d.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Renderer command strings support `$VAR`/`${VAR}` environment variable
//! expansion; an unset variable is a load error.
//!
//! Expanded fields:
//! - `renderer.command`
//! - `renderer.args`
//! - `renderer.fallback_command`

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "p2d.toml";

/// Image formats the renderer configuration accepts.
const SUPPORTED_FORMATS: &[&str] = &["svg", "png"];

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override renderer executable.
    pub renderer: Option<String>,
    /// Override output image format.
    pub format: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Renderer configuration as parsed from TOML.
    renderer: RendererConfigRaw,

    /// Resolved renderer configuration (set after loading).
    #[serde(skip)]
    pub renderer_resolved: RendererConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw renderer configuration as parsed from TOML (all fields optional).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RendererConfigRaw {
    command: Option<String>,
    args: Option<Vec<String>>,
    format: Option<String>,
    fallback_command: Option<Vec<String>>,
}

/// Resolved renderer configuration.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Renderer executable invoked directly with the diagram on stdin.
    pub command: String,
    /// Extra arguments placed before the format and pipe flags.
    pub args: Vec<String>,
    /// Output image format (`svg` or `png`).
    pub format: String,
    /// Fallback argv template run when the direct invocation fails.
    ///
    /// `{input}`, `{output-dir}` and `{format}` placeholders are substituted
    /// at invocation time. Empty disables the fallback attempt.
    pub fallback_command: Vec<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: "plantuml".to_owned(),
            args: Vec::new(),
            format: "svg".to_owned(),
            fallback_command: Vec::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., `renderer.command`).
        field: String,
        /// Error message (e.g., "PLANTUML_HOME not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `p2d.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(renderer) = &settings.renderer {
            self.renderer_resolved.command.clone_from(renderer);
        }
        if let Some(format) = &settings.format {
            self.renderer_resolved.format.clone_from(format);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse configuration from TOML text and resolve it.
    fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.resolve()?;
        Ok(config)
    }

    /// Fill the resolved view from the raw TOML values, expanding
    /// environment variables.
    fn resolve(&mut self) -> Result<(), ConfigError> {
        let defaults = RendererConfig::default();
        self.renderer_resolved = RendererConfig {
            command: expand_env(
                self.renderer.command.as_ref().unwrap_or(&defaults.command),
                "renderer.command",
            )?,
            args: expand_env_all(
                self.renderer.args.as_deref().unwrap_or(&defaults.args),
                "renderer.args",
            )?,
            format: self
                .renderer
                .format
                .clone()
                .unwrap_or_else(|| defaults.format.clone()),
            fallback_command: expand_env_all(
                self.renderer
                    .fallback_command
                    .as_deref()
                    .unwrap_or(&defaults.fallback_command),
                "renderer.fallback_command",
            )?,
        };
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid
    /// values. Called automatically during [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let renderer = &self.renderer_resolved;
        if renderer.command.is_empty() {
            return Err(ConfigError::Validation(
                "renderer.command cannot be empty".to_owned(),
            ));
        }
        if !SUPPORTED_FORMATS.contains(&renderer.format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "renderer.format must be one of {SUPPORTED_FORMATS:?}, got '{}'",
                renderer.format
            )));
        }
        if !renderer.fallback_command.is_empty()
            && !renderer
                .fallback_command
                .iter()
                .any(|arg| arg.contains("{input}"))
        {
            return Err(ConfigError::Validation(
                "renderer.fallback_command must reference the {input} placeholder".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Expand `$VAR`/`${VAR}` references in one config string.
fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: e.to_string(),
        })
}

/// Expand environment variables in every element of a string list.
fn expand_env_all(values: &[String], field: &str) -> Result<Vec<String>, ConfigError> {
    values
        .iter()
        .map(|value| expand_env(value, field))
        .collect()
}
