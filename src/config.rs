//! Simulator configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via AFDSIM_CONFIG or --config)
//! 3. Environment variables

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Simulator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interactive shell configuration.
    pub shell: ShellConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Loads configuration from `path` if given, then applies environment
    /// variable overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from a variable lookup.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        self.shell.apply_overrides(&var);
        self.output.apply_overrides(&var);
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(sep) = &self.output.separator {
            if sep.is_empty() {
                return Err(ConfigError::ValidationError(
                    "output.separator must not be empty (unset it to split per character)"
                        .to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Interactive shell configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Line history file.
    pub history_file: PathBuf,
    /// Directory sample files are written to.
    pub samples_dir: PathBuf,
}

impl Default for ShellConfig {
    fn default() -> Self {
        let history_file = std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".afdsim_history"))
            .unwrap_or_else(|_| ".afdsim_history".into());
        Self {
            history_file,
            samples_dir: PathBuf::from("."),
        }
    }
}

impl ShellConfig {
    fn apply_overrides(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("AFDSIM_HISTORY") {
            self.history_file = PathBuf::from(path);
        }

        if let Some(dir) = var("AFDSIM_SAMPLES_DIR") {
            self.samples_dir = PathBuf::from(dir);
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Colored output.
    pub color: bool,
    /// Separator between symbols in typed words. `None` reads one symbol
    /// per character.
    pub separator: Option<String>,
    /// Print definition diagnostics after loading or creating an automaton.
    pub show_lints: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            separator: None,
            show_lints: true,
        }
    }
}

impl OutputConfig {
    fn apply_overrides(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(color) = var("AFDSIM_COLOR") {
            self.color = color == "1" || color.to_lowercase() == "true";
        }

        if let Some(sep) = var("AFDSIM_SEPARATOR") {
            self.separator = Some(sep);
        }
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    IoError(PathBuf, std::io::Error),
    ParseError(PathBuf, String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, e) => {
                write!(f, "failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::ValidationError(msg) => {
                write!(f, "configuration validation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
