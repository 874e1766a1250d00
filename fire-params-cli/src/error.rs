//! Error types for the CLI.
//!
//! Library errors are wrapped as-is so their parameter, row and variant
//! context reaches the user unchanged.

use std::path::PathBuf;
use thiserror::Error;

use fire_params::{DocumentError, EmissionError, GenerateError, ValidationError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Exit code reported when generated artifacts are out of date.
pub const STALE_EXIT_CODE: u8 = 2;

/// Exit code reported when the parameters fail validation.
pub const VALIDATION_EXIT_CODE: u8 = 2;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error loading the parameter document.
    #[error("Failed to load parameters: {0}")]
    Document(#[from] DocumentError),

    /// Parameter values failed validation.
    #[error("Invalid parameters: {0}")]
    Validation(#[from] ValidationError),

    /// Error during generation.
    #[error("Failed to generate artifacts: {0}")]
    Generate(#[from] GenerateError),

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] EmissionError),

    /// Artifacts on disk differ from a fresh rendering.
    #[error("{} artifact(s) out of date: {}", .files.len(), format_paths(.files))]
    Stale { files: Vec<PathBuf> },

    /// Refusing to overwrite an existing file.
    #[error("File already exists: {path} (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Stale { .. } => STALE_EXIT_CODE,
            _ if self.is_validation() => VALIDATION_EXIT_CODE,
            _ => 1,
        }
    }

    /// Check if the parameters themselves are invalid, whichever layer
    /// reported it.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CliError::Validation(_)
                | CliError::Document(DocumentError::Validation(_))
                | CliError::Generate(GenerateError::Validation(_))
        )
    }
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create a not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::NotFound { path }
    }

    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
