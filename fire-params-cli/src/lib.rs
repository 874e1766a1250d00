//! # fire-params-cli
//!
//! CLI library for generating Rust and C++ parameter constants from
//! YAML/JSON parameter documents.
//!
//! This crate provides the core functionality for the `fire-params` CLI tool:
//! configuration loading, variant construction, artifact writing and
//! freshness checks.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`generator`] - Document loading and multi-variant generation
//! - [`writer`] - File output, dry-run support and staleness detection
//! - [`error`] - Error types and handling

pub mod config;
pub mod error;
pub mod generator;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager, VariantConfig};
pub use error::{CliError, CliResult};
pub use generator::ParamsGenerator;
pub use writer::{FileWriter, WriteResult};
