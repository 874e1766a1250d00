//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `fire-params.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use fire_params::{
    CaseStyle, DriverOptions, NamingConvention, RowTypeRule, ScopeStyle, Target, Variant,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "fire-params.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Requested artifacts, one per `[[variant]]` table.
    #[serde(rename = "variant")]
    pub variants: Vec<VariantConfig>,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,

    /// Whether to append value-asserting self-checks.
    pub self_check: bool,

    /// Whether to render variants in parallel.
    pub parallel: bool,

    /// Whether a naming failure skips only its own variant.
    pub isolate_naming_failures: bool,
}

/// One `[[variant]]` table.
///
/// Unset convention fields fall back to the preset for `case`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariantConfig {
    /// Variant name, used in diagnostics and as the default file stem.
    pub name: String,

    /// Target language (`rust` or `cpp`).
    pub target: Target,

    /// Output file relative to the output directory.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Case style of constants (`upper_snake` or `lower_snake`).
    #[serde(default)]
    pub case: Option<CaseStyle>,

    /// Case style of row fields.
    #[serde(default)]
    pub field_case: Option<CaseStyle>,

    /// Scope style (`flat`, `nested` or `reexport`).
    #[serde(default)]
    pub scope: Option<ScopeStyle>,

    /// Scope path; defaults to the document namespace.
    #[serde(default)]
    pub scope_path: Option<Vec<String>>,

    /// Suffix of table size constants.
    #[serde(default)]
    pub size_suffix: Option<String>,

    /// Suffix of row type names.
    #[serde(default)]
    pub row_suffix: Option<String>,

    /// Suffix stripped from table names before deriving row type names.
    #[serde(default)]
    pub row_strip_suffix: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            variants: vec![
                VariantConfig {
                    file: Some(PathBuf::from("params.rs")),
                    case: Some(CaseStyle::UpperSnake),
                    ..VariantConfig::new("rust_flat", Target::Rust)
                },
                VariantConfig {
                    file: Some(PathBuf::from("params.h")),
                    case: Some(CaseStyle::LowerSnake),
                    scope: Some(ScopeStyle::Nested),
                    ..VariantConfig::new("cpp_nested", Target::Cpp)
                },
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            self_check: false,
            parallel: true,
            isolate_naming_failures: false,
        }
    }
}

impl OutputConfig {
    /// Driver options for this output configuration.
    pub fn driver_options(&self) -> DriverOptions {
        DriverOptions {
            parallel: self.parallel,
            self_check: self.self_check,
            isolate_naming_failures: self.isolate_naming_failures,
        }
    }
}

impl VariantConfig {
    /// Create a variant config with every convention field unset.
    pub fn new(name: impl Into<String>, target: Target) -> Self {
        Self {
            name: name.into(),
            target,
            file: None,
            case: None,
            field_case: None,
            scope: None,
            scope_path: None,
            size_suffix: None,
            row_suffix: None,
            row_strip_suffix: None,
        }
    }

    /// Naming convention described by this table.
    pub fn convention(&self, namespace: &[String]) -> NamingConvention {
        let mut convention =
            NamingConvention::for_case(self.case.unwrap_or(CaseStyle::UpperSnake));

        if let Some(field_case) = self.field_case {
            convention = convention.with_field_case(field_case);
        }
        if let Some(scope) = self.scope {
            convention = convention.with_scope_style(scope);
        }
        convention = match &self.scope_path {
            Some(path) => convention.with_scope_path(path.iter().cloned()),
            None => convention.with_scope_path(namespace.iter().cloned()),
        };
        if let Some(suffix) = &self.size_suffix {
            convention = convention.with_table_size_suffix(suffix.clone());
        }
        if self.row_suffix.is_some() || self.row_strip_suffix.is_some() {
            let default = RowTypeRule::default();
            convention = convention.with_row_type_rule(RowTypeRule {
                strip_suffix: self.row_strip_suffix.clone(),
                suffix: self.row_suffix.clone().unwrap_or(default.suffix),
            });
        }
        convention
    }

    /// Driver variant for a document in `namespace`.
    pub fn to_variant(&self, namespace: &[String]) -> Variant {
        let variant = Variant::new(&self.name, self.target, self.convention(namespace));
        match &self.file {
            Some(file) => variant.with_file(file),
            None => variant,
        }
    }
}

impl Config {
    /// Check values serde cannot express.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.variants.is_empty() {
            return Err(ConfigError::invalid_value(
                "variant",
                "at least one [[variant]] is required",
            ));
        }

        let mut names = HashSet::new();
        for variant in &self.variants {
            if variant.name.is_empty() {
                return Err(ConfigError::invalid_value("variant.name", "must not be empty"));
            }
            if !names.insert(variant.name.as_str()) {
                return Err(ConfigError::invalid_value(
                    "variant.name",
                    format!("duplicate variant '{}'", variant.name),
                ));
            }
        }
        Ok(())
    }

    /// Driver variants for a document in `namespace`.
    pub fn variants(&self, namespace: &[String]) -> Vec<Variant> {
        self.variants
            .iter()
            .map(|variant| variant.to_variant(namespace))
            .collect()
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// An explicit path must exist. Without one, `fire-params.toml` in the
    /// working directory is used if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::not_found(path.to_path_buf()).into())
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILENAME),
        };

        if !config_path.exists() {
            tracing::debug!("no configuration file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path.clone(), e.to_string()))?;
        config.check()?;

        tracing::debug!(
            path = %config_path.display(),
            variants = config.variants.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(self_check) = args.self_check {
            config.output.self_check = self_check;
        }

        if let Some(parallel) = args.parallel {
            config.output.parallel = parallel;
        }

        if let Some(isolate) = args.isolate_naming_failures {
            config.output.isolate_naming_failures = isolate;
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# fire-params configuration file

[output]
# Output directory for generated files
dir = "./generated"

# Append value-asserting checks (#[cfg(test)] module for Rust, <stem>_check.cc for C++)
self_check = false

# Render variants in parallel
parallel = true

# Skip only the failing variant on identifier errors instead of aborting the run
isolate_naming_failures = false

# One [[variant]] per generated artifact.
#
#   target            rust | cpp
#   file              output file (default: <name>.rs / <name>.h)
#   case              upper_snake | lower_snake
#   field_case        case of row fields (default: lower_snake)
#   scope             flat | nested | reexport
#   scope_path        enclosing modules/namespaces (default: document namespace)
#   size_suffix       table size constant suffix (default: _SIZE / _size)
#   row_suffix        row type suffix (default: Row)
#   row_strip_suffix  stripped from table names before adding row_suffix

[[variant]]
name = "rust_flat"
target = "rust"
file = "params.rs"
case = "upper_snake"

[[variant]]
name = "cpp_nested"
target = "cpp"
file = "params.h"
case = "lower_snake"
scope = "nested"
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Self-check override.
    pub self_check: Option<bool>,

    /// Parallel rendering override.
    pub parallel: Option<bool>,

    /// Naming failure isolation override.
    pub isolate_naming_failures: Option<bool>,
}
