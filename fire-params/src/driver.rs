//! Generation driver.
//!
//! The driver runs the whole pipeline for one parameter set and a list of
//! convention variants: validate once, then resolve and emit each variant.
//! Every artifact is rendered in memory before anything is written, so a
//! failed generation never leaves output behind.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::emitter::{self, SelfCheck, Target};
use crate::error::{EmissionError, GenerateError, NamingError};
use crate::model::ParameterSet;
use crate::naming::{NameResolver, NamingConvention};
use crate::validator::validate;

/// One requested output: a target rendered under a naming convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant name, used in diagnostics.
    pub name: String,

    /// Target language.
    pub target: Target,

    /// Output file, relative to the sink's root.
    pub file: PathBuf,

    /// Naming convention applied to every parameter.
    pub convention: NamingConvention,
}

impl Variant {
    /// Create a variant writing `<name>.<ext>`.
    pub fn new(name: impl Into<String>, target: Target, convention: NamingConvention) -> Self {
        let name = name.into();
        let file = PathBuf::from(format!("{}.{}", name, target.file_extension()));
        Self {
            name,
            target,
            file,
            convention,
        }
    }

    /// Set the output file.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = file.into();
        self
    }

    fn file_name(&self) -> String {
        self.file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.to_string_lossy().into_owned())
    }
}

/// Driver options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverOptions {
    /// Emit variants in parallel (needs the `parallel` feature).
    pub parallel: bool,

    /// Add a value-asserting self-check to every artifact.
    pub self_check: bool,

    /// Skip a variant with a naming error instead of failing the run.
    pub isolate_naming_failures: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            self_check: false,
            isolate_naming_failures: false,
        }
    }
}

/// A rendered file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Variant the file belongs to.
    pub variant: String,
    /// Destination, relative to the sink's root.
    pub path: PathBuf,
    /// Complete file content.
    pub content: String,
}

/// A variant dropped because of a naming error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedVariant {
    pub variant: String,
    pub error: NamingError,
}

/// Result of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRun {
    /// Rendered files in variant order.
    pub outputs: Vec<OutputFile>,
    /// Variants skipped under `isolate_naming_failures`.
    pub skipped: Vec<SkippedVariant>,
}

impl GenerationRun {
    /// Check if every requested variant produced output.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Look up a rendered file by path.
    pub fn output(&self, path: impl AsRef<Path>) -> Option<&OutputFile> {
        self.outputs.iter().find(|file| file.path == path.as_ref())
    }
}

/// Destination for rendered files.
pub trait ArtifactSink {
    /// Write one file.
    fn write(&self, file: &OutputFile) -> Result<(), EmissionError>;
}

/// Runs the generation pipeline.
#[derive(Debug, Clone, Default)]
pub struct GeneratorDriver {
    options: DriverOptions,
}

impl GeneratorDriver {
    /// Create a driver with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a driver with the given options.
    pub fn with_options(options: DriverOptions) -> Self {
        Self { options }
    }

    /// Current options.
    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Validate the set and render every variant in memory.
    #[tracing::instrument(skip_all, fields(parameters = set.len(), variants = variants.len()))]
    pub fn generate(
        &self,
        set: &ParameterSet,
        variants: &[Variant],
    ) -> Result<GenerationRun, GenerateError> {
        validate(set)?;

        let rendered = self.render_all(set, variants);

        let mut run = GenerationRun::default();
        for (variant, result) in variants.iter().zip(rendered) {
            match result {
                Ok(files) => run.outputs.extend(files),
                Err(error) if self.options.isolate_naming_failures => {
                    tracing::warn!(variant = %variant.name, %error, "skipping variant");
                    run.skipped.push(SkippedVariant {
                        variant: variant.name.clone(),
                        error,
                    });
                }
                Err(source) => {
                    return Err(GenerateError::Naming {
                        variant: variant.name.clone(),
                        source,
                    })
                }
            }
        }
        check_distinct_outputs(&run.outputs)?;

        tracing::debug!(
            outputs = run.outputs.len(),
            skipped = run.skipped.len(),
            "generation complete"
        );
        Ok(run)
    }

    /// Generate, then write every rendered file to `sink`.
    ///
    /// Nothing is written unless generation succeeds. A transient write
    /// failure is retried once; files written before a failing write stay.
    pub fn run(
        &self,
        set: &ParameterSet,
        variants: &[Variant],
        sink: &dyn ArtifactSink,
    ) -> Result<GenerationRun, GenerateError> {
        let run = self.generate(set, variants)?;

        for file in &run.outputs {
            write_with_retry(sink, file).map_err(|source| GenerateError::Emission {
                variant: file.variant.clone(),
                source,
            })?;
            tracing::debug!(path = %file.path.display(), "wrote artifact");
        }
        Ok(run)
    }

    #[cfg(feature = "parallel")]
    fn render_all(
        &self,
        set: &ParameterSet,
        variants: &[Variant],
    ) -> Vec<Result<Vec<OutputFile>, NamingError>> {
        use rayon::prelude::*;

        if self.options.parallel {
            variants
                .par_iter()
                .map(|variant| self.render_variant(set, variant))
                .collect()
        } else {
            variants
                .iter()
                .map(|variant| self.render_variant(set, variant))
                .collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn render_all(
        &self,
        set: &ParameterSet,
        variants: &[Variant],
    ) -> Vec<Result<Vec<OutputFile>, NamingError>> {
        variants
            .iter()
            .map(|variant| self.render_variant(set, variant))
            .collect()
    }

    fn render_variant(
        &self,
        set: &ParameterSet,
        variant: &Variant,
    ) -> Result<Vec<OutputFile>, NamingError> {
        let target = variant.target.emitter();
        let names = NameResolver::new(&variant.convention, target).resolve_all(set)?;
        let mut content = emitter::emit(set, &variant.convention, &names, variant.target).content;
        let mut files = Vec::with_capacity(2);

        if self.options.self_check {
            match target.emit_self_check(set, &names, &variant.file_name()) {
                SelfCheck::Inline(check) => {
                    content.push('\n');
                    content.push_str(&check);
                }
                SelfCheck::Companion {
                    file_name,
                    content: check,
                } => files.push(OutputFile {
                    variant: variant.name.clone(),
                    path: variant.file.with_file_name(file_name),
                    content: check,
                }),
            }
        }

        files.insert(
            0,
            OutputFile {
                variant: variant.name.clone(),
                path: variant.file.clone(),
                content,
            },
        );
        tracing::trace!(variant = %variant.name, target = %variant.target, "rendered variant");
        Ok(files)
    }
}

/// Every rendered file, self-check companions included, needs its own path.
fn check_distinct_outputs(outputs: &[OutputFile]) -> Result<(), GenerateError> {
    let mut seen: HashMap<&Path, &str> = HashMap::new();
    for file in outputs {
        if let Some(first) = seen.insert(file.path.as_path(), &file.variant) {
            return Err(GenerateError::DuplicateOutput {
                first: first.to_string(),
                second: file.variant.clone(),
                file: file.path.clone(),
            });
        }
    }
    Ok(())
}

fn write_with_retry(sink: &dyn ArtifactSink, file: &OutputFile) -> Result<(), EmissionError> {
    match sink.write(file) {
        Err(error) if error.is_transient() => {
            tracing::warn!(path = %file.path.display(), %error, "write failed, retrying once");
            sink.write(file)
        }
        result => result,
    }
}
