//! Document loading and multi-variant generation.
//!
//! [`ParamsGenerator`] ties a loaded parameter document to the library
//! driver: it builds the configured variants against the document's
//! namespace and routes rendered files to a [`FileWriter`].

use fire_params::{
    validate, GenerationRun, GeneratorDriver, ParameterDocument, ParameterSet,
};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::CliResult;
use crate::writer::{self, FileWriter};

/// A loaded and schema-checked parameter document.
#[derive(Debug, Clone)]
pub struct ParamsGenerator {
    document: ParameterDocument,
    set: ParameterSet,
}

impl ParamsGenerator {
    /// Load a YAML or JSON document, optionally overriding its namespace.
    pub fn load(input: &Path, namespace: Option<&str>) -> CliResult<Self> {
        let mut document = ParameterDocument::load(input)?;
        if let Some(namespace) = namespace {
            document = document.with_namespace(namespace);
        }
        Self::from_document(document)
    }

    /// Wrap an already decoded document.
    pub fn from_document(document: ParameterDocument) -> CliResult<Self> {
        let set = document.to_parameter_set()?;
        Ok(Self { document, set })
    }

    /// The decoded document.
    pub fn document(&self) -> &ParameterDocument {
        &self.document
    }

    /// The parameter set built from the document.
    pub fn set(&self) -> &ParameterSet {
        &self.set
    }

    /// Run the value checks without rendering anything.
    pub fn validate(&self) -> CliResult<()> {
        validate(&self.set)?;
        Ok(())
    }

    /// Write the canonical JSON form of the document to `path`.
    pub fn emit_json(&self, path: &Path) -> CliResult<()> {
        self.validate()?;
        let json = self.document.to_json_string()?;
        std::fs::write(path, json + "\n")?;
        Ok(())
    }

    /// Render every configured variant in memory.
    pub fn generate(&self, config: &Config) -> CliResult<GenerationRun> {
        let driver = GeneratorDriver::with_options(config.output.driver_options());
        let run = driver.generate(&self.set, &config.variants(self.set.namespace()))?;
        Ok(run)
    }

    /// Render every configured variant and write it through `writer`.
    pub fn write(&self, config: &Config, writer: &FileWriter) -> CliResult<GenerationRun> {
        let driver = GeneratorDriver::with_options(config.output.driver_options());
        let run = driver.run(&self.set, &config.variants(self.set.namespace()), writer)?;
        Ok(run)
    }

    /// Artifacts under the configured output directory that are missing
    /// or differ from a fresh rendering.
    pub fn stale(&self, config: &Config) -> CliResult<Vec<PathBuf>> {
        let run = self.generate(config)?;
        Ok(writer::find_stale(&config.output.dir, &run.outputs))
    }
}
