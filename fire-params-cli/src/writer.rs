//! File writer for generated artifacts.
//!
//! [`FileWriter`] is the on-disk [`ArtifactSink`]: it resolves each rendered
//! file against the output directory, skips files whose content is already
//! current, and supports dry-run mode.

use fire_params::{ArtifactSink, EmissionError, OutputFile};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Result of a write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written successfully.
    Written {
        /// Path to the written file.
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// File already held the rendered content and was left untouched.
    Unchanged {
        /// Path to the existing file.
        path: PathBuf,
    },
    /// Dry run - content was not written.
    DryRun {
        /// Content that would have been written.
        content: String,
        /// Path where content would have been written.
        path: PathBuf,
    },
}

/// Artifact writer rooted at an output directory.
#[derive(Debug)]
pub struct FileWriter {
    dir: PathBuf,
    dry_run: bool,
    results: Mutex<Vec<WriteResult>>,
}

impl FileWriter {
    /// Create a writer rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            dir: dir.into(),
            dry_run,
            results: Mutex::new(Vec::new()),
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Check if running in dry-run mode.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Write `content` to `relative` under the output directory.
    ///
    /// In dry-run mode, returns the content without writing.
    pub fn write_file(&self, relative: &Path, content: &str) -> Result<WriteResult, EmissionError> {
        let path = self.dir.join(relative);

        if self.dry_run {
            return Ok(WriteResult::DryRun {
                content: content.to_string(),
                path,
            });
        }

        if is_current(&path, content) {
            return Ok(WriteResult::Unchanged { path });
        }

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| EmissionError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        std::fs::write(&path, content).map_err(|e| EmissionError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        Ok(WriteResult::Written {
            path,
            bytes: content.len(),
        })
    }

    /// Results of every write through the [`ArtifactSink`] interface, in order.
    pub fn take_results(&self) -> Vec<WriteResult> {
        std::mem::take(&mut *self.results.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl ArtifactSink for FileWriter {
    fn write(&self, file: &OutputFile) -> Result<(), EmissionError> {
        let result = self.write_file(&file.path, &file.content)?;
        tracing::trace!(variant = %file.variant, path = %result.path().display(), "artifact handled");
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result);
        Ok(())
    }
}

impl WriteResult {
    /// Get the path associated with this result.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. } => path,
            WriteResult::Unchanged { path } => path,
            WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Check if the file was written (not unchanged, not dry-run).
    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }

    /// Get the number of bytes written (0 unless written).
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            WriteResult::Unchanged { .. } | WriteResult::DryRun { .. } => 0,
        }
    }
}

/// Rendered files whose on-disk copy under `dir` is missing or differs.
pub fn find_stale(dir: &Path, outputs: &[OutputFile]) -> Vec<PathBuf> {
    outputs
        .iter()
        .map(|file| dir.join(&file.path))
        .zip(outputs)
        .filter(|(path, file)| !is_current(path, &file.content))
        .map(|(path, _)| path)
        .collect()
}

fn is_current(path: &Path, content: &str) -> bool {
    std::fs::read_to_string(path).is_ok_and(|existing| existing == content)
}
