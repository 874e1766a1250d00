//! Source emitters.
//!
//! This module defines the [`Emitter`] trait that every target rendering
//! implements. An emitter turns a validated [`ParameterSet`] plus resolved
//! names into source text. Emitters are pure: the same inputs always yield
//! byte-identical output, and they never touch the filesystem.
//!
//! Supported targets:
//!
//! - [`RustEmitter`]: a Rust module of `pub const` items and row structs
//! - [`CppEmitter`]: a C++ header of `constexpr` values and `std::array` tables

mod cpp;
pub mod literal;
mod rust;

pub use cpp::CppEmitter;
pub use rust::RustEmitter;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::NamingError;
use crate::model::ParameterSet;
use crate::naming::{NameResolver, NamingConvention, ResolvedNames};

/// Trait for target source renderings.
///
/// Implement this trait to support a new output language. The resolver asks
/// [`Emitter::is_reserved`] for identifier legality; everything else about
/// the output is up to [`Emitter::emit`].
pub trait Emitter: Send + Sync {
    /// Short, lowercase identifier (e.g., "rust", "cpp").
    fn id(&self) -> &'static str;

    /// Human-readable name, used in error messages.
    fn name(&self) -> &'static str;

    /// File extension of the artifact, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Check if an otherwise well-formed identifier is reserved in the target.
    fn is_reserved(&self, identifier: &str) -> bool;

    /// Render the artifact.
    ///
    /// `names` holds one entry per parameter of `set`, in the same order.
    fn emit(
        &self,
        set: &ParameterSet,
        convention: &NamingConvention,
        names: &[ResolvedNames],
    ) -> String;

    /// Render a check that asserts every emitted value.
    ///
    /// `artifact_file` is the file name of the artifact being checked.
    fn emit_self_check(
        &self,
        set: &ParameterSet,
        names: &[ResolvedNames],
        artifact_file: &str,
    ) -> SelfCheck;
}

/// Generated code that checks an artifact's values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelfCheck {
    /// Appended to the artifact itself.
    Inline(String),
    /// A separate file next to the artifact.
    Companion { file_name: String, content: String },
}

/// Target language of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Rust module.
    Rust,
    /// C++ header.
    #[serde(alias = "c++")]
    Cpp,
}

static RUST_EMITTER: RustEmitter = RustEmitter;
static CPP_EMITTER: CppEmitter = CppEmitter;

impl Target {
    /// All supported targets.
    pub const ALL: [Target; 2] = [Target::Rust, Target::Cpp];

    /// The emitter rendering this target.
    pub fn emitter(&self) -> &'static dyn Emitter {
        match self {
            Target::Rust => &RUST_EMITTER,
            Target::Cpp => &CPP_EMITTER,
        }
    }

    /// File extension of this target's artifacts.
    pub fn file_extension(&self) -> &'static str {
        self.emitter().file_extension()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.emitter().id())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rust" | "rs" => Ok(Target::Rust),
            "cpp" | "c++" | "cxx" => Ok(Target::Cpp),
            other => Err(format!(
                "Unknown target '{}'. Valid targets are: rust, cpp",
                other
            )),
        }
    }
}

/// An emitted source artifact held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    /// Target the content is written in.
    pub target: Target,
    /// Complete file content.
    pub content: String,
}

/// Render a parameter set with already resolved names.
///
/// `names` must come from resolving `set` under `convention` for `target`.
pub fn emit(
    set: &ParameterSet,
    convention: &NamingConvention,
    names: &[ResolvedNames],
    target: Target,
) -> SourceArtifact {
    SourceArtifact {
        target,
        content: target.emitter().emit(set, convention, names),
    }
}

/// Resolve names and render a parameter set for one target.
///
/// The set is assumed valid; see [`validate`](crate::validator::validate).
pub fn render(
    set: &ParameterSet,
    convention: &NamingConvention,
    target: Target,
) -> Result<SourceArtifact, NamingError> {
    let names = NameResolver::new(convention, target.emitter()).resolve_all(set)?;
    Ok(emit(set, convention, &names, target))
}

// =============================================================================
// Shared Rendering Helpers
// =============================================================================

/// Indentation used by every emitter.
pub(crate) const INDENT: &str = "    ";

/// Line-oriented source buffer with indentation tracking.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    out: String,
    depth: usize,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current depth.
    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    /// Write an empty line, collapsing runs of them.
    pub(crate) fn blank(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

/// Documentation text for a declaration: `{description} - Unit: {unit}`.
///
/// Multi-line descriptions yield one entry per line.
pub(crate) fn doc_lines(description: Option<&str>, unit: Option<&str>) -> Vec<String> {
    let mut lines: Vec<String> = description
        .map(|d| d.lines().map(|l| l.trim_end().to_string()).collect())
        .unwrap_or_default();

    if let Some(unit) = unit {
        match lines.last_mut() {
            Some(last) => last.push_str(&format!(" - Unit: {}", unit)),
            None => lines.push(format!("Unit: {}", unit)),
        }
    }
    lines
}

/// First line of the artifact, shared by all targets.
pub(crate) fn header_comment(set: &ParameterSet) -> String {
    match set.namespace_str() {
        Some(namespace) => format!(
            "// @generated by fire-params from namespace `{}`. Do not edit.",
            namespace
        ),
        None => "// @generated by fire-params. Do not edit.".to_string(),
    }
}
