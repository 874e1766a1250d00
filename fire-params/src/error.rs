//! Error types for the generation pipeline.
//!
//! Each stage of the pipeline has its own error enum so callers can tell
//! malformed input (schema, validation) apart from convention problems
//! (naming) and environmental failures (emission). Every error names the
//! offending parameter and, where it applies, the row index.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::{ParamType, ValueKind};

/// Malformed or colliding parameter definitions, detected while the
/// [`ParameterSet`](crate::model::ParameterSet) is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A parameter was declared with an empty name.
    #[error("Parameter at index {index} has an empty name")]
    EmptyName { index: usize },

    /// A parameter name cannot seed an identifier.
    #[error("Parameter '{name}' is not a valid identifier: {reason}")]
    InvalidName { name: String, reason: String },

    /// Two parameters share a name once case is ignored.
    #[error("Duplicate parameter name: '{name}' collides with '{existing}'")]
    DuplicateName { name: String, existing: String },

    /// A table declares no columns.
    #[error("Table parameter '{name}' must have at least one column")]
    NoColumns { name: String },

    /// The namespace is not a dot-separated list of identifiers.
    #[error(
        "Invalid namespace format: {namespace}. \
         Namespace must be dot-separated identifiers (e.g., 'vehicle.dynamics')"
    )]
    InvalidNamespace { namespace: String },
}

/// Where inside a parameter a validation failure was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// The value of a scalar parameter.
    Value,
    /// A column declaration of a table.
    Column { index: usize },
    /// A single cell of a table.
    Cell { row: usize, column: usize },
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Value => write!(f, "value"),
            Position::Column { index } => write!(f, "column {}", index),
            Position::Cell { row, column } => write!(f, "row {} column {}", row, column),
        }
    }
}

/// Type and shape problems, detected before any code is emitted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A declared type name is not one of the supported kinds.
    #[error(
        "Parameter '{parameter}' has invalid type: {found}. \
         Valid types are: {}",
        valid_type_list(.table_allowed)
    )]
    UnsupportedType {
        parameter: String,
        found: String,
        table_allowed: bool,
    },

    /// A value's runtime kind does not match the declared type.
    #[error("Parameter '{parameter}' {at} must be {expected} but found {found}")]
    TypeMismatch {
        parameter: String,
        at: Position,
        expected: ParamType,
        found: ValueKind,
    },

    /// A column name cannot seed an identifier.
    #[error("Table parameter '{parameter}' {at} has invalid name '{column}'")]
    InvalidColumnName {
        parameter: String,
        at: Position,
        column: String,
    },

    /// Two columns of the same table share a name once case is ignored.
    #[error("Table parameter '{parameter}' declares column '{column}' more than once")]
    DuplicateColumn { parameter: String, column: String },

    /// A row has a different number of values than the table has columns.
    #[error(
        "Table parameter '{parameter}' row {row} has {found} columns but expected {expected}"
    )]
    RowArity {
        parameter: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A float is NaN or infinite and has no literal form.
    #[error("Parameter '{parameter}' {at} is not a finite number")]
    NonFiniteFloat { parameter: String, at: Position },

    /// An integer in a float slot would change when widened to f64.
    #[error("Parameter '{parameter}' {at} integer {value} cannot be represented exactly as float")]
    LossyWidening {
        parameter: String,
        at: Position,
        value: i64,
    },

    /// Two parameters would produce the same identifier under some convention.
    #[error(
        "Parameter '{parameter}' collides with '{other}' on derived identifier '{identifier}'"
    )]
    IdentifierCollision {
        parameter: String,
        other: String,
        identifier: String,
    },
}

fn valid_type_list(table_allowed: &bool) -> &'static str {
    if *table_allowed {
        "boolean, float, integer, string, table"
    } else {
        "boolean, float, integer, string"
    }
}

impl ValidationError {
    /// Name of the parameter the error was reported for.
    pub fn parameter(&self) -> &str {
        match self {
            ValidationError::UnsupportedType { parameter, .. }
            | ValidationError::TypeMismatch { parameter, .. }
            | ValidationError::InvalidColumnName { parameter, .. }
            | ValidationError::DuplicateColumn { parameter, .. }
            | ValidationError::RowArity { parameter, .. }
            | ValidationError::NonFiniteFloat { parameter, .. }
            | ValidationError::LossyWidening { parameter, .. }
            | ValidationError::IdentifierCollision { parameter, .. } => parameter,
        }
    }

    /// Row index of the failure, when it concerns a table row.
    pub fn row(&self) -> Option<usize> {
        match self {
            ValidationError::RowArity { row, .. } => Some(*row),
            ValidationError::TypeMismatch {
                at: Position::Cell { row, .. },
                ..
            }
            | ValidationError::NonFiniteFloat {
                at: Position::Cell { row, .. },
                ..
            }
            | ValidationError::LossyWidening {
                at: Position::Cell { row, .. },
                ..
            } => Some(*row),
            _ => None,
        }
    }
}

/// A resolved identifier is not legal in the target rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// The identifier is a reserved word of the target language.
    #[error("Parameter '{parameter}' resolves to '{identifier}', a reserved word in {target}")]
    Reserved {
        parameter: String,
        identifier: String,
        target: &'static str,
    },

    /// The identifier starts with a digit.
    #[error("Parameter '{parameter}' resolves to '{identifier}', which starts with a digit")]
    LeadingDigit {
        parameter: String,
        identifier: String,
    },

    /// The identifier is empty or contains characters no identifier may hold.
    #[error("Parameter '{parameter}' resolves to '{identifier}', which is not an identifier")]
    NotAnIdentifier {
        parameter: String,
        identifier: String,
    },

    /// Two declarations of one artifact resolve to the same identifier.
    #[error("Parameter '{parameter}' resolves to '{identifier}', already used by '{other}'")]
    Collision {
        parameter: String,
        other: String,
        identifier: String,
    },

    /// A scope path segment is not a legal scope name.
    #[error("Scope segment '{segment}' is not a legal scope name in {target}")]
    InvalidScope {
        segment: String,
        target: &'static str,
    },
}

impl NamingError {
    /// Name of the parameter the error was reported for, if any.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            NamingError::Reserved { parameter, .. }
            | NamingError::LeadingDigit { parameter, .. }
            | NamingError::NotAnIdentifier { parameter, .. }
            | NamingError::Collision { parameter, .. } => Some(parameter),
            NamingError::InvalidScope { .. } => None,
        }
    }
}

/// I/O failure while writing an artifact.
///
/// Always environmental, never a logic defect in the parameter set.
#[derive(Debug, Error)]
pub enum EmissionError {
    /// Failed to create the output directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the artifact file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EmissionError {
    /// Target path of the failed write.
    pub fn path(&self) -> &PathBuf {
        match self {
            EmissionError::CreateDir { path, .. } | EmissionError::WriteFile { path, .. } => path,
        }
    }

    /// Whether a single retry of the write is worthwhile.
    pub fn is_transient(&self) -> bool {
        use std::io::ErrorKind;

        let source = match self {
            EmissionError::CreateDir { source, .. } | EmissionError::WriteFile { source, .. } => {
                source
            }
        };
        !matches!(
            source.kind(),
            ErrorKind::PermissionDenied | ErrorKind::NotFound | ErrorKind::InvalidInput
        )
    }
}

/// Failure to read or decode a parameter document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML for the parameter schema.
    #[error("Invalid YAML parameter document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document is not valid JSON for the parameter schema.
    #[error("Invalid JSON parameter document: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension does not name a supported format.
    #[error("Unsupported parameter file extension: {path} (expected .yaml, .yml, .json or .params)")]
    UnknownFormat { path: PathBuf },

    /// A field required for this kind of parameter is missing.
    #[error("Parameter '{parameter}' must have '{field}' field")]
    MissingField {
        parameter: String,
        field: &'static str,
    },

    /// The decoded parameters do not form a valid schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A declared type is not supported.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Failure of a whole generation run, annotated with the variant at fault.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The parameter set failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A convention variant produced an illegal identifier.
    #[error("Naming failed for variant '{variant}': {source}")]
    Naming {
        variant: String,
        #[source]
        source: NamingError,
    },

    /// Writing a variant's artifact failed.
    #[error("Failed to write variant '{variant}': {source}")]
    Emission {
        variant: String,
        #[source]
        source: EmissionError,
    },

    /// Two variants would write the same output file.
    #[error("Variants '{first}' and '{second}' both write {file}")]
    DuplicateOutput {
        first: String,
        second: String,
        file: PathBuf,
    },
}

impl GenerateError {
    /// Name of the variant at fault, if the error is variant specific.
    pub fn variant(&self) -> Option<&str> {
        match self {
            GenerateError::Naming { variant, .. } | GenerateError::Emission { variant, .. } => {
                Some(variant)
            }
            GenerateError::DuplicateOutput { second, .. } => Some(second),
            GenerateError::Validation(_) => None,
        }
    }
}
