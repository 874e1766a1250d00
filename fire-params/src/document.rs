//! Parameter documents.
//!
//! A parameter document is the on-disk form of a [`ParameterSet`]: YAML or
//! JSON with a schema version, a dotted namespace and a list of parameters.
//!
//! ```yaml
//! schema_version: "1.0"
//! namespace: vehicle.dynamics
//! parameters:
//!   - name: maximum_vehicle_velocity
//!     type: float
//!     unit: m/s
//!     description: Maximum velocity
//!     value: 55.0
//!   - name: braking_distance_table
//!     type: table
//!     columns:
//!       - { name: velocity, type: float, unit: m/s }
//!       - { name: braking_distance, type: float, unit: m }
//!     rows:
//!       - [10.0, 7.1]
//! ```
//!
//! Documents are decoded loosely (type names are plain strings) so that an
//! unknown type is reported with the parameter it belongs to.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DocumentError, ValidationError};
use crate::model::{Column, ParamType, Parameter, ParameterSet, ScalarParameter, TableParameter, Value};

/// Type name marking a table parameter.
const TABLE_TYPE: &str = "table";

/// A decoded parameter document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDocument {
    /// Document schema version.
    pub schema_version: String,

    /// Dot-separated namespace (e.g., `vehicle.dynamics`).
    pub namespace: String,

    /// Parameters in declaration order.
    pub parameters: Vec<RawParameter>,
}

/// A parameter as written in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawParameter {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Scalar value; required unless the type is `table`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Table columns; required for tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<RawColumn>>,

    /// Table rows; required for tables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<Value>>>,
}

/// A table column as written in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawColumn {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl ParameterDocument {
    /// Decode a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Decode a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read and decode a document, choosing the format by file extension.
    ///
    /// `.yaml` and `.yml` are YAML; `.json` and `.params` are JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let decode: fn(&str) -> Result<Self, DocumentError> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            Some("json") | Some("params") => Self::from_json_str,
            _ => {
                return Err(DocumentError::UnknownFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let source = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded parameter document");
        decode(&source)
    }

    /// Replace the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Canonical pretty-printed JSON form.
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Convert into a [`ParameterSet`].
    ///
    /// Checks the namespace, type names, required fields and the name
    /// invariants of the set. Value checks are left to the validator.
    pub fn to_parameter_set(&self) -> Result<ParameterSet, DocumentError> {
        let mut set = ParameterSet::with_namespace(&self.namespace)?;
        for raw in &self.parameters {
            set.push(raw.to_parameter()?)?;
        }
        Ok(set)
    }
}

impl RawParameter {
    /// Convert into a typed [`Parameter`].
    pub fn to_parameter(&self) -> Result<Parameter, DocumentError> {
        if self.ty == TABLE_TYPE {
            return self.to_table().map(Parameter::Table);
        }

        let ty = ParamType::from_name(&self.ty).ok_or_else(|| ValidationError::UnsupportedType {
            parameter: self.name.clone(),
            found: self.ty.clone(),
            table_allowed: true,
        })?;
        let value = self.value.clone().ok_or_else(|| DocumentError::MissingField {
            parameter: self.name.clone(),
            field: "value",
        })?;

        Ok(Parameter::Scalar(ScalarParameter {
            name: self.name.clone(),
            ty,
            value,
            description: self.description.clone(),
            unit: self.unit.clone(),
        }))
    }

    fn to_table(&self) -> Result<TableParameter, DocumentError> {
        let raw_columns = self.columns.as_ref().ok_or_else(|| DocumentError::MissingField {
            parameter: self.name.clone(),
            field: "columns",
        })?;
        let rows = self.rows.clone().ok_or_else(|| DocumentError::MissingField {
            parameter: self.name.clone(),
            field: "rows",
        })?;

        let columns = raw_columns
            .iter()
            .map(|raw| -> Result<Column, DocumentError> {
                let ty =
                    ParamType::from_name(&raw.ty).ok_or_else(|| ValidationError::UnsupportedType {
                        parameter: self.name.clone(),
                        found: raw.ty.clone(),
                        table_allowed: false,
                    })?;
                Ok(Column {
                    name: raw.name.clone(),
                    ty,
                    unit: raw.unit.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TableParameter {
            name: self.name.clone(),
            columns,
            rows,
            description: self.description.clone(),
        })
    }
}

/// Load a document and convert it into a [`ParameterSet`].
pub fn load_parameter_set(path: impl AsRef<Path>) -> Result<ParameterSet, DocumentError> {
    ParameterDocument::load(path)?.to_parameter_set()
}
