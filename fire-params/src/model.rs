//! Schema model for parameter sets.
//!
//! This module defines the in-memory representation of a parameter file:
//! an ordered [`ParameterSet`] of scalar and table [`Parameter`]s. The model
//! is a plain data container. Construction enforces the name invariants
//! (non-empty, identifier-safe, unique ignoring case); type and shape checks
//! belong to the [`validator`](crate::validator).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SchemaError;

// =============================================================================
// Types and Values
// =============================================================================

/// Declared type of a scalar parameter or table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// 64-bit IEEE 754 floating point.
    #[serde(alias = "float")]
    Float64,
    /// 64-bit signed integer.
    Integer,
    /// UTF-8 string.
    String,
    /// Boolean flag.
    Boolean,
}

impl ParamType {
    /// All supported types, in declaration order.
    pub const ALL: [ParamType; 4] = [
        ParamType::Float64,
        ParamType::Integer,
        ParamType::String,
        ParamType::Boolean,
    ];

    /// Look up a type by the name used in parameter documents.
    ///
    /// Accepts both `float` and `float64` for floating point values.
    pub fn from_name(name: &str) -> Option<ParamType> {
        match name {
            "float" | "float64" => Some(ParamType::Float64),
            "integer" => Some(ParamType::Integer),
            "string" => Some(ParamType::String),
            "boolean" => Some(ParamType::Boolean),
            _ => None,
        }
    }

    /// Canonical name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Float64 => "float64",
            ParamType::Integer => "integer",
            ParamType::String => "string",
            ParamType::Boolean => "boolean",
        }
    }

    /// Whether a value of the given kind may be stored under this type.
    ///
    /// Float slots accept integer literals (widened on emission).
    pub fn accepts(&self, kind: ValueKind) -> bool {
        matches!(
            (self, kind),
            (ParamType::Float64, ValueKind::Float)
                | (ParamType::Float64, ValueKind::Integer)
                | (ParamType::Integer, ValueKind::Integer)
                | (ParamType::String, ValueKind::String)
                | (ParamType::Boolean, ValueKind::Boolean)
        )
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime kind of a literal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Float,
    Integer,
    String,
    Boolean,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Float => "float",
            ValueKind::Integer => "integer",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
        })
    }
}

/// A literal parameter value.
///
/// Deserialized untagged so that YAML/JSON scalars map directly:
/// `true` is a boolean, `4` an integer, `55.0` a float, `"x"` a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Runtime kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
        }
    }

    /// Numeric value widened to f64, for floats and integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

// =============================================================================
// Parameters
// =============================================================================

/// A single named scalar value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarParameter {
    /// Logical parameter name (snake_case by convention).
    pub name: String,

    /// Declared type.
    #[serde(rename = "type")]
    pub ty: ParamType,

    /// Literal value.
    pub value: Value,

    /// Human-readable description, rendered as a doc comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Physical unit, rendered as a doc comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl ScalarParameter {
    /// Create a new scalar parameter.
    pub fn new(name: impl Into<String>, ty: ParamType, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            ty,
            value: value.into(),
            description: None,
            unit: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Column declaration of a table parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, becomes a field of the row type.
    pub name: String,

    /// Declared type of every cell in this column.
    #[serde(rename = "type")]
    pub ty: ParamType,

    /// Physical unit, rendered as a field doc comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            unit: None,
        }
    }

    /// Set the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// A named, ordered list of homogeneous rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableParameter {
    /// Logical parameter name.
    pub name: String,

    /// Column declarations in field order.
    pub columns: Vec<Column>,

    /// Rows in emission order; each row holds one value per column.
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,

    /// Human-readable description, rendered as a doc comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TableParameter {
    /// Create a new table with no rows.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
            description: None,
        }
    }

    /// Append a row.
    pub fn with_row(mut self, row: Vec<Value>) -> Self {
        self.rows.push(row);
        self
    }

    /// Replace all rows.
    pub fn with_rows(mut self, rows: Vec<Vec<Value>>) -> Self {
        self.rows = rows;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A parameter of either kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Parameter {
    Scalar(ScalarParameter),
    Table(TableParameter),
}

impl Parameter {
    /// Logical name of the parameter.
    pub fn name(&self) -> &str {
        match self {
            Parameter::Scalar(s) => &s.name,
            Parameter::Table(t) => &t.name,
        }
    }

    /// Description, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            Parameter::Scalar(s) => s.description.as_deref(),
            Parameter::Table(t) => t.description.as_deref(),
        }
    }

    /// Check if this is a table parameter.
    pub fn is_table(&self) -> bool {
        matches!(self, Parameter::Table(_))
    }
}

impl From<ScalarParameter> for Parameter {
    fn from(value: ScalarParameter) -> Self {
        Parameter::Scalar(value)
    }
}

impl From<TableParameter> for Parameter {
    fn from(value: TableParameter) -> Self {
        Parameter::Table(value)
    }
}

// =============================================================================
// Parameter Set
// =============================================================================

/// Ordered collection of uniquely named parameters.
///
/// Insertion order is emission order. Fields are private so the name
/// invariants established by [`ParameterSet::push`] cannot be bypassed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParameterSet {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    namespace: Vec<String>,
    parameters: Vec<Parameter>,
}

impl ParameterSet {
    /// Create an empty set without a namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set in the given dot-separated namespace.
    pub fn with_namespace(namespace: &str) -> Result<Self, SchemaError> {
        Ok(Self {
            namespace: parse_namespace(namespace)?,
            parameters: Vec::new(),
        })
    }

    /// Build a set from parameters, checking every name invariant.
    pub fn from_parameters(
        namespace: Option<&str>,
        parameters: impl IntoIterator<Item = Parameter>,
    ) -> Result<Self, SchemaError> {
        let mut set = match namespace {
            Some(ns) => Self::with_namespace(ns)?,
            None => Self::new(),
        };
        for parameter in parameters {
            set.push(parameter)?;
        }
        Ok(set)
    }

    /// Append a parameter.
    ///
    /// Fails if the name is empty, cannot seed an identifier, collides with
    /// an existing name ignoring case, or if a table has no columns.
    pub fn push(&mut self, parameter: impl Into<Parameter>) -> Result<(), SchemaError> {
        let parameter = parameter.into();
        let name = parameter.name();

        if name.is_empty() {
            return Err(SchemaError::EmptyName {
                index: self.parameters.len(),
            });
        }
        if let Err(reason) = check_identifier_seed(name) {
            return Err(SchemaError::InvalidName {
                name: name.to_string(),
                reason,
            });
        }
        if let Some(existing) = self
            .parameters
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
        {
            return Err(SchemaError::DuplicateName {
                name: name.to_string(),
                existing: existing.name().to_string(),
            });
        }
        if let Parameter::Table(table) = &parameter {
            if table.columns.is_empty() {
                return Err(SchemaError::NoColumns {
                    name: table.name.clone(),
                });
            }
        }

        self.parameters.push(parameter);
        Ok(())
    }

    /// Namespace segments (empty when the set has no namespace).
    pub fn namespace(&self) -> &[String] {
        &self.namespace
    }

    /// Namespace in dotted form, if any.
    pub fn namespace_str(&self) -> Option<String> {
        if self.namespace.is_empty() {
            None
        } else {
            Some(self.namespace.join("."))
        }
    }

    /// Parameters in emission order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Iterate over parameters in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.parameters.iter()
    }

    /// Look up a parameter by exact name.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the set holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}

/// Check that `name` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn check_identifier_seed(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err("name is empty".to_string()),
        Some(c) if c.is_ascii_digit() => {
            return Err("name must not start with a digit".to_string())
        }
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            return Err(format!("illegal character '{}'", c))
        }
        Some(_) => {}
    }
    if let Some(c) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(format!("illegal character '{}'", c));
    }
    Ok(())
}

/// Split a dotted namespace into identifier segments.
pub(crate) fn parse_namespace(namespace: &str) -> Result<Vec<String>, SchemaError> {
    let segments: Vec<String> = namespace.split('.').map(str::to_string).collect();
    if segments
        .iter()
        .any(|segment| check_identifier_seed(segment).is_err())
    {
        return Err(SchemaError::InvalidNamespace {
            namespace: namespace.to_string(),
        });
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn velocity() -> ScalarParameter {
        ScalarParameter::new("maximum_vehicle_velocity", ParamType::Float64, 55.0)
    }

    #[test]
    fn test_param_type_from_name() {
        assert_eq!(ParamType::from_name("float"), Some(ParamType::Float64));
        assert_eq!(ParamType::from_name("float64"), Some(ParamType::Float64));
        assert_eq!(ParamType::from_name("integer"), Some(ParamType::Integer));
        assert_eq!(ParamType::from_name("string"), Some(ParamType::String));
        assert_eq!(ParamType::from_name("boolean"), Some(ParamType::Boolean));
        assert_eq!(ParamType::from_name("table"), None);
        assert_eq!(ParamType::from_name("double"), None);
    }

    #[test]
    fn test_param_type_accepts_widening() {
        assert!(ParamType::Float64.accepts(ValueKind::Integer));
        assert!(ParamType::Float64.accepts(ValueKind::Float));
        assert!(!ParamType::Float64.accepts(ValueKind::String));
        assert!(!ParamType::Float64.accepts(ValueKind::Boolean));
        assert!(!ParamType::Integer.accepts(ValueKind::Float));
    }

    #[test]
    fn test_value_deserialize_untagged() {
        let values: Vec<Value> = serde_json::from_str(r#"[true, 4, 55.0, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Boolean(true),
                Value::Integer(4),
                Value::Float(55.0),
                Value::String("x".to_string()),
            ]
        );
    }

    #[test]
    fn test_push_preserves_order() {
        let mut set = ParameterSet::new();
        set.push(velocity()).unwrap();
        set.push(ScalarParameter::new("wheel_count", ParamType::Integer, 4i64))
            .unwrap();

        let names: Vec<_> = set.iter().map(Parameter::name).collect();
        assert_eq!(names, vec!["maximum_vehicle_velocity", "wheel_count"]);
        assert_eq!(set.len(), 2);
        assert!(set.get("wheel_count").is_some());
    }

    #[test]
    fn test_push_rejects_empty_name() {
        let mut set = ParameterSet::new();
        let err = set
            .push(ScalarParameter::new("", ParamType::Boolean, true))
            .unwrap_err();
        assert_eq!(err, SchemaError::EmptyName { index: 0 });
    }

    #[test]
    fn test_push_rejects_illegal_identifier() {
        let mut set = ParameterSet::new();
        let err = set
            .push(ScalarParameter::new("max-speed", ParamType::Float64, 1.0))
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidName { ref name, .. } if name == "max-speed"));

        let err = set
            .push(ScalarParameter::new("9lives", ParamType::Integer, 9i64))
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidName { .. }));
    }

    #[test]
    fn test_push_rejects_case_insensitive_duplicate() {
        let mut set = ParameterSet::new();
        set.push(velocity()).unwrap();
        let err = set
            .push(ScalarParameter::new(
                "MAXIMUM_VEHICLE_VELOCITY",
                ParamType::Float64,
                1.0,
            ))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateName {
                name: "MAXIMUM_VEHICLE_VELOCITY".to_string(),
                existing: "maximum_vehicle_velocity".to_string(),
            }
        );
    }

    #[test]
    fn test_push_rejects_table_without_columns() {
        let mut set = ParameterSet::new();
        let err = set.push(TableParameter::new("empty", vec![])).unwrap_err();
        assert_eq!(
            err,
            SchemaError::NoColumns {
                name: "empty".to_string()
            }
        );
    }

    #[test]
    fn test_namespace_parsing() {
        let set = ParameterSet::with_namespace("vehicle.dynamics").unwrap();
        assert_eq!(set.namespace(), &["vehicle", "dynamics"]);
        assert_eq!(set.namespace_str(), Some("vehicle.dynamics".to_string()));

        assert!(ParameterSet::with_namespace("vehicle..dynamics").is_err());
        assert!(ParameterSet::with_namespace("1vehicle").is_err());
        assert!(ParameterSet::with_namespace("").is_err());
        assert_eq!(ParameterSet::new().namespace_str(), None);
    }

    #[test]
    fn test_table_builder() {
        let table = TableParameter::new(
            "braking_table",
            vec![
                Column::new("velocity", ParamType::Float64).with_unit("m/s"),
                Column::new("distance", ParamType::Float64),
            ],
        )
        .with_row(vec![10.0.into(), 7.1.into()])
        .with_row(vec![20.0.into(), 28.6.into()])
        .with_description("Braking distances");

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns[0].unit.as_deref(), Some("m/s"));
        assert_eq!(Parameter::from(table).description(), Some("Braking distances"));
    }
}
