//! Parameter set validation.
//!
//! Validation runs once per generation, before any naming convention is
//! applied. Checks run in a fixed order and the first failure wins:
//!
//! 1. Type legality: scalar values match their declared type, column names
//!    are identifier-safe and unique within their table.
//! 2. Table homogeneity: row arity and per-cell kinds match the columns.
//! 3. Table size: a row count is never negative, so zero-row tables pass
//!    and still get a size constant of 0.
//! 4. Global uniqueness: no two parameters derive the same identifier under
//!    any convention.
//!
//! Nothing here depends on a particular naming convention.

use std::collections::BTreeMap;

use crate::error::{Position, ValidationError};
use crate::model::{
    check_identifier_seed, Column, ParamType, Parameter, ParameterSet, ScalarParameter,
    TableParameter, Value,
};
use crate::naming::CaseStyle;

/// Suffix every convention derives the size constant name from, normalized.
const SIZE_KEY_SUFFIX: &str = "_size";

/// Suffix every convention derives the row type name from, normalized.
const ROW_KEY_SUFFIX: &str = "_row";

/// Validate a parameter set.
///
/// Returns the first failure found; a set that passes can be emitted under
/// every supported convention without value changes.
#[tracing::instrument(skip_all, fields(parameters = set.len()))]
pub fn validate(set: &ParameterSet) -> Result<(), ValidationError> {
    for parameter in set {
        check_types(parameter)?;
    }
    for parameter in set {
        if let Parameter::Table(table) = parameter {
            check_rows(table)?;
        }
    }
    check_global_uniqueness(set)?;

    tracing::debug!("parameter set is valid");
    Ok(())
}

// =============================================================================
// Check 1: Type Legality
// =============================================================================

fn check_types(parameter: &Parameter) -> Result<(), ValidationError> {
    match parameter {
        Parameter::Scalar(scalar) => check_scalar(scalar),
        Parameter::Table(table) => check_columns(table),
    }
}

fn check_scalar(scalar: &ScalarParameter) -> Result<(), ValidationError> {
    check_value(&scalar.name, scalar.ty, &scalar.value, Position::Value)
}

fn check_columns(table: &TableParameter) -> Result<(), ValidationError> {
    let mut seen: BTreeMap<String, &Column> = BTreeMap::new();

    for (index, column) in table.columns.iter().enumerate() {
        if check_identifier_seed(&column.name).is_err() {
            return Err(ValidationError::InvalidColumnName {
                parameter: table.name.clone(),
                at: Position::Column { index },
                column: column.name.clone(),
            });
        }
        if seen
            .insert(CaseStyle::LowerSnake.apply(&column.name), column)
            .is_some()
        {
            return Err(ValidationError::DuplicateColumn {
                parameter: table.name.clone(),
                column: column.name.clone(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Check 2: Table Homogeneity
// =============================================================================

fn check_rows(table: &TableParameter) -> Result<(), ValidationError> {
    let expected = table.columns.len();

    for (row_index, row) in table.rows.iter().enumerate() {
        if row.len() != expected {
            return Err(ValidationError::RowArity {
                parameter: table.name.clone(),
                row: row_index,
                expected,
                found: row.len(),
            });
        }
        for (column_index, (value, column)) in row.iter().zip(&table.columns).enumerate() {
            let at = Position::Cell {
                row: row_index,
                column: column_index,
            };
            check_value(&table.name, column.ty, value, at)?;
        }
    }

    tracing::trace!(table = %table.name, rows = table.row_count(), "table rows checked");
    Ok(())
}

/// Check a single value against its declared type.
fn check_value(
    parameter: &str,
    expected: ParamType,
    value: &Value,
    at: Position,
) -> Result<(), ValidationError> {
    if !expected.accepts(value.kind()) {
        return Err(ValidationError::TypeMismatch {
            parameter: parameter.to_string(),
            at,
            expected,
            found: value.kind(),
        });
    }

    match value {
        Value::Float(v) if !v.is_finite() => Err(ValidationError::NonFiniteFloat {
            parameter: parameter.to_string(),
            at,
        }),
        Value::Integer(v) if expected == ParamType::Float64 && !widens_exactly(*v) => {
            Err(ValidationError::LossyWidening {
                parameter: parameter.to_string(),
                at,
                value: *v,
            })
        }
        _ => Ok(()),
    }
}

/// Whether `value` survives the round trip through f64 unchanged.
fn widens_exactly(value: i64) -> bool {
    // i128 avoids the saturating cast hiding i64::MAX -> 2^63.
    (value as f64) as i128 == value as i128
}

// =============================================================================
// Check 4: Global Uniqueness
// =============================================================================

/// Convention-agnostic identifier keys a parameter will occupy.
///
/// Every convention spells identifiers as a case transform of the logical
/// name, so the snake-case form is a conservative collision key.
fn derived_keys(parameter: &Parameter) -> Vec<String> {
    let base = CaseStyle::LowerSnake.apply(parameter.name());
    match parameter {
        Parameter::Scalar(_) => vec![base],
        Parameter::Table(_) => vec![
            format!("{}{}", base, SIZE_KEY_SUFFIX),
            format!("{}{}", base, ROW_KEY_SUFFIX),
            base,
        ],
    }
}

fn check_global_uniqueness(set: &ParameterSet) -> Result<(), ValidationError> {
    let mut owners: BTreeMap<String, &str> = BTreeMap::new();

    for parameter in set {
        for key in derived_keys(parameter) {
            if let Some(other) = owners.get(&key) {
                return Err(ValidationError::IdentifierCollision {
                    parameter: parameter.name().to_string(),
                    other: (*other).to_string(),
                    identifier: key,
                });
            }
            owners.insert(key, parameter.name());
        }
    }
    Ok(())
}
