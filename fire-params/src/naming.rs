//! Naming conventions and identifier resolution.
//!
//! A [`NamingConvention`] is a policy object: it decides how a logical
//! parameter name is spelled and which scopes enclose it. The resolver
//! applies a convention to one parameter at a time and checks the result
//! against the identifier rules of the target [`Emitter`]. Resolution is a
//! pure function of `(parameter, convention, target)`.

use convert_case::{Boundary, Case, Casing};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::emitter::Emitter;
use crate::error::NamingError;
use crate::model::{Parameter, ParameterSet};

// =============================================================================
// Convention
// =============================================================================

/// Word boundaries of a logical name. Digits never start a new word, so
/// `axle2_load` stays `axle2_load`.
const WORD_BOUNDARIES: &[Boundary] = &[Boundary::Underscore, Boundary::LowerUpper];

fn convert(name: &str, case: Case) -> String {
    name.set_boundaries(WORD_BOUNDARIES).to_case(case)
}

/// Case style applied to constants or row fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStyle {
    /// `MAXIMUM_VEHICLE_VELOCITY`
    UpperSnake,
    /// `maximum_vehicle_velocity`
    LowerSnake,
}

impl CaseStyle {
    /// Apply this case style to a logical name.
    pub fn apply(&self, name: &str) -> String {
        match self {
            CaseStyle::UpperSnake => convert(name, Case::UpperSnake),
            CaseStyle::LowerSnake => convert(name, Case::Snake),
        }
    }
}

/// How the scope path encloses the generated declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeStyle {
    /// Declarations at the artifact root; the scope path is not used.
    #[default]
    Flat,
    /// Declarations inside nested scopes (`mod` / `namespace`).
    Nested,
    /// Nested scopes plus a root-level glob re-export (`pub use` / `using namespace`).
    Reexport,
}

impl ScopeStyle {
    /// Check if this style wraps declarations in scopes.
    pub fn is_scoped(&self) -> bool {
        !matches!(self, ScopeStyle::Flat)
    }
}

/// Rule deriving a row type name from a table parameter name.
///
/// The name (minus `strip_suffix`, if it ends with it) is converted to
/// PascalCase and `suffix` is appended: `braking_distance_table` becomes
/// `BrakingDistanceTableRow`, or `BrakingDistanceRow` with
/// `strip_suffix = "_table"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowTypeRule {
    /// Suffix removed from the parameter name before conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_suffix: Option<String>,

    /// Suffix appended to the PascalCase name.
    pub suffix: String,
}

impl Default for RowTypeRule {
    fn default() -> Self {
        Self {
            strip_suffix: None,
            suffix: "Row".to_string(),
        }
    }
}

impl RowTypeRule {
    /// Create a rule that strips `strip` before appending the default suffix.
    pub fn stripping(strip: impl Into<String>) -> Self {
        Self {
            strip_suffix: Some(strip.into()),
            ..Self::default()
        }
    }

    /// Derive the row type name for a table.
    pub fn apply(&self, table_name: &str) -> String {
        let base = self
            .strip_suffix
            .as_deref()
            .and_then(|strip| table_name.strip_suffix(strip))
            .filter(|base| !base.is_empty())
            .unwrap_or(table_name);
        format!("{}{}", convert(base, Case::Pascal), self.suffix)
    }
}

/// Policy mapping logical names to concrete identifiers and scopes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamingConvention {
    /// Case style of scalar constants, table arrays and size constants.
    pub case_style: CaseStyle,

    /// Case style of row fields.
    pub field_case: CaseStyle,

    /// Enclosing scope names, outermost first.
    #[serde(default)]
    pub scope_path: Vec<String>,

    /// How the scope path is rendered.
    #[serde(default)]
    pub scope_style: ScopeStyle,

    /// Appended to the table array name to name its size constant.
    pub table_size_suffix: String,

    /// Derives the row type name of each table.
    #[serde(default)]
    pub row_type_rule: RowTypeRule,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::upper_snake()
    }
}

impl NamingConvention {
    /// Flat `UPPER_SNAKE` constants with `_SIZE` size constants.
    pub fn upper_snake() -> Self {
        Self {
            case_style: CaseStyle::UpperSnake,
            field_case: CaseStyle::LowerSnake,
            scope_path: Vec::new(),
            scope_style: ScopeStyle::Flat,
            table_size_suffix: "_SIZE".to_string(),
            row_type_rule: RowTypeRule::default(),
        }
    }

    /// Nested `lower_snake` constants with `_size` size constants.
    pub fn lower_snake() -> Self {
        Self {
            case_style: CaseStyle::LowerSnake,
            field_case: CaseStyle::LowerSnake,
            scope_path: Vec::new(),
            scope_style: ScopeStyle::Nested,
            table_size_suffix: "_size".to_string(),
            row_type_rule: RowTypeRule::default(),
        }
    }

    /// Preset for the given constant case style.
    pub fn for_case(case_style: CaseStyle) -> Self {
        match case_style {
            CaseStyle::UpperSnake => Self::upper_snake(),
            CaseStyle::LowerSnake => Self::lower_snake(),
        }
    }

    /// Set the scope path.
    pub fn with_scope_path<I, S>(mut self, scope_path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope_path = scope_path.into_iter().map(Into::into).collect();
        self
    }

    /// Set the scope style.
    pub fn with_scope_style(mut self, scope_style: ScopeStyle) -> Self {
        self.scope_style = scope_style;
        self
    }

    /// Set the field case style.
    pub fn with_field_case(mut self, field_case: CaseStyle) -> Self {
        self.field_case = field_case;
        self
    }

    /// Set the size constant suffix.
    pub fn with_table_size_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.table_size_suffix = suffix.into();
        self
    }

    /// Set the row type rule.
    pub fn with_row_type_rule(mut self, rule: RowTypeRule) -> Self {
        self.row_type_rule = rule;
        self
    }

    /// Scopes that actually enclose declarations under this convention.
    pub fn effective_scope(&self) -> &[String] {
        if self.scope_style.is_scoped() {
            &self.scope_path
        } else {
            &[]
        }
    }
}

// =============================================================================
// Resolved Names
// =============================================================================

/// Identifiers derived for a table parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableNames {
    /// Row struct type name.
    pub row_type: String,
    /// Size constant name.
    pub size: String,
    /// Row field names, one per column.
    pub fields: Vec<String>,
}

/// Concrete identifiers for one parameter under one convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedNames {
    /// Logical parameter name.
    pub parameter: String,

    /// Enclosing scopes, outermost first (empty for flat output).
    pub scope: Vec<String>,

    /// Scalar constant name, or table array name.
    pub ident: String,

    /// Extra identifiers of a table parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableNames>,
}

impl ResolvedNames {
    /// Fully qualified path of `ident` using the given scope separator.
    pub fn qualify(&self, ident: &str, separator: &str) -> String {
        if self.scope.is_empty() {
            ident.to_string()
        } else {
            format!("{}{}{}", self.scope.join(separator), separator, ident)
        }
    }

    /// Fully qualified path of the main identifier.
    pub fn qualified(&self, separator: &str) -> String {
        self.qualify(&self.ident, separator)
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolve the identifiers of one parameter.
pub fn resolve(
    parameter: &Parameter,
    convention: &NamingConvention,
    target: &dyn Emitter,
) -> Result<ResolvedNames, NamingError> {
    NameResolver::new(convention, target).resolve(parameter)
}

/// Applies a naming convention for a specific target.
pub struct NameResolver<'a> {
    convention: &'a NamingConvention,
    target: &'a dyn Emitter,
}

impl<'a> NameResolver<'a> {
    /// Create a resolver for a convention and target.
    pub fn new(convention: &'a NamingConvention, target: &'a dyn Emitter) -> Self {
        Self { convention, target }
    }

    /// Resolve the identifiers of one parameter.
    pub fn resolve(&self, parameter: &Parameter) -> Result<ResolvedNames, NamingError> {
        let name = parameter.name();
        let ident = self.checked(name, self.convention.case_style.apply(name))?;

        let table = match parameter {
            Parameter::Scalar(_) => None,
            Parameter::Table(table) => {
                let row_type =
                    self.checked(name, self.convention.row_type_rule.apply(&table.name))?;
                let size = self.checked(
                    name,
                    format!("{}{}", ident, self.convention.table_size_suffix),
                )?;
                let fields = table
                    .columns
                    .iter()
                    .map(|column| {
                        self.checked(name, self.convention.field_case.apply(&column.name))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Some(TableNames {
                    row_type,
                    size,
                    fields,
                })
            }
        };

        Ok(ResolvedNames {
            parameter: name.to_string(),
            scope: self.convention.effective_scope().to_vec(),
            ident,
            table,
        })
    }

    /// Resolve every parameter of a set, in order.
    ///
    /// Also checks the scope path and that no two declarations in the
    /// artifact share an identifier.
    pub fn resolve_all(&self, set: &ParameterSet) -> Result<Vec<ResolvedNames>, NamingError> {
        for segment in self.convention.effective_scope() {
            if self.check_identifier(segment, segment).is_err() {
                return Err(NamingError::InvalidScope {
                    segment: segment.clone(),
                    target: self.target.name(),
                });
            }
        }

        let resolved = set
            .iter()
            .map(|parameter| self.resolve(parameter))
            .collect::<Result<Vec<_>, _>>()?;

        check_collisions(&resolved)?;
        tracing::trace!(
            target_id = self.target.id(),
            count = resolved.len(),
            "resolved parameter names"
        );
        Ok(resolved)
    }

    fn checked(&self, parameter: &str, identifier: String) -> Result<String, NamingError> {
        self.check_identifier(parameter, &identifier)?;
        Ok(identifier)
    }

    fn check_identifier(&self, parameter: &str, identifier: &str) -> Result<(), NamingError> {
        let mut chars = identifier.chars();
        let legal_chars = matches!(chars.next(), Some(c) if c.is_ascii_alphanumeric() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !legal_chars {
            return Err(NamingError::NotAnIdentifier {
                parameter: parameter.to_string(),
                identifier: identifier.to_string(),
            });
        }
        if identifier.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(NamingError::LeadingDigit {
                parameter: parameter.to_string(),
                identifier: identifier.to_string(),
            });
        }
        if self.target.is_reserved(identifier) {
            return Err(NamingError::Reserved {
                parameter: parameter.to_string(),
                identifier: identifier.to_string(),
                target: self.target.name(),
            });
        }
        Ok(())
    }
}

/// Reject identifiers declared twice in one artifact.
///
/// Types and values are checked in one namespace since C++ does not keep
/// them apart.
fn check_collisions(resolved: &[ResolvedNames]) -> Result<(), NamingError> {
    let mut owners: BTreeMap<&str, &str> = BTreeMap::new();

    for names in resolved {
        let mut declared = vec![names.ident.as_str()];
        if let Some(table) = &names.table {
            declared.push(&table.size);
            declared.push(&table.row_type);

            let mut fields: BTreeMap<&str, ()> = BTreeMap::new();
            for field in &table.fields {
                if fields.insert(field, ()).is_some() {
                    return Err(NamingError::Collision {
                        parameter: names.parameter.clone(),
                        other: names.parameter.clone(),
                        identifier: field.clone(),
                    });
                }
            }
        }

        for identifier in declared {
            if let Some(other) = owners.insert(identifier, &names.parameter) {
                return Err(NamingError::Collision {
                    parameter: names.parameter.clone(),
                    other: other.to_string(),
                    identifier: identifier.to_string(),
                });
            }
        }
    }
    Ok(())
}
