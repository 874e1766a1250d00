//! Rust module emitter.
//!
//! Scalars become `pub const` items, tables become a row struct, a `usize`
//! size constant and a fixed-size array constant. Nested scopes are `pub mod`
//! blocks; the re-export style adds a root-level glob `pub use`.

use super::literal;
use super::{doc_lines, header_comment, Emitter, SelfCheck, SourceWriter};
use crate::model::{ParamType, Parameter, ParameterSet, ScalarParameter, TableParameter, Value};
use crate::naming::{NamingConvention, ResolvedNames, ScopeStyle, TableNames};

/// Emits a Rust module.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustEmitter;

impl Emitter for RustEmitter {
    fn id(&self) -> &'static str {
        "rust"
    }

    fn name(&self) -> &'static str {
        "Rust"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn is_reserved(&self, identifier: &str) -> bool {
        // syn refuses keywords (strict and reserved) and `_` as identifiers.
        syn::parse_str::<syn::Ident>(identifier).is_err()
    }

    fn emit(
        &self,
        set: &ParameterSet,
        convention: &NamingConvention,
        names: &[ResolvedNames],
    ) -> String {
        let mut w = SourceWriter::new();
        w.line(header_comment(set));
        w.blank();

        let scope = convention.effective_scope();
        for segment in scope {
            w.line(format!("pub mod {} {{", segment));
            w.indent();
        }

        for (index, (parameter, resolved)) in set.iter().zip(names).enumerate() {
            if index > 0 {
                w.blank();
            }
            match parameter {
                Parameter::Scalar(scalar) => write_scalar(&mut w, scalar, resolved),
                Parameter::Table(table) => {
                    if let Some(table_names) = &resolved.table {
                        write_table(&mut w, table, resolved, table_names);
                    }
                }
            }
        }

        for _ in scope {
            w.dedent();
            w.line("}");
        }

        if convention.scope_style == ScopeStyle::Reexport && !scope.is_empty() {
            w.blank();
            w.line(format!("pub use {}::*;", scope.join("::")));
        }

        w.finish()
    }

    fn emit_self_check(
        &self,
        set: &ParameterSet,
        names: &[ResolvedNames],
        _artifact_file: &str,
    ) -> SelfCheck {
        let mut w = SourceWriter::new();
        w.line("#[cfg(test)]");
        w.line("#[allow(clippy::float_cmp, clippy::bool_assert_comparison)]");
        w.line("mod generated_value_checks {");
        w.indent();
        w.line("use super::*;");
        w.blank();
        w.line("#[test]");
        w.line("fn values_match_parameter_set() {");
        w.indent();

        for (parameter, resolved) in set.iter().zip(names) {
            let path = resolved.qualified("::");
            match parameter {
                Parameter::Scalar(scalar) => {
                    w.line(format!(
                        "assert_eq!({}, {});",
                        path,
                        value_literal(scalar.ty, &scalar.value)
                    ));
                }
                Parameter::Table(table) => {
                    let Some(table_names) = &resolved.table else {
                        continue;
                    };
                    let size = resolved.qualify(&table_names.size, "::");
                    w.line(format!("assert_eq!({}, {});", size, table.row_count()));
                    w.line(format!("assert_eq!({}.len(), {});", path, size));
                    for (row_index, row) in table.rows.iter().enumerate() {
                        for ((value, column), field) in
                            row.iter().zip(&table.columns).zip(&table_names.fields)
                        {
                            w.line(format!(
                                "assert_eq!({}[{}].{}, {});",
                                path,
                                row_index,
                                field,
                                value_literal(column.ty, value)
                            ));
                        }
                    }
                }
            }
        }

        w.dedent();
        w.line("}");
        w.dedent();
        w.line("}");
        SelfCheck::Inline(w.finish())
    }
}

fn write_docs(w: &mut SourceWriter, description: Option<&str>, unit: Option<&str>) {
    for line in doc_lines(description, unit) {
        if line.is_empty() {
            w.line("///");
        } else {
            w.line(format!("/// {}", line));
        }
    }
}

fn write_const_allow(w: &mut SourceWriter, ident: &str) {
    if ident.chars().any(|c| c.is_ascii_lowercase()) {
        w.line("#[allow(non_upper_case_globals)]");
    }
}

fn write_scalar(w: &mut SourceWriter, scalar: &ScalarParameter, resolved: &ResolvedNames) {
    write_docs(w, scalar.description.as_deref(), scalar.unit.as_deref());
    write_const_allow(w, &resolved.ident);
    w.line(format!(
        "pub const {}: {} = {};",
        resolved.ident,
        const_type(scalar.ty),
        value_literal(scalar.ty, &scalar.value)
    ));
}

fn write_table(
    w: &mut SourceWriter,
    table: &TableParameter,
    resolved: &ResolvedNames,
    names: &TableNames,
) {
    let row_type = &names.row_type;

    // Row struct
    w.line(format!("/// One row of [`{}`].", resolved.ident));
    w.line("#[derive(Debug, Clone, Copy, PartialEq)]");
    if row_type.contains('_') {
        w.line("#[allow(non_camel_case_types)]");
    }
    if names
        .fields
        .iter()
        .any(|f| f.chars().any(|c| c.is_ascii_uppercase()))
    {
        w.line("#[allow(non_snake_case)]");
    }
    w.line(format!("pub struct {} {{", row_type));
    w.indent();
    for (column, field) in table.columns.iter().zip(&names.fields) {
        write_docs(w, None, column.unit.as_deref());
        w.line(format!("pub {}: {},", field, field_type(column.ty)));
    }
    w.dedent();
    w.line("}");
    w.blank();

    // Size constant
    write_const_allow(w, &names.size);
    w.line(format!(
        "pub const {}: usize = {};",
        names.size,
        table.row_count()
    ));
    w.blank();

    // Array constant
    write_docs(w, table.description.as_deref(), None);
    write_const_allow(w, &resolved.ident);
    let declaration = format!(
        "pub const {}: [{}; {}] =",
        resolved.ident, row_type, names.size
    );
    if table.rows.is_empty() {
        w.line(format!("{} [];", declaration));
        return;
    }
    w.line(format!("{} [", declaration));
    w.indent();
    for row in &table.rows {
        let fields: Vec<String> = row
            .iter()
            .zip(&table.columns)
            .zip(&names.fields)
            .map(|((value, column), field)| {
                format!("{}: {}", field, value_literal(column.ty, value))
            })
            .collect();
        w.line(format!("{} {{ {} }},", row_type, fields.join(", ")));
    }
    w.dedent();
    w.line("];");
}

fn const_type(ty: ParamType) -> &'static str {
    match ty {
        ParamType::Float64 => "f64",
        ParamType::Integer => "i64",
        ParamType::String => "&str",
        ParamType::Boolean => "bool",
    }
}

fn field_type(ty: ParamType) -> &'static str {
    match ty {
        ParamType::String => "&'static str",
        other => const_type(other),
    }
}

/// Literal for a value stored under the declared type.
fn value_literal(ty: ParamType, value: &Value) -> String {
    match (ty, value) {
        (ParamType::Float64, Value::Integer(v)) => literal::widened(*v),
        (_, Value::Float(v)) => literal::float(*v),
        (_, Value::Integer(v)) => literal::rust_integer(*v),
        (_, Value::String(s)) => literal::rust_string(s),
        (_, Value::Boolean(b)) => b.to_string(),
    }
}
