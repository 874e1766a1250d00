//! C++ header emitter.
//!
//! Output is a self-contained C++17 header: `constexpr` scalars, a plain
//! row struct per table, a `std::size_t` size constant and a `std::array`
//! holding the rows. `std::array` keeps zero-row tables well-formed.

use super::literal;
use super::{doc_lines, header_comment, Emitter, SelfCheck, SourceWriter};
use crate::model::{ParamType, Parameter, ParameterSet, ScalarParameter, TableParameter, Value};
use crate::naming::{NamingConvention, ResolvedNames, ScopeStyle, TableNames};

/// Keywords, alternative tokens, and the typedefs and macros the header's
/// includes bring into the global namespace.
const RESERVED: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "assert", "auto", "bitand", "bitor", "bool",
    "break", "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "co_await",
    "co_return", "co_yield", "compl", "concept", "const", "const_cast", "consteval", "constexpr",
    "constinit", "continue", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "main", "mutable", "namespace", "new", "noexcept", "not",
    "not_eq", "nullptr", "operator", "or", "or_eq", "private", "protected", "public",
    "register", "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "std", "struct", "switch", "template", "this",
    "thread_local", "throw", "true", "try", "typedef", "typeid", "typename", "union",
    "unsigned", "using", "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
    "EOF", "INT64_MAX", "INT64_MIN", "NULL",
    // <cstddef>
    "size_t", "ptrdiff_t", "max_align_t", "nullptr_t", "offsetof", "SIZE_MAX", "PTRDIFF_MAX",
    "PTRDIFF_MIN",
    // <cstdint>
    "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t", "uint32_t", "uint64_t",
    "int_least8_t", "int_least16_t", "int_least32_t", "int_least64_t", "uint_least8_t",
    "uint_least16_t", "uint_least32_t", "uint_least64_t", "int_fast8_t", "int_fast16_t",
    "int_fast32_t", "int_fast64_t", "uint_fast8_t", "uint_fast16_t", "uint_fast32_t",
    "uint_fast64_t", "intmax_t", "uintmax_t", "intptr_t", "uintptr_t", "INT8_MAX", "INT8_MIN",
    "INT16_MAX", "INT16_MIN", "INT32_MAX", "INT32_MIN", "UINT8_MAX", "UINT16_MAX",
    "UINT32_MAX", "UINT64_MAX", "INTMAX_MAX", "INTMAX_MIN", "UINTMAX_MAX", "INTPTR_MAX",
    "INTPTR_MIN", "UINTPTR_MAX",
];

/// Emits a C++ header.
#[derive(Debug, Clone, Copy, Default)]
pub struct CppEmitter;

impl Emitter for CppEmitter {
    fn id(&self) -> &'static str {
        "cpp"
    }

    fn name(&self) -> &'static str {
        "C++"
    }

    fn file_extension(&self) -> &'static str {
        "h"
    }

    fn is_reserved(&self, identifier: &str) -> bool {
        // Double underscores and `_Upper` prefixes belong to the implementation.
        let implementation = identifier.contains("__")
            || (identifier.starts_with('_')
                && identifier[1..].starts_with(|c: char| c.is_ascii_uppercase()));
        implementation || RESERVED.contains(&identifier)
    }

    fn emit(
        &self,
        set: &ParameterSet,
        convention: &NamingConvention,
        names: &[ResolvedNames],
    ) -> String {
        let scope = convention.effective_scope();
        let guard = include_guard(set, scope);

        let mut w = SourceWriter::new();
        w.line(header_comment(set));
        w.line(format!("#ifndef {}", guard));
        w.line(format!("#define {}", guard));
        w.blank();
        w.line("#include <array>");
        w.line("#include <cstddef>");
        w.line("#include <cstdint>");
        w.blank();

        for segment in scope {
            w.line(format!("namespace {} {{", segment));
        }
        if !scope.is_empty() {
            w.blank();
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

        if !scope.is_empty() {
            w.blank();
            for segment in scope.iter().rev() {
                w.line(format!("}} // namespace {}", segment));
            }
        }

        if convention.scope_style == ScopeStyle::Reexport && !scope.is_empty() {
            w.blank();
            w.line(format!("using namespace {};", scope.join("::")));
        }

        w.blank();
        w.line(format!("#endif // {}", guard));
        w.finish()
    }

    fn emit_self_check(
        &self,
        set: &ParameterSet,
        names: &[ResolvedNames],
        artifact_file: &str,
    ) -> SelfCheck {
        let mut w = SourceWriter::new();
        w.line(header_comment(set));
        w.line(format!("#include \"{}\"", artifact_file));
        w.blank();
        w.line("#include <cassert>");
        w.line("#include <cstring>");
        w.blank();
        w.line("int main() {");
        w.indent();

        for (parameter, resolved) in set.iter().zip(names) {
            let path = resolved.qualified("::");
            match parameter {
                Parameter::Scalar(scalar) => {
                    w.line(assertion(&path, scalar.ty, &scalar.value));
                }
                Parameter::Table(table) => {
                    let Some(table_names) = &resolved.table else {
                        continue;
                    };
                    let size = resolved.qualify(&table_names.size, "::");
                    w.line(format!("static_assert({} == {}, \"row count\");", size, table.row_count()));
                    w.line(format!("assert({}.size() == {});", path, size));
                    for (row_index, row) in table.rows.iter().enumerate() {
                        for ((value, column), field) in
                            row.iter().zip(&table.columns).zip(&table_names.fields)
                        {
                            let cell = format!("{}[{}].{}", path, row_index, field);
                            w.line(assertion(&cell, column.ty, value));
                        }
                    }
                }
            }
        }

        w.line("return 0;");
        w.dedent();
        w.line("}");

        let stem = artifact_file
            .rsplit_once('.')
            .map_or(artifact_file, |(stem, _)| stem);
        SelfCheck::Companion {
            file_name: format!("{}_check.cc", stem),
            content: w.finish(),
        }
    }
}

/// Include guard macro, derived from the scope path or the set namespace.
fn include_guard(set: &ParameterSet, scope: &[String]) -> String {
    let segments = if scope.is_empty() {
        set.namespace()
    } else {
        scope
    };
    if segments.is_empty() {
        return "FIRE_PARAMS_H".to_string();
    }
    format!("{}_PARAMS_H", segments.join("_").to_ascii_uppercase())
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

fn write_scalar(w: &mut SourceWriter, scalar: &ScalarParameter, resolved: &ResolvedNames) {
    write_docs(w, scalar.description.as_deref(), scalar.unit.as_deref());
    w.line(format!(
        "constexpr {} {} = {};",
        scalar_type(scalar.ty),
        resolved.ident,
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

    w.line(format!("/// One row of `{}`.", resolved.ident));
    w.line(format!("struct {} {{", row_type));
    w.indent();
    for (column, field) in table.columns.iter().zip(&names.fields) {
        write_docs(w, None, column.unit.as_deref());
        w.line(format!("{} {};", field_type(column.ty), field));
    }
    w.dedent();
    w.line("};");
    w.blank();

    w.line(format!(
        "constexpr std::size_t {} = {};",
        names.size,
        table.row_count()
    ));
    w.blank();

    write_docs(w, table.description.as_deref(), None);
    let declaration = format!(
        "constexpr std::array<{}, {}> {} =",
        row_type, names.size, resolved.ident
    );
    if table.rows.is_empty() {
        w.line(format!("{} {{}};", declaration));
        return;
    }
    w.line(format!("{} {{{{", declaration));
    w.indent();
    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&table.columns)
            .map(|(value, column)| value_literal(column.ty, value))
            .collect();
        w.line(format!("{{{}}},", cells.join(", ")));
    }
    w.dedent();
    w.line("}};");
}

fn assertion(path: &str, ty: ParamType, value: &Value) -> String {
    match ty {
        ParamType::String => format!(
            "assert(std::strcmp({}, {}) == 0);",
            path,
            value_literal(ty, value)
        ),
        _ => format!("assert({} == {});", path, value_literal(ty, value)),
    }
}

fn scalar_type(ty: ParamType) -> &'static str {
    match ty {
        ParamType::Float64 => "double",
        ParamType::Integer => "std::int64_t",
        ParamType::String => "const char*",
        ParamType::Boolean => "bool",
    }
}

fn field_type(ty: ParamType) -> &'static str {
    scalar_type(ty)
}

fn value_literal(ty: ParamType, value: &Value) -> String {
    match (ty, value) {
        (ParamType::Float64, Value::Integer(v)) => literal::widened(*v),
        (_, Value::Float(v)) => literal::float(*v),
        (_, Value::Integer(v)) => literal::cpp_integer(*v),
        (_, Value::String(s)) => literal::cpp_string(s),
        (_, Value::Boolean(b)) => b.to_string(),
    }
}
