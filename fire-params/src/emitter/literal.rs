//! Literal formatting shared by the emitters.
//!
//! Floats use the shortest representation that parses back to the same
//! bits, so every target sees the same digits for the same value.

/// Shortest round-trip decimal form of a finite float.
///
/// Always contains a `.` or an exponent, so it reads as a float literal in
/// both Rust and C++: `55.0`, `0.7`, `1e20`.
pub fn float(value: f64) -> String {
    let mut buffer = ryu::Buffer::new();
    buffer.format(value).to_string()
}

/// Integer widened to a float literal.
pub fn widened(value: i64) -> String {
    float(value as f64)
}

/// Rust integer literal; `i64::MIN` has no negated literal form.
pub fn rust_integer(value: i64) -> String {
    if value == i64::MIN {
        "i64::MIN".to_string()
    } else {
        value.to_string()
    }
}

/// C++ integer literal; `INT64_MIN` has no negated literal form.
pub fn cpp_integer(value: i64) -> String {
    if value == i64::MIN {
        "(-9223372036854775807LL - 1)".to_string()
    } else {
        value.to_string()
    }
}

/// Quoted Rust string literal.
pub fn rust_string(value: &str) -> String {
    format!("{:?}", value)
}

/// Quoted C++ string literal.
///
/// Control characters use three-digit octal escapes so a following digit
/// cannot extend the escape. Non-ASCII text passes through as UTF-8.
pub fn cpp_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '?' => out.push_str("\\?"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
