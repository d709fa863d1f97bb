//! Default string coercion for attribute values, doctype declarations and
//! non-string tag names. Follows JavaScript's `String(value)` for every shape
//! a JSON5 document can produce.

use crate::value::Value;

pub fn coerce(value: &Value) -> String {
    let mut out = String::new();
    write_coerced(value, &mut out);
    out
}

/// Whether a value counts as "nothing": `null`, `false`, zero, `NaN`, the
/// empty string, or an empty array.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => *n == 0.0 || n.is_nan(),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}

fn write_coerced(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(*n, out),
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // null entries join as empty strings
                if !matches!(item, Value::Null) {
                    write_coerced(item, out);
                }
            }
        }
        Value::Object(_) => out.push_str("[object Object]"),
    }
}

fn write_number(f: f64, out: &mut String) {
    if f.is_nan() {
        out.push_str("NaN");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { "Infinity" } else { "-Infinity" });
    } else if f == 0.0 {
        // also covers -0
        out.push('0');
    } else if f.abs() >= 1e21 || f.abs() < 1e-6 {
        let exp = format!("{f:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                out.push_str(mantissa);
                out.push_str("e+");
                out.push_str(power);
            }
            _ => out.push_str(&exp),
        }
    } else {
        out.push_str(&f.to_string());
    }
}
