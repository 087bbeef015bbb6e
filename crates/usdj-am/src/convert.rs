//! Conversions from property values to plain Rust data.
//!
//! Each conversion fails with [`Error::WrongValue`] when the value has a
//! different kind than requested.

use crate::error::{Error, Result};
use crate::value::Value;

fn wrong(expected: &'static str, value: &Value<'_>) -> Error {
    Error::WrongValue {
        expected,
        found: value.get_type().to_string(),
    }
}

pub fn to_bool(value: &Value<'_>) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(wrong("a boolean", other)),
    }
}

/// Any number, widened to `f64`.
pub fn to_real(value: &Value<'_>) -> Result<f64> {
    match value {
        Value::Number(number) => Ok(number.as_f64()),
        other => Err(wrong("a number", other)),
    }
}

/// A list of numbers such as a `double3` or `float[]` value.
pub fn to_reals(value: &Value<'_>) -> Result<Vec<f64>> {
    match value {
        Value::ConstValues(values) => values
            .iter()
            .map(|element| match element {
                Value::Number(number) => Ok(number.as_f64()),
                other => Err(wrong("a list of numbers", other)),
            })
            .collect(),
        other => Err(wrong("a list of numbers", other)),
    }
}

/// A list of tuples of numbers such as a `point3f[]` value.
pub fn to_real_tuples(value: &Value<'_>) -> Result<Vec<Vec<f64>>> {
    match value {
        Value::ConstValues(values) => values.iter().map(to_reals).collect(),
        other => Err(wrong("a list of tuples", other)),
    }
}

pub fn to_string(value: &Value<'_>) -> Result<String> {
    match value {
        Value::String(s) => Ok((*s).to_string()),
        other => Err(wrong("a string", other)),
    }
}

/// A list of strings such as a `token[]` value.
pub fn to_strings(value: &Value<'_>) -> Result<Vec<String>> {
    match value {
        Value::ConstValues(values) => values.iter().map(to_string).collect(),
        other => Err(wrong("a list of strings", other)),
    }
}

pub fn to_path<'d>(value: &Value<'d>) -> Result<&'d str> {
    match value {
        Value::Path(path) => path.get_path(),
        other => Err(wrong("a path", other)),
    }
}

/// A single path or a list of paths, as relationship targets are spelled.
pub fn to_paths<'d>(value: &Value<'d>) -> Result<Vec<&'d str>> {
    match value {
        Value::Path(path) => Ok(vec![path.get_path()?]),
        Value::ConstValues(values) => values.iter().map(to_path).collect(),
        other => Err(wrong("a list of paths", other)),
    }
}
