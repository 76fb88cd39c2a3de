// realty-core/src/domain/table/value.rs

use serde::Serialize;
use std::fmt;

/// Tokens treated as "no value" when a raw CSV cell is classified.
pub const NULL_TOKENS: [&str; 9] = ["", "NA", "N/A", "NaN", "nan", "NULL", "null", "None", "<NA>"];

/// A single cell of a table read back from the engine.
///
/// Text cells go through [`Value::parse`], so `"2"` reads as a number and
/// `"True"` as a boolean. Typed engine columns map directly.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Classify a text cell as read back from the engine.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Value::Missing;
        };
        let trimmed = raw.trim();
        if NULL_TOKENS.contains(&trimmed) {
            return Value::Missing;
        }
        match trimmed {
            "True" | "true" | "TRUE" => return Value::Bool(true),
            "False" | "false" | "FALSE" => return Value::Bool(false),
            _ => {}
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(trimmed.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Strict numeric view: only `Number` cells.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

fn render_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Number(n) => f.write_str(&render_number(*n)),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Missing)
    }
}
