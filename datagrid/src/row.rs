//! Row data and value helpers.

use serde_json::{Map, Value};

/// A data row: field name to value.
pub type Row = Map<String, Value>;

/// Stringify a value for display, filtering and sorting.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Field of a row as display text; missing fields are empty.
pub fn field_text(row: &Row, field: &str) -> String {
    row.get(field).map(value_to_string).unwrap_or_default()
}

/// Parse a value as a number, for numeric sorting.
pub fn value_as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
            }
        }
        _ => None,
    }
}

/// Convert edited text back to a value shaped like `previous`.
pub fn coerce_like(previous: Option<&Value>, text: &str) -> Value {
    match previous {
        Some(Value::Number(_)) => {
            if let Ok(int) = text.trim().parse::<i64>() {
                return Value::from(int);
            }
            match text.trim().parse::<f64>() {
                Ok(float) if float.is_finite() => Value::from(float),
                _ => Value::String(text.to_string()),
            }
        }
        Some(Value::Bool(_)) => match text {
            "true" | "1" | "on" => Value::Bool(true),
            "false" | "0" | "off" | "" => Value::Bool(false),
            _ => Value::String(text.to_string()),
        },
        _ => Value::String(text.to_string()),
    }
}

/// Rows from a JSON array; non-object entries are logged and skipped.
pub fn rows_from_values(values: Vec<Value>) -> Vec<Row> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match value {
            Value::Object(row) => Some(row),
            other => {
                log::warn!("Skipping row {index}: expected an object, got {other}");
                None
            }
        })
        .collect()
}
