//! Attribute and dataset value normalization.
//!
//! Attributes arrive as strings. The generic normalizer infers a typed JSON
//! value from the text; a handful of attributes carry their own transformer
//! which takes precedence (see [`transformer_for`]).

use serde_json::{Map, Number, Value};

use crate::error::ConfigError;

/// Transforms a raw attribute string into an option value.
pub type Transformer = fn(&str) -> Value;

/// Infer a typed value from a raw attribute string.
///
/// - `"true"` / `"false"` become booleans
/// - `""` and `"null"` become null
/// - strings that round-trip as numbers become numbers
/// - strings starting with `[` or `{` are parsed as JSON, retrying with
///   single quotes swapped for double quotes; on failure an empty object is
///   returned and the error logged
/// - anything else stays a string
pub fn normalize_data(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "" | "null" => return Value::Null,
        _ => {}
    }

    if let Some(number) = parse_number(raw) {
        return Value::Number(number);
    }

    if raw.starts_with('[') || raw.starts_with('{') {
        return match parse_json(raw) {
            Ok(value) => value,
            Err(err) => {
                log::error!("{err}");
                Value::Object(Map::new())
            }
        };
    }

    Value::String(raw.to_string())
}

/// Parse JSON, tolerating single-quoted documents.
pub fn parse_json(raw: &str) -> Result<Value, ConfigError> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(_) => serde_json::from_str(&raw.replace('\'', "\"")).map_err(|e| {
            ConfigError::InvalidJson {
                value: raw.to_string(),
                message: e.to_string(),
            }
        }),
    }
}

/// A string is numeric only when it prints back identically, so `"010"` and
/// `"1e3"` stay strings.
fn parse_number(raw: &str) -> Option<Number> {
    if let Ok(int) = raw.parse::<i64>() {
        if int.to_string() == raw {
            return Some(Number::from(int));
        }
    }
    let float = raw.parse::<f64>().ok()?;
    if float.is_finite() && float.to_string() == raw {
        Number::from_f64(float)
    } else {
        None
    }
}

/// Override transformer for an option key, if any.
///
/// Keys are option names (camelCase), not attribute names.
pub fn transformer_for(key: &str) -> Option<Transformer> {
    match key {
        "columns" => Some(convert_columns),
        "actions" => Some(convert_actions),
        "page" | "perPage" | "defaultPage" => Some(convert_integer),
        _ => None,
    }
}

/// Normalize with the key's transformer, falling back to [`normalize_data`].
pub fn normalize_for(key: &str, raw: &str) -> Value {
    match transformer_for(key) {
        Some(transform) => transform(raw),
        None => normalize_data(raw),
    }
}

/// Columns accept a JSON array or a comma separated list of fields.
fn convert_columns(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Array(Vec::new());
    }
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return match normalize_data(trimmed) {
            Value::Array(items) => Value::Array(items),
            // A lone object is a single column definition.
            Value::Object(obj) if !obj.is_empty() => Value::Array(vec![Value::Object(obj)]),
            _ => {
                log::error!("Columns must be an array, got `{raw}`");
                Value::Array(Vec::new())
            }
        };
    }
    Value::Array(
        trimmed
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(|f| Value::String(f.to_string()))
            .collect(),
    )
}

fn convert_actions(raw: &str) -> Value {
    match normalize_data(raw.trim()) {
        Value::Array(items) => Value::Array(items),
        Value::Null => Value::Array(Vec::new()),
        _ => {
            log::error!("Actions must be an array, got `{raw}`");
            Value::Array(Vec::new())
        }
    }
}

/// Integers are parsed leniently (`" 3 "`, `"3.0"`); anything else is null.
fn convert_integer(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    match trimmed.parse::<f64>() {
        Ok(float) if float.is_finite() => Value::from(float.trunc() as i64),
        _ => Value::Null,
    }
}

/// `per-page` → `perPage`.
pub fn attribute_to_key(name: &str) -> String {
    let name = name.strip_prefix("data-").unwrap_or(name);
    let mut key = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            key.extend(c.to_uppercase());
            upper = false;
        } else {
            key.push(c);
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(normalize_data("true"), json!(true));
        assert_eq!(normalize_data("false"), json!(false));
        assert_eq!(normalize_data(""), Value::Null);
        assert_eq!(normalize_data("null"), Value::Null);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(normalize_data("42"), json!(42));
        assert_eq!(normalize_data("-7"), json!(-7));
        assert_eq!(normalize_data("1.5"), json!(1.5));
        assert_eq!(normalize_data("010"), json!("010"));
        assert_eq!(normalize_data("1e3"), json!("1e3"));
    }

    #[test]
    fn test_json() {
        assert_eq!(normalize_data("[1,2]"), json!([1, 2]));
        assert_eq!(normalize_data(r#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(normalize_data("{'a':'b'}"), json!({"a": "b"}));
    }

    #[test]
    fn test_malformed_json_is_empty_object() {
        assert_eq!(normalize_data("{bad json"), json!({}));
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(normalize_data("/api/users"), json!("/api/users"));
    }

    #[test]
    fn test_columns_transformer() {
        assert_eq!(normalize_for("columns", "id, name"), json!(["id", "name"]));
        assert_eq!(
            normalize_for("columns", r#"[{"field":"id"}]"#),
            json!([{"field": "id"}])
        );
        assert_eq!(
            normalize_for("columns", r#"{"field":"id"}"#),
            json!([{"field": "id"}])
        );
        assert_eq!(normalize_for("columns", "{oops"), json!([]));
    }

    #[test]
    fn test_actions_transformer() {
        assert_eq!(
            normalize_for("actions", r#"[{"name":"edit"}]"#),
            json!([{"name": "edit"}])
        );
        assert_eq!(normalize_for("actions", "edit"), json!([]));
    }

    #[test]
    fn test_integer_transformer() {
        assert_eq!(normalize_for("perPage", " 25 "), json!(25));
        assert_eq!(normalize_for("page", "3.0"), json!(3));
        assert_eq!(normalize_for("page", "abc"), Value::Null);
    }

    #[test]
    fn test_attribute_to_key() {
        assert_eq!(attribute_to_key("per-page"), "perPage");
        assert_eq!(attribute_to_key("data-server-params"), "serverParams");
        assert_eq!(attribute_to_key("url"), "url");
    }
}
