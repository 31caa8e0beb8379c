//! Cell value formatting.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use serde_json::Value;

use crate::column::Column;
use crate::row::{field_text, value_to_string, Row};

/// Formats a cell value; receives the (transformed) value and the whole row.
pub type FormatFn = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

/// Transforms a raw value before formatting.
pub type TransformFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_.-]+)\}").expect("valid placeholder pattern"));

/// Named formatters and transforms referenced by column definitions.
#[derive(Clone, Default)]
pub struct Formatters {
    formatters: HashMap<String, FormatFn>,
    transforms: HashMap<String, TransformFn>,
}

impl std::fmt::Debug for Formatters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatters")
            .field("formatters", &self.formatters.keys().collect::<Vec<_>>())
            .field("transforms", &self.transforms.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Formatters {
    pub fn register_formatter(
        &mut self,
        name: impl Into<String>,
        formatter: impl Fn(&Value, &Row) -> String + Send + Sync + 'static,
    ) {
        self.formatters.insert(name.into(), Arc::new(formatter));
    }

    pub fn register_transform(
        &mut self,
        name: impl Into<String>,
        transform: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) {
        self.transforms.insert(name.into(), Arc::new(transform));
    }

    pub fn has_formatter(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Cell value after the column's transform.
    pub fn cell_value(&self, column: &Column, row: &Row) -> Value {
        let raw = row.get(&column.field).cloned().unwrap_or(Value::Null);
        match column.transform.as_deref() {
            Some(name) => match self.transforms.get(name) {
                Some(transform) => transform(&raw),
                None => {
                    log::warn!("Unknown transform `{name}` on column `{}`", column.field);
                    raw
                }
            },
            None => raw,
        }
    }

    /// Display text of a cell.
    ///
    /// `format` names a registered formatter; otherwise it is a template
    /// whose `{field}` placeholders are filled from the row.
    pub fn cell_text(&self, column: &Column, row: &Row) -> String {
        let value = self.cell_value(column, row);
        match column.format.as_deref() {
            None => value_to_string(&value),
            Some(name) => match self.formatters.get(name) {
                Some(formatter) => formatter(&value, row),
                None => interpolate(name, row),
            },
        }
    }
}

/// Fill `{field}` placeholders from `row`. Missing fields become empty.
pub fn interpolate(template: &str, row: &Row) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| field_text(row, &caps[1]))
        .into_owned()
}
