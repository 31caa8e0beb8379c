//! Column definitions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Kind of control rendered in the filter row for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    Text,
    Select,
    /// No filter control.
    None,
}

/// A grid column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Column {
    /// Key into row objects. Unique among columns.
    pub field: String,
    /// Header text. Defaults to the field.
    pub title: String,
    /// Fixed width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Extra class on header and body cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Virtual column: instead of a cell, the row value is set as this row
    /// attribute (`class` adds it as a row class).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
    pub hidden: bool,
    pub editable: bool,
    pub no_sort: bool,
    /// Responsive priority; higher stays visible longer. `None` never collapses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive: Option<u32>,
    /// Registered formatter name, or a `{field}` template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Registered transform name applied to the raw value before formatting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    pub filter_type: FilterType,
    /// Choices for select filters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter_list: Vec<String>,
    /// Arbitrary extra properties, reachable through the property helpers.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            field: String::new(),
            title: String::new(),
            width: None,
            class: None,
            attr: None,
            hidden: false,
            editable: false,
            no_sort: false,
            responsive: None,
            format: None,
            transform: None,
            filter_type: FilterType::Text,
            filter_list: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl Column {
    /// Create a column with the given field; the title defaults to it.
    pub fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            title: field.clone(),
            field,
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn no_sort(mut self) -> Self {
        self.no_sort = true;
        self
    }

    pub fn responsive(mut self, priority: u32) -> Self {
        self.responsive = Some(priority);
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attr = Some(attr.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    /// Parse a definition: a bare string is a field name.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let mut column = match value {
            Value::String(field) => Column::new(field.as_str()),
            Value::Object(_) => serde_json::from_value::<Column>(value.clone())
                .map_err(|e| ConfigError::InvalidColumn(e.to_string()))?,
            other => return Err(ConfigError::InvalidColumn(other.to_string())),
        };
        if column.field.is_empty() {
            return Err(ConfigError::MissingField { index: 0 });
        }
        if column.title.is_empty() {
            column.title = column.field.clone();
        }
        Ok(column)
    }

    /// Virtual columns are projected on the row, not as a cell.
    pub fn is_virtual(&self) -> bool {
        self.attr.is_some()
    }

    /// Column renders as a cell and is not hidden.
    pub fn is_visible(&self) -> bool {
        !self.hidden && !self.is_virtual()
    }

    /// Property by camelCase name, including extra properties.
    pub fn prop(&self, name: &str) -> Option<Value> {
        serde_json::to_value(self).ok()?.get(name).cloned()
    }

    /// Set a property by camelCase name. Unknown names land in `extra`.
    pub fn set_prop(&mut self, name: &str, value: Value) -> Result<(), ConfigError> {
        let Ok(Value::Object(mut map)) = serde_json::to_value(&*self) else {
            return Err(ConfigError::InvalidColumn(self.field.clone()));
        };
        map.insert(name.to_string(), value);
        let updated: Column = serde_json::from_value(Value::Object(map)).map_err(|e| {
            ConfigError::InvalidOption {
                key: name.to_string(),
                message: e.to_string(),
            }
        })?;
        if updated.field.is_empty() {
            return Err(ConfigError::MissingField { index: 0 });
        }
        *self = updated;
        Ok(())
    }
}

/// Normalise raw definitions into columns.
///
/// Invalid definitions and duplicate fields are logged and skipped.
pub fn normalize_columns(raw: &[Value]) -> Vec<Column> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(raw.len());

    for (index, value) in raw.iter().enumerate() {
        let column = match Column::from_value(value) {
            Ok(column) => column,
            Err(ConfigError::MissingField { .. }) => {
                log::error!("{}", ConfigError::MissingField { index });
                continue;
            }
            Err(e) => {
                log::error!("{e}");
                continue;
            }
        };
        if !seen.insert(column.field.clone()) {
            log::error!("{}", ConfigError::DuplicateField(column.field));
            continue;
        }
        columns.push(column);
    }

    columns
}

/// Derive columns from the keys of the first row.
pub fn columns_from_row(row: &Map<String, Value>) -> Vec<Column> {
    row.keys().map(|key| Column::new(key.as_str())).collect()
}
