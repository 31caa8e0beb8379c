//! Grid option set.
//!
//! Options are built by merging, key by key, defaults ← dataset values ←
//! explicit overrides. Every recognised key is a concrete field with a
//! default, so rendering never sees a missing value. A merged value that
//! does not fit its field is logged and the default kept.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::normalize::{attribute_to_key, normalize_data, normalize_for};

/// Dataset key holding a JSON document merged before the other keys.
pub const CONFIG_KEY: &str = "config";

/// Typed option set of a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Element id of the grid. Empty means generated.
    pub id: String,
    /// Endpoint returning rows. `None` means inline/preloaded data only.
    pub url: Option<String>,
    pub per_page: usize,
    /// Emit diagnostic logging.
    pub debug: bool,
    /// Render the filter row.
    pub filter: bool,
    /// Enable the column menu.
    pub menu: bool,
    /// Enable header sorting.
    pub sort: bool,
    /// Delegate paging, filtering and sorting to the server.
    pub server: bool,
    pub server_params: ServerParams,
    /// Field sorted ascending on first render. Empty for none.
    pub default_sort: String,
    pub reorder: bool,
    /// Text direction, projected as the `dir` attribute.
    pub dir: String,
    pub per_page_values: Vec<usize>,
    pub hide_per_page: bool,
    /// Raw column definitions, normalised by [`crate::column::normalize_columns`].
    pub columns: Vec<Value>,
    pub actions: Vec<Action>,
    pub selectable: bool,
    /// Select-all only selects rows on the current page.
    pub select_visible_only: bool,
    pub default_page: usize,
    pub resizable: bool,
    pub autosize: bool,
    pub responsive: bool,
    /// Render the leading toggle column when responsive.
    pub responsive_toggle: bool,
    /// Apply text filters on Enter instead of on every keystroke.
    pub filter_on_enter: bool,
    /// Key holding rows in an object response.
    pub data_key: String,
    /// Average character width in pixels for text measurement.
    pub char_width: u32,
    /// Horizontal cell padding in pixels.
    pub cell_padding: u32,
    pub labels: Labels,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            id: String::new(),
            url: None,
            per_page: 10,
            debug: false,
            filter: false,
            menu: false,
            sort: false,
            server: false,
            server_params: ServerParams::default(),
            default_sort: String::new(),
            reorder: false,
            dir: "ltr".to_string(),
            per_page_values: vec![10, 25, 50, 100, 250],
            hide_per_page: false,
            columns: Vec::new(),
            actions: Vec::new(),
            selectable: false,
            select_visible_only: true,
            default_page: 1,
            resizable: false,
            autosize: true,
            responsive: false,
            responsive_toggle: true,
            filter_on_enter: true,
            data_key: "data".to_string(),
            char_width: 8,
            cell_padding: 16,
            labels: Labels::default(),
        }
    }
}

/// Wire names of the server-mode query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerParams {
    pub start: String,
    pub length: String,
    pub search: String,
    pub sort: String,
    pub sort_dir: String,
}

impl Default for ServerParams {
    fn default() -> Self {
        Self {
            start: "start".to_string(),
            length: "length".to_string(),
            search: "search".to_string(),
            sort: "sort".to_string(),
            sort_dir: "sortDir".to_string(),
        }
    }
}

/// A per-row action button.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Action {
    pub name: String,
    /// Button text; defaults to the name.
    pub title: String,
    pub class: String,
    /// Ask the host for confirmation before emitting.
    pub confirm: bool,
}

impl Action {
    pub fn title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}

/// User-facing strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Labels {
    pub items_per_page: String,
    pub goto_page: String,
    pub goto_first_page: String,
    pub goto_prev_page: String,
    pub goto_next_page: String,
    pub goto_last_page: String,
    pub of: String,
    pub items: String,
    pub resize_column: String,
    pub no_data: String,
    pub are_you_sure: String,
    pub network_error: String,
    pub filter: String,
    pub select_all: String,
    pub columns: String,
    pub actions: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            items_per_page: "Items per page".to_string(),
            goto_page: "Go to page".to_string(),
            goto_first_page: "Go to first page".to_string(),
            goto_prev_page: "Go to previous page".to_string(),
            goto_next_page: "Go to next page".to_string(),
            goto_last_page: "Go to last page".to_string(),
            of: "of".to_string(),
            items: "items".to_string(),
            resize_column: "Resize column".to_string(),
            no_data: "No data".to_string(),
            are_you_sure: "Are you sure?".to_string(),
            network_error: "Network response error".to_string(),
            filter: "Filter".to_string(),
            select_all: "Select all".to_string(),
            columns: "Columns".to_string(),
            actions: "Actions".to_string(),
        }
    }
}

impl Labels {
    /// Label by camelCase key.
    pub fn get(&self, key: &str) -> Option<String> {
        match serde_json::to_value(self).ok()?.get(key)? {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Set a label by camelCase key.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), ConfigError> {
        let mut map = match serde_json::to_value(&*self) {
            Ok(Value::Object(map)) => map,
            _ => return Err(ConfigError::UnknownLabel(key.to_string())),
        };
        if !map.contains_key(key) {
            return Err(ConfigError::UnknownLabel(key.to_string()));
        }
        map.insert(key.to_string(), Value::String(value.into()));
        *self = serde_json::from_value(Value::Object(map)).map_err(|e| ConfigError::InvalidOption {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

impl Options {
    /// Build options from dataset values and explicit overrides.
    ///
    /// Dataset keys may be attribute names (`per-page`) or camelCase keys
    /// (`perPage`); the `config` key holds a JSON document merged first.
    /// Values that cannot be used are logged and replaced by defaults.
    pub fn from_sources(dataset: &BTreeMap<String, String>, overrides: Option<&Value>) -> Self {
        Self::default().merged(&Self::source_patch(dataset, overrides))
    }

    /// Typed patch built from dataset values and explicit overrides, in
    /// merge order.
    pub fn source_patch(
        dataset: &BTreeMap<String, String>,
        overrides: Option<&Value>,
    ) -> Map<String, Value> {
        let mut patch = Map::new();

        if let Some(raw) = dataset.get(CONFIG_KEY) {
            match normalize_data(raw) {
                Value::Object(config) => patch.extend(config),
                Value::Null => {}
                other => log::error!("Dataset config must be an object, got {other}"),
            }
        }

        for (name, raw) in dataset {
            if name == CONFIG_KEY {
                continue;
            }
            let key = attribute_to_key(name);
            let value = normalize_for(&key, raw);
            patch.insert(key, value);
        }

        match overrides {
            Some(Value::Object(overrides)) => {
                patch.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            Some(Value::Null) | None => {}
            Some(other) => log::error!("Option overrides must be an object, got {other}"),
        }

        // the reflected `page` seeds the first page shown
        if let Some(page) = patch.remove("page") {
            patch.insert("defaultPage".to_string(), page);
        }

        patch
    }

    /// Strict parse of a complete JSON option document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::InvalidJson {
            value: raw.to_string(),
            message: e.to_string(),
        })
    }

    /// Copy of these options with `patch` merged over them.
    ///
    /// Keys are applied one at a time; a key whose value does not fit is
    /// logged and left at its current value.
    pub fn merged(&self, patch: &Map<String, Value>) -> Self {
        let Ok(Value::Object(mut current)) = serde_json::to_value(self) else {
            return self.clone();
        };

        let mut merged = current.clone();
        merged.extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
        if let Ok(options) = serde_json::from_value::<Options>(Value::Object(merged)) {
            return options;
        }

        for (key, value) in patch {
            let previous = current.insert(key.clone(), value.clone());
            if let Err(e) = serde_json::from_value::<Options>(Value::Object(current.clone())) {
                log::error!(
                    "{}",
                    ConfigError::InvalidOption {
                        key: key.clone(),
                        message: e.to_string(),
                    }
                );
                match previous {
                    Some(previous) => current.insert(key.clone(), previous),
                    None => current.remove(key),
                };
            }
        }

        serde_json::from_value(Value::Object(current)).unwrap_or_else(|_| self.clone())
    }

    /// Set a single option from a typed JSON value.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        let Ok(Value::Object(mut current)) = serde_json::to_value(&*self) else {
            return Err(ConfigError::UnknownAttribute(key.to_string()));
        };
        if !current.contains_key(key) {
            return Err(ConfigError::UnknownAttribute(key.to_string()));
        }
        current.insert(key.to_string(), value);
        *self = serde_json::from_value(Value::Object(current)).map_err(|e| {
            ConfigError::InvalidOption {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(())
    }

    /// Option value by camelCase key.
    pub fn get(&self, key: &str) -> Option<Value> {
        serde_json::to_value(self).ok()?.get(key).cloned()
    }
}
