//! Reflected attributes and their change hooks.
//!
//! Setting an attribute normalizes the raw string, stores the typed value
//! and, once the grid is ready, runs the change hook for that option.
//! Before the first render only the value is stored.

use serde_json::Value;

use super::Grid;
use crate::column::normalize_columns;
use crate::engine::Effect;
use crate::error::ConfigError;
use crate::normalize::{attribute_to_key, normalize_for};

impl Grid {
    /// Set an attribute from its raw string (`per-page="25"`).
    pub async fn set_attribute(&mut self, name: &str, raw: &str) -> Result<(), ConfigError> {
        let key = attribute_to_key(name);
        let value = normalize_for(&key, raw);
        self.set_option(&key, value).await
    }

    /// Set an option by camelCase key from a typed value.
    pub async fn set_option(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        let effect = match key {
            "page" => {
                let page = positive(key, &value)?;
                if self.lifecycle.fires_change_hooks() {
                    self.core.goto_page(page)
                } else {
                    self.core.state.page = page;
                    Effect::None
                }
            }
            "perPage" => {
                let per_page = positive(key, &value)?;
                if self.lifecycle.fires_change_hooks() {
                    self.core.set_per_page(per_page)
                } else {
                    self.core.state.options.per_page = per_page;
                    Effect::None
                }
            }
            _ => {
                self.core.state.options.set(key, value).inspect_err(|e| {
                    log::error!("[{}] {e}", self.core.id());
                })?;
                if self.lifecycle.fires_change_hooks() {
                    self.option_changed(key)
                } else {
                    Effect::None
                }
            }
        };
        grid_debug!(self.core.state.options, "[{}] {key}Changed", self.core.id());
        self.apply_effect(effect).await;
        Ok(())
    }

    /// Change hook of `key`, run after the new value is stored.
    fn option_changed(&mut self, key: &str) -> Effect {
        match key {
            "debug" | "id" => Effect::None,
            "url" | "dataKey" => {
                if !self.core.state.options.server {
                    self.core.state.original_data = None;
                    self.core.state.data.clear();
                }
                self.core.invalidate_all();
                Effect::Reload
            }
            "server" | "serverParams" => {
                self.core.state.page = 1;
                self.core.invalidate_all();
                Effect::Reload
            }
            "columns" => {
                self.core.state.columns = normalize_columns(&self.core.state.options.columns);
                self.core.invalidate_all();
                Effect::Render
            }
            "filter" => {
                self.core.invalidate_all();
                if self.core.state.options.filter {
                    Effect::Render
                } else {
                    self.core.clear_filters()
                }
            }
            "menu" => {
                if !self.core.state.options.menu {
                    if let Some(menu) = self.plugins.menu_mut() {
                        menu.close(&mut self.core);
                    }
                }
                Effect::None
            }
            "responsive" => {
                if !self.core.state.options.responsive {
                    let collapsed: Vec<String> = self
                        .plugins
                        .responsive()
                        .map(|r| r.collapsed().to_vec())
                        .unwrap_or_default();
                    for field in collapsed {
                        self.core.set_column_hidden(&field, false);
                    }
                }
                self.core.invalidate_all();
                Effect::Render
            }
            "dir" => {
                let dir = self.core.state.options.dir.clone();
                self.core.view_mut().set_attr("dir", dir);
                Effect::None
            }
            _ => {
                self.core.invalidate_all();
                Effect::Render
            }
        }
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    pub fn page(&self) -> usize {
        self.core.state.page
    }

    pub async fn set_page(&mut self, page: usize) {
        self.set_typed("page", Value::from(page)).await;
    }

    pub fn per_page(&self) -> usize {
        self.core.state.options.per_page
    }

    pub async fn set_per_page(&mut self, per_page: usize) {
        self.set_typed("perPage", Value::from(per_page)).await;
    }

    pub fn debug(&self) -> bool {
        self.core.state.options.debug
    }

    pub async fn set_debug(&mut self, debug: bool) {
        self.set_typed("debug", Value::Bool(debug)).await;
    }

    pub fn filterable(&self) -> bool {
        self.core.state.options.filter
    }

    pub async fn set_filterable(&mut self, filter: bool) {
        self.set_typed("filter", Value::Bool(filter)).await;
    }

    pub fn sortable(&self) -> bool {
        self.core.state.options.sort
    }

    pub async fn set_sortable(&mut self, sort: bool) {
        self.set_typed("sort", Value::Bool(sort)).await;
    }

    pub fn reorderable(&self) -> bool {
        self.core.state.options.reorder
    }

    pub async fn set_reorderable(&mut self, reorder: bool) {
        self.set_typed("reorder", Value::Bool(reorder)).await;
    }

    pub fn menu(&self) -> bool {
        self.core.state.options.menu
    }

    pub async fn set_menu(&mut self, menu: bool) {
        self.set_typed("menu", Value::Bool(menu)).await;
    }

    pub fn selectable(&self) -> bool {
        self.core.state.options.selectable
    }

    pub async fn set_selectable(&mut self, selectable: bool) {
        self.set_typed("selectable", Value::Bool(selectable)).await;
    }

    pub fn url(&self) -> Option<&str> {
        self.core.state.options.url.as_deref()
    }

    pub async fn set_url(&mut self, url: Option<&str>) {
        let value = url.map_or(Value::Null, |u| Value::String(u.to_string()));
        self.set_typed("url", value).await;
    }

    pub fn responsive(&self) -> bool {
        self.core.state.options.responsive
    }

    pub async fn set_responsive(&mut self, responsive: bool) {
        self.set_typed("responsive", Value::Bool(responsive)).await;
    }

    async fn set_typed(&mut self, key: &str, value: Value) {
        if let Err(e) = self.set_option(key, value).await {
            log::error!("[{}] cannot set `{key}`: {e}", self.core.id());
        }
    }
}

/// A value of at least 1.
fn positive(key: &str, value: &Value) -> Result<usize, ConfigError> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .filter(|n| *n >= 1)
        .ok_or_else(|| ConfigError::InvalidOption {
            key: key.to_string(),
            message: format!("expected a positive integer, got {value}"),
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::lifecycle::LifecycleState;
    use crate::loader::StaticSource;
    use crate::options::Options;

    fn numbers(count: usize) -> Value {
        Value::Array((1..=count).map(|i| json!({"id": i})).collect())
    }

    #[tokio::test]
    async fn test_attributes_before_ready_store_only() {
        let mut grid = Grid::builder().preload(numbers(30)).build();
        grid.set_attribute("page", "2").await.unwrap();
        grid.set_attribute("data-per-page", "5").await.unwrap();

        assert_eq!(grid.page(), 2);
        assert_eq!(grid.per_page(), 5);
        assert_eq!(grid.lifecycle_state(), LifecycleState::Constructed);
        // nothing rendered yet
        assert!(grid.dom_element(&format!("{}-meta", grid.id())).is_none());
    }

    #[tokio::test]
    async fn test_page_change_hook_when_ready() {
        let mut grid = Grid::builder()
            .options(Options {
                id: "g".into(),
                ..Default::default()
            })
            .preload(numbers(25))
            .build();
        grid.connect();
        grid.first_render().await;

        grid.set_attribute("page", "3").await.unwrap();
        assert!(grid.to_html().contains("21 - 25 of 25 items"));

        grid.set_page(99).await;
        assert_eq!(grid.page(), 3);
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected() {
        let mut grid = Grid::new(Options::default());
        assert!(grid.set_attribute("per-page", "0").await.is_err());
        assert!(grid.set_attribute("page", "abc").await.is_err());
        assert!(grid.set_attribute("no-such-option", "1").await.is_err());
        assert_eq!(grid.per_page(), 10);
    }

    #[tokio::test]
    async fn test_url_change_reloads() {
        let mut grid = Grid::builder()
            .preload(json!([{"id": 1}]))
            .source(StaticSource::new().route("/people", json!([{"id": 7}, {"id": 8}])))
            .build();
        grid.connect();
        grid.first_render().await;

        grid.set_url(Some("/people")).await;
        assert_eq!(grid.url(), Some("/people"));
        assert_eq!(grid.get_data().len(), 2);
    }

    #[tokio::test]
    async fn test_filter_off_clears_filters() {
        let mut grid = Grid::builder()
            .options(Options {
                filter: true,
                ..Default::default()
            })
            .preload(numbers(12))
            .build();
        grid.connect();
        grid.first_render().await;
        grid.set_filter("id", "1").await;
        assert_eq!(grid.get_rows().len(), 4);

        grid.set_filterable(false).await;
        assert!(grid.filters().is_empty());
        assert_eq!(grid.get_rows().len(), 12);
    }

    #[tokio::test]
    async fn test_boolean_setters() {
        let mut grid = Grid::new(Options::default());
        grid.set_sortable(true).await;
        grid.set_reorderable(true).await;
        grid.set_menu(true).await;
        grid.set_selectable(true).await;
        grid.set_responsive(true).await;
        grid.set_debug(true).await;
        assert!(grid.sortable() && grid.reorderable() && grid.menu());
        assert!(grid.selectable() && grid.responsive() && grid.debug());
        assert!(!grid.filterable());
    }
}
