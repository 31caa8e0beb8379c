//! Imperative API: rows, filtering, sorting, columns, paging, labels, view
//! and events.

use std::time::Instant;

use griddom::{to_html, Element};
use serde_json::Value;

use super::Grid;
use crate::error::ConfigError;
use crate::events::{GridEvent, ListenerId};
use crate::filter::Filters;
use crate::options::Action;
use crate::row::Row;
use crate::sort::{SortDirection, SortState};

impl Grid {
    // =========================================================================
    // Rows
    // =========================================================================

    /// Append a row. Returns `false` (logged) before any data is loaded.
    pub fn add_row(&mut self, row: Row) -> bool {
        let added = self.core.add_row(row);
        self.flush();
        added
    }

    /// Remove the first row whose `key` field (default: first column)
    /// equals `value`; without a value, the last row.
    pub fn remove_row(&mut self, value: Option<&Value>, key: Option<&str>) -> Option<Row> {
        let removed = self.core.remove_row(value, key);
        self.flush();
        removed
    }

    /// Empty the grid. Returns `false` when already empty.
    pub fn clear_data(&mut self) -> bool {
        let cleared = self.core.clear_data();
        self.flush();
        cleared
    }

    /// Source rows, unfiltered and unsorted.
    pub fn get_data(&self) -> &[Row] {
        self.core.state.original()
    }

    /// Working rows, filtered and sorted.
    pub fn get_rows(&self) -> &[Row] {
        &self.core.state.data
    }

    /// Selected rows; empty without a selection plugin.
    pub fn get_selection(&self) -> Vec<Row> {
        self.plugins
            .selection()
            .map(|selection| selection.selected_rows(&self.core))
            .unwrap_or_default()
    }

    /// Select or clear every selectable row.
    pub fn select_all(&mut self, selected: bool) {
        match self.plugins.selection_mut() {
            Some(selection) => selection.select_all(&mut self.core, selected),
            None => log::warn!("[{}] no selection plugin", self.core.id()),
        }
        self.flush();
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Apply the current filters.
    pub async fn filter_data(&mut self) {
        let effect = self.core.filter_data();
        self.apply_effect(effect).await;
    }

    /// Set the filter text of `field` and apply; empty text removes it.
    pub async fn set_filter(&mut self, field: &str, text: &str) {
        if self.core.state.column(field).is_none() {
            log::warn!("Cannot filter unknown column `{field}`");
            return;
        }
        self.core.set_filter_text(field, text);
        self.core.invalidate_header();
        self.filter_data().await;
    }

    /// Drop every filter and apply.
    pub async fn clear_filter(&mut self) {
        let effect = self.core.clear_filters();
        self.apply_effect(effect).await;
    }

    pub fn filters(&self) -> &Filters {
        &self.core.state.filters
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Cycle the sort of `field`, or re-apply the active sort with `None`.
    pub async fn sort_data(&mut self, field: Option<&str>) {
        let effect = self.core.sort_column(field);
        self.apply_effect(effect).await;
    }

    /// Sort `field` in `direction`; `None` clears the sort.
    pub async fn sort_by(&mut self, field: &str, direction: Option<SortDirection>) {
        let effect = self.core.set_sort(field, direction);
        self.apply_effect(effect).await;
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.core.state.sort.as_ref()
    }

    // =========================================================================
    // Columns
    // =========================================================================

    pub fn show_column(&mut self, field: &str) -> bool {
        let changed = self.core.set_column_hidden(field, false);
        self.flush();
        changed
    }

    pub fn hide_column(&mut self, field: &str) -> bool {
        let changed = self.core.set_column_hidden(field, true);
        self.flush();
        changed
    }

    /// Move `field` before `before`, or to the end. Needs a reorder plugin.
    pub fn move_column(&mut self, field: &str, before: Option<&str>) -> bool {
        let moved = match self.plugins.reorder_mut() {
            Some(reorder) => reorder.move_column(&mut self.core, field, before),
            None => {
                log::warn!("[{}] no reorder plugin", self.core.id());
                false
            }
        };
        self.flush();
        moved
    }

    /// Width available to the table. Feeds auto-sizing and, through its
    /// debounce, responsive collapsing.
    pub fn set_container_width(&mut self, width: u32) {
        match self.plugins.responsive_mut() {
            Some(responsive) => {
                responsive.observe_width(&mut self.core, width, Instant::now());
            }
            None => {
                self.core.state.container_width = Some(width);
                self.core.invalidate_header();
            }
        }
        self.flush();
    }

    /// Apply a container width still held back by the debounce.
    pub fn settle_layout(&mut self) -> bool {
        let settled = self
            .plugins
            .responsive_mut()
            .is_some_and(|responsive| responsive.settle(&mut self.core, Instant::now()));
        self.flush();
        settled
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    pub async fn goto_page(&mut self, page: usize) {
        let effect = self.core.goto_page(page);
        self.apply_effect(effect).await;
    }

    pub async fn get_first(&mut self) {
        let effect = self.core.first_page();
        self.apply_effect(effect).await;
    }

    pub async fn get_prev(&mut self) {
        let effect = self.core.prev_page();
        self.apply_effect(effect).await;
    }

    pub async fn get_next(&mut self) {
        let effect = self.core.next_page();
        self.apply_effect(effect).await;
    }

    pub async fn get_last(&mut self) {
        let effect = self.core.last_page();
        self.apply_effect(effect).await;
    }

    pub fn total_records(&self) -> usize {
        self.core.state.total_records()
    }

    pub fn total_pages(&self) -> usize {
        self.core.state.total_pages()
    }

    // =========================================================================
    // Labels
    // =========================================================================

    pub fn get_label(&self, key: &str) -> Option<String> {
        self.core.state.options.labels.get(key)
    }

    pub fn set_label(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.core.state.options.labels.set(key, value)?;
        self.refresh();
        Ok(())
    }

    // =========================================================================
    // View
    // =========================================================================

    /// Root of the rendered element tree.
    pub fn dom(&self) -> &Element {
        self.core.view()
    }

    pub fn dom_element(&self, id: &str) -> Option<&Element> {
        self.core.element(id)
    }

    pub fn to_html(&self) -> String {
        to_html(self.core.view())
    }

    // =========================================================================
    // Events and hooks
    // =========================================================================

    pub fn subscribe(&mut self, listener: impl FnMut(&GridEvent) + Send + 'static) -> ListenerId {
        self.core.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.core.events.unsubscribe(id)
    }

    /// Take the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        self.core.events.drain()
    }

    pub fn register_formatter(
        &mut self,
        name: impl Into<String>,
        formatter: impl Fn(&Value, &Row) -> String + Send + Sync + 'static,
    ) {
        self.core.formatters.register_formatter(name, formatter);
        self.core.invalidate_body();
    }

    pub fn register_transform(
        &mut self,
        name: impl Into<String>,
        transform: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) {
        self.core.formatters.register_transform(name, transform);
        self.core.invalidate_body();
    }

    /// Host confirmation for actions flagged `confirm`. Without one, every
    /// action is confirmed.
    pub fn set_confirm_handler(
        &mut self,
        handler: impl FnMut(&Action, &Row) -> bool + Send + 'static,
    ) {
        self.core.set_confirm_handler(handler);
    }
}
