//! State-changing operations.
//!
//! Each operation mutates the state, marks the sections it affects and
//! reports whether a reload is needed. The async side lives in
//! [`crate::Grid`].

use serde_json::Value;

use super::{class, Effect, GridCore};
use crate::column::normalize_columns;
use crate::loader::LoadResponse;
use crate::row::Row;
use crate::sort::{SortDirection, SortState};

impl GridCore {
    // =========================================================================
    // Sorting
    // =========================================================================

    /// Cycle the sort indicator of `field`, or re-apply the active sort.
    ///
    /// Skipped while a column is being resized, while a load is in flight,
    /// and for non-sortable columns.
    pub fn sort_column(&mut self, field: Option<&str>) -> Effect {
        if !self.can_sort() {
            return Effect::None;
        }

        if let Some(field) = field {
            match self.state.column(field) {
                None => {
                    log::warn!("Cannot sort unknown column `{field}`");
                    return Effect::None;
                }
                Some(column) if column.no_sort => {
                    grid_debug!(self.state.options, "Column `{field}` is not sortable");
                    return Effect::None;
                }
                Some(_) => {}
            }
            let indicator = self.state.cycle_sort(field);
            grid_debug!(self.state.options, "Sort `{field}` {}", indicator.as_aria());
        }

        self.apply_sort_state()
    }

    /// Set the sort directly; `None` clears it.
    pub fn set_sort(&mut self, field: &str, direction: Option<SortDirection>) -> Effect {
        if !self.can_sort() {
            return Effect::None;
        }
        if self.state.column(field).is_none() {
            log::warn!("Cannot sort unknown column `{field}`");
            return Effect::None;
        }
        self.state.sort = direction.map(|direction| SortState::new(field, direction));
        self.apply_sort_state()
    }

    fn can_sort(&self) -> bool {
        if self.state.resizing {
            grid_debug!(self.state.options, "Sort skipped: resize in progress");
            return false;
        }
        if self.state.loading {
            grid_debug!(self.state.options, "Sort skipped: load in progress");
            return false;
        }
        true
    }

    fn apply_sort_state(&mut self) -> Effect {
        self.invalidate_header();
        if self.state.options.server {
            return Effect::Reload;
        }
        self.state.apply_sort();
        self.invalidate_body();
        Effect::Render
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// Record filter text without applying it.
    pub fn set_filter_text(&mut self, field: &str, text: &str) {
        if text.is_empty() {
            self.state.filters.remove(field);
        } else {
            self.state.filters.insert(field.to_string(), text.to_string());
        }
    }

    /// Apply the current filters, back on page 1.
    pub fn filter_data(&mut self) -> Effect {
        self.state.page = 1;
        if self.state.options.server {
            return Effect::Reload;
        }
        self.state.rebuild_data();
        self.invalidate_body();
        Effect::Render
    }

    /// Drop all filters and apply.
    pub fn clear_filters(&mut self) -> Effect {
        self.state.filters.clear();
        self.invalidate_header();
        self.filter_data()
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Go to `page`, clamped into range.
    pub fn goto_page(&mut self, page: usize) -> Effect {
        let previous = self.state.page;
        self.state.page = page;
        self.state.fix_page();
        grid_debug!(self.state.options, "Page {} -> {}", previous, self.state.page);

        if self.state.options.server {
            if self.state.page == previous {
                return Effect::None;
            }
            return Effect::Reload;
        }
        Effect::Render
    }

    pub fn first_page(&mut self) -> Effect {
        self.goto_page(1)
    }

    pub fn prev_page(&mut self) -> Effect {
        self.goto_page(self.state.page.saturating_sub(1))
    }

    pub fn next_page(&mut self) -> Effect {
        self.goto_page(self.state.page + 1)
    }

    pub fn last_page(&mut self) -> Effect {
        self.goto_page(self.state.total_pages())
    }

    /// Change the page size, keeping the page in range.
    pub fn set_per_page(&mut self, per_page: usize) -> Effect {
        if per_page == 0 {
            log::error!("perPage must be positive");
            return Effect::None;
        }
        if self.state.options.per_page == per_page {
            return Effect::None;
        }
        self.state.options.per_page = per_page;
        self.state.fix_page();
        self.invalidate_footer();
        if self.state.options.server {
            return Effect::Reload;
        }
        Effect::Render
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Append a row. Logged no-op before the first load.
    pub fn add_row(&mut self, row: Row) -> bool {
        if !self.state.add_row(row) {
            log::warn!("[{}] add_row ignored: no data loaded", self.id());
            return false;
        }
        self.invalidate_body();
        true
    }

    /// Remove a row; see [`crate::GridState::remove_row`].
    pub fn remove_row(&mut self, value: Option<&Value>, key: Option<&str>) -> Option<Row> {
        if !self.state.has_data() {
            log::warn!("[{}] remove_row ignored: no data loaded", self.id());
            return None;
        }
        let removed = self.state.remove_row(value, key)?;
        let removed_key = self.state.row_key(&removed);
        self.state.selection.retain(|key| *key != removed_key);
        self.invalidate_body();
        Some(removed)
    }

    pub fn clear_data(&mut self) -> bool {
        if !self.state.clear_data() {
            return false;
        }
        self.invalidate_body();
        true
    }

    /// Apply a parsed response: option overrides, meta, then rows.
    pub fn apply_response(&mut self, response: LoadResponse) {
        if let Some(patch) = response.options {
            let columns_changed = patch.contains_key("columns");
            self.state.options = self.state.options.merged(&patch);
            if columns_changed {
                self.state.columns = normalize_columns(&self.state.options.columns);
            }
        }
        if let Some(meta) = response.meta {
            self.state.meta = meta;
        }
        grid_debug!(
            self.state.options,
            "[{}] loaded {} rows",
            self.id(),
            response.rows.len()
        );
        self.state.set_rows(response.rows);
        self.invalidate_all();
    }

    // =========================================================================
    // Load flags
    // =========================================================================

    /// Mark a load as started: loading on, error and empty flags off.
    pub(crate) fn start_loading(&mut self) {
        self.state.loading = true;
        self.state.network_error = None;
        let root = self.view_mut();
        root.add_class(class::LOADING);
        root.remove_class(class::NETWORK_ERROR);
        root.remove_class(class::EMPTY);
    }

    /// Record a failed load and stop retrying it.
    pub(crate) fn fail_loading(&mut self, message: String, displayed: bool) {
        self.state.options.url = None;
        if displayed {
            self.state.network_error = Some(message);
            self.invalidate_body();
        }
    }

    /// Loading off and root flags synced, whatever the outcome.
    pub(crate) fn finalize_loading(&mut self) {
        self.state.loading = false;
        self.sync_root_flags();
    }

    /// Project loading, empty and error flags onto the root classes.
    pub(crate) fn sync_root_flags(&mut self) {
        let loading = self.state.loading;
        let empty = !loading && self.state.data.is_empty();
        let error = self.state.network_error.is_some();
        let root = self.view_mut();
        root.toggle_class(class::LOADING, loading);
        root.toggle_class(class::EMPTY, empty);
        root.toggle_class(class::NETWORK_ERROR, error);
    }
}
