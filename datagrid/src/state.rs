//! Grid state model: the single source of truth the view is projected from.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::column::{normalize_columns, Column};
use crate::filter::{filter_rows, Filters};
use crate::options::Options;
use crate::pagination::{clamp_page, page_window, total_pages, PageWindow};
use crate::row::{field_text, Row};
use crate::sort::{restore_original_order, sort_rows, SortIndicator, SortState};

/// Totals reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    /// Record count before filtering.
    pub total: usize,
    /// Record count after filtering; drives server-side paging.
    pub filtered: usize,
    /// Extra query parameters echoed back on the next request.
    pub params: Map<String, Value>,
}

/// All mutable grid state.
#[derive(Debug, Clone)]
pub struct GridState {
    pub options: Options,
    pub columns: Vec<Column>,
    /// Unfiltered, unsorted source rows. `None` until first loaded.
    pub original_data: Option<Vec<Row>>,
    /// Working view derived from `original_data` by filtering and sorting.
    pub data: Vec<Row>,
    /// 1-based current page.
    pub page: usize,
    pub meta: Meta,
    pub sort: Option<SortState>,
    pub filters: Filters,
    pub loading: bool,
    /// Message of the last failed load, shown in the empty state.
    pub network_error: Option<String>,
    /// Set while a column resize is in progress.
    pub resizing: bool,
    /// Keys of selected rows, in selection order.
    pub selection: Vec<String>,
    /// Keys of rows whose collapsed columns are expanded.
    pub expanded: BTreeSet<String>,
    /// Width available to the table, in pixels.
    pub container_width: Option<u32>,
    /// Generation of the latest started load.
    pub load_generation: u64,
}

impl GridState {
    pub fn new(options: Options) -> Self {
        let columns = normalize_columns(&options.columns);
        let page = options.default_page.max(1);
        Self {
            options,
            columns,
            original_data: None,
            data: Vec::new(),
            page,
            meta: Meta::default(),
            sort: None,
            filters: Filters::new(),
            loading: false,
            network_error: None,
            resizing: false,
            selection: Vec::new(),
            expanded: BTreeSet::new(),
            container_width: None,
            load_generation: 0,
        }
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Source rows, empty when nothing is loaded.
    pub fn original(&self) -> &[Row] {
        self.original_data.as_deref().unwrap_or(&[])
    }

    pub fn has_data(&self) -> bool {
        self.original_data.is_some()
    }

    /// Replace the source rows and rebuild the working view.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        if self.columns.is_empty() {
            if let Some(first) = rows.first() {
                self.columns = crate::column::columns_from_row(first);
            }
        }
        self.original_data = Some(rows);
        self.rebuild_data();
    }

    /// Rebuild `data` from `original_data`.
    ///
    /// Server mode keeps rows as returned; the server already filtered,
    /// sorted and paged them.
    pub fn rebuild_data(&mut self) {
        if self.options.server {
            self.data = self.original().to_vec();
            return;
        }
        self.data = filter_rows(self.original(), &self.filters);
        self.apply_sort();
    }

    /// Re-apply the active sort to `data`, or restore source order.
    pub fn apply_sort(&mut self) {
        if self.options.server {
            return;
        }
        match &self.sort {
            Some(sort) => {
                let field = sort.field.clone();
                sort_rows(&mut self.data, &field, sort.direction);
            }
            None => {
                self.data = restore_original_order(self.original(), &self.data);
            }
        }
    }

    /// Append a row. Returns `false` when no collection is loaded yet.
    pub fn add_row(&mut self, row: Row) -> bool {
        let Some(original) = self.original_data.as_mut() else {
            return false;
        };
        original.push(row);
        if self.columns.is_empty() {
            if let Some(first) = self.original_data.as_deref().and_then(|rows| rows.first()) {
                self.columns = crate::column::columns_from_row(first);
            }
        }
        self.rebuild_data();
        true
    }

    /// Remove the first row whose `key` field equals `value`.
    ///
    /// `key` defaults to the first column's field; without a value the last
    /// row is removed.
    pub fn remove_row(&mut self, value: Option<&Value>, key: Option<&str>) -> Option<Row> {
        let key = key
            .map(str::to_string)
            .or_else(|| self.columns.first().map(|c| c.field.clone()));
        let original = self.original_data.as_mut()?;

        let index = match value {
            None => original.len().checked_sub(1)?,
            Some(value) => {
                let key = key?;
                original.iter().position(|row| row.get(&key) == Some(value))?
            }
        };
        let removed = original.remove(index);
        self.rebuild_data();
        Some(removed)
    }

    /// Empty both collections. Returns `false` when already empty.
    pub fn clear_data(&mut self) -> bool {
        if self.original().is_empty() && self.data.is_empty() {
            return false;
        }
        self.original_data = Some(Vec::new());
        self.data.clear();
        self.selection.clear();
        self.expanded.clear();
        self.page = 1;
        true
    }

    /// Key identifying a row: the value of the first column's field.
    pub fn row_key(&self, row: &Row) -> String {
        self.columns
            .first()
            .map(|c| field_text(row, &c.field))
            .unwrap_or_default()
    }

    // =========================================================================
    // Columns
    // =========================================================================

    pub fn column(&self, field: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.field == field)
    }

    pub fn column_mut(&mut self, field: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.field == field)
    }

    /// Columns rendered as cells and not hidden.
    pub fn visible_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_visible()).collect()
    }

    /// Cell columns that are hidden.
    pub fn hidden_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| !c.is_virtual() && c.hidden)
            .collect()
    }

    /// Columns rendered as cells, hidden or not.
    pub fn cell_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_virtual())
    }

    /// 1-based index of the first data column, after the optional
    /// selection and responsive-toggle slots.
    pub fn start_column_index(&self, selection_slot: bool, toggle_slot: bool) -> usize {
        1 + usize::from(selection_slot) + usize::from(toggle_slot)
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Indicator currently shown for `field`.
    pub fn sort_indicator(&self, field: &str) -> SortIndicator {
        match &self.sort {
            Some(sort) if sort.field == field => SortIndicator::from(Some(sort.direction)),
            _ => SortIndicator::None,
        }
    }

    /// Advance the indicator of `field`; every other header resets.
    pub fn cycle_sort(&mut self, field: &str) -> SortIndicator {
        let next = self.sort_indicator(field).next();
        self.sort = next
            .direction()
            .map(|direction| SortState::new(field, direction));
        next
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Server-reported filtered count in server mode, else `data` length.
    pub fn total_records(&self) -> usize {
        if self.options.server {
            self.meta.filtered
        } else {
            self.data.len()
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_records(), self.options.per_page)
    }

    /// Clamp `page` into range. Returns `true` when it changed.
    pub fn fix_page(&mut self) -> bool {
        let fixed = clamp_page(self.page, self.total_pages());
        let changed = fixed != self.page;
        self.page = fixed;
        changed
    }

    pub fn page_window(&self) -> PageWindow {
        page_window(self.page, self.options.per_page, self.total_records())
    }

    /// Rows of `data` on the current page.
    pub fn page_rows(&self) -> &[Row] {
        if self.options.server {
            return &self.data;
        }
        let window = self.page_window();
        if window.is_empty() {
            return &[];
        }
        let start = (window.low - 1).min(self.data.len());
        let end = window.high.min(self.data.len());
        &self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::sort::SortDirection;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    fn state_with(count: usize) -> GridState {
        let mut state = GridState::new(Options::default());
        state.set_rows(
            (1..=count)
                .map(|i| row(json!({"id": i, "name": format!("row {i}")})))
                .collect(),
        );
        state
    }

    #[test]
    fn test_columns_derived_from_first_row() {
        let state = state_with(1);
        let fields: Vec<&str> = state.columns.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["id", "name"]);
    }

    #[test]
    fn test_add_row_requires_collection() {
        let mut state = GridState::new(Options::default());
        assert!(!state.add_row(row(json!({"id": 1}))));

        let mut state = state_with(3);
        assert!(state.add_row(row(json!({"id": 99, "name": "x"}))));
        assert_eq!(state.original().len(), 4);
        assert_eq!(state.data.len(), 4);
    }

    #[test]
    fn test_remove_row_defaults_to_last() {
        let mut state = state_with(3);
        let removed = state.remove_row(None, None).unwrap();
        assert_eq!(removed["id"], json!(3));
        assert_eq!(state.data.len(), 2);
    }

    #[test]
    fn test_remove_row_by_first_column() {
        let mut state = state_with(3);
        let removed = state.remove_row(Some(&json!(2)), None).unwrap();
        assert_eq!(removed["id"], json!(2));
        assert!(state.remove_row(Some(&json!(42)), None).is_none());
    }

    #[test]
    fn test_remove_row_by_key() {
        let mut state = state_with(3);
        let removed = state.remove_row(Some(&json!("row 1")), Some("name")).unwrap();
        assert_eq!(removed["id"], json!(1));
    }

    #[test]
    fn test_clear_data_noop_when_empty() {
        let mut state = GridState::new(Options::default());
        assert!(!state.clear_data());

        let mut state = state_with(2);
        assert!(state.clear_data());
        assert!(state.data.is_empty());
        assert!(state.has_data());
    }

    #[test]
    fn test_cycle_sort_single_active() {
        let mut state = state_with(3);
        assert_eq!(state.cycle_sort("name"), SortIndicator::Ascending);
        assert_eq!(state.cycle_sort("id"), SortIndicator::Ascending);
        assert_eq!(state.sort_indicator("name"), SortIndicator::None);
        assert_eq!(state.cycle_sort("id"), SortIndicator::Descending);
        assert_eq!(state.cycle_sort("id"), SortIndicator::None);
        assert!(state.sort.is_none());
    }

    #[test]
    fn test_rebuild_keeps_sort_and_filters() {
        let mut state = state_with(12);
        state.filters.insert("name".into(), "row 1".into());
        state.sort = Some(SortState::new("id", SortDirection::Descending));
        state.rebuild_data();

        let ids: Vec<i64> = state.data.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![12, 11, 10, 1]);
    }

    #[test]
    fn test_fix_page_clamps() {
        let mut state = state_with(25);
        state.page = 9;
        assert!(state.fix_page());
        assert_eq!(state.page, 3);

        state.page = 0;
        state.fix_page();
        assert_eq!(state.page, 1);

        let mut empty = GridState::new(Options::default());
        empty.page = 4;
        empty.fix_page();
        assert_eq!(empty.page, 1);
    }

    #[test]
    fn test_server_totals() {
        let mut state = GridState::new(Options {
            server: true,
            ..Default::default()
        });
        state.set_rows((0..10).map(|i| row(json!({"id": i}))).collect());
        state.meta = Meta {
            total: 100,
            filtered: 42,
            params: Map::new(),
        };
        assert_eq!(state.total_records(), 42);
        assert_eq!(state.total_pages(), 5);
        assert_eq!(state.page_rows().len(), 10);
    }

    #[test]
    fn test_page_rows_client() {
        let mut state = state_with(25);
        state.page = 3;
        let rows = state.page_rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0]["id"], json!(21));
    }

    #[test]
    fn test_start_column_index() {
        let state = GridState::new(Options::default());
        assert_eq!(state.start_column_index(false, false), 1);
        assert_eq!(state.start_column_index(true, true), 3);
    }
}
