//! Row selection through a leading checkbox column.

use griddom::{Event, EventKind};

use super::{EventResult, Plugin, RowSelection};
use crate::engine::{EventTarget, GridCore, Role};
use crate::events::GridEvent;

/// Bundled [`RowSelection`].
///
/// Rows are identified by their key (first column value), so the selection
/// survives sorting, filtering and paging.
#[derive(Debug, Default)]
pub struct SelectableRows {
    /// Working-row index of the last toggled row, for range selection.
    anchor: Option<usize>,
}

impl SelectableRows {
    pub const NAME: &'static str = "SelectableRows";

    pub fn new() -> Self {
        Self::default()
    }

    fn set_selected(grid: &mut GridCore, key: String, selected: bool) {
        let present = grid.state.selection.contains(&key);
        if selected && !present {
            grid.state.selection.push(key);
        } else if !selected && present {
            grid.state.selection.retain(|k| *k != key);
        }
    }

    fn changed(grid: &mut GridCore) {
        grid.invalidate_header();
        grid.invalidate_body();
        let selection = grid.state.selection.clone();
        grid.emit(GridEvent::RowsSelected { selection });
    }
}

impl Plugin for SelectableRows {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn disconnected(&mut self, _grid: &mut GridCore) {
        self.anchor = None;
    }

    fn handles(&self) -> &'static [EventKind] {
        &[EventKind::Click]
    }

    fn handle_event(
        &mut self,
        grid: &mut GridCore,
        event: &Event,
        target: Option<&EventTarget>,
    ) -> EventResult {
        let (Event::Click { modifiers, .. }, Some(target)) = (event, target) else {
            return EventResult::Ignored;
        };
        if !grid.selection_enabled() {
            return EventResult::Ignored;
        }
        match target.role {
            Some(Role::SelectRow) => match target.row {
                Some(index) => {
                    self.toggle_row(grid, index, modifiers.shift);
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            },
            Some(Role::SelectAll) => {
                let selected = !grid.all_rows_selected();
                self.select_all(grid, selected);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}

impl RowSelection for SelectableRows {
    fn toggle_row(&mut self, grid: &mut GridCore, index: usize, range: bool) {
        let Some(row) = grid.state.data.get(index) else {
            log::warn!("Cannot select missing row {index}");
            return;
        };
        let key = grid.state.row_key(row);
        let selected = !grid.state.selection.contains(&key);

        let last = grid.state.data.len() - 1;
        let indices = match (range, self.anchor) {
            (true, Some(anchor)) => anchor.min(index)..=anchor.max(index).min(last),
            _ => index..=index,
        };
        let keys: Vec<String> = grid.state.data[indices.clone()]
            .iter()
            .map(|row| grid.state.row_key(row))
            .collect();
        for key in keys {
            Self::set_selected(grid, key, selected);
        }
        grid_debug!(
            grid.state.options,
            "Rows {indices:?} {}",
            if selected { "selected" } else { "deselected" }
        );

        self.anchor = Some(index);
        Self::changed(grid);
    }

    fn select_all(&mut self, grid: &mut GridCore, selected: bool) {
        let rows = if grid.state.options.select_visible_only {
            grid.state.page_rows()
        } else {
            &grid.state.data
        };
        let keys: Vec<String> = rows.iter().map(|row| grid.state.row_key(row)).collect();
        for key in keys {
            Self::set_selected(grid, key, selected);
        }
        self.anchor = None;
        Self::changed(grid);
    }
}
