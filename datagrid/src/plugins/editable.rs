//! Inline editing of `editable` columns.

use griddom::{Event, EventKind};

use super::{CellEditor, EventResult, Plugin};
use crate::engine::{EventTarget, GridCore, Role};
use crate::events::GridEvent;
use crate::row::coerce_like;

/// Bundled [`CellEditor`].
///
/// A committed change is written to the working row and to the matching
/// source row, keeping the value's JSON type where the text allows it.
/// The working rows keep their order: the active sort and filters are
/// applied to the edited value on the next sort or filter pass.
#[derive(Debug, Default)]
pub struct EditableColumn;

impl EditableColumn {
    pub const NAME: &'static str = "EditableColumn";

    pub fn new() -> Self {
        Self
    }
}

impl Plugin for EditableColumn {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn handles(&self) -> &'static [EventKind] {
        &[EventKind::Change]
    }

    fn handle_event(
        &mut self,
        grid: &mut GridCore,
        event: &Event,
        target: Option<&EventTarget>,
    ) -> EventResult {
        let (Event::Change { value, .. }, Some(target)) = (event, target) else {
            return EventResult::Ignored;
        };
        if !target.is(Role::Edit) {
            return EventResult::Ignored;
        }
        let (Some(index), Some(field)) = (target.row, target.field.as_deref()) else {
            return EventResult::Ignored;
        };
        self.commit(grid, index, field, value);
        EventResult::Consumed
    }
}

impl CellEditor for EditableColumn {
    fn commit(&mut self, grid: &mut GridCore, index: usize, field: &str, text: &str) -> bool {
        if !grid.state.column(field).is_some_and(|c| c.editable) {
            log::warn!("Column `{field}` is not editable");
            return false;
        }
        let Some(row) = grid.state.data.get(index) else {
            log::warn!("Cannot edit missing row {index}");
            return false;
        };
        let value = coerce_like(row.get(field), text);
        if row.get(field) == Some(&value) {
            return false;
        }

        let before = row.clone();
        let key = grid.state.row_key(&before);
        if let Some(source) = grid
            .state
            .original_data
            .as_mut()
            .and_then(|rows| rows.iter_mut().find(|r| **r == before))
        {
            source.insert(field.to_string(), value.clone());
        }
        if let Some(row) = grid.state.data.get_mut(index) {
            row.insert(field.to_string(), value.clone());
        }
        grid_debug!(grid.state.options, "Edit `{key}`.{field} = {value}");

        grid.invalidate_body();
        grid.emit(GridEvent::Edit {
            key,
            field: field.to_string(),
            value,
        });
        true
    }
}
