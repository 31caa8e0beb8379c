//! Column resizing by dragging a handle on the header cell.

use griddom::{Element, Event, EventKind};

use super::{ColumnResizer, EventResult, Plugin};
use crate::engine::{EventTarget, GridCore, Role};
use crate::events::GridEvent;
use crate::render::MIN_COLUMN_WIDTH;

/// A resize in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Drag {
    field: String,
    start_x: i32,
    start_width: u32,
    width: u32,
}

/// Bundled [`ColumnResizer`].
#[derive(Debug, Default)]
pub struct ColumnResizerPlugin {
    drag: Option<Drag>,
}

impl ColumnResizerPlugin {
    pub const NAME: &'static str = "ColumnResizer";

    pub fn new() -> Self {
        Self::default()
    }

    fn start(&mut self, grid: &mut GridCore, field: &str, x: i32) -> EventResult {
        let Some(column) = grid.state.column(field) else {
            return EventResult::Ignored;
        };
        let start_width = column
            .width
            .unwrap_or_else(|| grid.column_min_width(column));
        grid_debug!(grid.state.options, "Resize `{field}` from {start_width}");
        grid.state.resizing = true;
        self.drag = Some(Drag {
            field: field.to_string(),
            start_x: x,
            start_width,
            width: start_width,
        });
        EventResult::Consumed
    }

    fn track(&mut self, grid: &mut GridCore, x: i32) -> EventResult {
        let Some(drag) = self.drag.as_mut() else {
            return EventResult::Ignored;
        };
        let width = i64::from(drag.start_width) + i64::from(x) - i64::from(drag.start_x);
        drag.width = u32::try_from(width.max(0))
            .unwrap_or(u32::MAX)
            .max(MIN_COLUMN_WIDTH);

        let th = grid.ids().child(&["th", &drag.field]);
        if let Some(cell) = grid.element_mut(&th) {
            cell.width = Some(drag.width);
        }
        EventResult::Consumed
    }

    fn finish(&mut self, grid: &mut GridCore, x: i32) -> EventResult {
        if self.drag.is_none() {
            return EventResult::Ignored;
        }
        self.track(grid, x);
        let Some(drag) = self.drag.take() else {
            return EventResult::Ignored;
        };
        grid.state.resizing = false;

        if let Some(column) = grid.state.column_mut(&drag.field) {
            column.width = Some(drag.width);
        }
        grid.invalidate_header();
        grid.emit(GridEvent::ColumnResized {
            field: drag.field,
            width: drag.width,
        });
        EventResult::Consumed
    }
}

impl Plugin for ColumnResizerPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn disconnected(&mut self, grid: &mut GridCore) {
        if self.drag.take().is_some() {
            grid.state.resizing = false;
        }
    }

    fn handles(&self) -> &'static [EventKind] {
        &[EventKind::PointerDown, EventKind::PointerMove, EventKind::PointerUp]
    }

    fn handle_event(
        &mut self,
        grid: &mut GridCore,
        event: &Event,
        target: Option<&EventTarget>,
    ) -> EventResult {
        if !grid.resize_enabled() {
            return EventResult::Ignored;
        }
        match event {
            Event::PointerDown { x, .. } => match target {
                Some(target) if target.is(Role::ResizeHandle) => match &target.field {
                    Some(field) => self.start(grid, field, *x),
                    None => EventResult::Ignored,
                },
                _ => EventResult::Ignored,
            },
            Event::PointerMove { x } => self.track(grid, *x),
            Event::PointerUp { x } => self.finish(grid, *x),
            _ => EventResult::Ignored,
        }
    }

    fn header_rendered(&mut self, grid: &mut GridCore) {
        if !grid.resize_enabled() {
            return;
        }
        let title = grid.state.options.labels.resize_column.clone();
        let fields: Vec<String> = grid
            .state
            .cell_columns()
            .map(|c| c.field.clone())
            .collect();
        for field in fields {
            let th = grid.ids().child(&["th", &field]);
            let handle = grid.ids().child(&["resize", &field]);
            if let Some(cell) = grid.element_mut(&th) {
                cell.push_child(
                    Element::text("")
                        .id(handle)
                        .class("dg-resizer")
                        .data(Role::KEY, Role::ResizeHandle.as_str())
                        .data("field", field.as_str())
                        .attr("title", title.as_str()),
                );
            }
        }
    }
}

impl ColumnResizer for ColumnResizerPlugin {
    fn is_resizing(&self) -> bool {
        self.drag.is_some()
    }
}
