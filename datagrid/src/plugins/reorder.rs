//! Column reordering by dragging header cells.

use griddom::{Event, EventKind};

use super::{ColumnReorder, EventResult, Plugin};
use crate::engine::{EventTarget, GridCore, Role};
use crate::events::GridEvent;

/// Bundled [`ColumnReorder`].
#[derive(Debug, Default)]
pub struct DraggableHeaders {
    dragging: Option<String>,
}

impl DraggableHeaders {
    pub const NAME: &'static str = "DraggableHeaders";

    pub fn new() -> Self {
        Self::default()
    }

    fn header_field(target: Option<&EventTarget>) -> Option<&str> {
        target
            .filter(|t| t.is(Role::Header))
            .and_then(|t| t.field.as_deref())
    }
}

impl Plugin for DraggableHeaders {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn handles(&self) -> &'static [EventKind] {
        &[EventKind::DragStart, EventKind::Drop, EventKind::DragEnd]
    }

    fn handle_event(
        &mut self,
        grid: &mut GridCore,
        event: &Event,
        target: Option<&EventTarget>,
    ) -> EventResult {
        if !grid.reorder_enabled() {
            return EventResult::Ignored;
        }
        match event {
            Event::DragStart { .. } => match Self::header_field(target) {
                Some(field) => {
                    self.dragging = Some(field.to_string());
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            },
            Event::Drop { .. } => {
                let (Some(source), Some(dest)) = (self.dragging.take(), Self::header_field(target))
                else {
                    return EventResult::Ignored;
                };
                let dest = dest.to_string();
                self.move_column(grid, &source, Some(&dest));
                EventResult::Consumed
            }
            Event::DragEnd => {
                self.dragging = None;
                EventResult::Ignored
            }
            _ => EventResult::Ignored,
        }
    }

    fn header_rendered(&mut self, grid: &mut GridCore) {
        if !grid.reorder_enabled() {
            return;
        }
        let ids: Vec<String> = grid
            .state
            .cell_columns()
            .map(|c| grid.ids().child(&["th", &c.field]))
            .collect();
        for id in ids {
            if let Some(cell) = grid.element_mut(&id) {
                cell.set_attr("draggable", "true");
            }
        }
    }
}

impl ColumnReorder for DraggableHeaders {
    fn move_column(&mut self, grid: &mut GridCore, field: &str, before: Option<&str>) -> bool {
        if before == Some(field) {
            return false;
        }
        let columns = &mut grid.state.columns;
        let Some(from) = columns.iter().position(|c| c.field == field) else {
            log::warn!("Cannot move unknown column `{field}`");
            return false;
        };
        let column = columns.remove(from);
        let to = match before {
            Some(before) => match columns.iter().position(|c| c.field == before) {
                Some(to) => to,
                None => {
                    log::warn!("Cannot move `{field}` before unknown column `{before}`");
                    columns.insert(from, column);
                    return false;
                }
            },
            None => columns.len(),
        };
        columns.insert(to, column);
        if to == from {
            return false;
        }

        let order = grid.state.columns.iter().map(|c| c.field.clone()).collect();
        grid.invalidate_header();
        grid.invalidate_body();
        grid.emit(GridEvent::ColumnReordered {
            field: field.to_string(),
            order,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::engine::Capabilities;
    use crate::options::Options;

    fn grid() -> GridCore {
        let mut grid = GridCore::new(Options {
            id: "g".into(),
            reorder: true,
            columns: vec![json!("a"), json!("b"), json!("c")],
            ..Default::default()
        });
        grid.set_capabilities(Capabilities {
            reorder: true,
            ..Default::default()
        });
        grid.render_table();
        grid
    }

    fn order(grid: &GridCore) -> Vec<&str> {
        grid.state.columns.iter().map(|c| c.field.as_str()).collect()
    }

    #[test]
    fn test_drag_and_drop_moves_before_target() {
        let mut grid = grid();
        let mut plugin = DraggableHeaders::new();
        plugin.header_rendered(&mut grid);
        assert_eq!(grid.element("g-th-c").unwrap().get_attr("draggable"), Some("true"));

        let source = grid.resolve_target("g-th-c");
        plugin.handle_event(
            &mut grid,
            &Event::DragStart {
                target: "g-th-c".into(),
            },
            source.as_ref(),
        );
        let dest = grid.resolve_target("g-th-a");
        let result = plugin.handle_event(
            &mut grid,
            &Event::Drop {
                target: "g-th-a".into(),
            },
            dest.as_ref(),
        );

        assert_eq!(result, EventResult::Consumed);
        assert_eq!(order(&grid), vec!["c", "a", "b"]);
        assert_eq!(
            grid.events.drain(),
            vec![GridEvent::ColumnReordered {
                field: "c".into(),
                order: vec!["c".into(), "a".into(), "b".into()]
            }]
        );
    }

    #[test]
    fn test_move_to_end_and_noops() {
        let mut grid = grid();
        let mut plugin = DraggableHeaders::new();

        assert!(plugin.move_column(&mut grid, "a", None));
        assert_eq!(order(&grid), vec!["b", "c", "a"]);
        assert!(!plugin.move_column(&mut grid, "a", Some("a")));
        assert!(!plugin.move_column(&mut grid, "zz", None));
        assert!(!plugin.move_column(&mut grid, "b", Some("zz")));
        assert_eq!(order(&grid), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_disabled_without_option() {
        let mut grid = grid();
        grid.state.options.reorder = false;
        let mut plugin = DraggableHeaders::new();
        let target = grid.resolve_target("g-th-a");
        let result = plugin.handle_event(
            &mut grid,
            &Event::DragStart {
                target: "g-th-a".into(),
            },
            target.as_ref(),
        );
        assert_eq!(result, EventResult::Ignored);
    }
}
