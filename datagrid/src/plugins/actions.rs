//! Per-row action buttons.

use griddom::{Event, EventKind};

use super::{EventResult, Plugin, RowActions};
use crate::engine::{EventTarget, GridCore, Role};
use crate::events::GridEvent;

/// Bundled [`RowActions`].
///
/// Actions flagged `confirm` go through the grid's confirm handler first;
/// a refusal drops the action.
#[derive(Debug, Default)]
pub struct ActionButtons;

impl ActionButtons {
    pub const NAME: &'static str = "RowActions";

    pub fn new() -> Self {
        Self
    }
}

impl Plugin for ActionButtons {
    fn name(&self) -> &'static str {
        Self::NAME
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
        let (Event::Click { .. }, Some(target)) = (event, target) else {
            return EventResult::Ignored;
        };
        if !target.is(Role::Action) || !grid.actions_enabled() {
            return EventResult::Ignored;
        }
        let (Some(action), Some(index)) = (target.action.as_deref(), target.row) else {
            return EventResult::Ignored;
        };
        self.trigger(grid, action, index);
        EventResult::Consumed
    }
}

impl RowActions for ActionButtons {
    fn trigger(&mut self, grid: &mut GridCore, action: &str, index: usize) -> bool {
        let Some(definition) = grid
            .state
            .options
            .actions
            .iter()
            .find(|a| a.name == action)
            .cloned()
        else {
            log::warn!("Unknown action `{action}`");
            return false;
        };
        let Some(row) = grid.state.data.get(index).cloned() else {
            log::warn!("Action `{action}` on missing row {index}");
            return false;
        };

        if definition.confirm && !grid.confirm(&definition, &row) {
            grid_debug!(grid.state.options, "Action `{action}` not confirmed");
            return false;
        }
        grid.emit(GridEvent::Action {
            action: definition.name,
            row,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::engine::Capabilities;
    use crate::options::{Action, Options};

    fn grid() -> GridCore {
        let mut grid = GridCore::new(Options {
            id: "g".into(),
            actions: vec![
                Action {
                    name: "open".into(),
                    ..Default::default()
                },
                Action {
                    name: "delete".into(),
                    confirm: true,
                    ..Default::default()
                },
            ],
            ..Default::default()
        });
        grid.set_capabilities(Capabilities {
            actions: true,
            ..Default::default()
        });
        grid.state
            .set_rows(vec![json!({"id": 1}).as_object().cloned().unwrap()]);
        grid.render_table();
        grid
    }

    #[test]
    fn test_click_emits_action_with_row() {
        let mut grid = grid();
        let mut plugin = ActionButtons::new();
        let target = grid.resolve_target("g-action-0-open");
        let result = plugin.handle_event(&mut grid, &Event::click("g-action-0-open"), target.as_ref());

        assert_eq!(result, EventResult::Consumed);
        assert_eq!(
            grid.events.drain(),
            vec![GridEvent::Action {
                action: "open".into(),
                row: json!({"id": 1}).as_object().cloned().unwrap()
            }]
        );
    }

    #[test]
    fn test_confirm_handler_can_refuse() {
        let mut grid = grid();
        let mut plugin = ActionButtons::new();
        grid.set_confirm_handler(|action, _row| action.name != "delete");

        assert!(!plugin.trigger(&mut grid, "delete", 0));
        assert!(plugin.trigger(&mut grid, "open", 0));
        assert!(!plugin.trigger(&mut grid, "missing", 0));
        assert_eq!(grid.events.drain().len(), 1);
    }
}
