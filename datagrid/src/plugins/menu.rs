//! Column visibility menu opened from the header context menu.

use griddom::{Element, Event, EventKind, Key, Tag};

use super::{ColumnMenu, EventResult, Plugin};
use crate::engine::{EventTarget, GridCore, Role};

/// Bundled [`ColumnMenu`].
#[derive(Debug, Default)]
pub struct ContextMenu {
    open: bool,
    /// Header the menu was opened from.
    anchor: Option<String>,
}

impl ContextMenu {
    pub const NAME: &'static str = "ContextMenu";

    pub fn new() -> Self {
        Self::default()
    }

    fn render(&self, grid: &mut GridCore) {
        let ids = grid.ids().clone();
        let items: Vec<Element> = grid
            .state
            .cell_columns()
            .map(|column| {
                Element::new(Tag::Li)
                    .id(ids.child(&["menu", &column.field]))
                    .class("dg-menu-item")
                    .data(Role::KEY, Role::MenuItem.as_str())
                    .data("field", column.field.as_str())
                    .child(Element::checkbox(!column.hidden))
                    .child(Element::text(column.title.as_str()))
            })
            .collect();
        let title = grid.state.options.labels.columns.clone();

        let Some(menu) = grid.element_mut(&ids.menu) else {
            log::error!("Menu container `{}` missing", ids.menu);
            return;
        };
        match &self.anchor {
            Some(field) => menu.set_data("field", field.as_str()),
            None => {
                menu.data.remove("field");
            }
        }
        menu.hidden = false;
        menu.replace_children(vec![
            Element::text(title).class("dg-menu-title"),
            Element::new(Tag::Ul).class("dg-menu-list").children(items),
        ]);
    }

    fn toggle(&mut self, grid: &mut GridCore, field: &str) -> EventResult {
        let Some(hidden) = grid.state.column(field).map(|c| c.hidden) else {
            return EventResult::Ignored;
        };
        grid.set_column_hidden(field, !hidden);
        self.render(grid);
        EventResult::Consumed
    }
}

impl Plugin for ContextMenu {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn disconnected(&mut self, grid: &mut GridCore) {
        self.close(grid);
    }

    fn handles(&self) -> &'static [EventKind] {
        &[EventKind::ContextMenu, EventKind::Click, EventKind::KeyDown]
    }

    fn handle_event(
        &mut self,
        grid: &mut GridCore,
        event: &Event,
        target: Option<&EventTarget>,
    ) -> EventResult {
        if !grid.menu_enabled() {
            return EventResult::Ignored;
        }
        match event {
            Event::ContextMenu { .. } => match target {
                Some(target) if target.is(Role::Header) => {
                    self.open(grid, target.field.as_deref());
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            Event::Click { .. } if self.open => match target {
                Some(target) if target.is(Role::MenuItem) => match &target.field {
                    Some(field) => self.toggle(grid, field),
                    None => EventResult::Ignored,
                },
                // clicking elsewhere dismisses the menu
                _ => {
                    self.close(grid);
                    EventResult::Ignored
                }
            },
            Event::KeyDown {
                key: Key::Escape, ..
            } if self.open => {
                self.close(grid);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}

impl ColumnMenu for ContextMenu {
    fn is_open(&self) -> bool {
        self.open
    }

    fn open(&mut self, grid: &mut GridCore, field: Option<&str>) {
        self.open = true;
        self.anchor = field.map(str::to_string);
        self.render(grid);
    }

    fn close(&mut self, grid: &mut GridCore) {
        if !self.open {
            return;
        }
        self.open = false;
        self.anchor = None;
        let menu = grid.ids().menu.clone();
        if let Some(menu) = grid.element_mut(&menu) {
            menu.hidden = true;
            menu.replace_children(Vec::new());
        }
    }
}
