//! Per-grid plugin host: typed capability slots and the event table.

use std::collections::HashMap;

use griddom::{Event, EventKind};

use super::{
    CellEditor, ColumnMenu, ColumnReorder, ColumnResizer, EventResult, Plugin, PluginInstance,
    PluginRegistry, ResponsiveCollapse, RowActions, RowSelection,
};
use crate::engine::{Capabilities, EventTarget, GridCore};

/// Options that require a plugin; enabling one without it is an error.
const REQUIRED: &[(&str, &str)] = &[
    ("resizable", "ColumnResizer"),
    ("selectable", "SelectableRows"),
];

/// Address of a plugin inside the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Resizer,
    Reorder,
    Selection,
    Responsive,
    Menu,
    Editor,
    Actions,
    Extension(usize),
}

/// Run `$body` with `$p` bound to the plugin in `$slot`, if present.
macro_rules! with_slot {
    ($host:expr, $slot:expr, |$p:ident| $body:expr) => {
        match $slot {
            Slot::Resizer => $host.resizer.as_deref_mut().map(|$p| $body),
            Slot::Reorder => $host.reorder.as_deref_mut().map(|$p| $body),
            Slot::Selection => $host.selection.as_deref_mut().map(|$p| $body),
            Slot::Responsive => $host.responsive.as_deref_mut().map(|$p| $body),
            Slot::Menu => $host.menu.as_deref_mut().map(|$p| $body),
            Slot::Editor => $host.editor.as_deref_mut().map(|$p| $body),
            Slot::Actions => $host.actions.as_deref_mut().map(|$p| $body),
            Slot::Extension(i) => $host.extensions.get_mut(i).map(|$p| {
                let $p = $p.as_mut();
                $body
            }),
        }
    };
}

/// The plugins of one grid.
#[derive(Default)]
pub struct PluginHost {
    resizer: Option<Box<dyn ColumnResizer>>,
    reorder: Option<Box<dyn ColumnReorder>>,
    selection: Option<Box<dyn RowSelection>>,
    responsive: Option<Box<dyn ResponsiveCollapse>>,
    menu: Option<Box<dyn ColumnMenu>>,
    editor: Option<Box<dyn CellEditor>>,
    actions: Option<Box<dyn RowActions>>,
    extensions: Vec<Box<dyn Plugin>>,
    /// Registration order; hooks run in this order.
    order: Vec<Slot>,
    names: Vec<&'static str>,
    table: HashMap<EventKind, Vec<Slot>>,
}

impl std::fmt::Debug for PluginHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginHost")
            .field("plugins", &self.names)
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

impl PluginHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate every plugin of `registry`.
    pub fn from_registry(registry: &PluginRegistry) -> Self {
        let mut host = Self::new();
        for instance in registry.create_all() {
            host.install(instance);
        }
        host
    }

    /// Bind an instance to its slot. A second instance of the same
    /// capability replaces the first.
    pub fn install(&mut self, instance: PluginInstance) {
        let name = instance.name();
        let slot = match instance {
            PluginInstance::Resizer(p) => replace(&mut self.resizer, p, Slot::Resizer),
            PluginInstance::Reorder(p) => replace(&mut self.reorder, p, Slot::Reorder),
            PluginInstance::Selection(p) => replace(&mut self.selection, p, Slot::Selection),
            PluginInstance::Responsive(p) => replace(&mut self.responsive, p, Slot::Responsive),
            PluginInstance::Menu(p) => replace(&mut self.menu, p, Slot::Menu),
            PluginInstance::Editor(p) => replace(&mut self.editor, p, Slot::Editor),
            PluginInstance::Actions(p) => replace(&mut self.actions, p, Slot::Actions),
            PluginInstance::Extension(p) => {
                self.extensions.push(p);
                Slot::Extension(self.extensions.len() - 1)
            }
        };

        if let Some(existing) = self.order.iter().position(|s| *s == slot) {
            log::warn!("Plugin `{name}` replaces `{}`", self.names[existing]);
            self.order.remove(existing);
            self.names.remove(existing);
        }
        self.order.push(slot);
        self.names.push(name);
        self.rebuild_table();
    }

    fn rebuild_table(&mut self) {
        self.table.clear();
        for slot in self.order.clone() {
            let kinds = with_slot!(self, slot, |p| p.handles()).unwrap_or(&[]);
            for kind in kinds {
                self.table.entry(*kind).or_default().push(slot);
            }
        }
    }

    /// Names of the installed plugins, in registration order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            resizer: self.resizer.is_some(),
            reorder: self.reorder.is_some(),
            selection: self.selection.is_some(),
            responsive: self.responsive.is_some(),
            menu: self.menu.is_some(),
            editor: self.editor.is_some(),
            actions: self.actions.is_some(),
        }
    }

    /// Log an error for every enabled option whose plugin is missing.
    pub fn check_required(&self, grid: &GridCore) {
        let capabilities = self.capabilities();
        for (option, plugin) in REQUIRED {
            let enabled = grid.state.options.get(option) == Some(serde_json::Value::Bool(true));
            let present = match *option {
                "resizable" => capabilities.resizer,
                "selectable" => capabilities.selection,
                _ => true,
            };
            if enabled && !present {
                log::error!("[{}] `{option}` requires the {plugin} plugin", grid.id());
            }
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn connect_all(&mut self, grid: &mut GridCore) {
        grid.set_capabilities(self.capabilities());
        self.check_required(grid);
        for slot in self.order.clone() {
            with_slot!(self, slot, |p| p.connected(grid));
        }
    }

    pub fn disconnect_all(&mut self, grid: &mut GridCore) {
        for slot in self.order.clone() {
            with_slot!(self, slot, |p| p.disconnected(grid));
        }
    }

    pub fn header_rendered(&mut self, grid: &mut GridCore) {
        for slot in self.order.clone() {
            with_slot!(self, slot, |p| p.header_rendered(grid));
        }
    }

    pub fn body_rendered(&mut self, grid: &mut GridCore) {
        for slot in self.order.clone() {
            with_slot!(self, slot, |p| p.body_rendered(grid));
        }
    }

    /// Route `event` to the plugins registered for its kind, in order,
    /// until one consumes it.
    pub fn dispatch(
        &mut self,
        grid: &mut GridCore,
        event: &Event,
        target: Option<&EventTarget>,
    ) -> EventResult {
        let Some(slots) = self.table.get(&event.kind()).cloned() else {
            return EventResult::Ignored;
        };
        for slot in slots {
            let result = with_slot!(self, slot, |p| p.handle_event(grid, event, target))
                .unwrap_or(EventResult::Ignored);
            if result.is_handled() {
                return result;
            }
        }
        EventResult::Ignored
    }

    // =========================================================================
    // Capabilities
    // =========================================================================

    pub fn resizer(&self) -> Option<&dyn ColumnResizer> {
        self.resizer.as_deref()
    }

    pub fn reorder_mut(&mut self) -> Option<&mut (dyn ColumnReorder + 'static)> {
        self.reorder.as_deref_mut()
    }

    pub fn selection(&self) -> Option<&dyn RowSelection> {
        self.selection.as_deref()
    }

    pub fn selection_mut(&mut self) -> Option<&mut (dyn RowSelection + 'static)> {
        self.selection.as_deref_mut()
    }

    pub fn responsive(&self) -> Option<&dyn ResponsiveCollapse> {
        self.responsive.as_deref()
    }

    pub fn responsive_mut(&mut self) -> Option<&mut (dyn ResponsiveCollapse + 'static)> {
        self.responsive.as_deref_mut()
    }

    pub fn menu_mut(&mut self) -> Option<&mut (dyn ColumnMenu + 'static)> {
        self.menu.as_deref_mut()
    }

    pub fn editor_mut(&mut self) -> Option<&mut (dyn CellEditor + 'static)> {
        self.editor.as_deref_mut()
    }

    pub fn actions_mut(&mut self) -> Option<&mut (dyn RowActions + 'static)> {
        self.actions.as_deref_mut()
    }
}

fn replace<T: ?Sized>(slot: &mut Option<Box<T>>, plugin: Box<T>, tag: Slot) -> Slot {
    *slot = Some(plugin);
    tag
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use griddom::Event;

    use super::*;
    use crate::options::Options;

    struct Recorder {
        log: Arc<Mutex<Vec<String>>>,
        consume: bool,
    }

    impl Plugin for Recorder {
        fn name(&self) -> &'static str {
            "Recorder"
        }

        fn connected(&mut self, _grid: &mut GridCore) {
            self.log.lock().unwrap().push("connected".into());
        }

        fn handles(&self) -> &'static [EventKind] {
            &[EventKind::Click]
        }

        fn handle_event(
            &mut self,
            _grid: &mut GridCore,
            event: &Event,
            _target: Option<&EventTarget>,
        ) -> EventResult {
            self.log
                .lock()
                .unwrap()
                .push(format!("event {:?}", event.kind()));
            if self.consume {
                EventResult::Consumed
            } else {
                EventResult::Ignored
            }
        }
    }

    #[test]
    fn test_event_table_routes_by_kind() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut host = PluginHost::new();
        host.install(PluginInstance::Extension(Box::new(Recorder {
            log: Arc::clone(&log),
            consume: true,
        })));
        host.install(PluginInstance::Extension(Box::new(Recorder {
            log: Arc::clone(&log),
            consume: true,
        })));

        let mut grid = GridCore::new(Options::default());
        host.connect_all(&mut grid);
        let result = host.dispatch(&mut grid, &Event::click("x"), None);
        let ignored = host.dispatch(&mut grid, &Event::DragEnd, None);

        assert_eq!(result, EventResult::Consumed);
        assert_eq!(ignored, EventResult::Ignored);
        // the first extension consumed the click
        assert_eq!(
            *log.lock().unwrap(),
            vec!["connected", "connected", "event Click"]
        );
    }

    #[test]
    fn test_capabilities_from_registry() {
        let host = PluginHost::from_registry(&PluginRegistry::default());
        let capabilities = host.capabilities();
        assert!(capabilities.resizer && capabilities.selection && capabilities.actions);
        assert_eq!(host.names().len(), 7);

        let empty = PluginHost::from_registry(&PluginRegistry::new());
        assert_eq!(empty.capabilities(), Capabilities::default());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_second_instance_replaces_slot() {
        let mut registry = PluginRegistry::new();
        registry.register("A", || {
            PluginInstance::Selection(Box::new(crate::plugins::SelectableRows::new()))
        });
        registry.register("B", || {
            PluginInstance::Selection(Box::new(crate::plugins::SelectableRows::new()))
        });
        let host = PluginHost::from_registry(&registry);
        assert_eq!(host.names().len(), 1);
        assert!(host.selection().is_some());
    }
}
