//! Plugin contract, registry and host.
//!
//! A plugin is an independently instantiable collaborator with a uniform
//! lifecycle ([`Plugin`]). Optional grid behaviours are capability traits on
//! top of it; the host keeps one typed slot per capability so the grid asks
//! "is there a resizer?" through an `Option` instead of probing for
//! methods.

mod actions;
mod editable;
mod host;
mod menu;
mod registry;
mod reorder;
mod resizer;
mod responsive;
mod selection;

pub use actions::ActionButtons;
pub use editable::EditableColumn;
pub use host::PluginHost;
pub use menu::ContextMenu;
pub use registry::{PluginFactory, PluginRegistry};
pub use reorder::DraggableHeaders;
pub use resizer::ColumnResizerPlugin;
pub use responsive::ResponsiveGrid;
pub use selection::SelectableRows;

use std::time::Instant;

use griddom::{Event, EventKind};

use crate::engine::{EventTarget, GridCore};
use crate::row::Row;

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// Lifecycle and event contract shared by every plugin.
///
/// All methods but `name` have no-op defaults.
pub trait Plugin: Send {
    /// Registry name.
    fn name(&self) -> &'static str;

    /// The grid was attached.
    fn connected(&mut self, _grid: &mut GridCore) {}

    /// The grid was detached.
    fn disconnected(&mut self, _grid: &mut GridCore) {}

    /// Event kinds routed to [`Plugin::handle_event`].
    fn handles(&self) -> &'static [EventKind] {
        &[]
    }

    /// Handle a DOM event. `target` is `None` for untargeted events.
    fn handle_event(
        &mut self,
        _grid: &mut GridCore,
        _event: &Event,
        _target: Option<&EventTarget>,
    ) -> EventResult {
        EventResult::Ignored
    }

    /// The header section was rebuilt.
    fn header_rendered(&mut self, _grid: &mut GridCore) {}

    /// The body section was rebuilt.
    fn body_rendered(&mut self, _grid: &mut GridCore) {}
}

/// Drag-resizes columns.
pub trait ColumnResizer: Plugin {
    /// A resize is in progress; sorting is suspended meanwhile.
    fn is_resizing(&self) -> bool;
}

/// Reorders columns by dragging headers.
pub trait ColumnReorder: Plugin {
    /// Move `field` before `before`, or to the end. Returns `true` if moved.
    fn move_column(&mut self, grid: &mut GridCore, field: &str, before: Option<&str>) -> bool;
}

/// Row selection with a leading checkbox column.
pub trait RowSelection: Plugin {
    /// Toggle one row; `range` extends from the last toggled row.
    fn toggle_row(&mut self, grid: &mut GridCore, index: usize, range: bool);

    /// Select or clear every selectable row.
    fn select_all(&mut self, grid: &mut GridCore, selected: bool);

    /// Selected rows, in selection order.
    fn selected_rows(&self, grid: &GridCore) -> Vec<Row> {
        grid.state
            .selection
            .iter()
            .filter_map(|key| {
                grid.state
                    .original()
                    .iter()
                    .find(|row| grid.state.row_key(row) == *key)
                    .cloned()
            })
            .collect()
    }
}

/// Collapses low-priority columns when space runs out.
pub trait ResponsiveCollapse: Plugin {
    /// Record a container width; applied once the debounce has elapsed.
    /// Returns `true` if columns changed.
    fn observe_width(&mut self, grid: &mut GridCore, width: u32, now: Instant) -> bool;

    /// Apply a width still pending from the debounce window.
    fn settle(&mut self, grid: &mut GridCore, now: Instant) -> bool;

    /// Columns collapsed by this plugin, oldest first.
    fn collapsed(&self) -> &[String];
}

/// Column visibility menu.
pub trait ColumnMenu: Plugin {
    fn is_open(&self) -> bool;

    fn open(&mut self, grid: &mut GridCore, field: Option<&str>);

    fn close(&mut self, grid: &mut GridCore);
}

/// Inline cell editing.
pub trait CellEditor: Plugin {
    /// Write `text` into `field` of working row `index`. Returns `true` if
    /// the value was stored.
    fn commit(&mut self, grid: &mut GridCore, index: usize, field: &str, text: &str) -> bool;
}

/// Per-row action buttons.
pub trait RowActions: Plugin {
    /// Run `action` on working row `index`. Returns `true` if emitted.
    fn trigger(&mut self, grid: &mut GridCore, action: &str, index: usize) -> bool;
}

/// A plugin instance, tagged with the capability it binds.
pub enum PluginInstance {
    Resizer(Box<dyn ColumnResizer>),
    Reorder(Box<dyn ColumnReorder>),
    Selection(Box<dyn RowSelection>),
    Responsive(Box<dyn ResponsiveCollapse>),
    Menu(Box<dyn ColumnMenu>),
    Editor(Box<dyn CellEditor>),
    Actions(Box<dyn RowActions>),
    /// No built-in capability; receives lifecycle, render hooks and events.
    Extension(Box<dyn Plugin>),
}

impl PluginInstance {
    pub fn name(&self) -> &'static str {
        match self {
            PluginInstance::Resizer(p) => p.name(),
            PluginInstance::Reorder(p) => p.name(),
            PluginInstance::Selection(p) => p.name(),
            PluginInstance::Responsive(p) => p.name(),
            PluginInstance::Menu(p) => p.name(),
            PluginInstance::Editor(p) => p.name(),
            PluginInstance::Actions(p) => p.name(),
            PluginInstance::Extension(p) => p.name(),
        }
    }
}

impl std::fmt::Debug for PluginInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            PluginInstance::Resizer(_) => "Resizer",
            PluginInstance::Reorder(_) => "Reorder",
            PluginInstance::Selection(_) => "Selection",
            PluginInstance::Responsive(_) => "Responsive",
            PluginInstance::Menu(_) => "Menu",
            PluginInstance::Editor(_) => "Editor",
            PluginInstance::Actions(_) => "Actions",
            PluginInstance::Extension(_) => "Extension",
        };
        write!(f, "{kind}({})", self.name())
    }
}
