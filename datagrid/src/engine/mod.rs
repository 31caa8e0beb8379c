//! The grid core: state, rendered view and event bus.
//!
//! [`GridCore`] is what plugins receive. It owns everything a plugin may
//! touch; the plugin host and lifecycle live one level up in
//! [`crate::Grid`] so the two can be borrowed independently.

mod ops;
mod target;

pub use target::{EventTarget, Role};

use std::sync::atomic::{AtomicU64, Ordering};

use griddom::{find_element, find_element_mut, Element, Tag};

use crate::events::{EventBus, GridEvent};
use crate::options::{Action, Options};
use crate::render::Formatters;
use crate::row::Row;
use crate::state::GridState;

static GRID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn generate_grid_id() -> String {
    format!("datagrid-{}", GRID_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Root class names.
pub mod class {
    pub const WRAPPER: &str = "dg-wrapper";
    pub const LOADING: &str = "dg-loading";
    pub const EMPTY: &str = "dg-empty";
    pub const NETWORK_ERROR: &str = "dg-network-error";
}

/// What the caller must do after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// The view must be re-rendered.
    Render,
    /// Data must be fetched again, then rendered.
    Reload,
}

impl Effect {
    /// The stronger of two effects.
    pub fn and(self, other: Effect) -> Effect {
        self.max(other)
    }
}

/// Optional behaviours bound by connected plugins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub resizer: bool,
    pub reorder: bool,
    pub selection: bool,
    pub responsive: bool,
    pub menu: bool,
    pub editor: bool,
    pub actions: bool,
}

/// Ids of the fixed skeleton elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionIds {
    pub root: String,
    pub table: String,
    pub thead: String,
    pub tbody: String,
    pub tfoot: String,
    pub menu: String,
}

impl SectionIds {
    fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
            table: format!("{root}-table"),
            thead: format!("{root}-thead"),
            tbody: format!("{root}-tbody"),
            tfoot: format!("{root}-tfoot"),
            menu: format!("{root}-menu"),
        }
    }

    /// Id of a child element, namespaced under the grid.
    pub fn child(&self, parts: &[&str]) -> String {
        let mut id = self.root.clone();
        for part in parts {
            id.push('-');
            id.push_str(part);
        }
        id
    }
}

/// Sections that need rebuilding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dirty {
    pub header: bool,
    pub body: bool,
    pub footer: bool,
}

impl Dirty {
    pub fn any(&self) -> bool {
        self.header || self.body || self.footer
    }
}

type ConfirmHandler = Box<dyn FnMut(&Action, &Row) -> bool + Send>;

/// State, view and events of one grid.
pub struct GridCore {
    pub state: GridState,
    pub events: EventBus,
    pub formatters: Formatters,
    ids: SectionIds,
    view: Element,
    capabilities: Capabilities,
    dirty: Dirty,
    confirm: ConfirmHandler,
}

impl std::fmt::Debug for GridCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridCore")
            .field("id", &self.ids.root)
            .field("state", &self.state)
            .field("capabilities", &self.capabilities)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl GridCore {
    pub fn new(mut options: Options) -> Self {
        if options.id.is_empty() {
            options.id = generate_grid_id();
        }
        let ids = SectionIds::new(&options.id);
        let view = skeleton(&ids, &options);

        Self {
            state: GridState::new(options),
            events: EventBus::new(),
            formatters: Formatters::default(),
            ids,
            view,
            capabilities: Capabilities::default(),
            dirty: Dirty {
                header: true,
                body: true,
                footer: true,
            },
            confirm: Box::new(|_, _| true),
        }
    }

    pub fn id(&self) -> &str {
        &self.ids.root
    }

    pub fn ids(&self) -> &SectionIds {
        &self.ids
    }

    // =========================================================================
    // View
    // =========================================================================

    /// Root of the rendered element tree.
    pub fn view(&self) -> &Element {
        &self.view
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        find_element(&self.view, id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.view, id)
    }

    pub(crate) fn view_mut(&mut self) -> &mut Element {
        &mut self.view
    }

    /// Resolve an event target id against the current view.
    pub fn resolve_target(&self, id: &str) -> Option<EventTarget> {
        EventTarget::resolve(&self.view, id)
    }

    // =========================================================================
    // Capabilities
    // =========================================================================

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub(crate) fn set_capabilities(&mut self, capabilities: Capabilities) {
        if self.capabilities != capabilities {
            self.capabilities = capabilities;
            self.invalidate_all();
        }
    }

    /// Leading checkbox column is rendered.
    pub fn selection_enabled(&self) -> bool {
        self.state.options.selectable && self.capabilities.selection
    }

    /// Leading responsive toggle column is rendered.
    pub fn toggle_enabled(&self) -> bool {
        self.state.options.responsive
            && self.state.options.responsive_toggle
            && self.capabilities.responsive
    }

    /// Trailing action column is rendered.
    pub fn actions_enabled(&self) -> bool {
        !self.state.options.actions.is_empty() && self.capabilities.actions
    }

    /// Editable columns render inputs.
    pub fn editing_enabled(&self) -> bool {
        self.capabilities.editor
    }

    pub fn resize_enabled(&self) -> bool {
        self.state.options.resizable && self.capabilities.resizer
    }

    pub fn reorder_enabled(&self) -> bool {
        self.state.options.reorder && self.capabilities.reorder
    }

    pub fn menu_enabled(&self) -> bool {
        self.state.options.menu && self.capabilities.menu
    }

    /// 1-based index of the first data column.
    pub fn start_column_index(&self) -> usize {
        self.state
            .start_column_index(self.selection_enabled(), self.toggle_enabled())
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    pub fn invalidate_header(&mut self) {
        self.dirty.header = true;
    }

    pub fn invalidate_body(&mut self) {
        self.dirty.body = true;
    }

    pub fn invalidate_footer(&mut self) {
        self.dirty.footer = true;
    }

    pub fn invalidate_all(&mut self) {
        self.dirty = Dirty {
            header: true,
            body: true,
            footer: true,
        };
    }

    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    pub(crate) fn take_dirty(&mut self) -> Dirty {
        std::mem::take(&mut self.dirty)
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn emit(&mut self, event: GridEvent) {
        grid_debug!(self.state.options, "[{}] {}", self.ids.root, event.name());
        self.events.emit(event);
    }

    /// Replace the confirmation prompt used by confirming actions.
    pub fn set_confirm_handler(
        &mut self,
        handler: impl FnMut(&Action, &Row) -> bool + Send + 'static,
    ) {
        self.confirm = Box::new(handler);
    }

    /// Ask the host to confirm `action` on `row`.
    pub fn confirm(&mut self, action: &Action, row: &Row) -> bool {
        (self.confirm)(action, row)
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Show or hide a column. Returns `false` if unknown or unchanged.
    pub fn set_column_hidden(&mut self, field: &str, hidden: bool) -> bool {
        let Some(column) = self.state.column_mut(field) else {
            log::warn!("Unknown column `{field}`");
            return false;
        };
        if column.hidden == hidden {
            return false;
        }
        column.hidden = hidden;
        self.invalidate_header();
        self.invalidate_body();
        self.emit(GridEvent::ColumnVisibility {
            field: field.to_string(),
            visible: !hidden,
        });
        true
    }
}

/// The fixed skeleton every grid renders into.
fn skeleton(ids: &SectionIds, options: &Options) -> Element {
    Element::div()
        .id(ids.root.as_str())
        .class(class::WRAPPER)
        .attr("dir", options.dir.as_str())
        .child(
            Element::table()
                .id(ids.table.as_str())
                .class("dg-table")
                .child(Element::new(Tag::Thead).id(ids.thead.as_str()))
                .child(Element::new(Tag::Tbody).id(ids.tbody.as_str()))
                .child(Element::new(Tag::Tfoot).id(ids.tfoot.as_str())),
        )
        .child(
            Element::div()
                .id(ids.menu.as_str())
                .class("dg-menu")
                .hidden(true),
        )
}
