//! Grid events for host applications.
//!
//! Events are delivered synchronously to subscribed listeners and also
//! queued, so hosts without callbacks can drain them after each operation.

use serde_json::Value;

use crate::row::Row;

/// An event emitted by a grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    Connected { grid: String },
    Disconnected { grid: String },
    ColumnVisibility { field: String, visible: bool },
    HeaderRendered { grid: String },
    BodyRendered { grid: String, rows: usize },
    ColumnResized { field: String, width: u32 },
    /// `field` moved; `order` is the resulting field order.
    ColumnReordered { field: String, order: Vec<String> },
    RowsSelected { selection: Vec<String> },
    Action { action: String, row: Row },
    Edit { key: String, field: String, value: Value },
}

impl GridEvent {
    /// DOM event name.
    pub fn name(&self) -> &'static str {
        match self {
            GridEvent::Connected { .. } => "connected",
            GridEvent::Disconnected { .. } => "disconnected",
            GridEvent::ColumnVisibility { .. } => "columnVisibility",
            GridEvent::HeaderRendered { .. } => "headerRendered",
            GridEvent::BodyRendered { .. } => "bodyRendered",
            GridEvent::ColumnResized { .. } => "columnResized",
            GridEvent::ColumnReordered { .. } => "columnReordered",
            GridEvent::RowsSelected { .. } => "rowsSelected",
            GridEvent::Action { .. } => "action",
            GridEvent::Edit { .. } => "edit",
        }
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&GridEvent) + Send>;

/// Listener registry plus a queue of emitted events.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    queue: Vec<GridEvent>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("queue", &self.queue)
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GridEvent) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `true` if the listener was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: GridEvent) {
        log::trace!("emit {}", event.name());
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        self.queue.push(event);
    }

    /// Take all queued events.
    pub fn drain(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.queue)
    }

    pub fn queued(&self) -> &[GridEvent] {
        &self.queue
    }
}
