//! Plugin registry: name to factory.

use std::sync::Arc;

use super::{
    ActionButtons, ColumnResizerPlugin, ContextMenu, DraggableHeaders, EditableColumn,
    PluginInstance, ResponsiveGrid, SelectableRows,
};
use crate::error::PluginError;

/// Builds a fresh plugin instance.
pub type PluginFactory = Arc<dyn Fn() -> PluginInstance + Send + Sync>;

/// Name-to-factory mapping consulted when a grid connects.
///
/// The registry is an ordinary value: build one, hand it to grids through
/// an `Arc`, and build another in each test. [`PluginRegistry::default`]
/// holds the bundled plugins; [`PluginRegistry::new`] is empty.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use datagrid::{Grid, PluginRegistry};
///
/// let mut registry = PluginRegistry::default();
/// registry.unregister("ContextMenu");
/// let grid = Grid::builder().registry(Arc::new(registry)).build();
/// ```
#[derive(Clone)]
pub struct PluginRegistry {
    factories: Vec<(String, PluginFactory)>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::bundled()
    }
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Registry holding the bundled plugins.
    pub fn bundled() -> Self {
        let mut registry = Self::new();
        registry.register(ColumnResizerPlugin::NAME, || {
            PluginInstance::Resizer(Box::new(ColumnResizerPlugin::new()))
        });
        registry.register(DraggableHeaders::NAME, || {
            PluginInstance::Reorder(Box::new(DraggableHeaders::new()))
        });
        registry.register(SelectableRows::NAME, || {
            PluginInstance::Selection(Box::new(SelectableRows::new()))
        });
        registry.register(ResponsiveGrid::NAME, || {
            PluginInstance::Responsive(Box::new(ResponsiveGrid::new()))
        });
        registry.register(ContextMenu::NAME, || {
            PluginInstance::Menu(Box::new(ContextMenu::new()))
        });
        registry.register(EditableColumn::NAME, || {
            PluginInstance::Editor(Box::new(EditableColumn::new()))
        });
        registry.register(ActionButtons::NAME, || {
            PluginInstance::Actions(Box::new(ActionButtons::new()))
        });
        registry
    }

    /// Register `factory` under `name`, replacing an existing entry in place.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> PluginInstance + Send + Sync + 'static,
    ) {
        let name = name.into();
        let factory: PluginFactory = Arc::new(factory);
        match self.factories.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = factory,
            None => self.factories.push((name, factory)),
        }
    }

    /// Returns `true` if `name` was registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.factories.len();
        self.factories.retain(|(n, _)| n != name);
        self.factories.len() != before
    }

    pub fn clear(&mut self) {
        self.factories.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.iter().any(|(n, _)| n == name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Instantiate the plugin registered under `name`.
    pub fn create(&self, name: &str) -> Result<PluginInstance, PluginError> {
        self.factories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, factory)| factory())
            .ok_or_else(|| PluginError::NotRegistered(name.to_string()))
    }

    /// Instantiate every registered plugin, in registration order.
    pub fn create_all(&self) -> Vec<PluginInstance> {
        self.factories.iter().map(|(_, factory)| factory()).collect()
    }
}
