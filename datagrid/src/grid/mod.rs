//! The grid component: core, plugins, lifecycle and data source together.

mod api;
mod attributes;
mod dispatch;
mod load;

pub use dispatch::DispatchOutcome;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::engine::{Effect, GridCore};
use crate::events::GridEvent;
use crate::lifecycle::{Lifecycle, LifecycleState};
use crate::loader::{DataSource, HttpSource, LoadOutcome};
use crate::options::Options;
use crate::plugins::{PluginHost, PluginRegistry};

/// Upper bound on render passes per flush. Plugin render hooks may mark
/// sections dirty again (responsive collapse does); a pass that marks
/// nothing ends the flush.
const MAX_RENDER_PASSES: usize = 4;

/// A data grid.
///
/// Sync operations that only touch state return immediately; operations
/// that may need a fetch are `async` and resolve once the grid has been
/// re-rendered.
///
/// # Example
///
/// ```ignore
/// use datagrid::{Grid, StaticSource};
/// use serde_json::json;
///
/// let mut grid = Grid::builder()
///     .attribute("per-page", "10")
///     .attribute("url", "/rows")
///     .source(StaticSource::always(json!([{"id": 1}])))
///     .build();
///
/// grid.connect();
/// grid.first_render().await;
/// println!("{}", grid.to_html());
/// ```
pub struct Grid {
    core: GridCore,
    plugins: PluginHost,
    lifecycle: Lifecycle,
    registry: Arc<PluginRegistry>,
    source: Arc<dyn DataSource>,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("core", &self.core)
            .field("plugins", &self.plugins)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Grid with `options`, the bundled plugins and an HTTP source.
    pub fn new(options: Options) -> Self {
        Self::builder().options(options).build()
    }

    /// Grid with `options` and an explicit plugin registry.
    pub fn with_registry(options: Options, registry: Arc<PluginRegistry>) -> Self {
        Self::builder().options(options).registry(registry).build()
    }

    pub fn builder() -> GridBuilder {
        GridBuilder::new()
    }

    pub fn id(&self) -> &str {
        self.core.id()
    }

    pub fn core(&self) -> &GridCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut GridCore {
        &mut self.core
    }

    pub fn plugins(&self) -> &PluginHost {
        &self.plugins
    }

    pub fn plugins_mut(&mut self) -> &mut PluginHost {
        &mut self.plugins
    }

    pub fn options(&self) -> &Options {
        &self.core.state.options
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach the grid: plugins are created (once per grid) and connected.
    ///
    /// Returns `false` if the grid is already attached.
    pub fn connect(&mut self) -> bool {
        if !self.lifecycle.attach() {
            return false;
        }
        if !self.lifecycle.plugins_created() {
            self.plugins = PluginHost::from_registry(&self.registry);
            self.lifecycle.mark_plugins_created();
            grid_debug!(
                self.core.state.options,
                "[{}] plugins: {:?}",
                self.core.id(),
                self.plugins.names()
            );
        }
        self.plugins.connect_all(&mut self.core);
        let grid = self.core.id().to_string();
        self.core.emit(GridEvent::Connected { grid });
        true
    }

    /// Load the data and render for the first time.
    ///
    /// The only transition into [`LifecycleState::Ready`]; in any state but
    /// [`LifecycleState::AttachedPendingRender`] this is a logged no-op.
    pub async fn first_render(&mut self) -> LoadOutcome {
        if self.lifecycle.state() != LifecycleState::AttachedPendingRender {
            log::debug!(
                "[{}] first render ignored in state {:?}",
                self.core.id(),
                self.lifecycle.state()
            );
            return LoadOutcome::Skipped;
        }

        self.apply_default_sort();
        let outcome = self.load_data().await;
        self.lifecycle.complete_first_render();
        self.core.invalidate_all();
        self.flush();
        outcome
    }

    /// Detach the grid. Plugin instances are kept for a later `connect`.
    pub fn disconnect(&mut self) -> bool {
        if !self.lifecycle.detach() {
            return false;
        }
        self.plugins.disconnect_all(&mut self.core);
        let grid = self.core.id().to_string();
        self.core.emit(GridEvent::Disconnected { grid });
        true
    }

    fn apply_default_sort(&mut self) {
        let field = self.core.state.options.default_sort.clone();
        if field.is_empty() || self.core.state.sort.is_some() {
            return;
        }
        if self.core.state.column(&field).is_none() && self.core.state.has_data() {
            log::warn!("Default sort column `{field}` not found");
            return;
        }
        self.core.state.sort = Some(crate::sort::SortState::new(
            field,
            crate::sort::SortDirection::Ascending,
        ));
        if !self.core.state.options.server {
            self.core.state.apply_sort();
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render dirty sections, run plugin render hooks, then sync paging.
    ///
    /// Nothing is rendered before the first render; sections stay dirty.
    pub fn flush(&mut self) {
        if !self.lifecycle.is_ready() {
            return;
        }
        for _ in 0..MAX_RENDER_PASSES {
            let rendered = self.core.render_dirty();
            let grid = self.core.id().to_string();
            if rendered.header {
                self.plugins.header_rendered(&mut self.core);
                self.core.emit(GridEvent::HeaderRendered { grid: grid.clone() });
            }
            if rendered.body {
                self.plugins.body_rendered(&mut self.core);
                let rows = self.core.state.data.len();
                self.core.emit(GridEvent::BodyRendered { grid, rows });
            }
            if !self.core.dirty().any() {
                break;
            }
        }
        self.core.sync_view();
    }

    /// Re-render everything from the current state, without fetching.
    pub fn refresh(&mut self) {
        self.core.invalidate_all();
        self.flush();
    }

    /// Carry out what an operation asked for.
    pub async fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Render => self.flush(),
            Effect::Reload => {
                self.load_data().await;
            }
        }
    }
}

/// Builder for [`Grid`].
///
/// Options are merged in order: `options` (or the defaults), then dataset
/// attributes, then overrides.
pub struct GridBuilder {
    options: Option<Options>,
    dataset: BTreeMap<String, String>,
    overrides: Option<Value>,
    registry: Option<Arc<PluginRegistry>>,
    source: Option<Arc<dyn DataSource>>,
    preload: Option<Value>,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GridBuilder {
    pub fn new() -> Self {
        Self {
            options: None,
            dataset: BTreeMap::new(),
            overrides: None,
            registry: None,
            source: None,
            preload: None,
        }
    }

    /// Base option set.
    pub fn options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// A raw dataset attribute (`per-page`, `data-url`, `config`, ...).
    pub fn attribute(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.dataset.insert(name.into(), raw.into());
        self
    }

    pub fn dataset(mut self, dataset: BTreeMap<String, String>) -> Self {
        self.dataset.extend(dataset);
        self
    }

    /// Explicit overrides, applied last.
    pub fn overrides(mut self, overrides: Value) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn registry(mut self, registry: Arc<PluginRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn source(mut self, source: impl DataSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn shared_source(mut self, source: Arc<dyn DataSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Rows (and meta) available before the first render.
    pub fn preload(mut self, payload: Value) -> Self {
        self.preload = Some(payload);
        self
    }

    pub fn build(self) -> Grid {
        let base = self.options.unwrap_or_default();
        let options = if self.dataset.is_empty() && self.overrides.is_none() {
            base
        } else {
            base.merged(&Options::source_patch(
                &self.dataset,
                self.overrides.as_ref(),
            ))
        };

        let mut grid = Grid {
            core: GridCore::new(options),
            plugins: PluginHost::new(),
            lifecycle: Lifecycle::new(),
            registry: self
                .registry
                .unwrap_or_else(|| Arc::new(PluginRegistry::default())),
            source: self
                .source
                .unwrap_or_else(|| Arc::new(HttpSource::new())),
        };
        if let Some(payload) = self.preload {
            if let Err(e) = grid.preload(payload) {
                log::error!("[{}] preload rejected: {e}", grid.id());
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::loader::StaticSource;

    #[test]
    fn test_builder_merges_sources_in_order() {
        let grid = Grid::builder()
            .options(Options {
                per_page: 50,
                sort: true,
                ..Default::default()
            })
            .attribute("per-page", "20")
            .attribute("filter", "true")
            .overrides(json!({"perPage": 5}))
            .build();

        assert_eq!(grid.options().per_page, 5);
        assert!(grid.options().filter);
        assert!(grid.options().sort);
        assert_eq!(grid.lifecycle_state(), LifecycleState::Constructed);
    }

    #[test]
    fn test_connect_creates_plugins_once() {
        let mut grid = Grid::new(Options::default());
        assert!(grid.plugins().is_empty());

        assert!(grid.connect());
        assert!(!grid.connect());
        assert_eq!(grid.plugins().names().len(), 7);
        assert!(grid.disconnect());
        assert!(grid.connect());
        assert_eq!(grid.plugins().names().len(), 7);

        let events = grid.drain_events();
        assert_eq!(events.iter().filter(|e| e.name() == "connected").count(), 2);
        assert_eq!(events.iter().filter(|e| e.name() == "disconnected").count(), 1);
    }

    #[tokio::test]
    async fn test_first_render_only_once() {
        let mut grid = Grid::builder()
            .preload(json!([{"id": 1}, {"id": 2}]))
            .source(StaticSource::new())
            .build();

        // not attached yet
        assert_eq!(grid.first_render().await, LoadOutcome::Skipped);
        assert!(!grid.is_ready());

        grid.connect();
        assert_eq!(grid.first_render().await, LoadOutcome::Skipped);
        assert!(grid.is_ready());
        assert!(grid.to_html().contains("1 - 2 of 2 items"));

        let events = grid.drain_events();
        assert!(events.iter().any(|e| e.name() == "headerRendered"));
        assert!(events
            .iter()
            .any(|e| *e == GridEvent::BodyRendered { grid: grid.id().to_string(), rows: 2 }));
    }

    #[tokio::test]
    async fn test_default_sort_applies_on_first_render() {
        let mut grid = Grid::builder()
            .options(Options {
                default_sort: "name".into(),
                sort: true,
                ..Default::default()
            })
            .preload(json!([{"name": "b"}, {"name": "a"}]))
            .build();
        grid.connect();
        grid.first_render().await;

        assert_eq!(grid.core().state.data[0]["name"], json!("a"));
        assert!(grid.to_html().contains(r#"aria-sort="ascending""#));
    }
}
