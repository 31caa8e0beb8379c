//! Data grid engine
//!
//! A table component with pagination, sorting, filtering, column
//! resize/reorder, responsive collapsing, row selection, inline editing and
//! plugins. The grid keeps its state in a [`GridState`] and projects it onto
//! a [`griddom`] element tree, rebuilt section by section without diffing.

/// Log at debug level when the grid's `debug` option is on.
macro_rules! grid_debug {
    ($options:expr, $($arg:tt)+) => {
        if $options.debug {
            log::debug!($($arg)+);
        }
    };
}

pub mod column;
pub mod engine;
pub mod error;
pub mod events;
pub mod filter;
pub mod grid;
pub mod lifecycle;
pub mod loader;
pub mod normalize;
pub mod options;
pub mod pagination;
pub mod plugins;
pub mod render;
pub mod row;
pub mod sort;
pub mod state;

pub use column::{Column, FilterType};
pub use engine::{Capabilities, Effect, EventTarget, GridCore, Role};
pub use error::{ConfigError, Error, LoadError, PluginError};
pub use events::{EventBus, GridEvent, ListenerId};
pub use grid::{DispatchOutcome, Grid, GridBuilder};
pub use lifecycle::{Lifecycle, LifecycleState};
pub use loader::{
    DataSource, HttpSource, LoadOutcome, LoadRequest, LoadResponse, LoadStart, LoadTicket,
    StaticSource,
};
pub use options::{Action, Labels, Options, ServerParams};
pub use pagination::PageWindow;
pub use plugins::{Plugin, PluginInstance, PluginRegistry};
pub use render::Formatters;
pub use row::Row;
pub use sort::{SortDirection, SortIndicator, SortState};
pub use state::{GridState, Meta};

pub use griddom;
