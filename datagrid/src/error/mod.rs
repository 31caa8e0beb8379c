//! Error types

mod config;
mod load;
mod plugin;

pub use config::*;
pub use load::*;
pub use plugin::*;

/// Top-level error for the fallible building blocks of the grid.
///
/// Grid operations themselves never return these: they log and degrade to a
/// visible UI state. The error types surface where a host calls a building
/// block directly ([`crate::DataSource::fetch`], [`crate::Options::from_json`],
/// [`crate::Column::from_value`], [`crate::PluginRegistry::create`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Loading rows failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Configuration was malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Plugin lookup or construction failed.
    #[error(transparent)]
    Plugin(#[from] PluginError),
}
