//! Plugin error types

/// Errors from the plugin registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginError {
    /// No factory is registered under this name.
    #[error("Plugin `{0}` is not registered")]
    NotRegistered(String),
}
