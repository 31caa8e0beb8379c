//! Configuration error types

/// Malformed configuration. Always logged and replaced by a default.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A JSON-looking attribute value did not parse.
    #[error("Invalid JSON in `{value}`: {message}")]
    InvalidJson { value: String, message: String },

    /// A column definition has no `field`.
    #[error("Column definition at index {index} has no field")]
    MissingField { index: usize },

    /// Two column definitions share a field.
    #[error("Duplicate column field `{0}`")]
    DuplicateField(String),

    /// A column definition is neither a string nor an object.
    #[error("Invalid column definition: {0}")]
    InvalidColumn(String),

    /// The attribute is not one the grid reflects.
    #[error("Unknown attribute `{0}`")]
    UnknownAttribute(String),

    /// The label key does not exist.
    #[error("Unknown label `{0}`")]
    UnknownLabel(String),

    /// An option value does not fit the option's type.
    #[error("Invalid value for option `{key}`: {message}")]
    InvalidOption { key: String, message: String },
}
