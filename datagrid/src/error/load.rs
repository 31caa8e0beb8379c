//! Data loading error types

/// Errors that can occur while fetching grid rows.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Non-success HTTP response.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or the canonical reason.
        message: String,
    },

    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body was not the expected JSON.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },

    /// The response object had no rows under the data key.
    #[error("Response has no `{key}` key")]
    MissingData {
        /// The data key that was expected.
        key: String,
    },
}

impl LoadError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Message shown in the grid's empty-state placeholder.
    ///
    /// HTTP errors show the server's own message rather than the status line.
    pub fn display_message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns `true` for failures shown in the grid: transport errors and
    /// unreadable bodies. A readable response without rows is only logged.
    pub fn is_displayed(&self) -> bool {
        !matches!(self, Self::MissingData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_displayed_failures() {
        assert!(LoadError::http(500, "down").is_displayed());
        assert!(LoadError::InvalidUrl("::".into()).is_displayed());
        assert!(LoadError::parse_with_body("expected an array", "\"nope\"").is_displayed());
        assert!(!LoadError::MissingData { key: "data".into() }.is_displayed());
    }

    #[test]
    fn test_display_message() {
        assert_eq!(LoadError::http(503, "Service down").display_message(), "Service down");
        assert_eq!(
            LoadError::parse_with_body("bad body", "x").display_message(),
            "Response parse error: bad body"
        );
    }
}
