//! Data loading: request building, response parsing and data sources.
//!
//! A load is split in two halves so hosts can interleave requests:
//! [`crate::Grid::begin_load`] hands out a [`LoadTicket`] and
//! [`crate::Grid::finish_load`] applies the result. Every ticket carries a
//! generation; only the latest generation is applied, older completions are
//! dropped.

mod source;

pub use source::{DataSource, HttpSource, StaticSource};

use serde_json::{Map, Value};

use crate::error::LoadError;
use crate::row::{rows_from_values, value_to_string, Row};
use crate::state::{GridState, Meta};

/// A GET request for rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub url: String,
    /// Query parameters, in order.
    pub params: Vec<(String, String)>,
}

impl LoadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Value of the first parameter called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Absolute URL with the parameters appended, resolving relative URLs
    /// against `base`.
    pub fn to_url(&self, base: Option<&url::Url>) -> Result<url::Url, LoadError> {
        let mut url = match url::Url::parse(&self.url) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => base
                .ok_or_else(|| LoadError::InvalidUrl(self.url.clone()))?
                .join(&self.url)
                .map_err(|e| LoadError::InvalidUrl(format!("{}: {e}", self.url)))?,
            Err(e) => return Err(LoadError::InvalidUrl(format!("{}: {e}", self.url))),
        };
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(self.params.iter());
        }
        Ok(url)
    }
}

/// Ticket for an in-flight load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub request: LoadRequest,
}

/// Result of starting a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStart {
    /// Nothing to fetch; the grid was finalized as-is.
    Skip,
    /// Fetch this request, then hand the result to `finish_load`.
    Fetch(LoadTicket),
}

/// What a load did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No fetch was needed.
    Skipped,
    /// Rows were loaded.
    Loaded { rows: usize },
    /// A newer load was started; this result was dropped.
    Stale,
    /// The load failed; the message is shown in the grid.
    Failed { message: String },
}

/// A parsed response body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadResponse {
    pub rows: Vec<Row>,
    /// Option overrides sent by the server.
    pub options: Option<Map<String, Value>>,
    pub meta: Option<Meta>,
}

/// Parse a response: a bare row array, or an object with rows under
/// `data_key` plus optional `options` and `meta`.
pub fn parse_response(body: Value, data_key: &str) -> Result<LoadResponse, LoadError> {
    match body {
        Value::Array(items) => Ok(LoadResponse {
            rows: rows_from_values(items),
            ..Default::default()
        }),
        Value::Object(mut obj) => {
            let rows = match obj.remove(data_key) {
                Some(Value::Array(items)) => rows_from_values(items),
                _ => {
                    return Err(LoadError::MissingData {
                        key: data_key.to_string(),
                    });
                }
            };
            let options = match obj.remove("options") {
                Some(Value::Object(options)) => Some(options),
                Some(Value::Null) | None => None,
                Some(other) => {
                    log::warn!("Ignoring non-object options in response: {other}");
                    None
                }
            };
            let meta = match obj.remove("meta") {
                Some(Value::Null) | None => None,
                Some(meta) => match serde_json::from_value::<Meta>(meta) {
                    Ok(meta) => Some(meta),
                    Err(e) => {
                        log::warn!("Ignoring malformed meta in response: {e}");
                        None
                    }
                },
            };
            Ok(LoadResponse {
                rows,
                options,
                meta,
            })
        }
        other => Err(LoadError::parse_with_body(
            "expected an array or an object",
            other.to_string(),
        )),
    }
}

/// Request for the grid's current state, or `None` without a URL.
///
/// Server mode adds paging, per-column search, sort and the extra params
/// the server sent in its last `meta`.
pub fn build_request(state: &GridState) -> Option<LoadRequest> {
    let url = state.options.url.as_deref().filter(|u| !u.is_empty())?;
    let mut request = LoadRequest::new(url);

    if state.options.server {
        let names = &state.options.server_params;
        let per_page = state.options.per_page;
        request = request
            .param(
                names.start.as_str(),
                ((state.page.max(1) - 1) * per_page).to_string(),
            )
            .param(names.length.as_str(), per_page.to_string());

        for (field, text) in &state.filters {
            if !text.is_empty() {
                request = request.param(format!("{}[{field}]", names.search), text.as_str());
            }
        }
        if let Some(sort) = &state.sort {
            request = request
                .param(names.sort.as_str(), sort.field.as_str())
                .param(names.sort_dir.as_str(), sort.direction.as_param());
        }
        for (name, value) in &state.meta.params {
            request = request.param(name.as_str(), value_to_string(value));
        }
    }

    Some(request)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::options::Options;
    use crate::sort::{SortDirection, SortState};

    fn server_state() -> GridState {
        GridState::new(Options {
            url: Some("/rows".into()),
            server: true,
            per_page: 25,
            ..Default::default()
        })
    }

    #[test]
    fn test_request_without_url() {
        let state = GridState::new(Options::default());
        assert!(build_request(&state).is_none());

        let state = GridState::new(Options {
            url: Some(String::new()),
            ..Default::default()
        });
        assert!(build_request(&state).is_none());
    }

    #[test]
    fn test_client_mode_request_has_no_params() {
        let state = GridState::new(Options {
            url: Some("/rows".into()),
            ..Default::default()
        });
        let request = build_request(&state).unwrap();
        assert!(request.params.is_empty());
    }

    #[test]
    fn test_server_params() {
        let mut state = server_state();
        state.page = 3;
        state.filters.insert("name".into(), "ali".into());
        state.filters.insert("city".into(), String::new());
        state.sort = Some(SortState::new("name", SortDirection::Descending));
        state.meta.params.insert("token".into(), json!("abc"));

        let request = build_request(&state).unwrap();
        assert_eq!(request.get("start"), Some("50"));
        assert_eq!(request.get("length"), Some("25"));
        assert_eq!(request.get("search[name]"), Some("ali"));
        assert_eq!(request.get("search[city]"), None);
        assert_eq!(request.get("sort"), Some("name"));
        assert_eq!(request.get("sortDir"), Some("desc"));
        assert_eq!(request.get("token"), Some("abc"));
    }

    #[test]
    fn test_custom_server_param_names() {
        let mut state = server_state();
        state.options.server_params.start = "offset".into();
        state.options.server_params.length = "limit".into();

        let request = build_request(&state).unwrap();
        assert_eq!(request.get("offset"), Some("0"));
        assert_eq!(request.get("limit"), Some("25"));
        assert_eq!(request.get("start"), None);
    }

    #[test]
    fn test_to_url() {
        let request = LoadRequest::new("/rows").param("search[name]", "a b");
        let base = url::Url::parse("http://localhost:8080/app/").unwrap();
        let url = request.to_url(Some(&base)).unwrap();
        assert_eq!(url.path(), "/rows");
        assert_eq!(
            url.query_pairs().next().map(|(k, v)| (k.into_owned(), v.into_owned())),
            Some(("search[name]".to_string(), "a b".to_string()))
        );

        assert!(matches!(
            LoadRequest::new("/rows").to_url(None),
            Err(LoadError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_bare_array() {
        let response = parse_response(json!([{"id": 1}, {"id": 2}]), "data").unwrap();
        assert_eq!(response.rows.len(), 2);
        assert!(response.meta.is_none());
    }

    #[test]
    fn test_parse_object_with_meta_and_options() {
        let response = parse_response(
            json!({
                "data": [{"id": 1}],
                "meta": {"total": 100, "filtered": 42, "params": {"cursor": "x"}},
                "options": {"perPage": 5}
            }),
            "data",
        )
        .unwrap();

        let meta = response.meta.unwrap();
        assert_eq!(meta.filtered, 42);
        assert_eq!(meta.params["cursor"], json!("x"));
        assert_eq!(response.options.unwrap()["perPage"], json!(5));
    }

    #[test]
    fn test_parse_missing_data_key() {
        let err = parse_response(json!({"rows": []}), "data").unwrap_err();
        assert!(matches!(err, LoadError::MissingData { key } if key == "data"));
    }

    #[test]
    fn test_parse_custom_data_key() {
        let response = parse_response(json!({"items": [{"id": 1}]}), "items").unwrap();
        assert_eq!(response.rows.len(), 1);
    }

    #[test]
    fn test_parse_scalar_body() {
        assert!(matches!(
            parse_response(json!("nope"), "data"),
            Err(LoadError::Parse { .. })
        ));
    }
}
