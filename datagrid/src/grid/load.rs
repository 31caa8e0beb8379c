//! Loading rows into the grid.

use std::sync::Arc;

use serde_json::Value;

use super::Grid;
use crate::error::LoadError;
use crate::loader::{build_request, parse_response, LoadOutcome, LoadStart, LoadTicket};

impl Grid {
    /// Set rows and meta from a payload without fetching.
    ///
    /// Accepts the same shapes as a response: a row array, or an object
    /// with rows under the data key plus optional `options` and `meta`.
    pub fn preload(&mut self, payload: Value) -> Result<usize, LoadError> {
        let response = parse_response(payload, &self.core.state.options.data_key)?;
        let rows = response.rows.len();
        self.core.apply_response(response);
        self.flush();
        Ok(rows)
    }

    /// First half of a load: decide whether to fetch and mark loading.
    ///
    /// Skips without a URL, and when rows are present unless a ready grid
    /// pages on the server. A skipped load is finalized immediately.
    pub fn begin_load(&mut self) -> LoadStart {
        let state = &self.core.state;
        let Some(request) = build_request(state) else {
            grid_debug!(state.options, "[{}] no url, load skipped", self.core.id());
            self.core.finalize_loading();
            return LoadStart::Skip;
        };
        if state.has_data() && (!state.options.server || !self.lifecycle.is_ready()) {
            grid_debug!(state.options, "[{}] data present, load skipped", self.core.id());
            self.core.finalize_loading();
            return LoadStart::Skip;
        }

        self.core.state.load_generation += 1;
        let generation = self.core.state.load_generation;
        grid_debug!(
            self.core.state.options,
            "[{}] load #{generation} {}",
            self.core.id(),
            request.url
        );
        self.core.start_loading();
        LoadStart::Fetch(LoadTicket {
            generation,
            request,
        })
    }

    /// Second half of a load: apply a fetched body, or the failure.
    ///
    /// A ticket older than the latest started load is dropped; the newer
    /// load finalizes the grid.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Value, LoadError>,
    ) -> LoadOutcome {
        if ticket.generation != self.core.state.load_generation {
            grid_debug!(
                self.core.state.options,
                "[{}] dropping stale load #{} (latest #{})",
                self.core.id(),
                ticket.generation,
                self.core.state.load_generation
            );
            return LoadOutcome::Stale;
        }

        let data_key = self.core.state.options.data_key.clone();
        let outcome = match result.and_then(|body| parse_response(body, &data_key)) {
            Ok(response) => {
                let rows = response.rows.len();
                self.core.apply_response(response);
                LoadOutcome::Loaded { rows }
            }
            Err(e) => {
                log::error!("[{}] load failed: {e}", self.core.id());
                let message = e.display_message();
                self.core.fail_loading(message.clone(), e.is_displayed());
                LoadOutcome::Failed { message }
            }
        };

        self.core.finalize_loading();
        self.flush();
        outcome
    }

    /// Fetch rows if needed, then render.
    pub async fn load_data(&mut self) -> LoadOutcome {
        match self.begin_load() {
            LoadStart::Skip => {
                self.flush();
                LoadOutcome::Skipped
            }
            LoadStart::Fetch(ticket) => {
                let source = Arc::clone(&self.source);
                let result = source.fetch(&ticket.request).await;
                self.finish_load(ticket, result)
            }
        }
    }

    /// Fetch again, dropping client-side rows first.
    pub async fn reload(&mut self) -> LoadOutcome {
        if self.core.state.options.url.as_deref().is_none_or(str::is_empty) {
            log::warn!("[{}] reload without url", self.core.id());
            self.refresh();
            return LoadOutcome::Skipped;
        }
        if !self.core.state.options.server {
            self.core.state.original_data = None;
            self.core.state.data.clear();
            self.core.invalidate_body();
        }
        self.load_data().await
    }
}
