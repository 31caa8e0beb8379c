//! Routing DOM events through the grid's own handlers, then the plugins.

use griddom::{Event, Key};

use super::Grid;
use crate::engine::{Effect, EventTarget, Role};

/// What dispatching an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No handler took the event.
    Ignored,
    /// Handled; the view is up to date.
    Handled,
    /// Handled; the grid must reload (see [`Grid::handle`]).
    Reload,
}

impl Grid {
    /// Dispatch `event` synchronously.
    ///
    /// The grid's handlers (sorting, filtering, paging) run first, then the
    /// plugins registered for the event kind. Dirty sections are rendered
    /// before returning. A handler that needs a fetch reports
    /// [`DispatchOutcome::Reload`]; use [`Grid::handle`] to also perform it.
    pub fn dispatch(&mut self, event: Event) -> DispatchOutcome {
        let target = event
            .target()
            .and_then(|id| self.core.resolve_target(id));
        if event.target().is_some() && target.is_none() {
            log::trace!("[{}] event target {:?} not in view", self.core.id(), event.target());
        }

        let outcome = match self.handle_own(&event, target.as_ref()) {
            Some(Effect::Reload) => DispatchOutcome::Reload,
            Some(_) => DispatchOutcome::Handled,
            None => {
                if self
                    .plugins
                    .dispatch(&mut self.core, &event, target.as_ref())
                    .is_handled()
                {
                    DispatchOutcome::Handled
                } else {
                    DispatchOutcome::Ignored
                }
            }
        };

        self.flush();
        outcome
    }

    /// Dispatch `event` and perform any reload it asks for.
    pub async fn handle(&mut self, event: Event) -> DispatchOutcome {
        let outcome = self.dispatch(event);
        if outcome == DispatchOutcome::Reload {
            self.load_data().await;
        }
        outcome
    }

    /// The grid's own handlers. `None` when the event is not theirs.
    fn handle_own(&mut self, event: &Event, target: Option<&EventTarget>) -> Option<Effect> {
        if let Event::Resize { width } = event {
            // with a responsive plugin the width goes through its debounce
            if self.plugins.responsive().is_some() {
                return None;
            }
            self.core.state.container_width = Some(*width);
            self.core.invalidate_header();
            return Some(Effect::Render);
        }

        let target = target?;
        let role = target.role?;
        match (event, role) {
            (Event::Click { .. }, Role::Header) => {
                if !self.core.state.options.sort {
                    return None;
                }
                if self.plugins.resizer().is_some_and(|r| r.is_resizing()) {
                    return Some(Effect::None);
                }
                Some(self.core.sort_column(target.field.as_deref()))
            }
            (Event::Click { .. }, Role::First) => Some(self.core.first_page()),
            (Event::Click { .. }, Role::Prev) => Some(self.core.prev_page()),
            (Event::Click { .. }, Role::Next) => Some(self.core.next_page()),
            (Event::Click { .. }, Role::Last) => Some(self.core.last_page()),

            (Event::Input { value, .. }, Role::Filter) => {
                let field = target.field.as_deref()?;
                self.record_filter(&target.id, field, value);
                if self.core.state.options.filter_on_enter {
                    Some(Effect::None)
                } else {
                    Some(self.core.filter_data())
                }
            }
            (Event::Change { value, .. }, Role::Filter) => {
                let field = target.field.as_deref()?;
                self.record_filter(&target.id, field, value);
                Some(self.core.filter_data())
            }
            (Event::KeyDown { key: Key::Enter, .. }, Role::Filter) => {
                let field = target.field.as_deref()?;
                let text = target.value.clone().unwrap_or_default();
                self.core.set_filter_text(field, &text);
                Some(self.core.filter_data())
            }

            (Event::Change { value, .. }, Role::PerPage) => match value.trim().parse::<usize>() {
                Ok(per_page) => Some(self.core.set_per_page(per_page)),
                Err(_) => {
                    log::warn!("Ignoring page size `{value}`");
                    Some(Effect::None)
                }
            },
            (Event::Change { value, .. }, Role::PageInput) => match value.trim().parse::<usize>() {
                Ok(page) => Some(self.core.goto_page(page)),
                Err(_) => {
                    // restore the input to the current page
                    self.core.fix_page();
                    Some(Effect::None)
                }
            },
            _ => None,
        }
    }

    /// Store filter text and mirror it into the control.
    fn record_filter(&mut self, id: &str, field: &str, text: &str) {
        self.core.set_filter_text(field, text);
        if let Some(control) = self.core.element_mut(id) {
            control.value = Some(text.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::loader::StaticSource;
    use crate::options::Options;

    async fn ready(options: Options, rows: serde_json::Value) -> Grid {
        let mut grid = Grid::builder()
            .options(Options {
                id: "g".into(),
                ..options
            })
            .preload(rows)
            .source(StaticSource::new())
            .build();
        grid.connect();
        grid.first_render().await;
        grid
    }

    fn numbers(count: usize) -> serde_json::Value {
        serde_json::Value::Array((1..=count).map(|i| json!({"id": i})).collect())
    }

    #[tokio::test]
    async fn test_header_click_cycles_sort() {
        let mut grid = ready(
            Options {
                sort: true,
                ..Default::default()
            },
            json!([{"id": 2}, {"id": 10}, {"id": 1}]),
        )
        .await;

        assert_eq!(grid.dispatch(Event::click("g-th-id")), DispatchOutcome::Handled);
        let ids: Vec<_> = grid.get_rows().iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!(1), json!(2), json!(10)]);

        grid.dispatch(Event::click("g-th-id"));
        assert_eq!(grid.get_rows()[0]["id"], json!(10));
        assert_eq!(
            grid.dom_element("g-th-id").unwrap().get_attr("aria-sort"),
            Some("descending")
        );

        grid.dispatch(Event::click("g-th-id"));
        assert_eq!(grid.get_rows()[0]["id"], json!(2));
    }

    #[tokio::test]
    async fn test_header_click_ignored_without_sort_option() {
        let mut grid = ready(Options::default(), numbers(3)).await;
        assert_eq!(grid.dispatch(Event::click("g-th-id")), DispatchOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_navigation_buttons() {
        let mut grid = ready(Options::default(), numbers(25)).await;

        grid.dispatch(Event::click("g-btn-last"));
        assert_eq!(grid.page(), 3);
        grid.dispatch(Event::click("g-btn-prev"));
        assert_eq!(grid.page(), 2);
        grid.dispatch(Event::click("g-btn-first"));
        assert_eq!(grid.page(), 1);
        assert!(grid.dom_element("g-btn-prev").unwrap().disabled);
    }

    #[tokio::test]
    async fn test_filter_on_enter() {
        let mut grid = ready(
            Options {
                filter: true,
                ..Default::default()
            },
            numbers(12),
        )
        .await;

        grid.dispatch(Event::Input {
            target: "g-filter-id".into(),
            value: "1".into(),
        });
        // recorded, not applied yet
        assert_eq!(grid.get_rows().len(), 12);
        assert_eq!(
            grid.dom_element("g-filter-id").unwrap().value.as_deref(),
            Some("1")
        );

        grid.dispatch(Event::key("g-filter-id", Key::Enter));
        // 1, 10, 11, 12
        assert_eq!(grid.get_rows().len(), 4);
        assert_eq!(grid.page(), 1);
    }

    #[tokio::test]
    async fn test_filter_as_you_type() {
        let mut grid = ready(
            Options {
                filter: true,
                filter_on_enter: false,
                ..Default::default()
            },
            numbers(12),
        )
        .await;

        grid.dispatch(Event::Input {
            target: "g-filter-id".into(),
            value: "11".into(),
        });
        assert_eq!(grid.get_rows().len(), 1);
    }

    #[tokio::test]
    async fn test_per_page_and_page_input() {
        let mut grid = ready(Options::default(), numbers(60)).await;

        grid.dispatch(Event::Change {
            target: "g-per-page".into(),
            value: "25".into(),
        });
        assert_eq!(grid.per_page(), 25);
        assert_eq!(grid.total_pages(), 3);

        grid.dispatch(Event::Change {
            target: "g-input-page".into(),
            value: "9".into(),
        });
        assert_eq!(grid.page(), 3);
        assert!(grid.to_html().contains("51 - 60 of 60 items"));
    }

    #[tokio::test]
    async fn test_server_mode_sort_requests_reload() {
        let mut grid = Grid::builder()
            .options(Options {
                id: "g".into(),
                url: Some("/rows".into()),
                server: true,
                sort: true,
                ..Default::default()
            })
            .source(StaticSource::new().route(
                "/rows",
                json!({"data": [{"id": 1}], "meta": {"total": 1, "filtered": 1}}),
            ))
            .build();
        grid.connect();
        grid.first_render().await;

        let outcome = grid.handle(Event::click("g-th-id")).await;
        assert_eq!(outcome, DispatchOutcome::Reload);
        assert_eq!(grid.sort_state().map(|s| s.field.as_str()), Some("id"));
    }
}
