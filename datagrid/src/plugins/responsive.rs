//! Responsive column collapsing.
//!
//! When the container becomes narrower than the visible columns need,
//! columns with a `responsive` priority are hidden, lowest priority first
//! (rightmost on ties). Columns without a priority never collapse. When
//! space frees up they come back in reverse order. Collapsed values are
//! reachable through the per-row toggle, which lists them in a details row.

use std::time::{Duration, Instant};

use griddom::{Event, EventKind};

use super::{EventResult, Plugin, ResponsiveCollapse};
use crate::engine::{EventTarget, GridCore, Role};

/// Default quiet period between two applied widths.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Bundled [`ResponsiveCollapse`].
#[derive(Debug)]
pub struct ResponsiveGrid {
    debounce: Duration,
    last_applied: Option<Instant>,
    pending: Option<u32>,
    collapsed: Vec<String>,
}

impl Default for ResponsiveGrid {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            last_applied: None,
            pending: None,
            collapsed: Vec::new(),
        }
    }
}

impl ResponsiveGrid {
    pub const NAME: &'static str = "ResponsiveGrid";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    fn quiet(&self, now: Instant) -> bool {
        self.last_applied
            .is_none_or(|last| now.saturating_duration_since(last) >= self.debounce)
    }

    fn apply(&mut self, grid: &mut GridCore, width: u32, now: Instant) -> bool {
        self.last_applied = Some(now);
        self.pending = None;

        if grid.state.container_width != Some(width) {
            grid.state.container_width = Some(width);
            grid.invalidate_header();
            grid.invalidate_body();
        }
        self.fit(grid, width)
    }

    /// Collapse or restore columns for `width`.
    fn fit(&mut self, grid: &mut GridCore, width: u32) -> bool {
        if !grid.state.options.responsive {
            return false;
        }

        // columns shown again from outside leave the stack
        self.collapsed
            .retain(|field| grid.state.column(field).is_some_and(|c| c.hidden));

        let hidden = self.collapse(grid, width);
        let restored = if hidden { false } else { self.restore(grid, width) };
        if hidden || restored {
            grid_debug!(
                grid.state.options,
                "[{}] Width {width}: collapsed {:?}",
                grid.id(),
                self.collapsed
            );
        }
        hidden || restored
    }

    fn collapse(&mut self, grid: &mut GridCore, width: u32) -> bool {
        let mut changed = false;
        while grid.required_width() > width {
            let candidate = grid
                .state
                .visible_columns()
                .into_iter()
                .enumerate()
                .filter_map(|(i, c)| c.responsive.map(|p| (p, i, c.field.clone())))
                .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
            let Some((_, _, field)) = candidate else {
                break;
            };
            grid.set_column_hidden(&field, true);
            self.collapsed.push(field);
            changed = true;
        }
        changed
    }

    fn restore(&mut self, grid: &mut GridCore, width: u32) -> bool {
        let mut changed = false;
        while let Some(field) = self.collapsed.last().cloned() {
            let Some(column) = grid.state.column_mut(&field) else {
                self.collapsed.pop();
                continue;
            };
            column.hidden = false;
            let fits = grid.required_width() <= width;
            if let Some(column) = grid.state.column_mut(&field) {
                column.hidden = true;
            }
            if !fits {
                break;
            }
            grid.set_column_hidden(&field, false);
            self.collapsed.pop();
            changed = true;
        }
        changed
    }

    fn toggle_details(grid: &mut GridCore, index: usize) -> EventResult {
        let Some(row) = grid.state.data.get(index) else {
            return EventResult::Ignored;
        };
        let key = grid.state.row_key(row);
        if !grid.state.expanded.remove(&key) {
            grid.state.expanded.insert(key);
        }
        grid.invalidate_body();
        EventResult::Consumed
    }
}

impl Plugin for ResponsiveGrid {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn disconnected(&mut self, _grid: &mut GridCore) {
        self.pending = None;
    }

    fn body_rendered(&mut self, grid: &mut GridCore) {
        // new rows may need more room than the last measured width allows
        if let Some(width) = grid.state.container_width {
            self.fit(grid, width);
        }
    }

    fn handles(&self) -> &'static [EventKind] {
        &[EventKind::Resize, EventKind::Click]
    }

    fn handle_event(
        &mut self,
        grid: &mut GridCore,
        event: &Event,
        target: Option<&EventTarget>,
    ) -> EventResult {
        match event {
            Event::Resize { width } => {
                self.observe_width(grid, *width, Instant::now());
                EventResult::Consumed
            }
            Event::Click { .. } => match target {
                Some(target) if target.is(Role::ResponsiveToggle) && grid.toggle_enabled() => {
                    match target.row {
                        Some(index) => Self::toggle_details(grid, index),
                        None => EventResult::Ignored,
                    }
                }
                _ => EventResult::Ignored,
            },
            _ => EventResult::Ignored,
        }
    }
}

impl ResponsiveCollapse for ResponsiveGrid {
    fn observe_width(&mut self, grid: &mut GridCore, width: u32, now: Instant) -> bool {
        if self.quiet(now) {
            self.apply(grid, width, now)
        } else {
            self.pending = Some(width);
            false
        }
    }

    fn settle(&mut self, grid: &mut GridCore, now: Instant) -> bool {
        match self.pending {
            Some(width) if self.quiet(now) => self.apply(grid, width, now),
            _ => false,
        }
    }

    fn collapsed(&self) -> &[String] {
        &self.collapsed
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::engine::Capabilities;
    use crate::events::GridEvent;
    use crate::options::Options;

    fn grid() -> GridCore {
        let mut grid = GridCore::new(Options {
            id: "g".into(),
            responsive: true,
            columns: vec![
                json!({"field": "a", "width": 100, "responsive": 1}),
                json!({"field": "b", "width": 100, "responsive": 2}),
                json!({"field": "c", "width": 100}),
            ],
            ..Default::default()
        });
        grid.set_capabilities(Capabilities {
            responsive: true,
            ..Default::default()
        });
        grid.state.set_rows(vec![json!({"a": 1, "b": 2, "c": 3})
            .as_object()
            .cloned()
            .unwrap()]);
        grid.render_table();
        grid
    }

    fn hidden(grid: &GridCore) -> Vec<&str> {
        grid.state
            .hidden_columns()
            .into_iter()
            .map(|c| c.field.as_str())
            .collect()
    }

    #[test]
    fn test_collapse_by_priority_then_restore() {
        let mut grid = grid();
        let mut plugin = ResponsiveGrid::new().with_debounce(Duration::ZERO);
        let now = Instant::now();
        // toggle slot (40) + 3 x 100
        assert_eq!(grid.required_width(), 340);

        assert!(plugin.observe_width(&mut grid, 250, now));
        assert_eq!(hidden(&grid), vec!["a"]);

        assert!(plugin.observe_width(&mut grid, 100, now));
        assert_eq!(hidden(&grid), vec!["a", "b"]);
        // no priority, never collapses
        assert_eq!(plugin.collapsed(), ["a", "b"]);

        assert!(plugin.observe_width(&mut grid, 250, now));
        assert_eq!(hidden(&grid), vec!["a"]);
        assert!(plugin.observe_width(&mut grid, 1000, now));
        assert!(hidden(&grid).is_empty());

        let visibility: Vec<GridEvent> = grid
            .events
            .drain()
            .into_iter()
            .filter(|e| matches!(e, GridEvent::ColumnVisibility { .. }))
            .collect();
        assert_eq!(visibility.len(), 4);
        assert_eq!(
            visibility[2],
            GridEvent::ColumnVisibility {
                field: "b".into(),
                visible: true
            }
        );
    }

    #[test]
    fn test_debounce_defers_width() {
        let mut grid = grid();
        let mut plugin = ResponsiveGrid::new();
        let start = Instant::now();

        assert!(!plugin.observe_width(&mut grid, 1000, start));
        assert!(!plugin.observe_width(&mut grid, 250, start + Duration::from_millis(10)));
        assert!(hidden(&grid).is_empty());
        assert!(!plugin.settle(&mut grid, start + Duration::from_millis(50)));
        assert!(plugin.settle(&mut grid, start + Duration::from_millis(150)));
        assert_eq!(hidden(&grid), vec!["a"]);
        assert_eq!(grid.state.container_width, Some(250));
    }

    #[test]
    fn test_toggle_expands_row() {
        let mut grid = grid();
        let mut plugin = ResponsiveGrid::new().with_debounce(Duration::ZERO);
        plugin.observe_width(&mut grid, 250, Instant::now());
        grid.render_dirty();

        let target = grid.resolve_target("g-toggle-0");
        let result = plugin.handle_event(&mut grid, &Event::click("g-toggle-0"), target.as_ref());
        assert_eq!(result, EventResult::Consumed);
        assert!(grid.state.expanded.contains("1"));

        grid.render_dirty();
        let details = grid.element("g-details-0").unwrap();
        assert_eq!(details.child_elements()[0].child_elements().len(), 1);
    }
}
