//! Column width measurement and auto-sizing.

use std::collections::HashMap;

use unicode_width::UnicodeWidthStr;

use crate::column::Column;
use crate::engine::GridCore;

/// Narrowest width auto-sizing shrinks a column to.
pub const MIN_COLUMN_WIDTH: u32 = 48;

/// Width of the selection, toggle and action slots.
pub const SLOT_WIDTH: u32 = 40;

/// Rendered width of `text` in pixels.
pub fn text_width(text: &str, char_width: u32) -> u32 {
    (text.width() as u32).saturating_mul(char_width)
}

/// Measured column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measure {
    pub field: String,
    /// Widest header or cell text plus padding.
    pub min: u32,
    /// Width set on the column definition; never auto-sized.
    pub fixed: Option<u32>,
}

impl Measure {
    pub fn width(&self) -> u32 {
        self.fixed.unwrap_or(self.min)
    }
}

/// Fit measured columns into `available` pixels.
///
/// Over capacity, the widest columns shrink first, never below `floor`.
/// Under capacity, the last auto-sized column is left unconstrained
/// (`None`) to take the remaining space.
pub fn fit_widths(columns: &[Measure], available: u32, floor: u32) -> Vec<Option<u32>> {
    let mut widths: Vec<u32> = columns.iter().map(Measure::width).collect();
    let total: u32 = widths.iter().sum();

    if total > available {
        shrink_widest(&mut widths, columns, total - available, floor);
        return widths.into_iter().map(Some).collect();
    }

    let mut result: Vec<Option<u32>> = widths.into_iter().map(Some).collect();
    if let Some(last) = columns.iter().rposition(|c| c.fixed.is_none()) {
        result[last] = None;
    }
    result
}

fn shrink_widest(widths: &mut [u32], columns: &[Measure], mut excess: u32, floor: u32) {
    let shrinkable: Vec<usize> = (0..widths.len())
        .filter(|&i| columns[i].fixed.is_none())
        .collect();

    while excess > 0 {
        let Some(widest) = shrinkable.iter().map(|&i| widths[i]).max() else {
            return;
        };
        if widest <= floor {
            return;
        }
        let next = shrinkable
            .iter()
            .map(|&i| widths[i])
            .filter(|&w| w < widest)
            .max()
            .unwrap_or(floor)
            .max(floor);
        let at_widest: Vec<usize> = shrinkable
            .iter()
            .copied()
            .filter(|&i| widths[i] == widest)
            .collect();

        let step = widest - next;
        let share = excess.div_ceil(at_widest.len() as u32).min(step);
        for i in at_widest {
            let cut = share.min(excess);
            widths[i] -= cut;
            excess -= cut;
            if excess == 0 {
                return;
            }
        }
    }
}

impl GridCore {
    /// Minimum width of `column`: its widest title or current-page cell.
    pub fn column_min_width(&self, column: &Column) -> u32 {
        let options = &self.state.options;
        let title = text_width(&column.title, options.char_width);
        let cells = self
            .state
            .page_rows()
            .iter()
            .map(|row| text_width(&self.formatters.cell_text(column, row), options.char_width))
            .max()
            .unwrap_or(0);
        title.max(cells) + options.cell_padding
    }

    /// Measures of the visible columns, in order.
    pub fn measure_columns(&self) -> Vec<Measure> {
        self.state
            .visible_columns()
            .into_iter()
            .map(|column| Measure {
                field: column.field.clone(),
                min: self.column_min_width(column),
                fixed: column.width,
            })
            .collect()
    }

    /// Width taken by the enabled leading and trailing slots.
    pub fn slot_width(&self) -> u32 {
        let slots = [
            self.selection_enabled(),
            self.toggle_enabled(),
            self.actions_enabled(),
        ];
        slots.iter().filter(|&&on| on).count() as u32 * SLOT_WIDTH
    }

    /// Width the visible columns need at minimum.
    pub fn required_width(&self) -> u32 {
        self.measure_columns().iter().map(Measure::width).sum::<u32>() + self.slot_width()
    }

    /// Width of each visible column.
    ///
    /// Without auto-sizing or a known container width only fixed widths
    /// are set.
    pub fn column_widths(&self) -> HashMap<String, Option<u32>> {
        let measures = self.measure_columns();
        match (self.state.options.autosize, self.state.container_width) {
            (true, Some(container)) => {
                let available = container.saturating_sub(self.slot_width());
                let widths = fit_widths(&measures, available, MIN_COLUMN_WIDTH);
                measures
                    .into_iter()
                    .map(|m| m.field)
                    .zip(widths)
                    .collect()
            }
            _ => measures.into_iter().map(|m| (m.field, m.fixed)).collect(),
        }
    }
}
