//! Client-side sorting and the tri-state sort indicator.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::row::{value_as_number, value_to_string, Row};

/// Sort direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Wire value for the server `sortDir` parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Tri-state indicator shown on a sortable header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortIndicator {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortIndicator {
    /// none → ascending → descending → none
    pub fn next(self) -> Self {
        match self {
            SortIndicator::None => SortIndicator::Ascending,
            SortIndicator::Ascending => SortIndicator::Descending,
            SortIndicator::Descending => SortIndicator::None,
        }
    }

    /// Value of the header's `aria-sort` attribute.
    pub fn as_aria(&self) -> &'static str {
        match self {
            SortIndicator::None => "none",
            SortIndicator::Ascending => "ascending",
            SortIndicator::Descending => "descending",
        }
    }

    pub fn direction(&self) -> Option<SortDirection> {
        match self {
            SortIndicator::None => None,
            SortIndicator::Ascending => Some(SortDirection::Ascending),
            SortIndicator::Descending => Some(SortDirection::Descending),
        }
    }
}

impl From<Option<SortDirection>> for SortIndicator {
    fn from(direction: Option<SortDirection>) -> Self {
        match direction {
            None => SortIndicator::None,
            Some(SortDirection::Ascending) => SortIndicator::Ascending,
            Some(SortDirection::Descending) => SortIndicator::Descending,
        }
    }
}

/// The single active sort of a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Compare two values: numerically when both parse as numbers, otherwise
/// case-insensitively as text.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let null = Value::Null;
    let a = a.unwrap_or(&null);
    let b = b.unwrap_or(&null);

    if let (Some(x), Some(y)) = (value_as_number(a), value_as_number(b)) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }

    value_to_string(a)
        .to_lowercase()
        .cmp(&value_to_string(b).to_lowercase())
}

/// Stable sort of `rows` by `field`.
pub fn sort_rows(rows: &mut [Row], field: &str, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = compare_values(a.get(field), b.get(field));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Rows of `current` put back in their `original` order.
///
/// Each original row is kept when an equal row exists in `current`, so the
/// filtered subset survives. Quadratic, which is fine for UI-sized grids.
pub fn restore_original_order(original: &[Row], current: &[Row]) -> Vec<Row> {
    original
        .iter()
        .filter(|row| current.contains(row))
        .cloned()
        .collect()
}
