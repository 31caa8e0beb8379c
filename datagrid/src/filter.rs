//! Client-side filtering.

use std::collections::BTreeMap;

use crate::row::{field_text, Row};

/// Active filters: field to raw filter text. Empty texts are inactive.
pub type Filters = BTreeMap<String, String>;

/// Whether `row` satisfies every non-empty filter.
///
/// Each filter is a case-insensitive substring match against the
/// stringified field value.
pub fn matches_filters(row: &Row, filters: &Filters) -> bool {
    filters
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .all(|(field, text)| {
            field_text(row, field)
                .to_lowercase()
                .contains(&text.to_lowercase())
        })
}

/// Rows of `rows` matching all active filters, in order.
pub fn filter_rows(rows: &[Row], filters: &Filters) -> Vec<Row> {
    rows.iter()
        .filter(|row| matches_filters(row, filters))
        .cloned()
        .collect()
}

/// Whether any filter has text.
pub fn has_active_filters(filters: &Filters) -> bool {
    filters.values().any(|text| !text.is_empty())
}
