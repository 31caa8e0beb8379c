//! Header rendering: the column row and the optional filter row.

use griddom::Element;

use crate::column::{Column, FilterType};
use crate::engine::{GridCore, Role};

impl GridCore {
    /// Rebuild the `thead` section.
    pub fn render_header(&mut self) {
        let mut rows = vec![self.header_columns_row()];
        if self.state.options.filter {
            rows.push(self.header_filters_row());
        }

        let thead = self.ids().thead.clone();
        match self.element_mut(&thead) {
            Some(section) => section.replace_children(rows),
            None => log::error!("Header section `{thead}` missing"),
        }
    }

    fn header_columns_row(&self) -> Element {
        let ids = self.ids();
        let options = &self.state.options;
        let widths = self.column_widths();
        let mut row = Element::tr()
            .id(ids.child(&["head", "columns"]))
            .class("dg-head-columns");

        if self.selection_enabled() {
            let all_selected = self.all_rows_selected();
            row.push_child(
                Element::th().class("dg-selectable").child(
                    Element::checkbox(all_selected)
                        .id(ids.child(&["select-all"]))
                        .data(Role::KEY, Role::SelectAll.as_str())
                        .attr("aria-label", options.labels.select_all.as_str()),
                ),
            );
        }
        if self.toggle_enabled() {
            row.push_child(Element::th().class("dg-responsive-toggle"));
        }

        for column in self.state.cell_columns() {
            let mut th = slot_cell(Element::th(), column)
                .id(ids.child(&["th", &column.field]))
                .data(Role::KEY, Role::Header.as_str())
                .width(widths.get(&column.field).copied().flatten())
                .child(Element::text(column.title.as_str()).class("dg-title"));

            if options.sort {
                if column.no_sort {
                    th.add_class("dg-not-sortable");
                } else {
                    th.add_class("dg-sortable");
                    th.set_attr(
                        "aria-sort",
                        self.state.sort_indicator(&column.field).as_aria(),
                    );
                }
            }
            row.push_child(th);
        }

        if self.actions_enabled() {
            row.push_child(
                Element::th()
                    .class("dg-actions")
                    .with_text(options.labels.actions.as_str()),
            );
        }

        row
    }

    fn header_filters_row(&self) -> Element {
        let ids = self.ids();
        let options = &self.state.options;
        let mut row = Element::tr()
            .id(ids.child(&["head", "filters"]))
            .class("dg-head-filters");

        if self.selection_enabled() {
            row.push_child(Element::th().class("dg-selectable"));
        }
        if self.toggle_enabled() {
            row.push_child(Element::th().class("dg-responsive-toggle"));
        }

        for column in self.state.cell_columns() {
            let text = self
                .state
                .filters
                .get(&column.field)
                .cloned()
                .unwrap_or_default();
            let control = match column.filter_type {
                FilterType::Text => Some(
                    Element::input(text).attr("placeholder", options.labels.filter.as_str()),
                ),
                FilterType::Select => {
                    let choices = std::iter::once((String::new(), String::new())).chain(
                        column
                            .filter_list
                            .iter()
                            .map(|choice| (choice.clone(), choice.clone())),
                    );
                    Some(Element::select(choices, text))
                }
                FilterType::None => None,
            };

            let mut th = slot_cell(Element::th(), column);
            if let Some(control) = control {
                th.push_child(
                    control
                        .id(ids.child(&["filter", &column.field]))
                        .data(Role::KEY, Role::Filter.as_str())
                        .data("field", column.field.as_str())
                        .attr("aria-label", column.title.as_str()),
                );
            }
            row.push_child(th);
        }

        if self.actions_enabled() {
            row.push_child(Element::th().class("dg-actions"));
        }

        row
    }

    /// Every selectable row is selected (visible rows only when configured).
    pub fn all_rows_selected(&self) -> bool {
        let rows = if self.state.options.select_visible_only {
            self.state.page_rows()
        } else {
            &self.state.data
        };
        !rows.is_empty()
            && rows
                .iter()
                .all(|row| self.state.selection.contains(&self.state.row_key(row)))
    }
}

/// Field, class and visibility shared by header and body cells.
pub(crate) fn slot_cell(cell: Element, column: &Column) -> Element {
    let mut cell = cell
        .data("field", column.field.as_str())
        .hidden(column.hidden);
    if column.hidden {
        cell.add_class("dg-hidden-column");
    }
    if let Some(class) = &column.class {
        cell.add_class(class.as_str());
    }
    cell
}
