//! Body rendering: one row per working row, rebuilt wholesale.

use griddom::Element;

use super::header::slot_cell;
use crate::engine::{GridCore, Role};
use crate::row::{field_text, Row};

impl GridCore {
    /// Rebuild the `tbody` section from the working rows.
    ///
    /// Client mode renders every row and leaves paging to
    /// [`GridCore::paginate`]; server mode rows are the current page already.
    pub fn render_body(&mut self) {
        let rows = if self.state.data.is_empty() {
            vec![self.empty_row()]
        } else {
            let mut rows = Vec::with_capacity(self.state.data.len());
            for (index, row) in self.state.data.iter().enumerate() {
                rows.push(self.body_row(index, row));
                if let Some(details) = self.details_row(index, row) {
                    rows.push(details);
                }
            }
            rows
        };

        let tbody = self.ids().tbody.clone();
        match self.element_mut(&tbody) {
            Some(section) => section.replace_children(rows),
            None => log::error!("Body section `{tbody}` missing"),
        }
    }

    /// Number of rendered cells per row, slots included.
    pub fn column_span(&self) -> usize {
        let slots = [
            self.selection_enabled(),
            self.toggle_enabled(),
            self.actions_enabled(),
        ];
        self.state.visible_columns().len() + slots.iter().filter(|&&on| on).count()
    }

    fn empty_row(&self) -> Element {
        let text = match &self.state.network_error {
            Some(message) => message.clone(),
            None => self.state.options.labels.no_data.clone(),
        };
        Element::tr().class("dg-empty-row").child(
            Element::td()
                .id(self.ids().child(&["empty"]))
                .class("dg-empty")
                .attr("colspan", self.column_span().max(1).to_string())
                .with_text(text),
        )
    }

    fn body_row(&self, index: usize, row: &Row) -> Element {
        let ids = self.ids();
        let index_text = index.to_string();
        let key = self.state.row_key(row);
        let mut tr = Element::tr()
            .id(ids.child(&["row", &index_text]))
            .data("index", index_text.as_str())
            .data("id", key.as_str());

        for column in self.state.columns.iter().filter(|c| c.is_virtual()) {
            let value = field_text(row, &column.field);
            match column.attr.as_deref() {
                Some("class") => {
                    if !value.is_empty() {
                        tr.add_class(value);
                    }
                }
                Some(attr) => tr.set_attr(attr, value),
                None => {}
            }
        }

        if self.selection_enabled() {
            let selected = self.state.selection.contains(&key);
            if selected {
                tr.add_class("dg-selected");
            }
            tr.push_child(
                Element::td().class("dg-selectable").child(
                    Element::checkbox(selected)
                        .id(ids.child(&["select", &index_text]))
                        .data(Role::KEY, Role::SelectRow.as_str()),
                ),
            );
        }

        if self.toggle_enabled() {
            let mut td = Element::td().class("dg-responsive-toggle");
            if !self.state.hidden_columns().is_empty() {
                let expanded = self.state.expanded.contains(&key);
                td.push_child(
                    Element::button(if expanded { "-" } else { "+" })
                        .id(ids.child(&["toggle", &index_text]))
                        .data(Role::KEY, Role::ResponsiveToggle.as_str())
                        .attr("aria-expanded", expanded.to_string()),
                );
            }
            tr.push_child(td);
        }

        let editing = self.editing_enabled();
        for column in self.state.cell_columns() {
            let text = self.formatters.cell_text(column, row);
            let mut td = slot_cell(Element::td(), column)
                .id(ids.child(&["cell", &index_text, &column.field]));

            if editing && column.editable {
                td.add_class("dg-editable");
                let raw = field_text(row, &column.field);
                td.push_child(
                    Element::input(raw)
                        .id(ids.child(&["edit", &index_text, &column.field]))
                        .data(Role::KEY, Role::Edit.as_str())
                        .attr("aria-label", column.title.as_str()),
                );
            } else {
                td.set_text(text);
            }
            tr.push_child(td);
        }

        if self.actions_enabled() {
            let mut td = Element::td().class("dg-actions");
            for action in &self.state.options.actions {
                let mut button = Element::button(action.title())
                    .id(ids.child(&["action", &index_text, &action.name]))
                    .data(Role::KEY, Role::Action.as_str())
                    .data("action", action.name.as_str());
                if !action.class.is_empty() {
                    button.add_class(action.class.as_str());
                }
                td.push_child(button);
            }
            tr.push_child(td);
        }

        tr
    }

    /// Collapsed columns of an expanded row, listed under it.
    fn details_row(&self, index: usize, row: &Row) -> Option<Element> {
        if !self.toggle_enabled() || !self.state.expanded.contains(&self.state.row_key(row)) {
            return None;
        }
        let hidden = self.state.hidden_columns();
        if hidden.is_empty() {
            return None;
        }

        let index_text = index.to_string();
        let items = hidden.into_iter().map(|column| {
            Element::div()
                .class("dg-detail")
                .data("field", column.field.as_str())
                .child(Element::text(column.title.as_str()).class("dg-detail-title"))
                .child(Element::text(self.formatters.cell_text(column, row)).class("dg-detail-value"))
        });

        Some(
            Element::tr()
                .id(self.ids().child(&["details", &index_text]))
                .class("dg-details")
                .data("index", index_text.as_str())
                .child(
                    Element::td()
                        .attr("colspan", self.column_span().max(1).to_string())
                        .children(items),
                ),
        )
    }
}
