//! Footer rendering: page size, navigation and the record summary.

use griddom::{find_element_mut, Element};

use crate::engine::{GridCore, Role};

impl GridCore {
    /// Rebuild the `tfoot` section.
    ///
    /// Dynamic parts (button states, page input, summary) are filled in by
    /// [`GridCore::fix_page`] and [`GridCore::paginate`].
    pub fn render_footer(&mut self) {
        let ids = self.ids();
        let options = &self.state.options;
        let labels = &options.labels;

        let mut sizes = options.per_page_values.clone();
        if !sizes.contains(&options.per_page) {
            sizes.push(options.per_page);
            sizes.sort_unstable();
        }
        let per_page = Element::div()
            .class("dg-per-page")
            .hidden(options.hide_per_page)
            .child(Element::text(labels.items_per_page.as_str()).class("dg-per-page-label"))
            .child(
                Element::select(
                    sizes.iter().map(|n| (n.to_string(), n.to_string())),
                    options.per_page.to_string(),
                )
                .id(ids.child(&["per-page"]))
                .class("dg-per-page-select")
                .data(Role::KEY, Role::PerPage.as_str())
                .attr("aria-label", labels.items_per_page.as_str()),
            );

        let nav_button = |role: Role, class: &str, text: &str, label: &str| {
            Element::button(text)
                .id(ids.child(&["btn", role.as_str()]))
                .class(class)
                .data(Role::KEY, role.as_str())
                .attr("aria-label", label)
        };
        let page_input = Element::input(self.state.page.to_string())
            .id(ids.child(&["input", "page"]))
            .class("dg-input-page")
            .attr("type", "number")
            .data(Role::KEY, Role::PageInput.as_str())
            .attr("aria-label", labels.goto_page.as_str());
        let pagination = Element::div()
            .class("dg-pagination")
            .child(nav_button(Role::First, "dg-btn-first", "«", labels.goto_first_page.as_str()))
            .child(nav_button(Role::Prev, "dg-btn-prev", "‹", labels.goto_prev_page.as_str()))
            .child(page_input)
            .child(nav_button(Role::Next, "dg-btn-next", "›", labels.goto_next_page.as_str()))
            .child(nav_button(Role::Last, "dg-btn-last", "»", labels.goto_last_page.as_str()));

        let meta = Element::div().id(ids.child(&["meta"])).class("dg-meta");

        let footer = Element::tr().child(
            Element::td()
                .class("dg-footer")
                .attr("colspan", self.column_span().max(1).to_string())
                .child(per_page)
                .child(pagination)
                .child(meta),
        );

        let tfoot = ids.tfoot.clone();
        match self.element_mut(&tfoot) {
            Some(section) => section.replace_children(vec![footer]),
            None => log::error!("Footer section `{tfoot}` missing"),
        }
    }

    /// Clamp the page and sync the page input's bounds, value and state.
    /// Returns `true` when the page changed.
    pub fn fix_page(&mut self) -> bool {
        let changed = self.state.fix_page();
        let pages = self.state.total_pages();
        let page = self.state.page;
        let id = self.ids().child(&["input", "page"]);

        if let Some(input) = self.element_mut(&id) {
            input.set_attr("min", "1");
            input.set_attr("max", pages.max(1).to_string());
            input.value = Some(page.to_string());
            input.disabled = pages <= 1;
        }
        changed
    }

    /// Show the rows of the current page and update navigation state.
    pub fn paginate(&mut self) {
        let window = self.state.page_window();
        let server = self.state.options.server;
        let page = self.state.page;
        let pages = self.state.total_pages();
        let total = self.state.total_records();
        let labels = &self.state.options.labels;
        let summary = if total == 0 {
            format!("0 {}", labels.items)
        } else {
            format!(
                "{} - {} {} {} {}",
                window.low, window.high, labels.of, total, labels.items
            )
        };
        let ids = self.ids().clone();

        if let Some(tbody) = self.element_mut(&ids.tbody) {
            for row in tbody.child_elements_mut() {
                let Some(index) = row.get_data("index").and_then(|i| i.parse::<usize>().ok())
                else {
                    continue;
                };
                row.hidden = !server && !window.contains_index(index);
            }
        }

        let root = self.view_mut();
        for (role, disabled) in [
            (Role::First, page <= 1),
            (Role::Prev, page <= 1),
            (Role::Next, page >= pages),
            (Role::Last, page >= pages),
        ] {
            if let Some(button) = find_element_mut(root, &ids.child(&["btn", role.as_str()])) {
                button.disabled = disabled;
            }
        }
        if let Some(meta) = find_element_mut(root, &ids.child(&["meta"])) {
            meta.set_text(summary);
        }
    }
}
