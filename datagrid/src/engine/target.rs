//! Event target resolution.

use griddom::{path_to, Element};

/// What an interactive element does, stored as its `data-role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Sortable header cell.
    Header,
    /// Filter-row input or select.
    Filter,
    First,
    Prev,
    Next,
    Last,
    PerPage,
    PageInput,
    SelectRow,
    SelectAll,
    ResponsiveToggle,
    Action,
    /// Inline editor input.
    Edit,
    ResizeHandle,
    MenuItem,
}

impl Role {
    /// Dataset key the role is stored under.
    pub const KEY: &'static str = "role";

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Header => "header",
            Role::Filter => "filter",
            Role::First => "first",
            Role::Prev => "prev",
            Role::Next => "next",
            Role::Last => "last",
            Role::PerPage => "per-page",
            Role::PageInput => "page-input",
            Role::SelectRow => "select-row",
            Role::SelectAll => "select-all",
            Role::ResponsiveToggle => "responsive-toggle",
            Role::Action => "action",
            Role::Edit => "edit",
            Role::ResizeHandle => "resize-handle",
            Role::MenuItem => "menu-item",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "header" => Role::Header,
            "filter" => Role::Filter,
            "first" => Role::First,
            "prev" => Role::Prev,
            "next" => Role::Next,
            "last" => Role::Last,
            "per-page" => Role::PerPage,
            "page-input" => Role::PageInput,
            "select-row" => Role::SelectRow,
            "select-all" => Role::SelectAll,
            "responsive-toggle" => Role::ResponsiveToggle,
            "action" => Role::Action,
            "edit" => Role::Edit,
            "resize-handle" => Role::ResizeHandle,
            "menu-item" => Role::MenuItem,
            _ => return None,
        })
    }
}

/// The element an event hit, with the context found on its ancestors.
///
/// Each piece is taken from the nearest element on the path, target first:
/// a click on a label inside a header cell resolves to the cell's role and
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTarget {
    pub id: String,
    pub role: Option<Role>,
    /// Column field (`data-field`).
    pub field: Option<String>,
    /// Index into the working rows (`data-index`).
    pub row: Option<usize>,
    /// Action name (`data-action`).
    pub action: Option<String>,
    /// Current value of the target control.
    pub value: Option<String>,
}

impl EventTarget {
    /// Resolve `id` inside `root`. `None` if the element is not in the tree.
    pub fn resolve(root: &Element, id: &str) -> Option<Self> {
        let path = path_to(root, id)?;
        let target = path.last()?;
        let nearest = |key: &str| {
            path.iter()
                .rev()
                .find_map(|el| el.get_data(key).cloned())
        };

        Some(Self {
            id: id.to_string(),
            role: nearest(Role::KEY).and_then(|r| Role::parse(&r)),
            field: nearest("field"),
            row: nearest("index").and_then(|i| i.parse().ok()),
            action: nearest("action"),
            value: target.value.clone(),
        })
    }

    pub fn is(&self, role: Role) -> bool {
        self.role == Some(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_names() {
        for role in [Role::Header, Role::PerPage, Role::ResizeHandle, Role::MenuItem] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("bogus"), None);
    }

    #[test]
    fn test_resolve_uses_nearest_context() {
        let root = Element::div().id("root").child(
            Element::tr()
                .id("row")
                .data("index", "4")
                .child(
                    Element::td()
                        .id("cell")
                        .data("field", "name")
                        .child(Element::input("Ada").id("editor").data("role", "edit")),
                ),
        );

        let target = EventTarget::resolve(&root, "editor").unwrap();
        assert!(target.is(Role::Edit));
        assert_eq!(target.field.as_deref(), Some("name"));
        assert_eq!(target.row, Some(4));
        assert_eq!(target.value.as_deref(), Some("Ada"));

        assert!(EventTarget::resolve(&root, "missing").is_none());
    }

    #[test]
    fn test_inner_role_wins() {
        let root = Element::th()
            .id("th")
            .data("role", "header")
            .data("field", "id")
            .child(Element::text("").id("handle").data("role", "resize-handle"));

        let target = EventTarget::resolve(&root, "handle").unwrap();
        assert!(target.is(Role::ResizeHandle));
        assert_eq!(target.field.as_deref(), Some("id"));
    }
}
