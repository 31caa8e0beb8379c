use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Element tag. The grid renders a fixed skeleton so the set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tag {
    #[default]
    Div,
    Span,
    Table,
    Thead,
    Tbody,
    Tfoot,
    Tr,
    Th,
    Td,
    Input,
    Select,
    Option,
    Button,
    Ul,
    Li,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Table => "table",
            Tag::Thead => "thead",
            Tag::Tbody => "tbody",
            Tag::Tfoot => "tfoot",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
            Tag::Input => "input",
            Tag::Select => "select",
            Tag::Option => "option",
            Tag::Button => "button",
            Tag::Ul => "ul",
            Tag::Li => "li",
        }
    }

    /// Void elements never carry children.
    pub fn is_void(&self) -> bool {
        matches!(self, Tag::Input)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: Tag,

    // Content
    pub content: Content,

    // Presentation hooks
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    /// Fixed width in pixels, projected as an inline style.
    pub width: Option<u32>,

    // State
    pub hidden: bool,
    pub disabled: bool,
    /// Checkbox state for `input[type=checkbox]`.
    pub checked: bool,
    /// Current value of form controls (input, select).
    pub value: Option<String>,

    // Custom data storage (`data-*` attributes)
    pub data: BTreeMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: Tag::Div,
            content: Content::None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            width: None,
            hidden: false,
            disabled: false,
            checked: false,
            value: None,
            data: BTreeMap::new(),
        }
    }
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            id: generate_id(tag.as_str()),
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    pub fn table() -> Self {
        Self::new(Tag::Table)
    }

    pub fn tr() -> Self {
        Self::new(Tag::Tr)
    }

    pub fn th() -> Self {
        Self::new(Tag::Th)
    }

    pub fn td() -> Self {
        Self::new(Tag::Td)
    }

    /// A `span` holding text.
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(Tag::Span).with_text(content)
    }

    /// Create a text input element.
    pub fn input(value: impl Into<String>) -> Self {
        let mut el = Self::new(Tag::Input).attr("type", "text");
        el.value = Some(value.into());
        el
    }

    pub fn checkbox(checked: bool) -> Self {
        let mut el = Self::new(Tag::Input).attr("type", "checkbox");
        el.checked = checked;
        el
    }

    /// Create a select element from `(value, label)` pairs.
    pub fn select<I, V, L>(options: I, selected: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        let mut el = Self::new(Tag::Select).children(
            options
                .into_iter()
                .map(|(value, label)| Element::new(Tag::Option).attr("value", value).with_text(label)),
        );
        el.value = Some(selected.into());
        el
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self::new(Tag::Button).attr("type", "button").with_text(label)
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Classes
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    pub fn classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for class in classes {
            self.add_class(class);
        }
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() && !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Add or remove `class` depending on `on`.
    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    // Attributes
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    // State
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn width(mut self, width: Option<u32>) -> Self {
        self.width = width;
        self
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), value.into());
    }

    // Text
    pub fn with_text(mut self, content: impl Into<String>) -> Self {
        self.content = Content::Text(content.into());
        self
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        self.content = Content::Text(content.into());
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        match &self.content {
            Content::None => String::new(),
            Content::Text(s) => s.clone(),
            Content::Children(children) => children.iter().map(Element::text_content).collect(),
        }
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
    }

    /// Replace every child of this element.
    pub fn replace_children(&mut self, children: Vec<Element>) {
        self.content = Content::Children(children);
    }

    pub fn child_elements(&self) -> &[Element] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    /// Mutable children; converts non-child content into an empty child list.
    pub fn child_elements_mut(&mut self) -> &mut Vec<Element> {
        if !matches!(self.content, Content::Children(_)) {
            self.content = Content::Children(Vec::new());
        }
        match &mut self.content {
            Content::Children(children) => children,
            _ => unreachable!("content was just set to children"),
        }
    }
}
