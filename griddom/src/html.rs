//! HTML serialization of an element tree.

use crate::element::{Content, Element, Tag};

/// Serialize `root` and its descendants as HTML.
pub fn to_html(root: &Element) -> String {
    let mut out = String::new();
    write_element(root, None, &mut out);
    out
}

fn write_element(el: &Element, select_value: Option<&str>, out: &mut String) {
    out.push('<');
    out.push_str(el.tag.as_str());
    push_attr(out, "id", &el.id);

    if !el.classes.is_empty() {
        push_attr(out, "class", &el.classes.join(" "));
    }
    for (name, value) in &el.attributes {
        push_attr(out, name, value);
    }
    for (key, value) in &el.data {
        push_attr(out, &format!("data-{key}"), value);
    }
    if let Some(width) = el.width {
        push_attr(out, "style", &format!("width: {width}px"));
    }
    if el.tag == Tag::Input {
        if let Some(value) = &el.value {
            push_attr(out, "value", value);
        }
    }
    if el.tag == Tag::Option && select_value.is_some() && el.get_attr("value") == select_value {
        out.push_str(" selected");
    }
    if el.checked {
        out.push_str(" checked");
    }
    if el.disabled {
        out.push_str(" disabled");
    }
    if el.hidden {
        out.push_str(" hidden");
    }
    out.push('>');

    if el.tag.is_void() {
        return;
    }

    let inner_select = if el.tag == Tag::Select {
        el.value.as_deref()
    } else {
        None
    };

    match &el.content {
        Content::None => {}
        Content::Text(text) => out.push_str(&escape(text)),
        Content::Children(children) => {
            for child in children {
                write_element(child, inner_select, out);
            }
        }
    }

    out.push_str("</");
    out.push_str(el.tag.as_str());
    out.push('>');
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

/// Escape text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
