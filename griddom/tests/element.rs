use griddom::{
    find_by_class, find_by_class_mut, find_element, find_element_mut, find_first_by_class,
    path_to, walk, Content, Element, Tag,
};

fn sample_tree() -> Element {
    Element::table().id("table").child(
        Element::new(Tag::Tbody).id("body").children([
            Element::tr()
                .id("row-1")
                .class("row")
                .child(Element::td().id("cell-1").with_text("Alice")),
            Element::tr()
                .id("row-2")
                .class("row")
                .child(Element::td().id("cell-2").child(Element::checkbox(true).id("check"))),
        ]),
    )
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_find_element_by_id() {
    let root = sample_tree();

    assert_eq!(find_element(&root, "cell-1").map(|e| e.tag), Some(Tag::Td));
    assert!(find_element(&root, "missing").is_none());
}

#[test]
fn test_find_element_mut_updates_in_place() {
    let mut root = sample_tree();

    find_element_mut(&mut root, "cell-1")
        .expect("cell exists")
        .set_text("Bob");

    assert_eq!(find_element(&root, "cell-1").unwrap().text_content(), "Bob");
}

#[test]
fn test_find_by_class_document_order() {
    let root = sample_tree();

    let ids: Vec<&str> = find_by_class(&root, "row")
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(ids, vec!["row-1", "row-2"]);
    assert_eq!(find_first_by_class(&root, "row").unwrap().id, "row-1");
}

#[test]
fn test_find_by_class_mut_hides_rows() {
    let mut root = sample_tree();

    for row in find_by_class_mut(&mut root, "row") {
        row.hidden = true;
    }

    assert!(find_by_class(&root, "row").iter().all(|r| r.hidden));
}

#[test]
fn test_path_to_includes_ancestors() {
    let root = sample_tree();

    let path: Vec<&str> = path_to(&root, "check")
        .expect("path exists")
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(path, vec!["table", "body", "row-2", "cell-2", "check"]);
}

#[test]
fn test_walk_visits_every_element() {
    let root = sample_tree();
    let mut count = 0;
    walk(&root, &mut |_| count += 1);
    assert_eq!(count, 7);
}

// ============================================================================
// Builders and mutation
// ============================================================================

#[test]
fn test_classes_are_deduplicated() {
    let mut el = Element::div().class("a").class("a").class("b");
    assert_eq!(el.classes, vec!["a", "b"]);

    el.toggle_class("a", false);
    el.toggle_class("c", true);
    assert_eq!(el.classes, vec!["b", "c"]);
}

#[test]
fn test_text_content_concatenates_descendants() {
    let el = Element::div()
        .child(Element::text("1 - 10"))
        .child(Element::text(" of 25"));
    assert_eq!(el.text_content(), "1 - 10 of 25");
}

#[test]
fn test_select_builder_sets_value_and_options() {
    let el = Element::select([("10", "10"), ("25", "25")], "25");

    assert_eq!(el.value.as_deref(), Some("25"));
    assert_eq!(el.child_elements().len(), 2);
    assert_eq!(el.child_elements()[1].get_attr("value"), Some("25"));
}

#[test]
fn test_child_elements_mut_replaces_text() {
    let mut el = Element::td().with_text("old");
    el.child_elements_mut().push(Element::input("new"));

    assert!(matches!(el.content, Content::Children(ref c) if c.len() == 1));
}

#[test]
fn test_generated_ids_are_unique() {
    let a = Element::tr();
    let b = Element::tr();
    assert_ne!(a.id, b.id);
    assert!(a.id.starts_with("tr-"));
}
