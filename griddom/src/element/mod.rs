mod content;
mod node;

pub use content::Content;
pub use node::{Element, Tag};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Collect every element carrying `class`, in document order.
pub fn find_by_class<'a>(root: &'a Element, class: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    walk(root, &mut |el| {
        if el.has_class(class) {
            found.push(el);
        }
    });
    found
}

/// Mutable variant of [`find_by_class`].
pub fn find_by_class_mut<'a>(root: &'a mut Element, class: &str) -> Vec<&'a mut Element> {
    fn collect<'a>(el: &'a mut Element, class: &str, out: &mut Vec<&'a mut Element>) {
        let matches = el.has_class(class);
        if matches {
            // Matches are not descended into.
            out.push(el);
            return;
        }
        if let Content::Children(children) = &mut el.content {
            for child in children {
                collect(child, class, out);
            }
        }
    }

    let mut found = Vec::new();
    collect(root, class, &mut found);
    found
}

/// First element carrying `class`, in document order.
pub fn find_first_by_class<'a>(root: &'a Element, class: &str) -> Option<&'a Element> {
    if root.has_class(class) {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_first_by_class(child, class) {
                return Some(found);
            }
        }
    }

    None
}

/// First element carrying `class`, mutably.
pub fn find_first_by_class_mut<'a>(root: &'a mut Element, class: &str) -> Option<&'a mut Element> {
    if root.has_class(class) {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_first_by_class_mut(child, class) {
                return Some(found);
            }
        }
    }

    None
}

/// Visit every element depth-first, parents before children.
pub fn walk<'a>(root: &'a Element, f: &mut impl FnMut(&'a Element)) {
    f(root);
    if let Content::Children(children) = &root.content {
        for child in children {
            walk(child, f);
        }
    }
}

/// Path from `root` down to the element with `id`, both ends included.
///
/// Event targets are usually leaf elements (a checkbox inside a cell); the
/// path lets handlers look upward for the row or header cell they belong to.
pub fn path_to<'a>(root: &'a Element, id: &str) -> Option<Vec<&'a Element>> {
    if root.id == id {
        return Some(vec![root]);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(mut path) = path_to(child, id) {
                path.insert(0, root);
                return Some(path);
            }
        }
    }

    None
}
