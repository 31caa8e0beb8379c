pub mod element;
pub mod event;
pub mod html;

pub use element::{
    find_by_class, find_by_class_mut, find_element, find_element_mut, find_first_by_class,
    find_first_by_class_mut, path_to, walk, Content, Element, Tag,
};
pub use event::{Event, EventKind, Key, Modifiers, MouseButton};
pub use html::to_html;
