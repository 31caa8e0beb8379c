use griddom::{Event, EventKind, Key, Modifiers, MouseButton};

#[test]
fn test_event_kind_matches_variant() {
    assert_eq!(Event::click("btn").kind(), EventKind::Click);
    assert_eq!(Event::key("input", Key::Enter).kind(), EventKind::KeyDown);
    assert_eq!(Event::DragEnd.kind(), EventKind::DragEnd);
    assert_eq!(Event::Resize { width: 800 }.kind(), EventKind::Resize);
}

#[test]
fn test_event_target() {
    assert_eq!(Event::click("btn").target(), Some("btn"));
    assert_eq!(
        Event::Change {
            target: "sel".into(),
            value: "25".into()
        }
        .target(),
        Some("sel")
    );
    assert_eq!(Event::PointerMove { x: 10 }.target(), None);
}

#[test]
fn test_click_helper_defaults() {
    match Event::click("x") {
        Event::Click {
            button, modifiers, ..
        } => {
            assert_eq!(button, MouseButton::Left);
            assert!(modifiers.none());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_modifiers() {
    assert!(Modifiers::shift().shift);
    assert!(!Modifiers::shift().none());
    assert!(Modifiers::ctrl().ctrl);
}
