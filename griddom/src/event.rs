/// DOM-level input events, each targeted at an element id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Mouse click on an element
    Click {
        target: String,
        button: MouseButton,
        modifiers: Modifiers,
    },
    /// Context menu request (right click / long press)
    ContextMenu { target: String },
    /// Text typed into an input; fires on every keystroke
    Input { target: String, value: String },
    /// Committed value change of an input or select
    Change { target: String, value: String },
    /// Key press, targeted at the focused element
    KeyDown {
        target: String,
        key: Key,
        modifiers: Modifiers,
    },
    /// Pointer pressed (resize handles)
    PointerDown { target: String, x: i32 },
    /// Pointer moved while captured
    PointerMove { x: i32 },
    /// Pointer released
    PointerUp { x: i32 },
    /// Drag of a draggable element started
    DragStart { target: String },
    /// Dragged element dropped onto `target`
    Drop { target: String },
    /// Drag finished (dropped or cancelled)
    DragEnd,
    /// Container resized (resize observer)
    Resize { width: u32 },
}

/// Discriminant of [`Event`], used to key handler tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Click,
    ContextMenu,
    Input,
    Change,
    KeyDown,
    PointerDown,
    PointerMove,
    PointerUp,
    DragStart,
    Drop,
    DragEnd,
    Resize,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Click { .. } => EventKind::Click,
            Event::ContextMenu { .. } => EventKind::ContextMenu,
            Event::Input { .. } => EventKind::Input,
            Event::Change { .. } => EventKind::Change,
            Event::KeyDown { .. } => EventKind::KeyDown,
            Event::PointerDown { .. } => EventKind::PointerDown,
            Event::PointerMove { .. } => EventKind::PointerMove,
            Event::PointerUp { .. } => EventKind::PointerUp,
            Event::DragStart { .. } => EventKind::DragStart,
            Event::Drop { .. } => EventKind::Drop,
            Event::DragEnd => EventKind::DragEnd,
            Event::Resize { .. } => EventKind::Resize,
        }
    }

    /// Target element id, if the event is targeted.
    pub fn target(&self) -> Option<&str> {
        match self {
            Event::Click { target, .. }
            | Event::ContextMenu { target }
            | Event::Input { target, .. }
            | Event::Change { target, .. }
            | Event::KeyDown { target, .. }
            | Event::PointerDown { target, .. }
            | Event::DragStart { target }
            | Event::Drop { target } => Some(target),
            Event::PointerMove { .. }
            | Event::PointerUp { .. }
            | Event::DragEnd
            | Event::Resize { .. } => None,
        }
    }

    /// Left click without modifiers.
    pub fn click(target: impl Into<String>) -> Self {
        Event::Click {
            target: target.into(),
            button: MouseButton::Left,
            modifiers: Modifiers::new(),
        }
    }

    pub fn key(target: impl Into<String>, key: Key) -> Self {
        Event::KeyDown {
            target: target.into(),
            key,
            modifiers: Modifiers::new(),
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}
