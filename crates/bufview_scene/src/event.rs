use serde::{Deserialize, Serialize};

/// A position in canvas pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Events delivered to the viewer by the windowing layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Canvas resized to `width` x `height` pixels.
    Resized { width: u32, height: u32 },
    /// Mouse button pressed.
    MousePressed {
        button: MouseButton,
        position: Point,
    },
    /// Mouse button released.
    MouseReleased {
        button: MouseButton,
        position: Point,
    },
    /// Mouse moved.
    MouseMoved { position: Point },
    /// Mouse wheel scrolled.
    MouseWheel { delta: f32, position: Point },
    /// Keyboard key pressed.
    KeyPressed {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Keyboard key released.
    KeyReleased {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Keyboard keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Char(char),
    Plus,
    Minus,
    Enter,
    Escape,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Whether this is one of the four arrow keys.
    pub fn is_arrow(self) -> bool {
        matches!(self, Key::Up | Key::Down | Key::Left | Key::Right)
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };
}
