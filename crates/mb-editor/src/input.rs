//! Input abstraction layer.
//!
//! Normalizes DOM pointer, keyboard and text events into a single
//! `InputEvent` enum consumed by the controller. Coordinates are
//! screen-space pixels relative to the canvas element.

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on Linux/Windows, ⌘ on macOS.
    pub const CMD: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
        alt: false,
        meta: false,
    };

    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// Released anywhere, including outside the canvas.
    PointerUp,
    DoubleClick { x: f32, y: f32 },
    Key { key: String, modifiers: Modifiers },
    /// Full content of the active text editor after a keystroke.
    TextInput(String),
    /// The text editor lost focus.
    Blur,
}

impl InputEvent {
    pub fn key(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.into(),
            modifiers,
        }
    }

    /// Extract position if this is a positioned pointer event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } | Self::DoubleClick { x, y } => {
                Some((*x, *y))
            }
            _ => None,
        }
    }
}
