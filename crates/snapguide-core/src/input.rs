//! Pointer events and modifier tracking.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Modifier key that disables snapping while held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideModifier {
    #[default]
    Shift,
    Ctrl,
    Alt,
    Meta,
}

impl OverrideModifier {
    /// Check whether this modifier is held in `modifiers`.
    pub fn is_held(self, modifiers: Modifiers) -> bool {
        match self {
            OverrideModifier::Shift => modifiers.shift,
            OverrideModifier::Ctrl => modifiers.ctrl,
            OverrideModifier::Alt => modifiers.alt,
            OverrideModifier::Meta => modifiers.meta,
        }
    }

    /// Key name reported by hosts that deliver modifiers as key events.
    pub fn key_name(self) -> &'static str {
        match self {
            OverrideModifier::Shift => "Shift",
            OverrideModifier::Ctrl => "Control",
            OverrideModifier::Alt => "Alt",
            OverrideModifier::Meta => "Meta",
        }
    }
}

/// Pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Tracks modifier state between events so a pointer-move can sample it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Current modifier keys state.
    pub modifiers: Modifiers,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a key event. Only modifier keys are tracked.
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        let (key, pressed) = match event {
            KeyEvent::Pressed(key) => (key.as_str(), true),
            KeyEvent::Released(key) => (key.as_str(), false),
        };
        match key {
            "Shift" => self.modifiers.shift = pressed,
            "Control" => self.modifiers.ctrl = pressed,
            "Alt" => self.modifiers.alt = pressed,
            "Meta" => self.modifiers.meta = pressed,
            _ => {}
        }
    }

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Whether snapping is currently disabled by the held override modifier.
    pub fn snap_override(&self, modifier: OverrideModifier) -> bool {
        modifier.is_held(self.modifiers)
    }
}
