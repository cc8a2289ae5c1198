//! Keyboard-state query surface.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::event::{Event, Key, Modifiers};

/// Modifier keys that can gate viewer shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    #[default]
    Control,
    Shift,
    Alt,
    Meta,
}

impl ModifierKey {
    /// Whether this modifier is held in `modifiers`.
    pub fn is_held(self, modifiers: Modifiers) -> bool {
        match self {
            ModifierKey::Control => modifiers.ctrl,
            ModifierKey::Shift => modifiers.shift,
            ModifierKey::Alt => modifiers.alt,
            ModifierKey::Meta => modifiers.meta,
        }
    }
}

/// Polls which keys are currently held down.
pub trait KeyboardState {
    fn is_key_pressed(&self, key: Key) -> bool;
    fn is_modifier_pressed(&self, modifier: ModifierKey) -> bool;
}

/// Tracks held keys from the stream of key events.
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    keys: HashSet<Key>,
    modifiers: Modifiers,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from an input event. Returns true if the event was a key event.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::KeyPressed { key, modifiers } => {
                self.keys.insert(*key);
                self.modifiers = *modifiers;
                true
            }
            Event::KeyReleased { key, modifiers } => {
                self.keys.remove(key);
                self.modifiers = *modifiers;
                true
            }
            _ => false,
        }
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.modifiers = Modifiers::NONE;
    }
}

impl KeyboardState for PressedKeys {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    fn is_modifier_pressed(&self, modifier: ModifierKey) -> bool {
        modifier.is_held(self.modifiers)
    }
}
