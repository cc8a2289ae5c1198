//! Customizable keybindings for the buffer view.
//!
//! Every camera shortcut is gated by a single modifier; arrow-key panning
//! is fixed, the zoom and recenter keys can be rebound.

use bufview_scene::{Key, ModifierKey};
use serde::{Deserialize, Serialize};

/// Keybinding configuration for the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Modifier that must be held for any camera shortcut
    #[serde(default)]
    pub modifier: ModifierKey,
    /// Zoom in one step, anchored at the viewport center
    #[serde(default = "default_zoom_in")]
    pub zoom_in: Key,
    /// Zoom out one step, anchored at the viewport center
    #[serde(default = "default_zoom_out")]
    pub zoom_out: Key,
    /// Reset pan and fit the buffer to the viewport
    #[serde(default = "default_recenter")]
    pub recenter: Key,
}

fn default_zoom_in() -> Key {
    Key::Plus
}

fn default_zoom_out() -> Key {
    Key::Minus
}

fn default_recenter() -> Key {
    Key::Home
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            modifier: ModifierKey::Control,
            zoom_in: default_zoom_in(),
            zoom_out: default_zoom_out(),
            recenter: default_recenter(),
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is already used by a binding.
    /// Returns a description of what it's used for, if anything.
    pub fn key_conflict(&self, key: Key) -> Option<&'static str> {
        if key.is_arrow() {
            Some("Pan")
        } else if key == self.zoom_in {
            Some("Zoom in")
        } else if key == self.zoom_out {
            Some("Zoom out")
        } else if key == self.recenter {
            Some("Recenter")
        } else {
            None
        }
    }
}

impl KeyBindings {
    /// Restore the default for any rebindable key that is already taken by
    /// arrow panning or an earlier binding.
    pub fn resolve_conflicts(&mut self) {
        let defaults = Self::default();
        self.zoom_in = self.checked(self.zoom_in, "Zoom in", defaults.zoom_in);
        self.zoom_out = self.checked(self.zoom_out, "Zoom out", defaults.zoom_out);
        self.recenter = self.checked(self.recenter, "Recenter", defaults.recenter);
    }

    fn checked(&self, key: Key, action: &'static str, fallback: Key) -> Key {
        match self.key_conflict(key) {
            Some(taken) if taken != action => {
                log::warn!(
                    "{} key {} is already bound to {}, using {}",
                    action,
                    key_to_string(key),
                    taken,
                    key_to_string(fallback)
                );
                fallback
            }
            _ => key,
        }
    }
}

/// Convert a Key to a display string.
pub fn key_to_string(key: Key) -> String {
    match key {
        Key::Char(c) => c.to_uppercase().to_string(),
        Key::Plus => "+".to_string(),
        Key::Minus => "-".to_string(),
        Key::Enter => "Enter".to_string(),
        Key::Escape => "Esc".to_string(),
        Key::Space => "Space".to_string(),
        Key::Up => "Up".to_string(),
        Key::Down => "Down".to_string(),
        Key::Left => "Left".to_string(),
        Key::Right => "Right".to_string(),
        Key::Home => "Home".to_string(),
        Key::End => "End".to_string(),
        Key::PageUp => "PgUp".to_string(),
        Key::PageDown => "PgDn".to_string(),
    }
}
