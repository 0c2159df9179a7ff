// SPDX-License-Identifier: MPL-2.0
//! Keyboard shortcuts for the player.
//!
//! | Key        | Command                      | Suppress default |
//! |------------|------------------------------|------------------|
//! | Space      | toggle play/pause            | yes              |
//! | ArrowRight | seek forward one step        | no               |
//! | ArrowLeft  | seek backward one step       | no               |
//! | ArrowUp    | volume up one step           | yes              |
//! | ArrowDown  | volume down one step         | yes              |
//! | F          | toggle fullscreen            | no               |
//! | M          | toggle mute                  | no               |
//! | P          | toggle picture-in-picture    | no               |
//!
//! Shortcuts are ignored while a text input or a button has focus, so the
//! focused widget keeps its own handling of the key.

use iced_core::keyboard::key::Named;
use iced_core::keyboard::Key;

/// What held keyboard focus when the key went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusTarget {
    /// The player surface or nothing in particular.
    #[default]
    Player,
    /// A text field.
    TextInput,
    /// A button, which activates on Space by itself.
    Button,
}

impl FocusTarget {
    fn captures_keys(self) -> bool {
        matches!(self, Self::TextInput | Self::Button)
    }
}

/// Player action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    TogglePlayPause,
    SeekForward,
    SeekBackward,
    VolumeUp,
    VolumeDown,
    ToggleFullscreen,
    ToggleMute,
    TogglePip,
}

/// Result of mapping a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub command: KeyCommand,
    /// The host should cancel the key's default action (page scrolling).
    pub prevent_default: bool,
}

impl KeyBinding {
    fn new(command: KeyCommand) -> Self {
        Self {
            command,
            prevent_default: false,
        }
    }

    fn suppressing_default(command: KeyCommand) -> Self {
        Self {
            command,
            prevent_default: true,
        }
    }
}

/// Maps a key press to a player command.
///
/// Returns `None` for unbound keys and whenever `focus` owns the keyboard.
/// Letters match regardless of case. Auto-repeat needs no special handling:
/// every key-down maps again.
#[must_use]
pub fn map_key(key: &Key, focus: FocusTarget) -> Option<KeyBinding> {
    if focus.captures_keys() {
        return None;
    }

    match key.as_ref() {
        Key::Named(Named::Space) => Some(KeyBinding::suppressing_default(
            KeyCommand::TogglePlayPause,
        )),
        Key::Named(Named::ArrowRight) => Some(KeyBinding::new(KeyCommand::SeekForward)),
        Key::Named(Named::ArrowLeft) => Some(KeyBinding::new(KeyCommand::SeekBackward)),
        Key::Named(Named::ArrowUp) => Some(KeyBinding::suppressing_default(KeyCommand::VolumeUp)),
        Key::Named(Named::ArrowDown) => {
            Some(KeyBinding::suppressing_default(KeyCommand::VolumeDown))
        }
        Key::Character(c) if c.eq_ignore_ascii_case("f") => {
            Some(KeyBinding::new(KeyCommand::ToggleFullscreen))
        }
        Key::Character(c) if c.eq_ignore_ascii_case("m") => {
            Some(KeyBinding::new(KeyCommand::ToggleMute))
        }
        Key::Character(c) if c.eq_ignore_ascii_case("p") => {
            Some(KeyBinding::new(KeyCommand::TogglePip))
        }
        // Some hosts report the space bar as a character.
        Key::Character(" ") => Some(KeyBinding::suppressing_default(
            KeyCommand::TogglePlayPause,
        )),
        _ => None,
    }
}

/// Parses a key name as typed on a terminal (`space`, `left`, `f`, ...).
///
/// Used by the headless host to feed shortcuts from standard input.
#[must_use]
pub fn parse_key_name(name: &str) -> Option<Key> {
    let key = match name.trim().to_ascii_lowercase().as_str() {
        "space" => Key::Named(Named::Space),
        "right" | "arrowright" => Key::Named(Named::ArrowRight),
        "left" | "arrowleft" => Key::Named(Named::ArrowLeft),
        "up" | "arrowup" => Key::Named(Named::ArrowUp),
        "down" | "arrowdown" => Key::Named(Named::ArrowDown),
        other if other.chars().count() == 1 => Key::Character(other.into()),
        _ => return None,
    };
    Some(key)
}
