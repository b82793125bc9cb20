// SPDX-License-Identifier: MPL-2.0
//! Keyboard shortcuts for the lightbox.

/// A key press, named the way DOM `KeyboardEvent.key` names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Character(char),
    Other(String),
}

impl Key {
    /// Parses a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Other(name.to_string()),
                }
            }
        }
    }
}

/// What a shortcut asks the lightbox to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Close,
    Previous,
    Next,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    Rotate,
    ToggleFullscreen,
}

/// Maps a key to its lightbox command. Unbound keys return `None`.
#[must_use]
pub fn command_for(key: &Key) -> Option<Command> {
    match key {
        Key::Escape => Some(Command::Close),
        Key::ArrowLeft => Some(Command::Previous),
        Key::ArrowRight => Some(Command::Next),
        Key::Character('+' | '=') => Some(Command::ZoomIn),
        Key::Character('-') => Some(Command::ZoomOut),
        Key::Character('0') => Some(Command::ResetZoom),
        Key::Character('r' | 'R') => Some(Command::Rotate),
        Key::Character('f') => Some(Command::ToggleFullscreen),
        Key::Character(_) | Key::Other(_) => None,
    }
}
