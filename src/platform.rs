//! Form shortcuts and how they read on the current platform

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;

/// Submit modifier: Cmd on macOS, Ctrl elsewhere
#[cfg(target_os = "macos")]
const SUBMIT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
const SUBMIT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// A modifier + letter chord bound to a form command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub modifier: KeyModifiers,
    pub key: char,
}

impl Shortcut {
    /// Save a draft; Ctrl on every platform
    pub const SAVE: Shortcut = Shortcut {
        modifier: KeyModifiers::CONTROL,
        key: 's',
    };

    pub const SUBMIT: Shortcut = Shortcut {
        modifier: SUBMIT_MODIFIER,
        key: 'd',
    };

    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.code == KeyCode::Char(self.key) && event.modifiers.contains(self.modifier)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifier = if self.modifier == KeyModifiers::SUPER {
            "Cmd"
        } else {
            "Ctrl"
        };
        write!(f, "{modifier}+{}", self.key.to_ascii_uppercase())
    }
}
