//! Keyboard shortcuts.
//!
//! Shortcuts are single chords (`Ctrl+Shift+S`), never sequences. Plain
//! typing, navigation, copy and paste stay with the text widget; only the
//! chords below are turned into [`Command`]s.

use std::collections::HashMap;
use std::fmt;

use crate::command::Command;

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
    };

    pub const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: true,
    };

    /// Returns true if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.alt {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A key plus the modifiers held with it.
///
/// Letter keys are stored lowercase; Shift is carried in `modifiers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: char,
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: char, modifiers: Modifiers) -> Self {
        Self {
            key: key.to_ascii_lowercase(),
            modifiers,
        }
    }

    /// Parses a chord like `"ctrl+shift+s"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut modifiers = Modifiers::NONE;
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                other => {
                    let mut chars = other.chars();
                    let (Some(c), None) = (chars.next(), chars.next()) else {
                        return None;
                    };
                    if key.replace(c).is_some() {
                        return None;
                    }
                }
            }
        }

        key.map(|key| Self::new(key, modifiers))
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.key.to_ascii_uppercase();
        if self.modifiers.is_empty() {
            write!(f, "{}", key)
        } else {
            write!(f, "{}+{}", self.modifiers, key)
        }
    }
}

/// Chord to command lookup.
pub struct Keymap {
    /// Bindings in definition order; the first one per command is its label.
    bindings: Vec<(KeyChord, Command)>,
    by_chord: HashMap<KeyChord, Command>,
}

impl Keymap {
    /// Creates a keymap with the default bindings.
    pub fn new() -> Self {
        use Command::*;

        let mut keymap = Self {
            bindings: Vec::new(),
            by_chord: HashMap::new(),
        };

        let ctrl = Modifiers::CTRL;
        let ctrl_shift = Modifiers::CTRL_SHIFT;
        for (key, modifiers, command) in [
            ('n', ctrl, New),
            ('o', ctrl, Open),
            ('s', ctrl, Save),
            ('s', ctrl_shift, SaveAs),
            ('p', ctrl, Print),
            ('q', ctrl, Exit),
            ('z', ctrl, Undo),
            ('y', ctrl, Redo),
            ('z', ctrl_shift, Redo),
            ('u', ctrl, Underline),
        ] {
            keymap.bind(KeyChord::new(key, modifiers), command);
        }

        keymap
    }

    /// Binds `chord` to `command`, replacing any previous binding of it.
    pub fn bind(&mut self, chord: KeyChord, command: Command) {
        self.bindings.retain(|(existing, _)| *existing != chord);
        self.bindings.push((chord, command));
        self.by_chord.insert(chord, command);
    }

    /// The command bound to `chord`, if any.
    pub fn resolve(&self, chord: &KeyChord) -> Option<Command> {
        self.by_chord.get(chord).copied()
    }

    /// The label of the first chord bound to `command`, e.g. `Ctrl+S`.
    pub fn shortcut_label(&self, command: Command) -> Option<String> {
        self.bindings
            .iter()
            .find(|(_, bound)| *bound == command)
            .map(|(chord, _)| chord.to_string())
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}
