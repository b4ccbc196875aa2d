//! Key model for selection shortcuts.

use std::fmt;
use std::str::FromStr;

use crate::error::KeyParseError;

/// Modifier keys held during a key press or click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
    /// Command / Super key held
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Character key
    Char(char),
    /// Enter/Return
    Enter,
    /// Escape
    Escape,
    /// Backspace
    Backspace,
    /// Tab
    Tab,
    /// Space
    Space,
    /// Delete
    Delete,
}

/// A key combination (key + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// The key code
    pub key: Key,
    /// Modifier keys
    pub modifiers: Modifiers,
}

impl KeyCombo {
    /// Create a new key combo
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a key combo without modifiers
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Add ctrl modifier
    pub const fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    /// Add shift modifier
    pub const fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    /// Add meta (Cmd) modifier
    pub const fn meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    /// Parse a key string like `"ctrl+a"`, `"cmd+a"`, `"escape"` or `"del"`.
    pub fn parse(s: &str) -> Result<Self, KeyParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, modifier_parts) = match parts.split_last() {
            Some((key, mods)) => (*key, mods),
            None => return Err(KeyParseError::Empty),
        };

        let mut modifiers = Modifiers::NONE;
        for part in modifier_parts {
            match part.trim().to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" | "option" => modifiers.alt = true,
                "cmd" | "command" | "meta" | "super" => modifiers.meta = true,
                other => return Err(KeyParseError::UnknownModifier(other.to_string())),
            }
        }

        Ok(Self::new(parse_single_key(key_part.trim())?, modifiers))
    }
}

fn parse_single_key(s: &str) -> Result<Key, KeyParseError> {
    let key = match s.to_lowercase().as_str() {
        "enter" | "return" => Key::Enter,
        "escape" | "esc" => Key::Escape,
        "backspace" => Key::Backspace,
        "tab" => Key::Tab,
        "space" => Key::Space,
        "delete" | "del" => Key::Delete,
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                (None, _) => return Err(KeyParseError::Empty),
                _ => return Err(KeyParseError::UnknownKey(s.to_string())),
            }
        }
    };
    Ok(key)
}

impl FromStr for KeyCombo {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            write!(f, "ctrl+")?;
        }
        if self.modifiers.meta {
            write!(f, "cmd+")?;
        }
        if self.modifiers.alt {
            write!(f, "alt+")?;
        }
        if self.modifiers.shift {
            write!(f, "shift+")?;
        }
        match self.key {
            Key::Char(c) => write!(f, "{}", c),
            Key::Enter => write!(f, "enter"),
            Key::Escape => write!(f, "escape"),
            Key::Backspace => write!(f, "backspace"),
            Key::Tab => write!(f, "tab"),
            Key::Space => write!(f, "space"),
            Key::Delete => write!(f, "delete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(KeyCombo::parse("escape"), Ok(KeyCombo::key(Key::Escape)));
        assert_eq!(KeyCombo::parse("Esc"), Ok(KeyCombo::key(Key::Escape)));
        assert_eq!(KeyCombo::parse("del"), Ok(KeyCombo::key(Key::Delete)));
    }

    #[test]
    fn test_parse_modifiers() {
        assert_eq!(
            KeyCombo::parse("ctrl+a"),
            Ok(KeyCombo::key(Key::Char('a')).ctrl())
        );
        assert_eq!(
            KeyCombo::parse("cmd+a"),
            Ok(KeyCombo::key(Key::Char('a')).meta())
        );
        assert_eq!(
            KeyCombo::parse("ctrl+shift+A"),
            Ok(KeyCombo::key(Key::Char('A')).ctrl().shift())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(KeyCombo::parse("  "), Err(KeyParseError::Empty));
        assert_eq!(KeyCombo::parse("ctrl+"), Err(KeyParseError::Empty));
        assert_eq!(
            KeyCombo::parse("hyper+a"),
            Err(KeyParseError::UnknownModifier("hyper".into()))
        );
        assert_eq!(
            KeyCombo::parse("pagedown"),
            Err(KeyParseError::UnknownKey("pagedown".into()))
        );
    }

    #[test]
    fn test_display_parses_back() {
        let combo = KeyCombo::key(Key::Char('a')).ctrl();
        assert_eq!(combo.to_string(), "ctrl+a");
        assert_eq!(combo.to_string().parse::<KeyCombo>(), Ok(combo));
    }
}
