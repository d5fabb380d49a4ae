use std::fmt;
use std::str::FromStr;

use horizon_values_core::ConvertibleEnum;

use super::key::Key;
use super::modifier_keys::ModifierKeys;
use crate::error::{Error, Result};

/// A key combination such as `Ctrl+Shift+S`, with an optional display text.
///
/// The textual form is `modifiers+key[,display]`: the display string starts
/// after the first comma, and the key follows the last `+` before it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyGesture {
    key: Key,
    modifiers: ModifierKeys,
    display: Option<String>,
}

impl KeyGesture {
    /// Create a gesture, checking that the key is usable in a gesture and the
    /// modifiers are defined.
    pub fn new(key: Key, modifiers: ModifierKeys) -> Result<Self> {
        if !key.is_gesture_key() {
            return Err(Error::argument(
                "key",
                format!("{} cannot be used in a key gesture", key.name()),
            ));
        }
        if !modifiers.is_defined() {
            return Err(Error::argument(
                "modifiers",
                format!("0x{:x} is not a valid modifier combination", modifiers.bits()),
            ));
        }
        Ok(Self {
            key,
            modifiers,
            display: None,
        })
    }

    /// Attach a display string. Empty strings clear it.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        let display = display.into();
        self.display = (!display.is_empty()).then_some(display);
        self
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn modifiers(&self) -> ModifierKeys {
        self.modifiers
    }

    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }
}

impl FromStr for KeyGesture {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        let (gesture, display) = match text.split_once(',') {
            Some((gesture, display)) => (gesture.trim(), display.trim()),
            None => (text, ""),
        };
        let (modifiers, key) = match gesture.rfind('+') {
            Some(index) => (&gesture[..index], &gesture[index + 1..]),
            None => ("", gesture),
        };
        let modifiers: ModifierKeys = modifiers.parse()?;
        let key: Key = key.parse()?;
        Ok(KeyGesture::new(key, modifiers)?.with_display(display))
    }
}

impl fmt::Display for KeyGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key == Key::None {
            return Ok(());
        }
        if !self.modifiers.is_empty() {
            write!(f, "{}+", self.modifiers)?;
        }
        write!(f, "{}", self.key)?;
        if let Some(display) = &self.display {
            write!(f, ",{display}")?;
        }
        Ok(())
    }
}
