use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use horizon_values_core::convert_debug;

use crate::error::{Error, Result};

/// A set of modifier keys held together with another key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierKeys(u8);

impl ModifierKeys {
    pub const NONE: ModifierKeys = ModifierKeys(0);
    pub const ALT: ModifierKeys = ModifierKeys(1);
    pub const CONTROL: ModifierKeys = ModifierKeys(2);
    pub const SHIFT: ModifierKeys = ModifierKeys(4);
    pub const WINDOWS: ModifierKeys = ModifierKeys(8);

    const ALL: u8 = 0b1111;

    /// Flags from raw bits, `None` if any unknown bit is set.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL == 0 {
            Some(ModifierKeys(bits))
        } else {
            None
        }
    }

    /// Flags from raw bits, keeping unknown bits.
    pub const fn from_bits_retain(bits: u8) -> Self {
        ModifierKeys(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: ModifierKeys) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if only Alt, Control, Shift and Windows bits are set.
    pub const fn is_defined(self) -> bool {
        self.0 & !Self::ALL == 0
    }
}

impl BitOr for ModifierKeys {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        ModifierKeys(self.0 | rhs.0)
    }
}

impl BitOrAssign for ModifierKeys {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ModifierKeys {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        ModifierKeys(self.0 & rhs.0)
    }
}

impl FromStr for ModifierKeys {
    type Err = Error;

    /// Parse `+`-separated modifier names, e.g. `"Ctrl+Shift"`.
    fn from_str(text: &str) -> Result<Self> {
        let mut modifiers = ModifierKeys::NONE;
        for token in text.split('+') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let upper = token.to_uppercase();
            modifiers |= match upper.as_str() {
                "CONTROL" | "CTRL" => ModifierKeys::CONTROL,
                "SHIFT" => ModifierKeys::SHIFT,
                "ALT" => ModifierKeys::ALT,
                "WINDOWS" | "WIN" => ModifierKeys::WINDOWS,
                _ => {
                    convert_debug!(token = %upper, "unknown modifier token");
                    return Err(Error::not_supported(format!(
                        "'{upper}' is not a recognized modifier key"
                    )));
                }
            };
        }
        Ok(modifiers)
    }
}

impl fmt::Display for ModifierKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const ORDER: [(ModifierKeys, &str); 4] = [
            (ModifierKeys::CONTROL, "Ctrl"),
            (ModifierKeys::ALT, "Alt"),
            (ModifierKeys::WINDOWS, "Windows"),
            (ModifierKeys::SHIFT, "Shift"),
        ];
        let mut first = true;
        for (flag, name) in ORDER {
            if self.contains(flag) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            "ctrl + Shift".parse::<ModifierKeys>().unwrap(),
            ModifierKeys::CONTROL | ModifierKeys::SHIFT
        );
        assert_eq!("Win".parse::<ModifierKeys>().unwrap(), ModifierKeys::WINDOWS);
        assert_eq!("".parse::<ModifierKeys>().unwrap(), ModifierKeys::NONE);
        let err = "Ctrl+xyz".parse::<ModifierKeys>().unwrap_err();
        assert!(err.is_not_supported());
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn test_display_order() {
        let all = ModifierKeys::SHIFT | ModifierKeys::WINDOWS | ModifierKeys::ALT | ModifierKeys::CONTROL;
        assert_eq!(all.to_string(), "Ctrl+Alt+Windows+Shift");
        assert_eq!(ModifierKeys::NONE.to_string(), "");
    }

    #[test]
    fn test_defined() {
        assert!(ModifierKeys::from_bits(0b1111).is_some());
        assert!(ModifierKeys::from_bits(0b1_0000).is_none());
        assert!(!ModifierKeys::from_bits_retain(0x20).is_defined());
    }
}
