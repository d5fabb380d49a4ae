//! ARGB colors with optional names.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use horizon_values_core::ConvertibleEnum;

use super::known_color::KnownColor;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ColorKind {
    Empty,
    Unnamed,
    Known(KnownColor),
    Named(Arc<str>),
}

/// A 32-bit ARGB color.
///
/// Besides the channel values a color remembers how it was obtained: the
/// empty sentinel, a known color, a user-named color, or plain channels.
/// Equality compares both, so `Color::from_known(KnownColor::Red)` and
/// `Color::from_argb(0xFFFF0000)` are different values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    argb: u32,
    kind: ColorKind,
}

impl Color {
    /// The "no color" sentinel.
    pub const EMPTY: Color = Color {
        argb: 0,
        kind: ColorKind::Empty,
    };

    /// Unnamed color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Color {
        Color {
            argb,
            kind: ColorKind::Unnamed,
        }
    }

    /// Unnamed color from separate channels.
    pub const fn from_components(a: u8, r: u8, g: u8, b: u8) -> Color {
        Color::from_argb((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Opaque unnamed color.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Color {
        Color::from_components(0xFF, r, g, b)
    }

    /// A known color with its default ARGB value.
    pub const fn from_known(known: KnownColor) -> Color {
        Color {
            argb: known.argb(),
            kind: ColorKind::Known(known),
        }
    }

    /// A color carrying a user-chosen name.
    pub fn named(name: impl Into<Arc<str>>, argb: u32) -> Color {
        Color {
            argb,
            kind: ColorKind::Named(name.into()),
        }
    }

    /// Resolve `name` against the known colors, ignoring case.
    ///
    /// Unknown names produce a named color with ARGB `0`, which formats back
    /// to the same quoted name.
    pub fn from_name(name: &str) -> Color {
        match KnownColor::from_name(name) {
            Some(known) => Color::from_known(known),
            None => Color::named(name, 0),
        }
    }

    /// Packed `0xAARRGGBB` value.
    pub const fn argb(&self) -> u32 {
        self.argb
    }

    /// Alpha channel.
    pub const fn a(&self) -> u8 {
        (self.argb >> 24) as u8
    }

    /// Red channel.
    pub const fn r(&self) -> u8 {
        (self.argb >> 16) as u8
    }

    /// Green channel.
    pub const fn g(&self) -> u8 {
        (self.argb >> 8) as u8
    }

    /// Blue channel.
    pub const fn b(&self) -> u8 {
        self.argb as u8
    }

    /// Returns true for [`Color::EMPTY`].
    pub fn is_empty(&self) -> bool {
        matches!(self.kind, ColorKind::Empty)
    }

    /// Returns true if this color came from the known color table.
    pub fn is_known_color(&self) -> bool {
        matches!(self.kind, ColorKind::Known(_))
    }

    /// Returns true for known colors and user-named colors.
    pub fn is_named_color(&self) -> bool {
        matches!(self.kind, ColorKind::Known(_) | ColorKind::Named(_))
    }

    /// Returns true for theme-dependent known colors.
    pub fn is_system_color(&self) -> bool {
        matches!(self.kind, ColorKind::Known(known) if known.is_system_color())
    }

    /// The known color this value was created from.
    pub fn known_color(&self) -> Option<KnownColor> {
        match self.kind {
            ColorKind::Known(known) => Some(known),
            _ => None,
        }
    }

    /// The name of a user-named color.
    pub fn user_name(&self) -> Option<&str> {
        match &self.kind {
            ColorKind::Named(name) => Some(name),
            _ => None,
        }
    }

    /// The color's name: a known or user name, otherwise the ARGB in hex.
    pub fn name(&self) -> Cow<'_, str> {
        match &self.kind {
            ColorKind::Empty => Cow::Borrowed("0"),
            ColorKind::Known(known) => Cow::Borrowed(known.name()),
            ColorKind::Named(name) => Cow::Borrowed(name),
            ColorKind::Unnamed => Cow::Owned(format!("{:x}", self.argb)),
        }
    }

    /// Same ARGB value, without a name.
    pub fn to_unnamed(&self) -> Color {
        Color::from_argb(self.argb)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<KnownColor> for Color {
    fn from(known: KnownColor) -> Self {
        Color::from_known(known)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("Color [Empty]")
        } else if self.is_named_color() {
            write!(f, "Color [{}]", self.name())
        } else {
            write!(
                f,
                "Color [A={}, R={}, G={}, B={}]",
                self.a(),
                self.r(),
                self.g(),
                self.b()
            )
        }
    }
}
