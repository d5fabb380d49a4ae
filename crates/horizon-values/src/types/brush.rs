use std::fmt;

use super::color::Color;

/// How an area is painted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Brush {
    /// Nothing is painted.
    #[default]
    Null,
    /// A single color.
    Solid(Color),
}

impl Brush {
    /// A solid brush.
    pub fn solid(color: impl Into<Color>) -> Self {
        Brush::Solid(color.into())
    }

    /// The color of a solid brush.
    pub fn color(&self) -> Option<&Color> {
        match self {
            Brush::Null => None,
            Brush::Solid(color) => Some(color),
        }
    }

    /// Returns true for [`Brush::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Brush::Null)
    }
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl fmt::Display for Brush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Brush::Null => f.write_str("Brush [Null]"),
            Brush::Solid(color) => write!(f, "SolidBrush [{color}]"),
        }
    }
}
