use std::fmt;

use horizon_values_core::math;

use crate::error::{Error, Result};

/// How a grid row or column is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GridUnitType {
    /// Sized to content.
    #[default]
    Auto,
    /// Fixed size in device-independent pixels.
    Pixel,
    /// A weighted share of the remaining space.
    Star,
}

/// A grid row height or column width.
///
/// The magnitude of an `Auto` length is always `1.0` and carries no meaning.
#[derive(Debug, Clone, Copy)]
pub struct GridLength {
    value: f64,
    unit: GridUnitType,
}

impl GridLength {
    /// Sized to content.
    pub const AUTO: GridLength = GridLength {
        value: 1.0,
        unit: GridUnitType::Auto,
    };

    /// Create a length, rejecting negative and non-finite magnitudes.
    pub fn new(value: f64, unit: GridUnitType) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::argument(
                "value",
                format!("grid length must be a non-negative finite number, got {value}"),
            ));
        }
        Ok(match unit {
            GridUnitType::Auto => Self::AUTO,
            unit => GridLength { value, unit },
        })
    }

    /// A fixed length.
    pub fn pixel(value: f64) -> Result<Self> {
        Self::new(value, GridUnitType::Pixel)
    }

    /// A star share.
    pub fn star(value: f64) -> Result<Self> {
        Self::new(value, GridUnitType::Star)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> GridUnitType {
        self.unit
    }

    pub fn is_auto(&self) -> bool {
        self.unit == GridUnitType::Auto
    }

    pub fn is_star(&self) -> bool {
        self.unit == GridUnitType::Star
    }

    pub fn is_absolute(&self) -> bool {
        self.unit == GridUnitType::Pixel
    }
}

impl Default for GridLength {
    fn default() -> Self {
        Self::AUTO
    }
}

impl PartialEq for GridLength {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit && (self.is_auto() || self.value == other.value)
    }
}

impl fmt::Display for GridLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            GridUnitType::Auto => f.write_str("Auto"),
            GridUnitType::Star if math::is_one(self.value) => f.write_str("*"),
            GridUnitType::Star => write!(f, "{}*", self.value),
            GridUnitType::Pixel => write!(f, "{}", self.value),
        }
    }
}
