//! Converter implementations.
//!
//! Primitive converters are found directly by the registry. Domain converters
//! register themselves through [`register_builtin`], which every new registry
//! runs once.

mod brush;
pub(crate) mod color;
mod command;
mod date_time;
mod enumeration;
mod grid_length;
mod keyboard;
mod length;
mod nullable;
pub(crate) mod primitive;

pub use brush::BrushConverter;
pub use color::ColorConverter;
pub use command::CommandConverter;
pub use date_time::DateTimeConverter;
pub use enumeration::EnumConverter;
pub use grid_length::GridLengthConverter;
pub use keyboard::{KeyConverter, KeyGestureConverter, ModifierKeysConverter};
pub use length::LengthConverter;
pub use nullable::NullableConverter;
pub use primitive::{
    BoolConverter, CharConverter, CultureConverter, FloatConverter, GuidConverter,
    IntegerConverter, StringConverter, TimeSpanConverter, TypeNameConverter, UriConverter,
};

use crate::error::{Error, Result};
use crate::registry::ConverterRegistry;
use crate::value::{Value, ValueType};

/// Register every domain converter with `registry`.
pub(crate) fn register_builtin(registry: &ConverterRegistry) {
    color::register(registry);
    brush::register(registry);
    length::register(registry);
    grid_length::register(registry);
    keyboard::register(registry);
    command::register(registry);
}

/// Fails unless `destination` is a string.
pub(crate) fn expect_string_destination(converter: &str, destination: &ValueType) -> Result<()> {
    if *destination == ValueType::String {
        Ok(())
    } else {
        Err(Error::cannot_convert_to(converter, destination))
    }
}

/// The error for a value of the wrong domain.
pub(crate) fn unexpected_value(converter: &str, value: &Value) -> Error {
    Error::cannot_convert_from(converter, value.value_type().as_ref())
}
