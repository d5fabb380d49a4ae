//! Converters for keys, modifier sets and key gestures.

use std::sync::Arc;

use super::{expect_string_destination, unexpected_value};
use crate::context::ConversionContext;
use crate::converter::{TypeConverter, source_text};
use crate::culture::Culture;
use crate::error::{Error, Result};
use crate::registry::{ConverterRegistry, Visibility};
use crate::types::{Key, KeyGesture, ModifierKeys};
use crate::value::{Value, ValueType};

pub(crate) fn register(registry: &ConverterRegistry) {
    registry.register(ValueType::Key, Visibility::Public, || Arc::new(KeyConverter));
    registry.register(ValueType::ModifierKeys, Visibility::Public, || {
        Arc::new(ModifierKeysConverter)
    });
    registry.register(ValueType::KeyGesture, Visibility::Public, || {
        Arc::new(KeyGestureConverter)
    });
}

/// Converts [`Key`] values.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyConverter;

impl TypeConverter for KeyConverter {
    fn name(&self) -> &'static str {
        "KeyConverter"
    }

    fn convert_from(
        &self,
        _ctx: Option<&ConversionContext>,
        _culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        source_text(self.name(), value)?.parse().map(Value::Key)
    }

    fn convert_to(
        &self,
        _ctx: Option<&ConversionContext>,
        _culture: Option<&Culture>,
        value: &Value,
        destination: &ValueType,
    ) -> Result<Value> {
        expect_string_destination(self.name(), destination)?;
        match value {
            Value::Null => Ok(Value::String(String::new())),
            Value::Key(key) => Ok(Value::String(key.to_string())),
            other => Err(unexpected_value(self.name(), other)),
        }
    }
}

/// Converts [`ModifierKeys`] values such as `"Ctrl+Shift"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModifierKeysConverter;

impl TypeConverter for ModifierKeysConverter {
    fn name(&self) -> &'static str {
        "ModifierKeysConverter"
    }

    fn convert_from(
        &self,
        _ctx: Option<&ConversionContext>,
        _culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        source_text(self.name(), value)?
            .parse()
            .map(Value::ModifierKeys)
    }

    fn convert_to(
        &self,
        _ctx: Option<&ConversionContext>,
        _culture: Option<&Culture>,
        value: &Value,
        destination: &ValueType,
    ) -> Result<Value> {
        expect_string_destination(self.name(), destination)?;
        match value {
            Value::Null => Ok(Value::String(String::new())),
            Value::ModifierKeys(modifiers) if !modifiers.is_defined() => Err(Error::argument(
                "value",
                format!("0x{:x} is not a valid modifier combination", modifiers.bits()),
            )),
            Value::ModifierKeys(modifiers) => Ok(Value::String(modifiers.to_string())),
            other => Err(unexpected_value(self.name(), other)),
        }
    }
}

/// Converts [`KeyGesture`] values such as `"Ctrl+S,Save"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyGestureConverter;

impl TypeConverter for KeyGestureConverter {
    fn name(&self) -> &'static str {
        "KeyGestureConverter"
    }

    fn convert_from(
        &self,
        _ctx: Option<&ConversionContext>,
        _culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        source_text(self.name(), value)?
            .parse::<KeyGesture>()
            .map(Value::KeyGesture)
    }

    fn convert_to(
        &self,
        _ctx: Option<&ConversionContext>,
        _culture: Option<&Culture>,
        value: &Value,
        destination: &ValueType,
    ) -> Result<Value> {
        expect_string_destination(self.name(), destination)?;
        match value {
            Value::Null => Ok(Value::String(String::new())),
            Value::KeyGesture(gesture) => Ok(Value::String(gesture.to_string())),
            other => Err(unexpected_value(self.name(), other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        let value = KeyConverter.convert_from_invariant_string("esc").unwrap();
        assert_eq!(value, Value::Key(Key::Escape));
        assert_eq!(KeyConverter.convert_to_invariant_string(&value).unwrap(), "Escape");
        assert_eq!(KeyConverter.convert_to_invariant_string(&Value::Key(Key::None)).unwrap(), "");
    }

    #[test]
    fn test_undefined_modifiers_rejected() {
        let value = Value::ModifierKeys(ModifierKeys::from_bits_retain(0x40));
        let err = ModifierKeysConverter.convert_to_invariant_string(&value).unwrap_err();
        assert!(matches!(err, Error::Argument { .. }));
    }

    #[test]
    fn test_gesture() {
        let value = KeyGestureConverter
            .convert_from_invariant_string("ctrl+alt+DEL")
            .unwrap();
        assert_eq!(
            KeyGestureConverter.convert_to_invariant_string(&value).unwrap(),
            "Ctrl+Alt+Delete"
        );
        assert!(
            KeyGestureConverter
                .convert_from_invariant_string("Hyper+A")
                .unwrap_err()
                .is_not_supported()
        );
    }
}
