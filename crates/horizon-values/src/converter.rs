//! The converter contract.
//!
//! A [`TypeConverter`] turns values of one domain into other representations,
//! in practice almost always strings, and back. Converters are stateless or
//! immutable after construction and are shared between threads through
//! `Arc<dyn TypeConverter>`.

use std::borrow::Cow;
use std::fmt::Debug;

use crate::context::ConversionContext;
use crate::culture::Culture;
use crate::error::{Error, Result};
use crate::value::{Value, ValueType};

/// Converts values of one domain to and from other types.
pub trait TypeConverter: Send + Sync + Debug {
    /// Name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Whether [`convert_from`](Self::convert_from) accepts `source`.
    fn can_convert_from(&self, _ctx: Option<&ConversionContext>, source: &ValueType) -> bool {
        *source == ValueType::String
    }

    /// Whether [`convert_to`](Self::convert_to) can produce `destination`.
    fn can_convert_to(&self, _ctx: Option<&ConversionContext>, destination: &ValueType) -> bool {
        *destination == ValueType::String
    }

    /// Convert `value` into this converter's domain.
    ///
    /// `culture` of `None` means [`Culture::current`].
    fn convert_from(
        &self,
        ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value>;

    /// Convert a value of this converter's domain into `destination`.
    fn convert_to(
        &self,
        ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
        destination: &ValueType,
    ) -> Result<Value>;

    /// Values commonly offered for this domain, e.g. in a property editor.
    fn standard_values(&self, _ctx: Option<&ConversionContext>) -> Option<Vec<Value>> {
        None
    }

    /// Whether [`standard_values`](Self::standard_values) is the complete set.
    fn standard_values_exclusive(&self) -> bool {
        false
    }

    /// Parse `text` with the current culture.
    fn convert_from_string(&self, text: &str) -> Result<Value> {
        self.convert_from(None, None, &Value::from(text))
    }

    /// Parse `text` with the invariant culture.
    fn convert_from_invariant_string(&self, text: &str) -> Result<Value> {
        self.convert_from(None, Some(&Culture::INVARIANT), &Value::from(text))
    }

    /// Format `value` with the current culture.
    fn convert_to_string(&self, value: &Value) -> Result<String> {
        into_string(self.name(), self.convert_to(None, None, value, &ValueType::String)?)
    }

    /// Format `value` with the invariant culture.
    fn convert_to_invariant_string(&self, value: &Value) -> Result<String> {
        into_string(
            self.name(),
            self.convert_to(None, Some(&Culture::INVARIANT), value, &ValueType::String)?,
        )
    }
}

fn into_string(converter: &str, value: Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(Error::invalid_operation(format!(
            "{converter} produced {} when asked for a string",
            other.type_name()
        ))),
    }
}

/// `culture`, or the current culture when none was given.
pub(crate) fn resolve_culture(culture: Option<&Culture>) -> Cow<'_, Culture> {
    match culture {
        Some(culture) => Cow::Borrowed(culture),
        None => Cow::Owned(Culture::current()),
    }
}

/// The text of a string source, or a not-supported error naming its type.
pub(crate) fn source_text<'a>(converter: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| Error::cannot_convert_from(converter, value.value_type().as_ref()))
}

/// Fallback for types nobody registered: strings pass through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultConverter;

impl TypeConverter for DefaultConverter {
    fn name(&self) -> &'static str {
        "DefaultConverter"
    }

    fn convert_from(
        &self,
        _ctx: Option<&ConversionContext>,
        _culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        match value {
            Value::String(_) => Ok(value.clone()),
            other => Err(Error::cannot_convert_from(self.name(), other.value_type().as_ref())),
        }
    }

    fn convert_to(
        &self,
        _ctx: Option<&ConversionContext>,
        _culture: Option<&Culture>,
        value: &Value,
        destination: &ValueType,
    ) -> Result<Value> {
        if *destination != ValueType::String {
            return Err(Error::cannot_convert_to(self.name(), destination));
        }
        match value {
            Value::Null => Ok(Value::String(String::new())),
            Value::String(_) => Ok(value.clone()),
            other => Err(Error::cannot_convert_from(self.name(), other.value_type().as_ref())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Broken;

    impl TypeConverter for Broken {
        fn name(&self) -> &'static str {
            "Broken"
        }

        fn convert_from(
            &self,
            _ctx: Option<&ConversionContext>,
            _culture: Option<&Culture>,
            _value: &Value,
        ) -> Result<Value> {
            Ok(Value::Null)
        }

        fn convert_to(
            &self,
            _ctx: Option<&ConversionContext>,
            _culture: Option<&Culture>,
            _value: &Value,
            _destination: &ValueType,
        ) -> Result<Value> {
            Ok(Value::Bool(true))
        }
    }

    #[test]
    fn test_default_converter_passthrough() {
        let converter = DefaultConverter;
        assert_eq!(converter.convert_from_string("abc").unwrap(), Value::from("abc"));
        assert_eq!(converter.convert_to_invariant_string(&Value::Null).unwrap(), "");
        assert!(converter.convert_to_string(&Value::I32(3)).unwrap_err().is_not_supported());
        assert!(converter.can_convert_from(None, &ValueType::String));
        assert!(!converter.can_convert_to(None, &ValueType::Color));
    }

    #[test]
    fn test_non_string_result_is_invalid_operation() {
        let err = Broken.convert_to_invariant_string(&Value::Null).unwrap_err();
        assert!(matches!(err, Error::InvalidOperation { .. }));
    }
}
