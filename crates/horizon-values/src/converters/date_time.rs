use super::{expect_string_destination, unexpected_value};
use crate::context::ConversionContext;
use crate::converter::{TypeConverter, resolve_culture, source_text};
use crate::culture::Culture;
use crate::error::Result;
use crate::types::DateTimeValue;
use crate::value::{Value, ValueType};

/// Dates and times in their round-trip form. Culture short dates are
/// accepted when parsing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeConverter;

impl TypeConverter for DateTimeConverter {
    fn name(&self) -> &'static str {
        "DateTimeConverter"
    }

    fn convert_from(
        &self,
        _ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        let text = source_text(self.name(), value)?;
        let culture = resolve_culture(culture);
        DateTimeValue::parse(text, &culture).map(Value::DateTime)
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
            Value::DateTime(date_time) => Ok(Value::String(date_time.to_string())),
            other => Err(unexpected_value(self.name(), other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let converter = DateTimeConverter;
        let value = converter
            .convert_from_invariant_string("2024-02-29T23:59:59.9999999Z")
            .unwrap();
        assert_eq!(
            converter.convert_to_invariant_string(&value).unwrap(),
            "2024-02-29T23:59:59.9999999Z"
        );
        assert_eq!(
            converter.convert_from_invariant_string("").unwrap(),
            Value::DateTime(DateTimeValue::MIN)
        );
    }
}
