use std::sync::Arc;

use horizon_values_core::convert_debug;

use super::{expect_string_destination, unexpected_value};
use crate::context::ConversionContext;
use crate::converter::{TypeConverter, resolve_culture};
use crate::culture::Culture;
use crate::error::{Error, Result};
use crate::registry::{ConverterRegistry, Visibility};
use crate::value::{Value, ValueType};

/// Device-independent pixels per unit.
const UNITS: &[(&str, f64)] = &[
    ("px", 1.0),
    ("in", 96.0),
    ("cm", 96.0 / 2.54),
    ("pt", 96.0 / 72.0),
];

pub(crate) fn register(registry: &ConverterRegistry) {
    registry.register(ValueType::Length, Visibility::Public, || {
        Arc::new(LengthConverter)
    });
}

/// Parse a length such as `"12"`, `"1.5in"` or `"auto"` into pixels.
///
/// `auto` is NaN.
pub(crate) fn parse_length(text: &str, culture: &Culture) -> Result<f64> {
    let lower = text.trim().to_lowercase();
    if lower == "auto" {
        return Ok(f64::NAN);
    }
    let (number, factor) = UNITS
        .iter()
        .find_map(|(unit, factor)| lower.strip_suffix(unit).map(|number| (number, *factor)))
        .unwrap_or((lower.as_str(), 1.0));
    match culture.parse_f64(number) {
        Some(value) => Ok(value * factor),
        None => {
            convert_debug!(input = text.trim(), culture = %culture, "invalid length");
            Err(Error::format(text.trim(), "expected a number with an optional px, in, cm or pt unit, or Auto"))
        }
    }
}

/// Formats a pixel length, NaN as `"Auto"`.
pub(crate) fn format_length(value: f64, culture: &Culture) -> String {
    if value.is_nan() {
        "Auto".to_owned()
    } else {
        culture.format_f64(value)
    }
}

/// Converts lengths in device-independent pixels ([`Value::Length`]).
#[derive(Debug, Default, Clone, Copy)]
pub struct LengthConverter;

impl TypeConverter for LengthConverter {
    fn name(&self) -> &'static str {
        "LengthConverter"
    }

    fn can_convert_from(&self, _ctx: Option<&ConversionContext>, source: &ValueType) -> bool {
        *source == ValueType::String || source.is_numeric()
    }

    fn convert_from(
        &self,
        _ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        if let Value::String(text) = value {
            let culture = resolve_culture(culture);
            return parse_length(text, &culture).map(Value::Length);
        }
        value
            .as_f64()
            .map(Value::Length)
            .ok_or_else(|| unexpected_value(self.name(), value))
    }

    fn convert_to(
        &self,
        _ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
        destination: &ValueType,
    ) -> Result<Value> {
        expect_string_destination(self.name(), destination)?;
        if value.is_null() {
            return Ok(Value::String(String::new()));
        }
        let length = value
            .as_f64()
            .ok_or_else(|| unexpected_value(self.name(), value))?;
        let culture = resolve_culture(culture);
        Ok(Value::String(format_length(length, &culture)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_values_core::math;

    fn parse(text: &str) -> Result<f64> {
        parse_length(text, &Culture::INVARIANT)
    }

    #[test]
    fn test_units() {
        assert_eq!(parse("12").unwrap(), 12.0);
        assert_eq!(parse("12px").unwrap(), 12.0);
        assert_eq!(parse(" 1IN ").unwrap(), 96.0);
        assert!(math::are_close(parse("2.54cm").unwrap(), 96.0));
        assert!(math::are_close(parse("72pt").unwrap(), 96.0));
    }

    #[test]
    fn test_auto() {
        assert!(parse("Auto").unwrap().is_nan());
        assert_eq!(
            LengthConverter.convert_to_invariant_string(&Value::Length(f64::NAN)).unwrap(),
            "Auto"
        );
    }

    #[test]
    fn test_invalid() {
        assert!(parse("12em").unwrap_err().is_format());
        assert!(parse("").unwrap_err().is_format());
        assert!(parse("px").unwrap_err().is_format());
    }

    #[test]
    fn test_numeric_source_and_culture() {
        assert_eq!(LengthConverter.convert_from(None, None, &Value::I32(5)).unwrap(), Value::Length(5.0));
        let german = Culture::from_name("de-DE").unwrap();
        let text = LengthConverter
            .convert_to(None, Some(&german), &Value::Length(1.5), &ValueType::String)
            .unwrap();
        assert_eq!(text, Value::from("1,5"));
    }
}
