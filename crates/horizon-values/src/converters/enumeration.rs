use horizon_values_core::{EnumType, convert_debug};

use super::{expect_string_destination, unexpected_value};
use crate::context::ConversionContext;
use crate::converter::{TypeConverter, source_text};
use crate::culture::Culture;
use crate::error::{Error, Result};
use crate::value::{EnumValue, Value, ValueType};

/// Converts values of one [`EnumType`] by name.
///
/// Parsing accepts variant names and aliases in any case, plain numbers, and
/// for flag enums a comma-separated list of either. Formatting uses the
/// canonical name, the flag names joined by `", "`, or the number when
/// neither describes the value.
#[derive(Debug, Clone, Copy)]
pub struct EnumConverter {
    ty: EnumType,
}

impl EnumConverter {
    pub fn new(ty: EnumType) -> Self {
        Self { ty }
    }

    pub fn enum_type(&self) -> EnumType {
        self.ty
    }

    fn parse_token(&self, token: &str) -> Option<i64> {
        let token = token.trim();
        if token.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+') {
            return token.parse().ok();
        }
        self.ty.value_of(token)
    }

    fn parse(&self, text: &str) -> Option<i64> {
        if self.ty.is_flags() && text.contains(',') {
            return text
                .split(',')
                .map(|token| self.parse_token(token))
                .try_fold(0i64, |acc, value| value.map(|value| acc | value));
        }
        self.parse_token(text)
    }

    fn format(&self, value: i64) -> String {
        if let Some(name) = self.ty.name_of(value) {
            return name.to_owned();
        }
        if self.ty.is_flags()
            && let Some(names) = self.ty.decompose_flags(value)
        {
            return names.join(", ");
        }
        value.to_string()
    }
}

impl TypeConverter for EnumConverter {
    fn name(&self) -> &'static str {
        "EnumConverter"
    }

    fn convert_from(
        &self,
        _ctx: Option<&ConversionContext>,
        _culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        let text = source_text(self.name(), value)?.trim();
        match self.parse(text) {
            Some(parsed) => Ok(Value::Enum(EnumValue::new(self.ty, parsed))),
            None => {
                convert_debug!(enum_type = self.ty.name(), input = text, "unknown enum value");
                Err(Error::format(text, format!("not a value of {}", self.ty.name())))
            }
        }
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
            Value::Enum(enum_value) if enum_value.enum_type() == self.ty => {
                Ok(Value::String(self.format(enum_value.value())))
            }
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn standard_values(&self, _ctx: Option<&ConversionContext>) -> Option<Vec<Value>> {
        Some(
            self.ty
                .variants()
                .iter()
                .map(|variant| Value::Enum(EnumValue::new(self.ty, variant.value)))
                .collect(),
        )
    }

    fn standard_values_exclusive(&self) -> bool {
        !self.ty.is_flags()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_values_core::EnumVariant;

    const ANCHOR: &[EnumVariant] = &[
        EnumVariant { name: "None", value: 0, aliases: &[] },
        EnumVariant { name: "Left", value: 1, aliases: &[] },
        EnumVariant { name: "Top", value: 2, aliases: &["Up"] },
        EnumVariant { name: "Right", value: 4, aliases: &[] },
    ];

    fn anchor() -> EnumConverter {
        EnumConverter::new(EnumType::new("Anchor", ANCHOR, true))
    }

    fn parse(converter: &EnumConverter, text: &str) -> Result<i64> {
        match converter.convert_from_invariant_string(text)? {
            Value::Enum(value) => Ok(value.value()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_names_numbers_and_flags() {
        let converter = anchor();
        assert_eq!(parse(&converter, "left").unwrap(), 1);
        assert_eq!(parse(&converter, "up").unwrap(), 2);
        assert_eq!(parse(&converter, "4").unwrap(), 4);
        assert_eq!(parse(&converter, "Left, Top").unwrap(), 3);
        assert!(parse(&converter, "Bottom").unwrap_err().is_format());
    }

    #[test]
    fn test_format() {
        let converter = anchor();
        assert_eq!(converter.format(2), "Top");
        assert_eq!(converter.format(5), "Left, Right");
        assert_eq!(converter.format(8), "8");
        assert!(!converter.standard_values_exclusive());
        assert_eq!(converter.standard_values(None).map(|v| v.len()), Some(4));
    }
}
