use std::sync::Arc;

use horizon_values_core::math;

use super::length::parse_length;
use super::{expect_string_destination, unexpected_value};
use crate::context::ConversionContext;
use crate::converter::{TypeConverter, resolve_culture, source_text};
use crate::culture::Culture;
use crate::error::{Error, Result};
use crate::registry::{ConverterRegistry, Visibility};
use crate::types::{GridLength, GridUnitType};
use crate::value::{Value, ValueType};

pub(crate) fn register(registry: &ConverterRegistry) {
    registry.register(ValueType::GridLength, Visibility::Public, || {
        Arc::new(GridLengthConverter)
    });
}

/// Converts [`GridLength`] values: `Auto`, `*`, `2.5*`, or a pixel length
/// with an optional unit.
#[derive(Debug, Default, Clone, Copy)]
pub struct GridLengthConverter;

fn parse_grid_length(text: &str, culture: &Culture) -> Result<GridLength> {
    let lower = text.trim().to_lowercase();
    if lower == "auto" {
        return Ok(GridLength::AUTO);
    }
    if let Some(weight) = lower.strip_suffix('*') {
        let weight = weight.trim();
        if weight.is_empty() {
            return GridLength::star(1.0);
        }
        let value = culture
            .parse_f64(weight)
            .ok_or_else(|| Error::format(text.trim(), "expected a number before '*'"))?;
        return GridLength::star(value);
    }
    GridLength::pixel(parse_length(&lower, culture)?)
}

impl TypeConverter for GridLengthConverter {
    fn name(&self) -> &'static str {
        "GridLengthConverter"
    }

    fn convert_from(
        &self,
        _ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        let text = source_text(self.name(), value)?;
        let culture = resolve_culture(culture);
        parse_grid_length(text, &culture).map(Value::GridLength)
    }

    fn convert_to(
        &self,
        _ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
        destination: &ValueType,
    ) -> Result<Value> {
        expect_string_destination(self.name(), destination)?;
        let length = match value {
            Value::Null => return Ok(Value::String(String::new())),
            Value::GridLength(length) => length,
            other => return Err(unexpected_value(self.name(), other)),
        };
        let culture = resolve_culture(culture);
        let text = match length.unit() {
            GridUnitType::Auto => "Auto".to_owned(),
            GridUnitType::Star if math::is_one(length.value()) => "*".to_owned(),
            GridUnitType::Star => format!("{}*", culture.format_f64(length.value())),
            GridUnitType::Pixel => culture.format_f64(length.value()),
        };
        Ok(Value::String(text))
    }
}
