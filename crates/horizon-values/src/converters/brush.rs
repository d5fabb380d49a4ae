use std::sync::Arc;

use super::color::{format_color, parse_color};
use super::{expect_string_destination, unexpected_value};
use crate::context::ConversionContext;
use crate::converter::{TypeConverter, resolve_culture};
use crate::culture::Culture;
use crate::error::Result;
use crate::registry::{ConverterRegistry, Visibility};
use crate::types::{Brush, ColorTables};
use crate::value::{Value, ValueType};

pub(crate) fn register(registry: &ConverterRegistry) {
    registry.register(ValueType::Brush, Visibility::Public, || {
        Arc::new(BrushConverter::new())
    });
}

/// Converts [`Brush`] values using the color grammar.
///
/// Blank text is [`Brush::Null`]; anything else must be a color and becomes a
/// solid brush. Colors are also accepted as sources.
#[derive(Debug, Clone)]
pub struct BrushConverter {
    tables: Arc<ColorTables>,
}

impl BrushConverter {
    pub fn new() -> Self {
        Self::with_tables(Arc::clone(ColorTables::global()))
    }

    pub fn with_tables(tables: Arc<ColorTables>) -> Self {
        Self { tables }
    }
}

impl Default for BrushConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeConverter for BrushConverter {
    fn name(&self) -> &'static str {
        "BrushConverter"
    }

    fn can_convert_from(&self, _ctx: Option<&ConversionContext>, source: &ValueType) -> bool {
        matches!(source, ValueType::String | ValueType::Color)
    }

    fn convert_from(
        &self,
        _ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        match value {
            Value::Color(color) => Ok(Value::Brush(Brush::Solid(color.clone()))),
            Value::String(text) if text.trim().is_empty() => Ok(Value::Brush(Brush::Null)),
            Value::String(text) => {
                let culture = resolve_culture(culture);
                let color = parse_color(&self.tables, text, &culture)?;
                Ok(Value::Brush(Brush::Solid(color)))
            }
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn convert_to(
        &self,
        _ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
        destination: &ValueType,
    ) -> Result<Value> {
        expect_string_destination(self.name(), destination)?;
        match value {
            Value::Null | Value::Brush(Brush::Null) => Ok(Value::String(String::new())),
            Value::Brush(Brush::Solid(color)) => {
                let culture = resolve_culture(culture);
                Ok(Value::String(format_color(color, &culture)))
            }
            other => Err(unexpected_value(self.name(), other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, KnownColor};

    #[test]
    fn test_solid_and_null() {
        let converter = BrushConverter::new();
        assert_eq!(
            converter.convert_from_invariant_string("Green").unwrap(),
            Value::Brush(Brush::solid(KnownColor::Green))
        );
        assert_eq!(converter.convert_from_invariant_string(" ").unwrap(), Value::Brush(Brush::Null));
        assert_eq!(converter.convert_to_invariant_string(&Value::Brush(Brush::Null)).unwrap(), "");
        assert_eq!(
            converter
                .convert_to_invariant_string(&Value::Brush(Brush::solid(Color::from_rgb(1, 2, 3))))
                .unwrap(),
            "1, 2, 3"
        );
    }

    #[test]
    fn test_invalid_color_fails() {
        let err = BrushConverter::new().convert_from_invariant_string("1, 2").unwrap_err();
        assert!(err.is_format());
    }
}
