//! Color text forms.
//!
//! Accepted input, after trimming:
//!
//! - empty: [`Color::EMPTY`]
//! - a color name from the color or system color table, any case
//! - `'Name'` or `"Name"`: a color by name, kept even if unknown
//! - `#RRGGBB`, `0xRRGGBB`, `&hRRGGBB`: an opaque color
//! - `argb`, `r, g, b` or `a, r, g, b`, separated by the culture's list
//!   separator
//!
//! Numeric results that match a named color become that named color, so
//! `"255, 0, 0"` parses to `Red`.

use std::sync::Arc;

use horizon_values_core::{ConvertibleEnum, convert_debug};

use super::primitive::{IntegerKind, parse_integer};
use super::{expect_string_destination, unexpected_value};
use crate::context::ConversionContext;
use crate::converter::{TypeConverter, resolve_culture, source_text};
use crate::culture::Culture;
use crate::error::{Error, Result};
use crate::registry::{ConverterRegistry, Visibility};
use crate::types::{Color, ColorTables};
use crate::value::{Value, ValueType};

const OPAQUE: u32 = 0xFF00_0000;

pub(crate) fn register(registry: &ConverterRegistry) {
    registry.register(ValueType::Color, Visibility::Public, || {
        Arc::new(ColorConverter::new())
    });
}

/// Parse a color with the grammar described in the module docs.
pub(crate) fn parse_color(tables: &ColorTables, text: &str, culture: &Culture) -> Result<Color> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Color::EMPTY);
    }
    if let Some(color) = tables.lookup(text) {
        return Ok(color);
    }

    let separator = culture.list_separator();
    if !text.contains(separator) {
        if let Some(name) = unquote(text) {
            return Ok(tables.lookup(name).unwrap_or_else(|| Color::from_name(name)));
        }
        if let Some(rgb) = parse_hex_rgb(text) {
            return Ok(normalize(tables, rgb | OPAQUE));
        }
    }

    let tokens: Vec<&str> = text.split(separator).map(str::trim).collect();
    let argb = match tokens.as_slice() {
        [argb] => parse_integer(argb, IntegerKind::I32).map(|value| value as i32 as u32),
        [r, g, b] => channels(&[r, g, b]).map(|[r, g, b]| Color::from_rgb(r, g, b).argb()),
        [a, r, g, b] => {
            channels(&[a, r, g, b]).map(|[a, r, g, b]| Color::from_components(a, r, g, b).argb())
        }
        _ => None,
    };
    match argb {
        Some(argb) => Ok(normalize(tables, argb)),
        None => {
            convert_debug!(input = text, culture = %culture, "invalid color");
            Err(Error::format(text, "expected a color name, #RRGGBB, or a list of channels"))
        }
    }
}

/// Format a color; see [`ColorConverter`].
pub(crate) fn format_color(color: &Color, culture: &Culture) -> String {
    if color.is_empty() {
        return String::new();
    }
    if let Some(known) = color.known_color() {
        return known.name().to_owned();
    }
    if let Some(name) = color.user_name() {
        return format!("'{name}'");
    }
    let separator = format!("{} ", culture.list_separator());
    if color.a() < u8::MAX {
        [color.a(), color.r(), color.g(), color.b()].map(|c| c.to_string()).join(&separator)
    } else {
        [color.r(), color.g(), color.b()].map(|c| c.to_string()).join(&separator)
    }
}

fn unquote(text: &str) -> Option<&str> {
    let quoted = text.len() >= 2
        && ((text.starts_with('\'') && text.ends_with('\''))
            || (text.starts_with('"') && text.ends_with('"')));
    quoted.then(|| &text[1..text.len() - 1])
}

fn parse_hex_rgb(text: &str) -> Option<u32> {
    let digits = match text.len() {
        7 => text.strip_prefix('#')?,
        8 => ["0x", "0X", "&h", "&H"]
            .iter()
            .find_map(|prefix| text.strip_prefix(prefix))?,
        _ => return None,
    };
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

fn channels<const N: usize>(tokens: &[&&str; N]) -> Option<[u8; N]> {
    let mut values = [0u8; N];
    for (slot, token) in values.iter_mut().zip(tokens) {
        *slot = u8::try_from(parse_integer(token, IntegerKind::I32)?).ok()?;
    }
    Some(values)
}

fn normalize(tables: &ColorTables, argb: u32) -> Color {
    tables
        .normalize(argb)
        .unwrap_or_else(|| Color::from_argb(argb))
}

/// Converts [`Color`] values.
///
/// Formatting gives the empty string for [`Color::EMPTY`], the name of known
/// colors, `'name'` for user-named colors, and otherwise the channels:
/// `"r, g, b"` when opaque, `"a, r, g, b"` when not.
#[derive(Debug, Clone)]
pub struct ColorConverter {
    tables: Arc<ColorTables>,
}

impl ColorConverter {
    /// A converter using the process-wide color tables.
    pub fn new() -> Self {
        Self::with_tables(Arc::clone(ColorTables::global()))
    }

    /// A converter using `tables`, e.g. ones with user-defined constants.
    pub fn with_tables(tables: Arc<ColorTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &Arc<ColorTables> {
        &self.tables
    }
}

impl Default for ColorConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeConverter for ColorConverter {
    fn name(&self) -> &'static str {
        "ColorConverter"
    }

    fn convert_from(
        &self,
        _ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        let text = source_text(self.name(), value)?;
        let culture = resolve_culture(culture);
        parse_color(&self.tables, text, &culture).map(Value::Color)
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
            Value::Null => Ok(Value::String(String::new())),
            Value::Color(color) => {
                let culture = resolve_culture(culture);
                Ok(Value::String(format_color(color, &culture)))
            }
            other => Err(unexpected_value(self.name(), other)),
        }
    }

    fn standard_values(&self, _ctx: Option<&ConversionContext>) -> Option<Vec<Value>> {
        Some(
            self.tables
                .standard_values()
                .iter()
                .cloned()
                .map(Value::Color)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownColor;

    fn parse(text: &str) -> Result<Color> {
        parse_color(ColorTables::global(), text, &Culture::INVARIANT)
    }

    #[test]
    fn test_names() {
        assert_eq!(parse("Red").unwrap().known_color(), Some(KnownColor::Red));
        assert_eq!(parse("  windowtext ").unwrap().known_color(), Some(KnownColor::WindowText));
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_quoted_names() {
        assert_eq!(parse("'Blue'").unwrap().known_color(), Some(KnownColor::Blue));
        let custom = parse("\"Brand\"").unwrap();
        assert_eq!(custom.user_name(), Some("Brand"));
        assert_eq!(format_color(&custom, &Culture::INVARIANT), "'Brand'");
    }

    #[test]
    fn test_hex_forms() {
        assert_eq!(parse("#FF0000").unwrap().known_color(), Some(KnownColor::Red));
        assert_eq!(parse("0x123456").unwrap(), Color::from_argb(0xFF123456));
        assert_eq!(parse("&h123456").unwrap(), Color::from_argb(0xFF123456));
        // Not a hex color, but still a valid single ARGB integer.
        assert_eq!(parse("#12345").unwrap(), Color::from_argb(0x12345));
        assert!(parse("#GG0000").is_err());
    }

    #[test]
    fn test_channel_lists() {
        assert_eq!(parse("255, 0, 0").unwrap().known_color(), Some(KnownColor::Red));
        assert_eq!(parse("0,255,255").unwrap().known_color(), Some(KnownColor::Aqua));
        assert_eq!(parse("128, 1, 2, 3").unwrap(), Color::from_components(128, 1, 2, 3));
        assert_eq!(parse("-1").unwrap().known_color(), Some(KnownColor::White));
        assert!(parse("255, 0").unwrap_err().is_format());
        assert!(parse("256, 0, 0").unwrap_err().is_format());
        assert!(parse("255, 0, bad").unwrap_err().is_format());
    }

    #[test]
    fn test_error_names_trimmed_input() {
        let err = parse("  nonsense ").unwrap_err();
        assert!(matches!(err, Error::Format { ref input, .. } if input == "nonsense"));
    }

    #[test]
    fn test_culture_separator() {
        let german = Culture::from_name("de-DE").unwrap();
        let color = parse_color(ColorTables::global(), "10; 20; 30", &german).unwrap();
        assert_eq!(color, Color::from_rgb(10, 20, 30));
        assert_eq!(format_color(&color, &german), "10; 20; 30");
    }

    #[test]
    fn test_format() {
        let invariant = Culture::INVARIANT;
        assert_eq!(format_color(&Color::EMPTY, &invariant), "");
        assert_eq!(format_color(&Color::from_known(KnownColor::Red), &invariant), "Red");
        assert_eq!(format_color(&Color::from_rgb(1, 2, 3), &invariant), "1, 2, 3");
        assert_eq!(format_color(&Color::from_components(4, 1, 2, 3), &invariant), "4, 1, 2, 3");
    }

    #[test]
    fn test_standard_values() {
        let values = ColorConverter::new().standard_values(None).unwrap();
        assert!(values.contains(&Value::Color(Color::from_known(KnownColor::Transparent))));
    }
}
