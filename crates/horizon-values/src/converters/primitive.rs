//! Converters for the built-in scalar types.
//!
//! These form the first resolution tier and are never looked up in the
//! registration table.

use std::sync::Arc;

use chrono::TimeDelta;
use horizon_values_core::convert_debug;
use url::{ParseError, Url};
use uuid::Uuid;

use super::date_time::DateTimeConverter;
use super::nullable::NullableConverter;
use super::{expect_string_destination, unexpected_value};
use crate::context::ConversionContext;
use crate::converter::{TypeConverter, resolve_culture, source_text};
use crate::culture::Culture;
use crate::error::{Error, Result};
use crate::value::{Value, ValueType};

/// The primitive converter for `ty`, wrapping nullable primitives.
pub(crate) fn converter_for(ty: &ValueType) -> Option<Arc<dyn TypeConverter>> {
    if let ValueType::Nullable(inner) = ty {
        let converter = scalar_converter(inner)?;
        return Some(Arc::new(NullableConverter::new((**inner).clone(), converter)));
    }
    scalar_converter(ty)
}

fn scalar_converter(ty: &ValueType) -> Option<Arc<dyn TypeConverter>> {
    Some(match ty {
        ValueType::String => Arc::new(StringConverter),
        ValueType::Bool => Arc::new(BoolConverter),
        ValueType::Char => Arc::new(CharConverter),
        ValueType::I8 => Arc::new(IntegerConverter(IntegerKind::I8)),
        ValueType::I16 => Arc::new(IntegerConverter(IntegerKind::I16)),
        ValueType::I32 => Arc::new(IntegerConverter(IntegerKind::I32)),
        ValueType::I64 => Arc::new(IntegerConverter(IntegerKind::I64)),
        ValueType::U8 => Arc::new(IntegerConverter(IntegerKind::U8)),
        ValueType::U16 => Arc::new(IntegerConverter(IntegerKind::U16)),
        ValueType::U32 => Arc::new(IntegerConverter(IntegerKind::U32)),
        ValueType::U64 => Arc::new(IntegerConverter(IntegerKind::U64)),
        ValueType::F32 => Arc::new(FloatConverter { single: true }),
        ValueType::F64 => Arc::new(FloatConverter { single: false }),
        ValueType::TimeSpan => Arc::new(TimeSpanConverter),
        ValueType::Guid => Arc::new(GuidConverter),
        ValueType::Culture => Arc::new(CultureConverter),
        ValueType::Type => Arc::new(TypeNameConverter),
        ValueType::DateTime => Arc::new(DateTimeConverter),
        _ => return None,
    })
}

/// Implements [`TypeConverter`] for a converter whose only foreign
/// representation is a string.
macro_rules! text_converter {
    (
        $converter:ident, $name:literal,
        parse($ctx:ident, $culture:ident, $text:ident) $parse:block,
        format($fculture:ident, $value:pat) $format:block
    ) => {
        impl TypeConverter for $converter {
            fn name(&self) -> &'static str {
                $name
            }

            fn convert_from(
                &self,
                $ctx: Option<&ConversionContext>,
                $culture: Option<&Culture>,
                value: &Value,
            ) -> Result<Value> {
                let $text = source_text($name, value)?;
                $parse
            }

            fn convert_to(
                &self,
                _ctx: Option<&ConversionContext>,
                $fculture: Option<&Culture>,
                value: &Value,
                destination: &ValueType,
            ) -> Result<Value> {
                expect_string_destination($name, destination)?;
                match value {
                    Value::Null => Ok(Value::String(String::new())),
                    $value => Ok(Value::String($format)),
                    other => Err(unexpected_value($name, other)),
                }
            }
        }
    };
}

/// Strings pass through.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringConverter;

text_converter!(StringConverter, "StringConverter",
    parse(_ctx, _culture, text) { Ok(Value::from(text)) },
    format(_culture, Value::String(text)) { text.clone() }
);

/// `true` and `false`, ignoring case and surrounding whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolConverter;

text_converter!(BoolConverter, "BooleanConverter",
    parse(_ctx, _culture, text) {
        let token = text.trim();
        if token.eq_ignore_ascii_case("true") {
            Ok(Value::Bool(true))
        } else if token.eq_ignore_ascii_case("false") {
            Ok(Value::Bool(false))
        } else {
            Err(Error::format(token, "expected 'true' or 'false'"))
        }
    },
    format(_culture, Value::Bool(flag)) { flag.to_string() }
);

/// A single character; the empty string is `'\0'`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CharConverter;

text_converter!(CharConverter, "CharConverter",
    parse(_ctx, _culture, text) {
        let token = if text.chars().count() > 1 { text.trim() } else { text };
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Value::Char('\0')),
            (Some(c), None) => Ok(Value::Char(c)),
            _ => Err(Error::format(token, "expected a single character")),
        }
    },
    format(_culture, Value::Char(c)) {
        if *c == '\0' { String::new() } else { c.to_string() }
    }
);

/// Width and signedness of an integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntegerKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntegerKind {
    fn bits(self) -> u32 {
        match self {
            IntegerKind::I8 | IntegerKind::U8 => 8,
            IntegerKind::I16 | IntegerKind::U16 => 16,
            IntegerKind::I32 | IntegerKind::U32 => 32,
            IntegerKind::I64 | IntegerKind::U64 => 64,
        }
    }

    fn is_signed(self) -> bool {
        matches!(
            self,
            IntegerKind::I8 | IntegerKind::I16 | IntegerKind::I32 | IntegerKind::I64
        )
    }

    fn range(self) -> (i128, i128) {
        let bits = self.bits();
        if self.is_signed() {
            (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
        } else {
            (0, (1i128 << bits) - 1)
        }
    }

    fn name(self) -> &'static str {
        match self {
            IntegerKind::I8 => "SByteConverter",
            IntegerKind::I16 => "Int16Converter",
            IntegerKind::I32 => "Int32Converter",
            IntegerKind::I64 => "Int64Converter",
            IntegerKind::U8 => "ByteConverter",
            IntegerKind::U16 => "UInt16Converter",
            IntegerKind::U32 => "UInt32Converter",
            IntegerKind::U64 => "UInt64Converter",
        }
    }

    /// Wrap an in-range value.
    fn to_value(self, value: i128) -> Value {
        match self {
            IntegerKind::I8 => Value::I8(value as i8),
            IntegerKind::I16 => Value::I16(value as i16),
            IntegerKind::I32 => Value::I32(value as i32),
            IntegerKind::I64 => Value::I64(value as i64),
            IntegerKind::U8 => Value::U8(value as u8),
            IntegerKind::U16 => Value::U16(value as u16),
            IntegerKind::U32 => Value::U32(value as u32),
            IntegerKind::U64 => Value::U64(value as u64),
        }
    }

    fn from_value(self, value: &Value) -> Option<i128> {
        Some(match (self, value) {
            (IntegerKind::I8, Value::I8(v)) => *v as i128,
            (IntegerKind::I16, Value::I16(v)) => *v as i128,
            (IntegerKind::I32, Value::I32(v)) => *v as i128,
            (IntegerKind::I64, Value::I64(v)) => *v as i128,
            (IntegerKind::U8, Value::U8(v)) => *v as i128,
            (IntegerKind::U16, Value::U16(v)) => *v as i128,
            (IntegerKind::U32, Value::U32(v)) => *v as i128,
            (IntegerKind::U64, Value::U64(v)) => *v as i128,
            _ => return None,
        })
    }
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    ["0x", "0X", "&h", "&H", "#"]
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
}

/// Parse a decimal or hexadecimal integer of the given width.
///
/// Hex digits give the raw bit pattern, so `0xFF` is `-1` for `i8`.
pub(crate) fn parse_integer(text: &str, kind: IntegerKind) -> Option<i128> {
    let text = text.trim();
    if let Some(digits) = strip_hex_prefix(text) {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let bits = u64::from_str_radix(digits, 16).ok()?;
        let width = kind.bits();
        if width < 64 && bits >> width != 0 {
            return None;
        }
        if !kind.is_signed() {
            return Some(bits as i128);
        }
        let shift = 128 - width;
        return Some(((bits as i128) << shift) >> shift);
    }
    let value: i128 = text.parse().ok()?;
    let (min, max) = kind.range();
    (min..=max).contains(&value).then_some(value)
}

/// Integers of one width, decimal or with a `0x`, `&h` or `#` hex prefix.
#[derive(Debug, Clone, Copy)]
pub struct IntegerConverter(pub(crate) IntegerKind);

impl TypeConverter for IntegerConverter {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn convert_from(
        &self,
        _ctx: Option<&ConversionContext>,
        _culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        let text = source_text(self.name(), value)?;
        match parse_integer(text, self.0) {
            Some(parsed) => Ok(self.0.to_value(parsed)),
            None => {
                convert_debug!(converter = self.name(), input = text.trim(), "invalid integer");
                Err(Error::format(text.trim(), "not a valid integer of this width"))
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
        if value.is_null() {
            return Ok(Value::String(String::new()));
        }
        self.0
            .from_value(value)
            .map(|v| Value::String(v.to_string()))
            .ok_or_else(|| unexpected_value(self.name(), value))
    }
}

/// `f32` or `f64` in the culture's number format.
#[derive(Debug, Clone, Copy)]
pub struct FloatConverter {
    single: bool,
}

impl TypeConverter for FloatConverter {
    fn name(&self) -> &'static str {
        if self.single { "SingleConverter" } else { "DoubleConverter" }
    }

    fn convert_from(
        &self,
        _ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        let text = source_text(self.name(), value)?;
        let culture = resolve_culture(culture);
        let parsed = culture.parse_f64(text).ok_or_else(|| {
            convert_debug!(converter = self.name(), input = text.trim(), culture = %culture, "invalid number");
            Error::format(text.trim(), "not a valid number")
        })?;
        Ok(if self.single {
            Value::F32(parsed as f32)
        } else {
            Value::F64(parsed)
        })
    }

    fn convert_to(
        &self,
        _ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
        destination: &ValueType,
    ) -> Result<Value> {
        expect_string_destination(self.name(), destination)?;
        let culture = resolve_culture(culture);
        match (self.single, value) {
            (_, Value::Null) => Ok(Value::String(String::new())),
            (true, Value::F32(v)) => Ok(Value::String(culture.format_f32(*v))),
            (false, Value::F64(v)) => Ok(Value::String(culture.format_f64(*v))),
            (_, other) => Err(unexpected_value(self.name(), other)),
        }
    }
}

/// Durations as `[-][d.]hh:mm:ss[.fffffff]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeSpanConverter;

const SECONDS_PER_DAY: i64 = 86_400;

fn digits(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn parse_time_span(text: &str) -> Option<TimeDelta> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (days, clock) = match body.split_once(':') {
        None => (digits(body)?, None),
        Some((head, _)) => match head.split_once('.') {
            Some((days, _)) => (digits(days)?, Some(&body[days.len() + 1..])),
            None => (0, Some(body)),
        },
    };

    let (mut seconds, mut nanos) = (days.checked_mul(SECONDS_PER_DAY)?, 0u32);
    if let Some(clock) = clock {
        let parts: Vec<&str> = clock.split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return None;
        }
        let hours = digits(parts[0])?;
        let minutes = digits(parts[1])?;
        let (secs, fraction) = match parts.get(2) {
            Some(secs) => match secs.split_once('.') {
                Some((whole, fraction)) => (digits(whole)?, fraction),
                None => (digits(secs)?, ""),
            },
            None => (0, ""),
        };
        if hours > 23 || minutes > 59 || secs > 59 {
            return None;
        }
        if !fraction.is_empty() {
            if fraction.len() > 7 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let ticks: u32 = format!("{fraction:0<7}").parse().ok()?;
            nanos = ticks * 100;
        }
        seconds = seconds.checked_add(hours * 3600 + minutes * 60 + secs)?;
    }

    let delta = TimeDelta::new(seconds, nanos)?;
    Some(if negative { -delta } else { delta })
}

fn format_time_span(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let delta = delta.abs();
    let total = delta.num_seconds();
    let ticks = delta.subsec_nanos() / 100;
    let (days, rest) = (total / SECONDS_PER_DAY, total % SECONDS_PER_DAY);
    let mut text = String::from(sign);
    if days > 0 {
        text.push_str(&format!("{days}."));
    }
    text.push_str(&format!("{:02}:{:02}:{:02}", rest / 3600, rest % 3600 / 60, rest % 60));
    if ticks > 0 {
        text.push_str(&format!(".{ticks:07}"));
    }
    text
}

text_converter!(TimeSpanConverter, "TimeSpanConverter",
    parse(_ctx, _culture, text) {
        let token = text.trim();
        parse_time_span(token)
            .map(Value::TimeSpan)
            .ok_or_else(|| Error::format(token, "expected [-][d.]hh:mm[:ss[.fffffff]]"))
    },
    format(_culture, Value::TimeSpan(delta)) { format_time_span(*delta) }
);

/// GUIDs in any common layout, formatted hyphenated in lower case.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuidConverter;

text_converter!(GuidConverter, "GuidConverter",
    parse(_ctx, _culture, text) {
        let token = text.trim();
        Uuid::parse_str(token)
            .map(Value::Guid)
            .map_err(|err| Error::format(token, err.to_string()))
    },
    format(_culture, Value::Guid(guid)) { guid.hyphenated().to_string() }
);

/// Cultures by name; the empty string is the invariant culture.
#[derive(Debug, Default, Clone, Copy)]
pub struct CultureConverter;

text_converter!(CultureConverter, "CultureInfoConverter",
    parse(_ctx, _culture, text) {
        let token = text.trim();
        Culture::from_name(token)
            .map(Value::Culture)
            .ok_or_else(|| Error::format(token, "unknown culture"))
    },
    format(_culture, Value::Culture(culture)) { culture.name().to_owned() }
);

/// Value types by name, e.g. `"i32"` or `"Color?"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeNameConverter;

text_converter!(TypeNameConverter, "TypeConverter",
    parse(_ctx, _culture, text) {
        let token = text.trim();
        ValueType::from_name(token)
            .map(Value::Type)
            .ok_or_else(|| Error::format(token, "unknown type name"))
    },
    format(_culture, Value::Type(ty)) { ty.to_string() }
);

/// Absolute URIs, or relative ones resolved against the context base URI.
#[derive(Debug, Default, Clone, Copy)]
pub struct UriConverter;

text_converter!(UriConverter, "UriConverter",
    parse(ctx, _culture, text) {
        let token = text.trim();
        if token.is_empty() {
            return Ok(Value::Null);
        }
        match Url::parse(token) {
            Ok(url) => Ok(Value::Uri(url)),
            Err(ParseError::RelativeUrlWithoutBase) => {
                let base = ctx
                    .and_then(ConversionContext::base_uri)
                    .ok_or_else(|| Error::argument_null("base_uri"))?;
                base.join(token)
                    .map(Value::Uri)
                    .map_err(|err| Error::format(token, err.to_string()))
            }
            Err(err) => Err(Error::format(token, err.to_string())),
        }
    },
    format(_culture, Value::Uri(url)) { url.as_str().to_owned() }
);

#[cfg(test)]
mod tests {
    use super::*;

    fn from(converter: &dyn TypeConverter, text: &str) -> Result<Value> {
        converter.convert_from_invariant_string(text)
    }

    #[test]
    fn test_bool_and_char() {
        assert_eq!(from(&BoolConverter, " TRUE ").unwrap(), Value::Bool(true));
        assert!(from(&BoolConverter, "yes").unwrap_err().is_format());
        assert_eq!(from(&CharConverter, "").unwrap(), Value::Char('\0'));
        assert_eq!(from(&CharConverter, " x ").unwrap(), Value::Char('x'));
        assert!(from(&CharConverter, "xy").is_err());
        assert_eq!(CharConverter.convert_to_invariant_string(&Value::Char('\0')).unwrap(), "");
    }

    #[test]
    fn test_integers() {
        assert_eq!(parse_integer("42", IntegerKind::I32), Some(42));
        assert_eq!(parse_integer("0xFF", IntegerKind::I8), Some(-1));
        assert_eq!(parse_integer("&hFFFF", IntegerKind::U16), Some(0xFFFF));
        assert_eq!(parse_integer("#1FF", IntegerKind::U8), None);
        assert_eq!(parse_integer("256", IntegerKind::U8), None);
        assert_eq!(parse_integer("-129", IntegerKind::I8), None);
        assert_eq!(parse_integer("0xFFFFFFFFFFFFFFFF", IntegerKind::I64), Some(-1));

        let converter = IntegerConverter(IntegerKind::U32);
        assert_eq!(from(&converter, "7").unwrap(), Value::U32(7));
        assert!(from(&converter, "-7").unwrap_err().is_format());
        assert_eq!(converter.convert_to_invariant_string(&Value::U32(7)).unwrap(), "7");
        assert!(converter.convert_to_invariant_string(&Value::I32(7)).is_err());
    }

    #[test]
    fn test_floats_use_culture() {
        let german = Culture::from_name("de-DE").unwrap();
        let converter = FloatConverter { single: false };
        let value = converter
            .convert_from(None, Some(&german), &Value::from("1,25"))
            .unwrap();
        assert_eq!(value, Value::F64(1.25));
        let text = converter
            .convert_to(None, Some(&german), &value, &ValueType::String)
            .unwrap();
        assert_eq!(text, Value::from("1,25"));
    }

    #[test]
    fn test_time_span() {
        let value = from(&TimeSpanConverter, "1.02:03:04.5").unwrap();
        let Value::TimeSpan(delta) = value else {
            panic!("expected a time span");
        };
        assert_eq!(delta.num_seconds(), 93_784);
        assert_eq!(format_time_span(delta), "1.02:03:04.5000000");
        assert_eq!(format_time_span(-TimeDelta::minutes(90)), "-01:30:00");
        assert_eq!(parse_time_span("3"), Some(TimeDelta::days(3)));
        assert_eq!(parse_time_span("10:30"), Some(TimeDelta::minutes(630)));
        assert!(parse_time_span("25:00").is_none());
        assert!(parse_time_span("1:2:3:4").is_none());
    }

    #[test]
    fn test_guid_layouts() {
        let expected = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        for text in [
            "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "67E5504410B1426F9247BB680E5FE0C8",
            "{67e55044-10b1-426f-9247-bb680e5fe0c8}",
            "urn:uuid:67e55044-10b1-426f-9247-bb680e5fe0c8",
        ] {
            let value = from(&GuidConverter, text).unwrap();
            assert_eq!(GuidConverter.convert_to_invariant_string(&value).unwrap(), expected);
        }
    }

    #[test]
    fn test_uri_resolution() {
        assert!(matches!(from(&UriConverter, "https://example.com/a").unwrap(), Value::Uri(_)));
        let err = from(&UriConverter, "images/logo.png").unwrap_err();
        assert!(matches!(err, Error::ArgumentNull { .. }));

        let context =
            ConversionContext::new().with_base_uri(Url::parse("https://example.com/app/").unwrap());
        let value = UriConverter
            .convert_from(Some(&context), None, &Value::from("images/logo.png"))
            .unwrap();
        assert_eq!(
            UriConverter.convert_to_invariant_string(&value).unwrap(),
            "https://example.com/app/images/logo.png"
        );
    }

    #[test]
    fn test_nullable_primitive() {
        let converter = converter_for(&ValueType::nullable(ValueType::I32)).unwrap();
        assert_eq!(converter.convert_from_invariant_string("").unwrap(), Value::Null);
        assert_eq!(converter.convert_from_invariant_string("5").unwrap(), Value::I32(5));
        assert!(converter_for(&ValueType::Color).is_none());
    }
}
