//! The closed set of values converters produce and consume.
//!
//! [`Value`] is a tagged union over every supported kind; [`ValueType`] names
//! a kind without carrying a value and is what the registry is keyed on.

use std::fmt;
use std::sync::Arc;

use chrono::TimeDelta;
use horizon_values_core::{ConvertibleEnum, EnumType};
use url::Url;
use uuid::Uuid;

use crate::culture::Culture;
use crate::types::{
    Brush, Color, Command, DateTimeValue, GridLength, Key, KeyGesture, ModifierKeys,
};

/// A value of an enum type, kept as its discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    ty: EnumType,
    value: i64,
}

impl EnumValue {
    /// Wrap a raw discriminant of `ty`.
    pub fn new(ty: EnumType, value: i64) -> Self {
        Self { ty, value }
    }

    /// Wrap a typed enum value.
    pub fn of<E: ConvertibleEnum>(value: E) -> Self {
        Self {
            ty: E::enum_type(),
            value: value.to_value(),
        }
    }

    /// The enum type.
    pub fn enum_type(&self) -> EnumType {
        self.ty
    }

    /// The discriminant.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Back to the typed enum, if `E` is the stored type and the value is declared.
    pub fn to_enum<E: ConvertibleEnum>(&self) -> Option<E> {
        if self.ty != E::enum_type() {
            return None;
        }
        E::from_value(self.value)
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    String(String),
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    TimeSpan(TimeDelta),
    Guid(Uuid),
    Culture(Culture),
    Type(ValueType),
    DateTime(DateTimeValue),
    Uri(Url),
    Enum(EnumValue),
    Color(Color),
    Brush(Brush),
    /// A device-independent length in pixels; NaN means "Auto".
    Length(f64),
    GridLength(GridLength),
    Key(Key),
    ModifierKeys(ModifierKeys),
    KeyGesture(KeyGesture),
    Command(Arc<Command>),
}

impl Value {
    /// The type of this value, `None` for [`Value::Null`].
    pub fn value_type(&self) -> Option<ValueType> {
        Some(match self {
            Value::Null => return None,
            Value::String(_) => ValueType::String,
            Value::Bool(_) => ValueType::Bool,
            Value::Char(_) => ValueType::Char,
            Value::I8(_) => ValueType::I8,
            Value::I16(_) => ValueType::I16,
            Value::I32(_) => ValueType::I32,
            Value::I64(_) => ValueType::I64,
            Value::U8(_) => ValueType::U8,
            Value::U16(_) => ValueType::U16,
            Value::U32(_) => ValueType::U32,
            Value::U64(_) => ValueType::U64,
            Value::F32(_) => ValueType::F32,
            Value::F64(_) => ValueType::F64,
            Value::TimeSpan(_) => ValueType::TimeSpan,
            Value::Guid(_) => ValueType::Guid,
            Value::Culture(_) => ValueType::Culture,
            Value::Type(_) => ValueType::Type,
            Value::DateTime(_) => ValueType::DateTime,
            Value::Uri(_) => ValueType::Uri,
            Value::Enum(value) => ValueType::Enum(value.enum_type()),
            Value::Color(_) => ValueType::Color,
            Value::Brush(_) => ValueType::Brush,
            Value::Length(_) => ValueType::Length,
            Value::GridLength(_) => ValueType::GridLength,
            Value::Key(_) => ValueType::Key,
            Value::ModifierKeys(_) => ValueType::ModifierKeys,
            Value::KeyGesture(_) => ValueType::KeyGesture,
            Value::Command(_) => ValueType::Command,
        })
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The text of a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    /// Any numeric value widened to `f64`, lengths included.
    pub fn as_f64(&self) -> Option<f64> {
        Some(match *self {
            Value::I8(v) => v as f64,
            Value::I16(v) => v as f64,
            Value::I32(v) => v as f64,
            Value::I64(v) => v as f64,
            Value::U8(v) => v as f64,
            Value::U16(v) => v as f64,
            Value::U32(v) => v as f64,
            Value::U64(v) => v as f64,
            Value::F32(v) => v as f64,
            Value::F64(v) | Value::Length(v) => v,
            _ => return None,
        })
    }

    /// The color of a [`Value::Color`].
    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Value::Color(color) => Some(color),
            _ => None,
        }
    }

    /// Name of this value's type, `"null"` for [`Value::Null`].
    pub fn type_name(&self) -> String {
        self.value_type()
            .map(|ty| ty.to_string())
            .unwrap_or_else(|| "null".to_owned())
    }
}

macro_rules! impl_from_for_value {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from_for_value! {
    String => String,
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    TimeDelta => TimeSpan,
    Uuid => Guid,
    Culture => Culture,
    ValueType => Type,
    DateTimeValue => DateTime,
    Url => Uri,
    EnumValue => Enum,
    Color => Color,
    Brush => Brush,
    GridLength => GridLength,
    Key => Key,
    ModifierKeys => ModifierKeys,
    KeyGesture => KeyGesture,
    Arc<Command> => Command,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// The semantic type of a [`Value`], used to pick a converter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    TimeSpan,
    Guid,
    Culture,
    Type,
    DateTime,
    Uri,
    Color,
    Brush,
    Length,
    GridLength,
    Key,
    ModifierKeys,
    KeyGesture,
    Command,
    /// An enum described by [`ConvertibleEnum`] metadata.
    Enum(EnumType),
    /// `inner` or null.
    Nullable(Box<ValueType>),
    /// A user type, optionally derived from another type whose converter it
    /// inherits.
    Named {
        name: String,
        base: Option<Box<ValueType>>,
    },
}

/// Built-in type names, in the spelling [`ValueType`]'s `Display` produces.
const BUILTIN_NAMES: &[(&str, ValueType)] = &[
    ("string", ValueType::String),
    ("bool", ValueType::Bool),
    ("char", ValueType::Char),
    ("i8", ValueType::I8),
    ("i16", ValueType::I16),
    ("i32", ValueType::I32),
    ("i64", ValueType::I64),
    ("u8", ValueType::U8),
    ("u16", ValueType::U16),
    ("u32", ValueType::U32),
    ("u64", ValueType::U64),
    ("f32", ValueType::F32),
    ("f64", ValueType::F64),
    ("TimeSpan", ValueType::TimeSpan),
    ("Guid", ValueType::Guid),
    ("Culture", ValueType::Culture),
    ("Type", ValueType::Type),
    ("DateTime", ValueType::DateTime),
    ("Uri", ValueType::Uri),
    ("Color", ValueType::Color),
    ("Brush", ValueType::Brush),
    ("Length", ValueType::Length),
    ("GridLength", ValueType::GridLength),
    ("Key", ValueType::Key),
    ("ModifierKeys", ValueType::ModifierKeys),
    ("KeyGesture", ValueType::KeyGesture),
    ("Command", ValueType::Command),
];

impl ValueType {
    /// The type of `value`, `None` for [`Value::Null`].
    pub fn of(value: &Value) -> Option<Self> {
        value.value_type()
    }

    /// Enum type of `E`.
    pub fn of_enum<E: ConvertibleEnum>() -> Self {
        ValueType::Enum(E::enum_type())
    }

    /// `inner` or null.
    pub fn nullable(inner: ValueType) -> Self {
        ValueType::Nullable(Box::new(inner))
    }

    /// A user type deriving from `base`.
    pub fn named(name: impl Into<String>, base: Option<ValueType>) -> Self {
        ValueType::Named {
            name: name.into(),
            base: base.map(Box::new),
        }
    }

    /// Parse a built-in type name, with an optional trailing `?` for nullable.
    ///
    /// Enum and user types are not known by name here.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if let Some(inner) = name.strip_suffix('?') {
            return Self::from_name(inner).map(Self::nullable);
        }
        BUILTIN_NAMES
            .iter()
            .find(|(builtin, _)| builtin.eq_ignore_ascii_case(name))
            .map(|(_, ty)| ty.clone())
    }

    /// Returns true for types whose converter lives in the primitive table.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            ValueType::String
                | ValueType::Bool
                | ValueType::Char
                | ValueType::I8
                | ValueType::I16
                | ValueType::I32
                | ValueType::I64
                | ValueType::U8
                | ValueType::U16
                | ValueType::U32
                | ValueType::U64
                | ValueType::F32
                | ValueType::F64
                | ValueType::TimeSpan
                | ValueType::Guid
                | ValueType::Culture
                | ValueType::Type
                | ValueType::DateTime
        )
    }

    /// Returns true for the integer widths.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ValueType::I8
                | ValueType::I16
                | ValueType::I32
                | ValueType::I64
                | ValueType::U8
                | ValueType::U16
                | ValueType::U32
                | ValueType::U64
        )
    }

    /// Returns true for integers and floats.
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, ValueType::F32 | ValueType::F64)
    }

    /// The base type of a [`ValueType::Named`].
    pub fn base(&self) -> Option<&ValueType> {
        match self {
            ValueType::Named { base, .. } => base.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Enum(ty) => f.write_str(ty.name()),
            ValueType::Nullable(inner) => write!(f, "{inner}?"),
            ValueType::Named { name, .. } => f.write_str(name),
            builtin => {
                let name = BUILTIN_NAMES
                    .iter()
                    .find(|(_, ty)| ty == builtin)
                    .map(|(name, _)| *name)
                    .unwrap_or("unknown");
                f.write_str(name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_of_values() {
        assert_eq!(Value::from("x").value_type(), Some(ValueType::String));
        assert_eq!(Value::from(1.5_f64).value_type(), Some(ValueType::F64));
        assert_eq!(Value::Length(2.0).value_type(), Some(ValueType::Length));
        assert_eq!(Value::Null.value_type(), None);
        assert_eq!(ValueType::of(&Value::Bool(true)), Some(ValueType::Bool));
        assert_eq!(Value::from(None::<bool>), Value::Null);
    }

    #[test]
    fn test_type_names_round_trip() {
        for (name, ty) in BUILTIN_NAMES {
            assert_eq!(ty.to_string(), *name);
            assert_eq!(ValueType::from_name(name).as_ref(), Some(ty));
        }
        assert_eq!(
            ValueType::from_name("color?"),
            Some(ValueType::nullable(ValueType::Color))
        );
        assert_eq!(ValueType::nullable(ValueType::I32).to_string(), "i32?");
        assert_eq!(ValueType::from_name("Widget"), None);
    }

    #[test]
    fn test_numeric_widening() {
        assert_eq!(Value::U8(7).as_f64(), Some(7.0));
        assert_eq!(Value::Length(96.0).as_f64(), Some(96.0));
        assert_eq!(Value::from("7").as_f64(), None);
    }

    #[test]
    fn test_named_base() {
        let ty = ValueType::named("Percent", Some(ValueType::F64));
        assert_eq!(ty.base(), Some(&ValueType::F64));
        assert_eq!(ty.to_string(), "Percent");
        assert!(!ty.is_primitive());
    }
}
