//! String conversion for UI value types.
//!
//! Horizon Values turns markup-style text such as `"#FF336699"`, `"2.5*"`,
//! `"Ctrl+Shift+S"` or `"1.5in"` into typed [`Value`]s and back. Each value
//! type has a [`TypeConverter`]; a [`ConverterRegistry`] finds the right one
//! for a [`ValueType`] and caches it.
//!
//! # Example
//!
//! ```
//! use horizon_values::{Color, ConverterRegistry, Culture, Value, ValueType};
//!
//! let registry = ConverterRegistry::new();
//! let converter = registry.resolve(&ValueType::Color);
//!
//! let value = converter.convert_from_invariant_string("CornflowerBlue").unwrap();
//! assert_eq!(value.as_color().map(Color::argb), Some(0xFF6495ED));
//!
//! let text = converter
//!     .convert_to(None, Some(&Culture::INVARIANT), &Value::Color(Color::from_rgb(1, 2, 3)), &ValueType::String)
//!     .unwrap();
//! assert_eq!(text, Value::from("1, 2, 3"));
//! ```
//!
//! # Culture
//!
//! Converters format and parse numbers with a [`Culture`]. Passing `None`
//! uses [`Culture::current`], which starts out as the system locale and can
//! be set from a [`ConverterConfig`].

pub mod config;
pub mod context;
pub mod converter;
pub mod converters;
pub mod culture;
pub mod error;
pub mod refresh;
pub mod registry;
pub mod types;
pub mod value;

pub use config::ConverterConfig;
pub use context::ConversionContext;
pub use converter::{DefaultConverter, TypeConverter};
pub use culture::{Culture, DateOrder};
pub use error::{Error, Result};
pub use registry::{ConverterFactory, ConverterRegistry, Visibility};
pub use types::*;
pub use value::{EnumValue, Value, ValueType};

pub use horizon_values_core::{ConvertibleEnum, EnumType, EnumVariant, NearEq, Signal, math};
pub use horizon_values_macros::ConvertibleEnum;

/// Parse `text` as `ty` with the global registry and the current culture.
pub fn convert_from_string(ty: &ValueType, text: &str) -> Result<Value> {
    ConverterRegistry::global().convert_from_string(ty, text)
}

/// Format `value` with the global registry and the current culture.
pub fn convert_to_string(value: &Value) -> Result<String> {
    ConverterRegistry::global().convert_to_string(value)
}

static_assertions::assert_impl_all!(Value: Send, Sync, Clone);
static_assertions::assert_impl_all!(ValueType: Send, Sync, Clone);
static_assertions::assert_impl_all!(Error: Send, Sync);
