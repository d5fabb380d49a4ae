use std::sync::Arc;

use crate::context::ConversionContext;
use crate::converter::TypeConverter;
use crate::culture::Culture;
use crate::error::Result;
use crate::value::{Value, ValueType};

/// Wraps the converter of `inner` so that blank strings and null map to
/// [`Value::Null`].
#[derive(Debug, Clone)]
pub struct NullableConverter {
    inner_type: ValueType,
    inner: Arc<dyn TypeConverter>,
}

impl NullableConverter {
    pub fn new(inner_type: ValueType, inner: Arc<dyn TypeConverter>) -> Self {
        Self { inner_type, inner }
    }

    /// The wrapped type.
    pub fn inner_type(&self) -> &ValueType {
        &self.inner_type
    }

    /// The wrapped converter.
    pub fn inner(&self) -> &Arc<dyn TypeConverter> {
        &self.inner
    }
}

impl TypeConverter for NullableConverter {
    fn name(&self) -> &'static str {
        "NullableConverter"
    }

    fn can_convert_from(&self, ctx: Option<&ConversionContext>, source: &ValueType) -> bool {
        *source == self.inner_type || self.inner.can_convert_from(ctx, source)
    }

    fn can_convert_to(&self, ctx: Option<&ConversionContext>, destination: &ValueType) -> bool {
        *destination == self.inner_type || self.inner.can_convert_to(ctx, destination)
    }

    fn convert_from(
        &self,
        ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::String(text) if text.trim().is_empty() => Ok(Value::Null),
            other if other.value_type().as_ref() == Some(&self.inner_type) => Ok(other.clone()),
            other => self.inner.convert_from(ctx, culture, other),
        }
    }

    fn convert_to(
        &self,
        ctx: Option<&ConversionContext>,
        culture: Option<&Culture>,
        value: &Value,
        destination: &ValueType,
    ) -> Result<Value> {
        if value.is_null() {
            return Ok(match destination {
                ValueType::String => Value::String(String::new()),
                _ => Value::Null,
            });
        }
        if *destination == self.inner_type {
            return Ok(value.clone());
        }
        self.inner.convert_to(ctx, culture, value, destination)
    }

    fn standard_values(&self, ctx: Option<&ConversionContext>) -> Option<Vec<Value>> {
        self.inner.standard_values(ctx).map(|mut values| {
            values.insert(0, Value::Null);
            values
        })
    }

    fn standard_values_exclusive(&self) -> bool {
        self.inner.standard_values_exclusive()
    }
}
