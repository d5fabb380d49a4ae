use std::sync::Arc;

use horizon_values_core::convert_debug;

use crate::context::ConversionContext;
use crate::converter::{TypeConverter, source_text};
use crate::culture::Culture;
use crate::error::{Error, Result};
use crate::registry::{ConverterRegistry, Visibility};
use crate::types::CommandTable;
use crate::value::{Value, ValueType};

pub(crate) fn register(registry: &ConverterRegistry) {
    registry.register(ValueType::Command, Visibility::Public, || {
        Arc::new(CommandConverter)
    });
}

/// Looks commands up by `Name` or `Owner.Name`.
///
/// The context's command table is searched first, then the standard
/// application commands. Commands have no text form of their own, so
/// converting one to anything fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandConverter;

impl TypeConverter for CommandConverter {
    fn name(&self) -> &'static str {
        "CommandConverter"
    }

    fn can_convert_to(&self, _ctx: Option<&ConversionContext>, _destination: &ValueType) -> bool {
        false
    }

    fn convert_from(
        &self,
        ctx: Option<&ConversionContext>,
        _culture: Option<&Culture>,
        value: &Value,
    ) -> Result<Value> {
        let path = source_text(self.name(), value)?.trim();
        if path.is_empty() {
            return Ok(Value::Null);
        }
        ctx.and_then(ConversionContext::commands)
            .and_then(|table| table.find(path))
            .or_else(|| CommandTable::standard().find(path))
            .map(Value::Command)
            .ok_or_else(|| {
                convert_debug!(command = path, "unknown command");
                Error::format(path, "unknown command")
            })
    }

    fn convert_to(
        &self,
        _ctx: Option<&ConversionContext>,
        _culture: Option<&Culture>,
        _value: &Value,
        destination: &ValueType,
    ) -> Result<Value> {
        Err(Error::cannot_convert_to(self.name(), destination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Command;

    #[test]
    fn test_standard_and_context_commands() {
        let value = CommandConverter.convert_from_invariant_string("Copy").unwrap();
        let Value::Command(command) = value else {
            panic!("expected a command");
        };
        assert_eq!(command.owner(), "ApplicationCommands");

        let mut table = CommandTable::new();
        table.add(Command::new("Copy", "Editor", "Copy Selection"));
        let context = ConversionContext::new().with_commands(table);
        let value = CommandConverter
            .convert_from(Some(&context), None, &Value::from("copy"))
            .unwrap();
        assert!(matches!(value, Value::Command(ref command) if command.owner() == "Editor"));
    }

    #[test]
    fn test_errors() {
        assert_eq!(CommandConverter.convert_from_invariant_string("").unwrap(), Value::Null);
        assert!(CommandConverter.convert_from_invariant_string("Launch").unwrap_err().is_format());
        let copy = CommandConverter.convert_from_invariant_string("Copy").unwrap();
        assert!(CommandConverter.convert_to_invariant_string(&copy).unwrap_err().is_not_supported());
    }
}
