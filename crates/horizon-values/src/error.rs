//! Error types for value conversion.

use std::path::PathBuf;

use crate::value::ValueType;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting values.
///
/// Converters fail fast: a composite string such as `"255,0,bad"` is rejected
/// as a whole rather than partially parsed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input text does not match the grammar of the target domain.
    #[error("'{input}' is not a valid value: {message}")]
    Format { input: String, message: String },

    /// The requested direction, destination type or token is not handled.
    #[error("{message}")]
    NotSupported { message: String },

    /// An argument was out of range or otherwise unusable.
    #[error("Invalid argument '{name}': {message}")]
    Argument { name: String, message: String },

    /// A required argument or contextual value was missing.
    #[error("Argument '{name}' must not be null")]
    ArgumentNull { name: String },

    /// An internal invariant was violated.
    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    /// Configuration could not be parsed or applied.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Configuration file I/O error.
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a format error for `input`.
    pub fn format(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a not-supported error.
    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::NotSupported {
            message: message.into(),
        }
    }

    /// Create an argument error.
    pub fn argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Argument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a missing-argument error.
    pub fn argument_null(name: impl Into<String>) -> Self {
        Self::ArgumentNull { name: name.into() }
    }

    /// Create an invalid-operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The converter cannot produce `destination`.
    pub fn cannot_convert_to(converter: &str, destination: &ValueType) -> Self {
        Self::not_supported(format!("{converter} cannot convert to {destination}"))
    }

    /// The converter cannot consume a value of type `source`.
    pub fn cannot_convert_from(converter: &str, source: Option<&ValueType>) -> Self {
        match source {
            Some(source) => Self::not_supported(format!("{converter} cannot convert from {source}")),
            None => Self::not_supported(format!("{converter} cannot convert from null")),
        }
    }

    /// Returns true for [`Error::Format`].
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// Returns true for [`Error::NotSupported`].
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_names_input() {
        let err = Error::format("not a color", "expected a color name");
        assert!(err.is_format());
        assert!(err.to_string().contains("'not a color'"));
    }

    #[test]
    fn test_cannot_convert_messages() {
        let err = Error::cannot_convert_to("CommandConverter", &ValueType::String);
        assert!(err.is_not_supported());
        assert_eq!(err.to_string(), "CommandConverter cannot convert to string");

        let err = Error::cannot_convert_from("ColorConverter", None);
        assert_eq!(err.to_string(), "ColorConverter cannot convert from null");
    }
}
