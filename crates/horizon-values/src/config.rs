//! Converter configuration loaded from TOML.
//!
//! ```toml
//! culture = "de-DE"
//! detect_system_culture = true
//! list_separator = ";"
//! handle_refresh = true
//!
//! [named_colors]
//! Brand = "#336699"
//! ```
//!
//! Every key is optional. [`ConverterConfig::apply`] installs the settings on
//! a registry and the process-wide culture.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use horizon_values_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::converters::color::parse_color;
use crate::converters::{BrushConverter, ColorConverter};
use crate::culture::Culture;
use crate::error::{Error, Result};
use crate::registry::ConverterRegistry;
use crate::types::{ColorConstants, ColorTables};
use crate::value::ValueType;

fn default_true() -> bool {
    true
}

/// Settings for culture selection, refresh handling and custom colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Culture name; overrides system detection when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
    /// Use the operating system locale when `culture` is not set. Otherwise
    /// the invariant culture is used.
    #[serde(default = "default_true")]
    pub detect_system_culture: bool,
    /// Replaces the culture's list separator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_separator: Option<char>,
    /// Whether type refresh notifications clear the converter cache.
    #[serde(default = "default_true")]
    pub handle_refresh: bool,
    /// Extra color names, each mapped to any color text form.
    pub named_colors: BTreeMap<String, String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            culture: None,
            detect_system_culture: true,
            list_separator: None,
            handle_refresh: true,
            named_colors: BTreeMap::new(),
        }
    }
}

impl ConverterConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| Error::config(err.to_string()))
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| Error::config(err.to_string()))
    }

    /// The culture these settings select.
    pub fn resolve_culture(&self) -> Result<Culture> {
        let culture = match &self.culture {
            Some(name) => Culture::from_name(name)
                .ok_or_else(|| Error::config(format!("unknown culture '{name}'")))?,
            None if self.detect_system_culture => Culture::system(),
            None => Culture::invariant(),
        };
        Ok(match self.list_separator {
            Some(separator) => culture.with_list_separator(separator),
            None => culture,
        })
    }

    /// Color tables holding `named_colors`. Values are parsed with the
    /// invariant culture.
    pub fn color_tables(&self) -> Result<ColorTables> {
        let mut constants = ColorConstants::new();
        for (name, text) in &self.named_colors {
            let color = parse_color(ColorTables::global(), text, &Culture::INVARIANT)
                .map_err(|err| Error::config(format!("color '{name}': {err}")))?;
            constants
                .define(name.as_str(), color.argb())
                .map_err(|err| Error::config(format!("color '{name}': {err}")))?;
        }
        Ok(ColorTables::with_constants(constants))
    }

    /// Install these settings: the current culture, the refresh behavior of
    /// `registry`, and color and brush converters that know `named_colors`.
    ///
    /// Nothing is changed if any setting is invalid.
    pub fn apply(&self, registry: &ConverterRegistry) -> Result<()> {
        let culture = self.resolve_culture()?;
        let tables = if self.named_colors.is_empty() {
            None
        } else {
            Some(Arc::new(self.color_tables()?))
        };

        tracing::info!(
            target: targets::CONFIG,
            culture = %culture,
            handle_refresh = self.handle_refresh,
            named_colors = self.named_colors.len(),
            "applying converter configuration"
        );
        Culture::set_current(culture);
        registry.set_handle_refresh(self.handle_refresh);
        if let Some(tables) = tables {
            registry.register_converter(
                ValueType::Color,
                Arc::new(ColorConverter::with_tables(Arc::clone(&tables))),
            );
            registry.register_converter(
                ValueType::Brush,
                Arc::new(BrushConverter::with_tables(tables)),
            );
        }
        Ok(())
    }
}
