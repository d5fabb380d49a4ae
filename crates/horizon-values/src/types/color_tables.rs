//! Lazily built lookup tables of named colors.
//!
//! Three tables back the color converter: the color table (web palette plus
//! user constants), the system color table, and the sorted standard values
//! list. Each is populated on first use behind its own `OnceLock`, so
//! initializing one never waits on another.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use horizon_values_core::{ConvertibleEnum, PerfSpan};

use super::color::Color;
use super::known_color::KnownColor;
use crate::error::{Error, Result};

/// A source of named constants of type `T`.
pub trait NamedConstants<T> {
    /// Every constant as a `(name, value)` pair, in a stable order.
    fn named_constants(&self) -> Vec<(String, T)>;
}

/// The web palette, `Transparent` through `RebeccaPurple`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebColors;

impl NamedConstants<Color> for WebColors {
    fn named_constants(&self) -> Vec<(String, Color)> {
        KnownColor::web_colors()
            .map(|known| (known.name().to_owned(), Color::from_known(known)))
            .collect()
    }
}

/// The theme-dependent system colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemColors;

impl NamedConstants<Color> for SystemColors {
    fn named_constants(&self) -> Vec<(String, Color)> {
        KnownColor::system_colors()
            .map(|known| (known.name().to_owned(), Color::from_known(known)))
            .collect()
    }
}

/// User-defined named colors.
#[derive(Debug, Clone, Default)]
pub struct ColorConstants {
    entries: Vec<(String, u32)>,
}

impl ColorConstants {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constant.
    ///
    /// Names must be non-empty, must not contain quotes, and must not repeat
    /// (ignoring case) a known color or an earlier constant.
    pub fn define(&mut self, name: impl Into<String>, argb: u32) -> Result<()> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.contains(['\'', '"']) {
            return Err(Error::argument("name", format!("'{name}' is not a usable color name")));
        }
        if KnownColor::from_name(trimmed).is_some() {
            return Err(Error::argument("name", format!("'{trimmed}' is already a known color")));
        }
        if self
            .entries
            .iter()
            .any(|(existing, _)| existing.eq_ignore_ascii_case(trimmed))
        {
            return Err(Error::argument("name", format!("'{trimmed}' is defined twice")));
        }
        self.entries.push((trimmed.to_owned(), argb));
        Ok(())
    }

    /// Number of constants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no constant is defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NamedConstants<Color> for ColorConstants {
    fn named_constants(&self) -> Vec<(String, Color)> {
        self.entries
            .iter()
            .map(|(name, argb)| (name.clone(), Color::named(name.as_str(), *argb)))
            .collect()
    }
}

/// A case-insensitive name table that also remembers insertion order.
#[derive(Debug, Default)]
pub struct NamedColorTable {
    by_name: HashMap<String, Color>,
    ordered: Vec<Color>,
}

impl NamedColorTable {
    fn from_sources(sources: &[&dyn NamedConstants<Color>]) -> Self {
        let mut table = NamedColorTable::default();
        for source in sources {
            for (name, color) in source.named_constants() {
                let key = name.to_ascii_lowercase();
                if table.by_name.contains_key(&key) {
                    continue;
                }
                table.by_name.insert(key, color.clone());
                table.ordered.push(color);
            }
        }
        table
    }

    /// Look a name up, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&Color> {
        self.by_name.get(&name.to_ascii_lowercase())
    }

    /// The first color, in table order, whose ARGB equals `argb`.
    pub fn find_argb(&self, argb: u32) -> Option<&Color> {
        self.ordered.iter().find(|color| color.argb() == argb)
    }

    /// Colors in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.ordered.iter()
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns true for an empty table.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// The named-color state shared by color and brush converters.
#[derive(Debug, Default)]
pub struct ColorTables {
    constants: ColorConstants,
    colors: OnceLock<NamedColorTable>,
    system_colors: OnceLock<NamedColorTable>,
    standard_values: OnceLock<Vec<Color>>,
}

impl ColorTables {
    /// Tables with the built-in colors only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables that also know `constants`.
    pub fn with_constants(constants: ColorConstants) -> Self {
        Self {
            constants,
            ..Self::default()
        }
    }

    /// Start building tables with user constants.
    pub fn builder() -> ColorTablesBuilder {
        ColorTablesBuilder::default()
    }

    /// Process-wide tables with the built-in colors only.
    pub fn global() -> &'static Arc<ColorTables> {
        static GLOBAL: OnceLock<Arc<ColorTables>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(ColorTables::new()))
    }

    /// The web palette followed by the user constants.
    pub fn colors(&self) -> &NamedColorTable {
        self.colors.get_or_init(|| {
            let _span = PerfSpan::new("color_tables::colors");
            NamedColorTable::from_sources(&[&WebColors, &self.constants])
        })
    }

    /// The system colors.
    pub fn system_colors(&self) -> &NamedColorTable {
        self.system_colors.get_or_init(|| {
            let _span = PerfSpan::new("color_tables::system_colors");
            NamedColorTable::from_sources(&[&SystemColors])
        })
    }

    /// Look `name` up in the color table, then the system color table.
    pub fn lookup(&self, name: &str) -> Option<Color> {
        self.colors()
            .get(name)
            .or_else(|| self.system_colors().get(name))
            .cloned()
    }

    /// The first named color with this exact ARGB value. System colors are
    /// not considered since their values follow the theme.
    pub fn normalize(&self, argb: u32) -> Option<Color> {
        self.colors().find_argb(argb).cloned()
    }

    /// Union of both tables, without duplicates, sorted by name.
    pub fn standard_values(&self) -> &[Color] {
        self.standard_values.get_or_init(|| {
            let _span = PerfSpan::new("color_tables::standard_values");
            let mut values: Vec<Color> = Vec::new();
            for color in self.colors().iter().chain(self.system_colors().iter()) {
                if !values.contains(color) {
                    values.push(color.clone());
                }
            }
            values.sort_by(|a, b| a.name().cmp(&b.name()));
            values
        })
    }
}

/// Collects user constants for a [`ColorTables`].
#[derive(Debug, Default)]
pub struct ColorTablesBuilder {
    constants: ColorConstants,
}

impl ColorTablesBuilder {
    /// Add a named color. See [`ColorConstants::define`] for the rules.
    pub fn color(mut self, name: impl Into<String>, color: impl Into<Color>) -> Result<Self> {
        self.constants.define(name, color.into().argb())?;
        Ok(self)
    }

    /// Finish.
    pub fn build(self) -> ColorTables {
        ColorTables::with_constants(self.constants)
    }
}

static_assertions::assert_impl_all!(ColorTables: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_order() {
        let tables = ColorTables::new();
        assert_eq!(tables.lookup("black").and_then(|c| c.known_color()), Some(KnownColor::Black));
        assert_eq!(
            tables.lookup("WINDOWTEXT").and_then(|c| c.known_color()),
            Some(KnownColor::WindowText)
        );
        assert!(tables.lookup("NoSuchColor").is_none());
    }

    #[test]
    fn test_normalize_prefers_declaration_order() {
        let tables = ColorTables::new();
        assert_eq!(tables.normalize(0xFF00FFFF).and_then(|c| c.known_color()), Some(KnownColor::Aqua));
        assert_eq!(tables.normalize(0xFFFF00FF).and_then(|c| c.known_color()), Some(KnownColor::Fuchsia));
        // Only a system color has this value.
        assert!(tables.normalize(0xFF0078D7).is_none());
    }

    #[test]
    fn test_constants() {
        let mut constants = ColorConstants::new();
        constants.define("Brand", 0xFF336699).unwrap();
        assert!(constants.define("brand", 0xFF000000).is_err());
        assert!(constants.define("Red", 0xFF000000).is_err());
        assert!(constants.define("'quoted'", 0xFF000000).is_err());

        let tables = ColorTables::with_constants(constants);
        let brand = tables.lookup("BRAND").unwrap();
        assert_eq!(brand.user_name(), Some("Brand"));
        assert_eq!(tables.normalize(0xFF336699), Some(brand));
    }

    #[test]
    fn test_builder() {
        let tables = ColorTables::builder()
            .color("Accent", Color::from_rgb(0x12, 0x34, 0x56))
            .unwrap()
            .build();
        assert_eq!(tables.lookup("accent").map(|c| c.argb()), Some(0xFF123456));
        assert!(ColorTables::builder().color("", Color::EMPTY).is_err());
    }

    #[test]
    fn test_standard_values_sorted() {
        let tables = ColorTables::new();
        let values = tables.standard_values();
        assert_eq!(values.len(), 175);
        assert!(values.windows(2).all(|pair| pair[0].name() <= pair[1].name()));
    }
}
