//! Name/value metadata for enums that convert to and from strings.
//!
//! Implement [`ConvertibleEnum`] with `#[derive(ConvertibleEnum)]` from
//! `horizon-values-macros`. The derive records every variant's name, its
//! discriminant and any alias spellings, and exposes them through an
//! [`EnumType`] handle the converter registry can key on.
//!
//! ```ignore
//! use horizon_values_macros::ConvertibleEnum;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, ConvertibleEnum)]
//! #[convert(flags)]
//! enum Anchor {
//!     None = 0,
//!     Left = 1,
//!     #[convert(alias = "Up")]
//!     Top = 2,
//! }
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

/// One named value of a [`ConvertibleEnum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumVariant {
    /// Canonical name, used when formatting.
    pub name: &'static str,
    /// Discriminant.
    pub value: i64,
    /// Additional spellings accepted when parsing.
    pub aliases: &'static [&'static str],
}

impl EnumVariant {
    /// Returns true if `token` matches the name or an alias, ignoring ASCII case.
    pub fn matches(&self, token: &str) -> bool {
        self.name.eq_ignore_ascii_case(token)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(token))
    }
}

/// Enums whose values have a textual form.
pub trait ConvertibleEnum: Copy + Send + Sync + 'static {
    /// Name of the enum type.
    const TYPE_NAME: &'static str;
    /// Whether values combine as bit flags.
    const IS_FLAGS: bool = false;

    /// All variants in declaration order.
    fn variants() -> &'static [EnumVariant];

    /// Discriminant of `self`.
    fn to_value(self) -> i64;

    /// The variant with discriminant `value`, if one is declared.
    fn from_value(value: i64) -> Option<Self>;

    /// Type handle for registry lookups.
    fn enum_type() -> EnumType {
        EnumType::new(Self::TYPE_NAME, Self::variants(), Self::IS_FLAGS)
    }

    /// Canonical name of `self`.
    fn name(self) -> &'static str {
        let value = self.to_value();
        Self::variants()
            .iter()
            .find(|variant| variant.value == value)
            .map(|variant| variant.name)
            .unwrap_or(Self::TYPE_NAME)
    }

    /// Parse a variant name or alias, ignoring ASCII case.
    fn from_name(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::variants()
            .iter()
            .find(|variant| variant.matches(token))
            .and_then(|variant| Self::from_value(variant.value))
    }
}

/// Runtime description of a [`ConvertibleEnum`] type.
///
/// Two handles are equal when their type names are equal.
#[derive(Clone, Copy)]
pub struct EnumType {
    name: &'static str,
    variants: &'static [EnumVariant],
    flags: bool,
}

impl EnumType {
    /// Create a handle from raw metadata.
    pub const fn new(name: &'static str, variants: &'static [EnumVariant], flags: bool) -> Self {
        Self {
            name,
            variants,
            flags,
        }
    }

    /// Handle for `E`.
    pub fn of<E: ConvertibleEnum>() -> Self {
        E::enum_type()
    }

    /// Type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared variants.
    pub fn variants(&self) -> &'static [EnumVariant] {
        self.variants
    }

    /// Whether values combine as bit flags.
    pub fn is_flags(&self) -> bool {
        self.flags
    }

    /// Returns true if `value` is a declared discriminant.
    pub fn is_defined(&self, value: i64) -> bool {
        self.variants.iter().any(|variant| variant.value == value)
    }

    /// Canonical name of the first variant with discriminant `value`.
    pub fn name_of(&self, value: i64) -> Option<&'static str> {
        self.variants
            .iter()
            .find(|variant| variant.value == value)
            .map(|variant| variant.name)
    }

    /// Discriminant for a name or alias, ignoring ASCII case.
    pub fn value_of(&self, token: &str) -> Option<i64> {
        self.variants
            .iter()
            .find(|variant| variant.matches(token))
            .map(|variant| variant.value)
    }

    /// Splits a flags value into declared names, largest flags first.
    ///
    /// Returns `None` when bits remain that no variant covers. Zero maps to
    /// the variant declared with value zero, if any.
    pub fn decompose_flags(&self, value: i64) -> Option<Vec<&'static str>> {
        if value == 0 {
            return self.name_of(0).map(|name| vec![name]);
        }
        let mut remaining = value;
        let mut names = Vec::new();
        let mut candidates: Vec<&EnumVariant> =
            self.variants.iter().filter(|variant| variant.value != 0).collect();
        candidates.sort_by(|a, b| b.value.cmp(&a.value));
        for variant in candidates {
            if remaining & variant.value == variant.value {
                names.push(variant.name);
                remaining &= !variant.value;
            }
        }
        if remaining != 0 {
            return None;
        }
        names.reverse();
        Some(names)
    }
}

impl PartialEq for EnumType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EnumType {}

impl Hash for EnumType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumType")
            .field("name", &self.name)
            .field("variants", &self.variants.len())
            .field("flags", &self.flags)
            .finish()
    }
}

impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: &[EnumVariant] = &[
        EnumVariant { name: "None", value: 0, aliases: &[] },
        EnumVariant { name: "Bold", value: 1, aliases: &["Strong"] },
        EnumVariant { name: "Italic", value: 2, aliases: &[] },
        EnumVariant { name: "Underline", value: 4, aliases: &[] },
    ];

    fn style() -> EnumType {
        EnumType::new("FontStyle", STYLE, true)
    }

    #[test]
    fn test_lookup_by_name_and_alias() {
        let ty = style();
        assert_eq!(ty.value_of("italic"), Some(2));
        assert_eq!(ty.value_of("STRONG"), Some(1));
        assert_eq!(ty.value_of("Oblique"), None);
        assert_eq!(ty.name_of(4), Some("Underline"));
        assert!(ty.is_defined(0));
        assert!(!ty.is_defined(3));
    }

    #[test]
    fn test_decompose_flags() {
        let ty = style();
        assert_eq!(ty.decompose_flags(5), Some(vec!["Bold", "Underline"]));
        assert_eq!(ty.decompose_flags(0), Some(vec!["None"]));
        assert_eq!(ty.decompose_flags(8), None);
    }

    #[test]
    fn test_equality_by_name() {
        let other = EnumType::new("FontStyle", &[], false);
        assert_eq!(style(), other);
        assert_ne!(style(), EnumType::new("FontWeight", STYLE, false));
    }
}
