//! Culture-specific separators and number formatting.
//!
//! A [`Culture`] decides how composite values are split (`"255,0,0"` versus
//! `"255;0;0"`) and which character is the decimal point. Converters receive
//! an optional culture; when none is supplied they use [`Culture::current`].
//!
//! The current culture is detected once from the system locale (through
//! `sys-locale`) and can be replaced with [`Culture::set_current`].

use std::borrow::Cow;
use std::fmt;

use horizon_values_core::logging::targets;
use parking_lot::RwLock;

/// Order of the day, month and year fields in a short date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateOrder {
    /// `MM/dd/yyyy`
    MonthDayYear,
    /// `dd.MM.yyyy`
    DayMonthYear,
    /// `yyyy/MM/dd`
    YearMonthDay,
}

/// Formatting conventions of a locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Culture {
    name: Cow<'static, str>,
    list_separator: char,
    decimal_separator: char,
    date_order: DateOrder,
    date_separator: char,
}

const fn builtin(
    name: &'static str,
    list_separator: char,
    decimal_separator: char,
    date_order: DateOrder,
    date_separator: char,
) -> Culture {
    Culture {
        name: Cow::Borrowed(name),
        list_separator,
        decimal_separator,
        date_order,
        date_separator,
    }
}

const BUILTIN_CULTURES: &[Culture] = &[
    builtin("", ',', '.', DateOrder::MonthDayYear, '/'),
    builtin("en-US", ',', '.', DateOrder::MonthDayYear, '/'),
    builtin("en-GB", ',', '.', DateOrder::DayMonthYear, '/'),
    builtin("de-DE", ';', ',', DateOrder::DayMonthYear, '.'),
    builtin("fr-FR", ';', ',', DateOrder::DayMonthYear, '/'),
    builtin("ru-RU", ';', ',', DateOrder::DayMonthYear, '.'),
    builtin("ja-JP", ',', '.', DateOrder::YearMonthDay, '/'),
];

static CURRENT: RwLock<Option<Culture>> = parking_lot::const_rwlock(None);

impl Culture {
    /// The culture-independent conventions: `,` lists and `.` decimals.
    pub const INVARIANT: Culture = builtin("", ',', '.', DateOrder::MonthDayYear, '/');

    /// The invariant culture.
    pub fn invariant() -> Culture {
        Self::INVARIANT
    }

    /// All cultures known by name.
    pub fn builtin() -> &'static [Culture] {
        BUILTIN_CULTURES
    }

    /// Look a culture up by its BCP 47 or POSIX name.
    ///
    /// `"de_DE.UTF-8"`, `"de-de"` and `"de-DE"` are equivalent. A name whose
    /// region is unknown inherits the conventions of the first culture with
    /// the same language. The empty string and `"invariant"` give
    /// [`Culture::INVARIANT`].
    pub fn from_name(name: &str) -> Option<Culture> {
        let normalized = normalize_name(name);
        if normalized.is_empty() || normalized.eq_ignore_ascii_case("invariant") {
            return Some(Self::INVARIANT);
        }

        if let Some(culture) = BUILTIN_CULTURES
            .iter()
            .find(|culture| culture.name.eq_ignore_ascii_case(&normalized))
        {
            return Some(culture.clone());
        }

        let language = normalized.split('-').next().unwrap_or_default();
        BUILTIN_CULTURES
            .iter()
            .find(|culture| {
                culture
                    .name
                    .split('-')
                    .next()
                    .is_some_and(|lang| !lang.is_empty() && lang.eq_ignore_ascii_case(language))
            })
            .map(|culture| Culture {
                name: Cow::Owned(normalized.clone()),
                ..culture.clone()
            })
    }

    /// The culture of the operating system, or invariant when unknown.
    pub fn system() -> Culture {
        match sys_locale::get_locale() {
            Some(locale) => Self::from_name(&locale).unwrap_or_else(|| {
                tracing::debug!(target: targets::CULTURE, %locale, "unknown system locale, using invariant");
                Self::INVARIANT
            }),
            None => Self::INVARIANT,
        }
    }

    /// The process-wide culture used when a conversion gets none.
    pub fn current() -> Culture {
        if let Some(culture) = CURRENT.read().as_ref() {
            return culture.clone();
        }
        let mut current = CURRENT.write();
        current.get_or_insert_with(Self::system).clone()
    }

    /// Replace the process-wide culture.
    pub fn set_current(culture: Culture) {
        tracing::debug!(target: targets::CULTURE, culture = %culture, "current culture changed");
        *CURRENT.write() = Some(culture);
    }

    /// Forget the process-wide culture; the next [`current`](Self::current)
    /// call detects it again.
    pub fn reset_current() {
        *CURRENT.write() = None;
    }

    /// Copy of this culture with another list separator.
    pub fn with_list_separator(mut self, separator: char) -> Culture {
        self.list_separator = separator;
        self
    }

    /// BCP 47 name, empty for the invariant culture.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true for the invariant culture.
    pub fn is_invariant(&self) -> bool {
        self.name.is_empty()
    }

    /// Character separating the parts of composite values.
    pub fn list_separator(&self) -> char {
        self.list_separator
    }

    /// Character between integral and fractional digits.
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Field order of short dates.
    pub fn date_order(&self) -> DateOrder {
        self.date_order
    }

    /// Character between the fields of short dates.
    pub fn date_separator(&self) -> char {
        self.date_separator
    }

    /// Format a float the shortest way that parses back to the same value.
    pub fn format_f64(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_owned();
        }
        if value.is_infinite() {
            return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
        }
        let text = value.to_string();
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }

    /// Format an `f32` the shortest way that parses back to the same value.
    pub fn format_f32(&self, value: f32) -> String {
        if value.is_nan() || value.is_infinite() {
            return self.format_f64(value as f64);
        }
        let text = value.to_string();
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }

    /// Parse a float written with this culture's decimal separator.
    ///
    /// Accepts `Infinity`, `-Infinity`, `∞` and `NaN` in any case. Surrounding
    /// whitespace is ignored.
    pub fn parse_f64(&self, text: &str) -> Option<f64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        if body.eq_ignore_ascii_case("infinity") || body == "∞" {
            return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
        }
        if body.eq_ignore_ascii_case("nan") {
            return Some(f64::NAN);
        }
        // Rust accepts "inf" and "infinity"; those spellings are not part of
        // the grammar, and neither is a leading sign on the body.
        if !body.starts_with(|c: char| c.is_ascii_digit() || c == self.decimal_separator) {
            return None;
        }
        let normalized = if self.decimal_separator == '.' {
            Cow::Borrowed(text)
        } else {
            if text.contains('.') {
                return None;
            }
            Cow::Owned(text.replace(self.decimal_separator, "."))
        };
        normalized.parse::<f64>().ok()
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::INVARIANT
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invariant() {
            f.write_str("invariant")
        } else {
            f.write_str(&self.name)
        }
    }
}

/// `de_DE.UTF-8@euro` → `de-DE`
fn normalize_name(name: &str) -> String {
    let name = name.trim();
    let name = name.split(['.', '@']).next().unwrap_or_default();
    if name.eq_ignore_ascii_case("C") || name.eq_ignore_ascii_case("POSIX") {
        return String::new();
    }
    name.replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        let german = Culture::from_name("de-DE").unwrap();
        assert_eq!(german.list_separator(), ';');
        assert_eq!(german.decimal_separator(), ',');

        assert_eq!(Culture::from_name("de_DE.UTF-8"), Some(german.clone()));
        assert_eq!(Culture::from_name("DE-de"), Some(german));
        assert_eq!(Culture::from_name("C"), Some(Culture::INVARIANT));
        assert_eq!(Culture::from_name(""), Some(Culture::INVARIANT));
        assert!(Culture::from_name("xx-YY").is_none());
    }

    #[test]
    fn test_language_fallback() {
        let austrian = Culture::from_name("de-AT").unwrap();
        assert_eq!(austrian.name(), "de-AT");
        assert_eq!(austrian.list_separator(), ';');
        let english = Culture::from_name("en").unwrap();
        assert_eq!(english.decimal_separator(), '.');
    }

    #[test]
    fn test_number_round_trip() {
        let german = Culture::from_name("de-DE").unwrap();
        assert_eq!(german.format_f64(1.5), "1,5");
        assert_eq!(german.parse_f64("1,5"), Some(1.5));
        assert_eq!(german.parse_f64("1.5"), None);
        assert_eq!(Culture::INVARIANT.format_f64(96.0), "96");
        assert_eq!(Culture::INVARIANT.parse_f64(" 2.25 "), Some(2.25));
        assert_eq!(Culture::INVARIANT.format_f32(0.1), "0.1");
    }

    #[test]
    fn test_special_values() {
        let invariant = Culture::INVARIANT;
        assert_eq!(invariant.parse_f64("Infinity"), Some(f64::INFINITY));
        assert_eq!(invariant.parse_f64("-infinity"), Some(f64::NEG_INFINITY));
        assert!(invariant.parse_f64("NaN").unwrap().is_nan());
        assert_eq!(invariant.parse_f64("inf"), None);
        assert_eq!(invariant.parse_f64("--1"), None);
        assert_eq!(invariant.parse_f64(""), None);
        assert_eq!(invariant.format_f64(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_list_separator_override() {
        let culture = Culture::INVARIANT.with_list_separator('|');
        assert_eq!(culture.list_separator(), '|');
        assert!(culture.is_invariant());
    }
}
