//! Date and time values with a round-trip text form.
//!
//! The canonical form is ISO 8601 with only the parts that carry
//! information: `2024-03-05`, `2024-03-05T14:30`, `2024-03-05T14:30:15.25Z`,
//! `0001-01-01T09:00+02:00`. Parsing also accepts a space instead of `T`,
//! `±hhmm` offsets, time-only strings and culture short dates.

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use horizon_values_core::convert_debug;

use crate::culture::{Culture, DateOrder};
use crate::error::{Error, Result};

/// How a [`DateTimeValue`] relates to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateTimeKind {
    /// No zone information.
    #[default]
    Unspecified,
    /// The wall-clock time is UTC.
    Utc,
    /// The wall-clock time is at this offset from UTC.
    Local(FixedOffset),
}

/// A wall-clock date and time with an optional zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeValue {
    local: NaiveDateTime,
    kind: DateTimeKind,
}

const YEAR_ONE: NaiveDate = match NaiveDate::from_ymd_opt(1, 1, 1) {
    Some(date) => date,
    None => panic!("year 1 is representable"),
};

const TICKS_PER_SECOND: u32 = 10_000_000;
const NANOS_PER_TICK: u32 = 100;
const MAX_FRACTION_DIGITS: usize = 7;

impl DateTimeValue {
    /// Midnight, January 1st of year 1, unspecified kind.
    pub const MIN: DateTimeValue = DateTimeValue {
        local: NaiveDateTime::new(YEAR_ONE, NaiveTime::MIN),
        kind: DateTimeKind::Unspecified,
    };

    pub fn new(local: NaiveDateTime, kind: DateTimeKind) -> Self {
        Self { local, kind }
    }

    /// A value with no zone information.
    pub fn unspecified(local: NaiveDateTime) -> Self {
        Self::new(local, DateTimeKind::Unspecified)
    }

    /// A UTC value.
    pub fn utc(local: NaiveDateTime) -> Self {
        Self::new(local, DateTimeKind::Utc)
    }

    /// A value at a fixed UTC offset.
    pub fn with_offset(local: NaiveDateTime, offset: FixedOffset) -> Self {
        Self::new(local, DateTimeKind::Local(offset))
    }

    /// The wall-clock date and time.
    pub fn naive(&self) -> NaiveDateTime {
        self.local
    }

    pub fn kind(&self) -> DateTimeKind {
        self.kind
    }

    /// The instant in UTC, `None` for unspecified values.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self.kind {
            DateTimeKind::Unspecified => None,
            DateTimeKind::Utc => Some(self.local.and_utc()),
            DateTimeKind::Local(offset) => self
                .local
                .checked_sub_offset(offset)
                .map(|utc| utc.and_utc()),
        }
    }

    /// Sub-second part in 100 ns ticks.
    fn ticks(&self) -> u32 {
        (self.local.nanosecond() % 1_000_000_000) / NANOS_PER_TICK
    }

    /// Parse the round-trip form or a short date of `culture`.
    ///
    /// An empty string gives [`DateTimeValue::MIN`].
    pub fn parse(text: &str, culture: &Culture) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::MIN);
        }
        parse_date_time(text, culture).ok_or_else(|| {
            convert_debug!(input = text, "invalid date and time");
            Error::format(text, "not a valid date and time")
        })
    }
}

impl Default for DateTimeValue {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<DateTime<Utc>> for DateTimeValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::utc(value.naive_utc())
    }
}

impl From<DateTime<FixedOffset>> for DateTimeValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::with_offset(value.naive_local(), *value.offset())
    }
}

impl From<NaiveDateTime> for DateTimeValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::unspecified(value)
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.local.date();
        let time = self.local.time();
        write!(f, "{:04}-{:02}-{:02}", date.year(), date.month(), date.day())?;

        let ticks = self.ticks();
        let midnight = time.hour() == 0 && time.minute() == 0 && time.second() == 0 && ticks == 0;
        if !(midnight && self.kind == DateTimeKind::Unspecified) {
            write!(f, "T{:02}:{:02}", time.hour(), time.minute())?;
            if time.second() != 0 || ticks != 0 {
                write!(f, ":{:02}", time.second())?;
            }
            if ticks != 0 {
                let fraction = format!("{ticks:07}");
                write!(f, ".{}", fraction.trim_end_matches('0'))?;
            }
        }

        match self.kind {
            DateTimeKind::Unspecified => Ok(()),
            DateTimeKind::Utc => f.write_str("Z"),
            DateTimeKind::Local(offset) => {
                let seconds = offset.local_minus_utc();
                let sign = if seconds < 0 { '-' } else { '+' };
                let minutes = seconds.unsigned_abs() / 60;
                write!(f, "{sign}{:02}:{:02}", minutes / 60, minutes % 60)
            }
        }
    }
}

fn parse_date_time(text: &str, culture: &Culture) -> Option<DateTimeValue> {
    let (date_part, time_part) = match text.find(['T', 't']) {
        Some(index) => (Some(&text[..index]), Some(&text[index + 1..])),
        None => match text.split_once(char::is_whitespace) {
            Some((date, time)) => (Some(date), Some(time)),
            None if text.contains(':') => (None, Some(text)),
            None => (Some(text), None),
        },
    };

    let date = match date_part {
        Some(date) => parse_date(date.trim(), culture)?,
        None => YEAR_ONE,
    };
    let (time, kind) = match time_part {
        Some(time) => parse_time(time.trim())?,
        None => (NaiveTime::MIN, DateTimeKind::Unspecified),
    };
    Some(DateTimeValue::new(date.and_time(time), kind))
}

fn parse_date(text: &str, culture: &Culture) -> Option<NaiveDate> {
    let iso: Vec<&str> = text.split('-').collect();
    if iso.len() == 3 && iso[0].len() == 4 {
        return NaiveDate::from_ymd_opt(number(iso[0])?, number(iso[1])?, number(iso[2])?);
    }

    let fields: Vec<&str> = text.split(culture.date_separator()).collect();
    let [first, second, third] = fields.as_slice() else {
        return None;
    };
    let (year, month, day) = match culture.date_order() {
        DateOrder::MonthDayYear => (third, first, second),
        DateOrder::DayMonthYear => (third, second, first),
        DateOrder::YearMonthDay => (first, second, third),
    };
    NaiveDate::from_ymd_opt(number(year)?, number(month)?, number(day)?)
}

fn parse_time(text: &str) -> Option<(NaiveTime, DateTimeKind)> {
    let (clock, kind) = split_zone(text)?;
    let mut parts = clock.split(':');
    let hour = number(parts.next()?)?;
    let minute = number(parts.next()?)?;
    let (second, nanos) = match parts.next() {
        Some(seconds) => parse_seconds(seconds)?,
        None => (0, 0),
    };
    if parts.next().is_some() {
        return None;
    }
    Some((NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)?, kind))
}

fn split_zone(text: &str) -> Option<(&str, DateTimeKind)> {
    if let Some(clock) = text.strip_suffix(['Z', 'z']) {
        return Some((clock.trim_end(), DateTimeKind::Utc));
    }
    let Some(index) = text.rfind(['+', '-']) else {
        return Some((text, DateTimeKind::Unspecified));
    };
    let sign = if text[index..].starts_with('-') { -1 } else { 1 };
    let zone = text[index + 1..].trim();
    let (hours, minutes) = match zone.split_once(':') {
        Some((hours, minutes)) => (hours, minutes),
        None if zone.len() == 4 => zone.split_at(2),
        None => (zone, "0"),
    };
    let hours: i32 = number(hours)?;
    let minutes: i32 = number(minutes)?;
    if hours > 14 || minutes > 59 {
        return None;
    }
    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?;
    Some((text[..index].trim_end(), DateTimeKind::Local(offset)))
}

fn parse_seconds(text: &str) -> Option<(u32, u32)> {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };
    let seconds = number(whole)?;
    if fraction.is_empty() {
        return Some((seconds, 0));
    }
    if fraction.len() > MAX_FRACTION_DIGITS || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let ticks: u32 = format!("{fraction:0<7}").parse().ok()?;
    debug_assert!(ticks < TICKS_PER_SECOND);
    Some((seconds, ticks * NANOS_PER_TICK))
}

fn number<T: std::str::FromStr>(text: &str) -> Option<T> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invariant(text: &str) -> DateTimeValue {
        DateTimeValue::parse(text, &Culture::INVARIANT).unwrap()
    }

    #[test]
    fn test_round_trip_forms() {
        for text in [
            "2024-03-05",
            "2024-03-05T14:30",
            "2024-03-05T14:30:15",
            "2024-03-05T14:30:15.25",
            "2024-03-05T14:30:00.0000001",
            "2024-03-05T00:00Z",
            "2024-03-05T09:15+02:00",
            "2024-03-05T09:15-05:30",
        ] {
            assert_eq!(invariant(text).to_string(), text);
        }
    }

    #[test]
    fn test_lenient_forms() {
        assert_eq!(invariant(" 2024-03-05 14:30 ").to_string(), "2024-03-05T14:30");
        assert_eq!(invariant("2024-03-05T14:30+0200").to_string(), "2024-03-05T14:30+02:00");
        assert_eq!(invariant("14:30").to_string(), "0001-01-01T14:30");
        assert_eq!(invariant(""), DateTimeValue::MIN);
    }

    #[test]
    fn test_culture_short_dates() {
        assert_eq!(invariant("03/05/2024").to_string(), "2024-03-05");
        let german = Culture::from_name("de-DE").unwrap();
        let parsed = DateTimeValue::parse("05.03.2024 08:00", &german).unwrap();
        assert_eq!(parsed.to_string(), "2024-03-05T08:00");
    }

    #[test]
    fn test_invalid() {
        for text in ["2024-13-01", "yesterday", "2024-03-05T25:00", "12:00:00.12345678"] {
            let err = DateTimeValue::parse(text, &Culture::INVARIANT).unwrap_err();
            assert!(err.is_format(), "{text}");
        }
    }

    #[test]
    fn test_to_utc() {
        let value = invariant("2024-03-05T09:00+02:00");
        assert_eq!(value.to_utc().map(|utc| utc.hour()), Some(7));
        assert!(invariant("2024-03-05T09:00").to_utc().is_none());
    }
}
