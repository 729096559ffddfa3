/*
 * OSTk Physics
 * Copyright (C) 2021-onward Christopher Rabotin <christopher.rabotin@gmail.com> et al. (cf. AUTHORS.md)
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * Documentation: https://nyxspace.com/
 */

use core::fmt;
use core::str::FromStr;

use super::TimeError;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Text representations understood by [DateTime::parse].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    /// Auto-detected by shape on parse.
    Undefined,
    /// `YYYY-MM-DD hh:mm:ss.mmm.uuu.nnn`
    Standard,
    /// `YYYY-MM-DDThh:mm:ss.fffffffff`
    ISO8601,
    /// `d Mon YYYY hh:mm:ss.fffffffff`
    STK,
}

/// A calendar date in [1400, 9999].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Date {
    year: i32,
    month: u8,
    day: u8,
}

impl Date {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, TimeError> {
        check_range("year", i64::from(year), 1400, 9999)?;
        check_range("month", i64::from(month), 1, 12)?;
        check_range("day", i64::from(day), 1, i64::from(days_in_month(year, month)))?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A time of day with nanosecond resolution.
///
/// Second 60 is rejected: an instant inside a positive leap second is undefined input, callers
/// must choose a convention before building the calendar representation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Time {
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
}

impl Time {
    pub fn new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Result<Self, TimeError> {
        check_range("hour", i64::from(hour), 0, 23)?;
        check_range("minute", i64::from(minute), 0, 59)?;
        check_range("second", i64::from(second), 0, 59)?;
        check_range("nanosecond", i64::from(nanosecond), 0, 999_999_999)?;
        Ok(Self {
            hour,
            minute,
            second,
            nanosecond,
        })
    }

    pub fn midnight() -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    pub const fn nanosecond(&self) -> u32 {
        self.nanosecond
    }
}

/// A calendar date and time of day, without an attached time scale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    pub const fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    pub const fn date(&self) -> Date {
        self.date
    }

    pub const fn time(&self) -> Time {
        self.time
    }

    /// Parses the provided text.
    ///
    /// With [Format::Undefined] the format is detected from the shape of the text; any other
    /// format rejects text that does not conform to it.
    pub fn parse(text: &str, format: Format) -> Result<Self, TimeError> {
        let format = match format {
            Format::Undefined => detect_format(text)?,
            explicit => explicit,
        };
        match format {
            Format::ISO8601 => parse_iso8601(text),
            Format::Standard => parse_standard(text),
            Format::STK => parse_stk(text),
            Format::Undefined => unreachable!("format was just detected"),
        }
    }

    /// Formats this date-time in the provided format. [Format::Undefined] falls back to
    /// [Format::Standard]. The sub-second digits are trimmed so that parsing the text back is
    /// lossless.
    pub fn to_string_with_format(&self, format: Format) -> String {
        let t = self.time;
        match format {
            Format::ISO8601 => format!(
                "{}T{:02}:{:02}:{:02}{}",
                self.date,
                t.hour,
                t.minute,
                t.second,
                iso_fraction(t.nanosecond)
            ),
            Format::STK => format!(
                "{} {} {} {:02}:{:02}:{:02}{}",
                self.date.day,
                MONTH_NAMES[usize::from(self.date.month) - 1],
                self.date.year,
                t.hour,
                t.minute,
                t.second,
                iso_fraction(t.nanosecond)
            ),
            Format::Standard | Format::Undefined => format!(
                "{} {:02}:{:02}:{:02}{}",
                self.date,
                t.hour,
                t.minute,
                t.second,
                standard_fraction(t.nanosecond)
            ),
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_string_with_format(Format::Standard))
    }
}

impl FromStr for DateTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Format::Undefined)
    }
}

fn check_range(
    element: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), TimeError> {
    if value < min || value > max {
        return Err(TimeError::ElementOutOfRange {
            element,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn detect_format(text: &str) -> Result<Format, TimeError> {
    if text.contains('T') {
        return Ok(Format::ISO8601);
    }
    match text.split_whitespace().count() {
        2 => Ok(Format::Standard),
        4 => Ok(Format::STK),
        _ => Err(TimeError::DateTimeParse {
            text: text.to_string(),
            reason: "shape matches no known format".to_string(),
        }),
    }
}

fn parse_error(text: &str, reason: &str) -> TimeError {
    TimeError::DateTimeParse {
        text: text.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_int<T: FromStr>(text: &str, field: &str, raw: &str) -> Result<T, TimeError> {
    raw.parse()
        .map_err(|_| parse_error(text, &format!("invalid {field} '{raw}'")))
}

fn parse_date(text: &str, raw: &str) -> Result<Date, TimeError> {
    let mut parts = raw.splitn(3, '-');
    let year = parse_int(text, "year", parts.next().unwrap_or_default())?;
    let month = parse_int(text, "month", parts.next().unwrap_or_default())?;
    let day = parse_int(text, "day", parts.next().unwrap_or_default())?;
    Date::new(year, month, day)
}

/// Parses `hh:mm:ss` with an optional `.fffffffff` fraction of up to nine digits.
fn parse_time_with_iso_fraction(text: &str, raw: &str) -> Result<Time, TimeError> {
    let (base, fraction) = match raw.split_once('.') {
        Some((base, fraction)) => (base, Some(fraction)),
        None => (raw, None),
    };
    let mut parts = base.splitn(3, ':');
    let hour = parse_int(text, "hour", parts.next().unwrap_or_default())?;
    let minute = parse_int(text, "minute", parts.next().unwrap_or_default())?;
    let second = parse_int(text, "second", parts.next().unwrap_or_default())?;

    let nanosecond = match fraction {
        None => 0,
        Some(digits) => {
            if digits.is_empty() || digits.len() > 9 || !digits.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(parse_error(text, "sub-second field must be 1 to 9 digits"));
            }
            let value: u32 = parse_int(text, "sub-second", digits)?;
            value * 10u32.pow(9 - digits.len() as u32)
        }
    };

    Time::new(hour, minute, second, nanosecond)
}

/// Parses `hh:mm:ss` followed by up to three `.ddd` groups (milli, micro, nano).
fn parse_time_standard(text: &str, raw: &str) -> Result<Time, TimeError> {
    let mut groups = raw.split('.');
    let base = groups.next().unwrap_or_default();

    let mut parts = base.splitn(3, ':');
    let hour = parse_int(text, "hour", parts.next().unwrap_or_default())?;
    let minute = parse_int(text, "minute", parts.next().unwrap_or_default())?;
    let second = parse_int(text, "second", parts.next().unwrap_or_default())?;

    let mut nanosecond: u32 = 0;
    let mut scale = 1_000_000u32;
    for group in groups.by_ref().take(3) {
        if group.is_empty() || group.len() > 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return Err(parse_error(text, "sub-second group must be 1 to 3 digits"));
        }
        let value: u32 = parse_int(text, "sub-second group", group)?;
        nanosecond += value * scale;
        if scale == 1 {
            break;
        }
        scale /= 1_000;
    }
    if groups.next().is_some() {
        return Err(parse_error(text, "too many sub-second groups"));
    }

    Time::new(hour, minute, second, nanosecond)
}

fn parse_iso8601(text: &str) -> Result<DateTime, TimeError> {
    let (date_raw, time_raw) = text
        .split_once('T')
        .ok_or_else(|| parse_error(text, "missing 'T' separator"))?;
    Ok(DateTime::new(
        parse_date(text, date_raw)?,
        parse_time_with_iso_fraction(text, time_raw)?,
    ))
}

fn parse_standard(text: &str) -> Result<DateTime, TimeError> {
    let (date_raw, time_raw) = text
        .split_once(' ')
        .ok_or_else(|| parse_error(text, "missing space separator"))?;
    Ok(DateTime::new(
        parse_date(text, date_raw)?,
        parse_time_standard(text, time_raw)?,
    ))
}

fn parse_stk(text: &str) -> Result<DateTime, TimeError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 4 {
        return Err(parse_error(text, "expected 'd Mon YYYY hh:mm:ss[.f]'"));
    }
    let day = parse_int(text, "day", tokens[0])?;
    let month = MONTH_NAMES
        .iter()
        .position(|name| *name == tokens[1])
        .ok_or_else(|| parse_error(text, &format!("unknown month '{}'", tokens[1])))?
        as u8
        + 1;
    let year = parse_int(text, "year", tokens[2])?;
    Ok(DateTime::new(
        Date::new(year, month, day)?,
        parse_time_with_iso_fraction(text, tokens[3])?,
    ))
}

/// `.fffffffff` trimmed of trailing zeros, empty when the nanosecond count is zero.
fn iso_fraction(nanosecond: u32) -> String {
    if nanosecond == 0 {
        return String::new();
    }
    let digits = format!("{nanosecond:09}");
    format!(".{}", digits.trim_end_matches('0'))
}

/// `.mmm[.uuu[.nnn]]` groups, empty when the nanosecond count is zero.
fn standard_fraction(nanosecond: u32) -> String {
    if nanosecond == 0 {
        return String::new();
    }
    let millis = nanosecond / 1_000_000;
    let micros = (nanosecond / 1_000) % 1_000;
    let nanos = nanosecond % 1_000;
    if nanos != 0 {
        format!(".{millis:03}.{micros:03}.{nanos:03}")
    } else if micros != 0 {
        format!(".{millis:03}.{micros:03}")
    } else {
        format!(".{millis:03}")
    }
}

#[cfg(test)]
mod ut_date_time {
    use super::*;

    #[test]
    fn test_parse_iso8601() {
        let dt = DateTime::parse("2018-01-01T00:00:37.123456789", Format::ISO8601).unwrap();
        assert_eq!(dt.date(), Date::new(2018, 1, 1).unwrap());
        assert_eq!(dt.time().second(), 37);
        assert_eq!(dt.time().nanosecond(), 123_456_789);
    }

    #[test]
    fn test_parse_standard_groups() {
        let dt = DateTime::parse("2018-01-01 00:00:00.123.456.789", Format::Standard).unwrap();
        assert_eq!(dt.time().nanosecond(), 123_456_789);

        let dt = DateTime::parse("2018-01-01 00:00:00.123", Format::Standard).unwrap();
        assert_eq!(dt.time().nanosecond(), 123_000_000);
    }

    #[test]
    fn test_parse_stk() {
        let dt = DateTime::parse("1 Jan 2018 00:00:00.5", Format::STK).unwrap();
        assert_eq!(dt.date(), Date::new(2018, 1, 1).unwrap());
        assert_eq!(dt.time().nanosecond(), 500_000_000);
    }

    #[test]
    fn test_auto_detection() {
        assert_eq!(
            DateTime::parse("2018-01-01T12:34:56", Format::Undefined).unwrap(),
            DateTime::parse("2018-01-01 12:34:56", Format::Undefined).unwrap()
        );
        assert_eq!(
            DateTime::parse("1 Jan 2018 12:34:56", Format::Undefined).unwrap(),
            DateTime::parse("2018-01-01T12:34:56", Format::ISO8601).unwrap()
        );
    }

    #[test]
    fn test_explicit_format_rejects_other_shapes() {
        assert!(DateTime::parse("2018-01-01 00:00:00", Format::ISO8601).is_err());
        assert!(DateTime::parse("1 Jan 2018 00:00:00", Format::Standard).is_err());
    }

    #[test]
    fn test_formatting_round_trips() {
        for format in [Format::Standard, Format::ISO8601, Format::STK] {
            for ns in [0u32, 123_000_000, 123_456_000, 123_456_789, 1] {
                let dt = DateTime::new(
                    Date::new(2023, 12, 31).unwrap(),
                    Time::new(23, 59, 59, ns).unwrap(),
                );
                let text = dt.to_string_with_format(format);
                assert_eq!(DateTime::parse(&text, format).unwrap(), dt, "{text}");
            }
        }
    }

    #[test]
    fn test_year_range() {
        assert!(Date::new(1399, 12, 31).is_err());
        assert!(Date::new(10_000, 1, 1).is_err());
        assert!(Date::new(1400, 1, 1).is_ok());
        assert!(Date::new(9999, 12, 31).is_ok());
    }

    #[test]
    fn test_calendar_validation() {
        assert!(Date::new(2018, 2, 29).is_err());
        assert!(Date::new(2020, 2, 29).is_ok());
        assert!(Date::new(1900, 2, 29).is_err());
        assert!(Date::new(2000, 2, 29).is_ok());
        assert!(Time::new(23, 59, 60, 0).is_err());
    }
}
