//! Timestamp resolution for WhatsApp date and time tokens.
//!
//! Exports write dates as `A/B/Y` in whatever order the exporting phone's
//! locale prefers, and never say which. The order is recovered per token:
//!
//! - first field > 12: it must be the day (`DD/MM`)
//! - second field > 12: it must be the day (`MM/DD`)
//! - otherwise: `DD/MM`, the international convention
//!
//! The last rule is a heuristic. `01/02/24` is read as 1 February even on a US
//! phone, and that is the documented behavior.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use regex::Regex;

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?\s*([AaPp][Mm])?$").expect("valid time pattern")
});

/// Field order of a numeric date token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// `DD/MM/YY`
    DayMonth,
    /// `MM/DD/YY`
    MonthDay,
}

impl DateOrder {
    /// Picks the field order for a date whose first two fields are given.
    pub fn detect(first: u32, second: u32) -> Self {
        if first > 12 {
            DateOrder::DayMonth
        } else if second > 12 {
            DateOrder::MonthDay
        } else {
            DateOrder::DayMonth
        }
    }
}

/// Resolves a date token and a time token into a local date-time.
///
/// Two-digit years are taken as 20YY. A trailing `AM`/`PM` (any case, with or
/// without a separating space) switches to the 12-hour clock; without it the
/// hour is already 24-hour. Missing seconds are zero.
///
/// Out-of-range fields roll over the way a normalizing calendar constructor
/// does, so `31/02/2024` lands on 2 March. `None` is only returned for tokens
/// that are not numeric at all.
///
/// ```
/// use chatview::parsing::resolve_timestamp;
///
/// let ts = resolve_timestamp("13/01/24", "5:30 PM").unwrap();
/// assert_eq!(ts.to_string(), "2024-01-13 17:30:00");
///
/// let ts = resolve_timestamp("01/13/24", "5:30 AM").unwrap();
/// assert_eq!(ts.to_string(), "2024-01-13 05:30:00");
/// ```
pub fn resolve_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let mut fields = date.trim().split('/');
    let first: u32 = fields.next()?.parse().ok()?;
    let second: u32 = fields.next()?.parse().ok()?;
    let mut year: i64 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }

    if year < 100 {
        year += 2000;
    }

    let (day, month) = match DateOrder::detect(first, second) {
        DateOrder::DayMonth => (first, second),
        DateOrder::MonthDay => (second, first),
    };

    let (hour, minute, second) = parse_time(time)?;

    normalized_datetime(year, i64::from(month), i64::from(day), hour, minute, second)
}

/// Splits a time token into 24-hour `(hour, minute, second)`.
fn parse_time(time: &str) -> Option<(i64, i64, i64)> {
    let caps = TIME_RE.captures(time.trim())?;

    let mut hour: i64 = caps.get(1)?.as_str().parse().ok()?;
    let minute: i64 = caps.get(2)?.as_str().parse().ok()?;
    let second: i64 = match caps.get(3) {
        Some(s) => s.as_str().parse().ok()?,
        None => 0,
    };

    if let Some(meridiem) = caps.get(4) {
        let is_pm = meridiem.as_str().eq_ignore_ascii_case("pm");
        if is_pm && hour != 12 {
            hour += 12;
        } else if !is_pm && hour == 12 {
            hour = 0;
        }
    }

    Some((hour, minute, second))
}

/// Builds a date-time from possibly out-of-range fields, carrying overflow
/// into the next larger unit.
fn normalized_datetime(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
) -> Option<NaiveDateTime> {
    let months = year.checked_mul(12)?.checked_add(month - 1)?;
    let y = i32::try_from(months.div_euclid(12)).ok()?;
    let m = u32::try_from(months.rem_euclid(12) + 1).ok()?;

    let start_of_month = NaiveDate::from_ymd_opt(y, m, 1)?.and_hms_opt(0, 0, 0)?;

    let offset = TimeDelta::try_days(day - 1)?
        .checked_add(&TimeDelta::try_hours(hour)?)?
        .checked_add(&TimeDelta::try_minutes(minute)?)?
        .checked_add(&TimeDelta::try_seconds(second)?)?;

    start_of_month.checked_add_signed(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn parts(ts: NaiveDateTime) -> (i32, u32, u32, u32, u32, u32) {
        (
            ts.year(),
            ts.month(),
            ts.day(),
            ts.hour(),
            ts.minute(),
            ts.second(),
        )
    }

    #[test]
    fn test_first_field_above_twelve_is_day() {
        let ts = resolve_timestamp("13/01/24", "5:30 PM").unwrap();
        assert_eq!(parts(ts), (2024, 1, 13, 17, 30, 0));
    }

    #[test]
    fn test_second_field_above_twelve_is_day() {
        let ts = resolve_timestamp("01/13/24", "5:30 AM").unwrap();
        assert_eq!(parts(ts), (2024, 1, 13, 5, 30, 0));
    }

    #[test]
    fn test_ambiguous_defaults_to_day_month() {
        let ts = resolve_timestamp("01/02/24", "9:15").unwrap();
        assert_eq!(parts(ts), (2024, 2, 1, 9, 15, 0));
    }

    #[test]
    fn test_date_order_detect() {
        assert_eq!(DateOrder::detect(13, 1), DateOrder::DayMonth);
        assert_eq!(DateOrder::detect(1, 13), DateOrder::MonthDay);
        assert_eq!(DateOrder::detect(5, 6), DateOrder::DayMonth);
        assert_eq!(DateOrder::detect(12, 12), DateOrder::DayMonth);
    }

    #[test]
    fn test_four_digit_year() {
        let ts = resolve_timestamp("15/01/2024", "10:30:45").unwrap();
        assert_eq!(parts(ts), (2024, 1, 15, 10, 30, 45));
    }

    #[test]
    fn test_twelve_hour_edges() {
        assert_eq!(resolve_timestamp("1/1/24", "12:05 AM").unwrap().hour(), 0);
        assert_eq!(resolve_timestamp("1/1/24", "12:05 PM").unwrap().hour(), 12);
        assert_eq!(resolve_timestamp("1/1/24", "11:59 pm").unwrap().hour(), 23);
        assert_eq!(resolve_timestamp("1/1/24", "1:00:07 am").unwrap().second(), 7);
    }

    #[test]
    fn test_narrow_no_break_space_before_meridiem() {
        let ts = resolve_timestamp("3/14/24", "2:07:33\u{202F}PM").unwrap();
        assert_eq!(parts(ts), (2024, 3, 14, 14, 7, 33));
    }

    #[test]
    fn test_overflowing_day_rolls_into_next_month() {
        let ts = resolve_timestamp("31/02/2024", "10:00").unwrap();
        assert_eq!(parts(ts), (2024, 3, 2, 10, 0, 0));
    }

    #[test]
    fn test_month_zero_rolls_back_a_year() {
        let ts = resolve_timestamp("15/0/2024", "10:00").unwrap();
        assert_eq!(parts(ts), (2023, 12, 15, 10, 0, 0));
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert!(resolve_timestamp("1/2", "10:00").is_none());
        assert!(resolve_timestamp("1/2/3/4", "10:00").is_none());
        assert!(resolve_timestamp("a/b/c", "10:00").is_none());
        assert!(resolve_timestamp("1/2/24", "noon").is_none());
    }
}
