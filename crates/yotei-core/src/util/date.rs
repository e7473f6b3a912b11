//! Calendar day arithmetic for schedule expansion and month aggregation.
//!
//! All functions are pure and operate on local wall-clock dates; the engine
//! has no time-zone concept. The weekday encoding is 1 = Sunday through
//! 7 = Saturday, matching the repeat anchor stored on schedules and the
//! `day_of_week` column of the date dimension.

use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::constants::DATE_FORMAT;
use crate::error::{CoreError, CoreResult};

/// A year/month pair as supplied by the calendar navigation controls.
///
/// The month may be 0 or 13 when the user pages past a year boundary;
/// [`MonthRef::normalized`] folds those into the adjacent year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRef {
    pub year: i32,
    pub month: i32,
}

impl MonthRef {
    #[must_use]
    pub const fn new(year: i32, month: i32) -> Self {
        Self { year, month }
    }

    /// ## Summary
    /// Folds an out-of-range month into the adjacent year: month 0 becomes
    /// December of the previous year, month 13 becomes January of the next.
    ///
    /// A single fold is applied, mirroring the navigation controls which
    /// only ever step one month at a time.
    #[must_use]
    pub const fn normalized(self) -> Self {
        if self.month < 1 {
            Self {
                year: self.year - 1,
                month: self.month + 12,
            }
        } else if self.month > 12 {
            Self {
                year: self.year + 1,
                month: self.month - 12,
            }
        } else {
            self
        }
    }
}

/// Returns true for leap years: divisible by 4, except centuries not
/// divisible by 400.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days (28 to 31) in the given month.
#[must_use]
pub const fn last_day_of_month(year: i32, month: u32) -> u32 {
    debug_assert!(1 <= month && month <= 12);
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Returns the date offset by `days`, which may be negative.
///
/// Saturates at the bounds of the representable date range.
#[must_use]
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(TimeDelta::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// ## Summary
/// Returns the date offset by `months` calendar months, which may be
/// negative. The day-of-month is clamped to the length of the target
/// month, so January 31 plus one month is the last day of February.
#[must_use]
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + i32::try_from(date.month0()).unwrap_or(0) + months;
    let year = total.div_euclid(12);
    let month = u32::try_from(total.rem_euclid(12) + 1).unwrap_or(1);
    let day = date.day().min(last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX)
}

/// Returns the weekday number of `date`: 1 = Sunday through 7 = Saturday.
#[must_use]
pub fn weekday_of(date: NaiveDate) -> u8 {
    (date.weekday().num_days_from_sunday() + 1) as u8
}

/// ## Summary
/// Builds a date from year, month, and day components under the engine's
/// lenient carry-over policy:
///
/// - a month outside 1 to 12 carries into the adjacent year
///   (month 13 is January of the following year);
/// - a day past the end of the month carries the excess forward
///   (day 31 in a 28-day February resolves to March 3).
///
/// This single policy is relied on by the monthly recurrence expansion,
/// which probes every month with the anchor day-of-month regardless of
/// month length. `day` must be at least 1.
#[must_use]
pub fn compose_date(year: i32, month: i32, day: u32) -> NaiveDate {
    debug_assert!(day >= 1);
    let total = year * 12 + (month - 1);
    let mut y = total.div_euclid(12);
    let mut m = u32::try_from(total.rem_euclid(12) + 1).unwrap_or(1);
    let mut d = day.max(1);
    loop {
        let last = last_day_of_month(y, m);
        if d <= last {
            break;
        }
        d -= last;
        if m == 12 {
            m = 1;
            y += 1;
        } else {
            m += 1;
        }
    }
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MAX)
}

/// Parses a `yyyy-mm-dd` date string.
///
/// ## Errors
/// Returns a `ParseError` if the string does not match the wire format.
pub fn parse_date(value: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|err| CoreError::ParseError(format!("invalid date {value:?}: {err}")))
}

/// Formats a date in the `yyyy-mm-dd` wire format.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Returns the Sunday that starts the week containing `date`.
#[must_use]
pub fn first_of_week(date: NaiveDate) -> NaiveDate {
    add_days(date, -(i64::from(weekday_of(date)) - 1))
}

/// Returns the Saturday that ends the week containing `date`.
#[must_use]
pub fn last_of_week(date: NaiveDate) -> NaiveDate {
    add_days(first_of_week(date), 6)
}
