//! Read model for the externally maintained date dimension.

use chrono::{Datelike, NaiveDate};
use diesel::{pg::Pg, prelude::*};

use yotei_core::util::date::weekday_of;

use crate::db::schema;

/// One row of the `calendar_date` table.
///
/// The table enumerates every calendar day with display attributes and is
/// refreshed by an out-of-scope batch job roughly 300 days ahead. This
/// engine only ever reads it; a missing row means "no special styling",
/// never an error.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, serde::Serialize)]
#[diesel(table_name = schema::calendar_date)]
#[diesel(check_for_backend(Pg))]
pub struct DateRow {
    pub date: NaiveDate,
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub week_of_year: i32,
    pub week_of_month: i32,
    /// 1 = Sunday through 7 = Saturday.
    pub day_of_week: i16,
    pub holiday_color: Option<String>,
}

impl DateRow {
    /// ## Summary
    /// Derives the dimension attributes for a date, matching what the
    /// out-of-band batch job writes. Used to seed in-memory stores.
    #[must_use]
    pub fn for_date(date: NaiveDate, holiday_color: Option<String>) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let lead = i32::from(weekday_of(first)) - 1;
        let day = i32::try_from(date.day()).unwrap_or(1);
        Self {
            date,
            year: date.year(),
            month: i32::try_from(date.month()).unwrap_or(1),
            day,
            week_of_year: i32::try_from(date.iso_week().week()).unwrap_or(1),
            week_of_month: (day - 1 + lead) / 7 + 1,
            day_of_week: i16::from(weekday_of(date)),
            holiday_color,
        }
    }
}
