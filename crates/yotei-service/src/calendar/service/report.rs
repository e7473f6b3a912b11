//! Month and week calendar aggregation.
//!
//! Merges the externally maintained date dimension with the requesting
//! user's occurrences into per-day view rows. Reads only; the dimension
//! itself is populated by an out-of-scope batch job.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use yotei_core::util::date::{
    MonthRef, add_days, compose_date, first_of_week, last_day_of_month, last_of_week, weekday_of,
};
use yotei_db::model::date_dimension::DateRow;
use yotei_db::model::occurrence::Occurrence;
use yotei_db::store::{DateDimension, ScheduleStore};

use crate::calendar::view::{CalendarDayView, WeekDayView, WeekView};
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Builds the month calendar for a user: one view row per calendar day in
/// ascending date order, each merging the dimension attributes (weekday,
/// holiday color) with the occurrences visible to the user on that day.
///
/// Month 0 and 13 are folded into the adjacent year before aggregation,
/// matching the navigation controls. Days the dimension does not cover
/// get a computed weekday and no color rather than an error.
///
/// ## Errors
/// Returns a validation error when the month is out of range even after
/// normalization, or any storage error.
#[tracing::instrument(skip(store))]
pub async fn month_view<S>(
    store: &mut S,
    month: MonthRef,
    user_id: Uuid,
) -> ServiceResult<Vec<CalendarDayView>>
where
    S: ScheduleStore + DateDimension,
{
    let month = month.normalized();
    if !(1..=12).contains(&month.month) {
        return Err(ServiceError::ValidationError(format!(
            "month out of range: {}",
            month.month
        )));
    }

    let dimension: HashMap<NaiveDate, DateRow> = store
        .date_rows_for_month(month.year, month.month)
        .await?
        .into_iter()
        .map(|row| (row.date, row))
        .collect();

    let days = last_day_of_month(month.year, u32::try_from(month.month).unwrap_or(1));
    let mut views = Vec::with_capacity(days as usize);
    for day in 1..=days {
        let date = compose_date(month.year, month.month, day);
        let occurrences = store.find_occurrences(user_id, date).await?;
        views.push(assemble_day(date, dimension.get(&date), occurrences));
    }

    tracing::trace!(days = views.len(), "Month view assembled");
    Ok(views)
}

/// ## Summary
/// Builds the Sunday-to-Saturday week containing `anchor`, flagging the
/// day equal to the caller-supplied `today` (the engine itself reads no
/// clock), plus the dates the previous/next week controls hop to.
///
/// ## Errors
/// Returns any storage error.
#[tracing::instrument(skip(store))]
pub async fn week_view<S>(
    store: &mut S,
    anchor: NaiveDate,
    today: NaiveDate,
    user_id: Uuid,
) -> ServiceResult<WeekView>
where
    S: ScheduleStore + DateDimension,
{
    let first = first_of_week(anchor);
    let last = last_of_week(anchor);

    let mut days = Vec::with_capacity(7);
    let mut date = first;
    while date <= last {
        let row = store.date_row(date).await?;
        let occurrences = store.find_occurrences(user_id, date).await?;
        days.push(WeekDayView {
            day: assemble_day(date, row.as_ref(), occurrences),
            is_today: date == today,
        });
        date = add_days(date, 1);
    }

    Ok(WeekView {
        days,
        prev_week: add_days(first, -1),
        next_week: add_days(last, 1),
    })
}

fn assemble_day(
    date: NaiveDate,
    row: Option<&DateRow>,
    occurrences: Vec<Occurrence>,
) -> CalendarDayView {
    CalendarDayView {
        date,
        day: date.day(),
        day_of_week: row.map_or_else(|| i16::from(weekday_of(date)), |r| r.day_of_week),
        color: row.and_then(|r| r.holiday_color.clone()),
        occurrences,
    }
}
