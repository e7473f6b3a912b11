//! Read-only queries against the `calendar_date` dimension table.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::calendar_date;
use crate::model::date_dimension::DateRow;

/// Loads the dimension row for one date, if the batch job has generated it.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn row_for_date(
    conn: &mut DbConnection<'_>,
    date: NaiveDate,
) -> Result<Option<DateRow>, diesel::result::Error> {
    calendar_date::table
        .find(date)
        .select(DateRow::as_select())
        .first(conn)
        .await
        .optional()
}

/// Loads the dimension rows for a month in ascending date order.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn rows_for_month(
    conn: &mut DbConnection<'_>,
    year: i32,
    month: i32,
) -> Result<Vec<DateRow>, diesel::result::Error> {
    calendar_date::table
        .filter(calendar_date::year.eq(year))
        .filter(calendar_date::month.eq(month))
        .order(calendar_date::date.asc())
        .select(DateRow::as_select())
        .load(conn)
        .await
}
