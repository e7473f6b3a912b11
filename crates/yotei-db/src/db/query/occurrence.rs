//! Query composition for `schedule_occurrence` table operations.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::{schedule, schedule_occurrence};
use crate::model::occurrence::{NewOccurrence, Occurrence};

/// Batch insert occurrences into the database.
///
/// ## Summary
/// Inserts multiple occurrence records in a single query.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert_occurrences(
    conn: &mut DbConnection<'_>,
    occurrences: &[NewOccurrence],
) -> Result<usize, diesel::result::Error> {
    if occurrences.is_empty() {
        return Ok(0);
    }

    diesel::insert_into(schedule_occurrence::table)
        .values(occurrences)
        .execute(conn)
        .await
}

/// Deletes all occurrences for a given schedule ID.
///
/// ## Summary
/// Hard deletes occurrence records for a schedule; a no-op when none exist.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_by_schedule_id(
    conn: &mut DbConnection<'_>,
    schedule_id: Uuid,
) -> Result<usize, diesel::result::Error> {
    diesel::delete(
        schedule_occurrence::table.filter(schedule_occurrence::schedule_id.eq(schedule_id)),
    )
    .execute(conn)
    .await
}

/// ## Summary
/// Loads the occurrences visible to a user on one date: those belonging to
/// open schedules plus the user's own, ordered by start time then sequence.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn for_user_on_date(
    conn: &mut DbConnection<'_>,
    user_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<Occurrence>, diesel::result::Error> {
    schedule_occurrence::table
        .inner_join(schedule::table)
        .filter(schedule_occurrence::occur_date.eq(date))
        .filter(
            schedule::is_open
                .eq(true)
                .or(schedule_occurrence::owner_id.eq(user_id)),
        )
        .order((
            schedule_occurrence::occur_hour.asc(),
            schedule_occurrence::occur_minute.asc(),
            schedule_occurrence::seq.asc(),
        ))
        .select(Occurrence::as_select())
        .load(conn)
        .await
}
