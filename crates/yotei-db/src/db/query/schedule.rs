//! Query composition for `schedule` table operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::schedule;
use crate::model::schedule::{NewSchedule, Schedule, ScheduleChangeset};

/// Inserts a schedule and returns the persisted row.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    row: &NewSchedule<'_>,
) -> Result<Schedule, diesel::result::Error> {
    diesel::insert_into(schedule::table)
        .values(row)
        .returning(Schedule::as_returning())
        .get_result(conn)
        .await
}

/// Applies a changeset to an existing schedule by id.
///
/// Returns `None` when no row with that id exists.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    changes: &ScheduleChangeset<'_>,
) -> Result<Option<Schedule>, diesel::result::Error> {
    diesel::update(schedule::table.find(id))
        .set(changes)
        .returning(Schedule::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// Loads one schedule by id.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find(
    conn: &mut DbConnection<'_>,
    id: Uuid,
) -> Result<Option<Schedule>, diesel::result::Error> {
    schedule::table
        .find(id)
        .select(Schedule::as_select())
        .first(conn)
        .await
        .optional()
}

/// Deletes a schedule row; generated occurrences go with it through the
/// cascading foreign key.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete(
    conn: &mut DbConnection<'_>,
    id: Uuid,
) -> Result<usize, diesel::result::Error> {
    diesel::delete(schedule::table.find(id)).execute(conn).await
}
