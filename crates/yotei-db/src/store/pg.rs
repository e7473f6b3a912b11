//! Postgres implementation of the collaborator traits, delegating to the
//! query modules over a pooled diesel-async connection.
//!
//! Implemented on the connection rather than the pool so a single
//! transaction can span every operation of one save.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::query;
use crate::error::DbResult;
use crate::model::date_dimension::DateRow;
use crate::model::occurrence::{NewOccurrence, Occurrence};
use crate::model::schedule::{NewSchedule, Schedule, ScheduleChangeset, ScheduleDraft};
use crate::store::{DateDimension, ScheduleStore};

impl ScheduleStore for DbConnection<'_> {
    async fn insert_schedule(&mut self, draft: &ScheduleDraft) -> DbResult<Schedule> {
        let row = NewSchedule::from_draft(draft);
        Ok(query::schedule::insert(self, &row).await?)
    }

    async fn update_schedule(
        &mut self,
        id: Uuid,
        draft: &ScheduleDraft,
    ) -> DbResult<Option<Schedule>> {
        let changes = ScheduleChangeset::from_draft(draft);
        Ok(query::schedule::update(self, id, &changes).await?)
    }

    async fn find_schedule(&mut self, id: Uuid) -> DbResult<Option<Schedule>> {
        Ok(query::schedule::find(self, id).await?)
    }

    async fn delete_schedule(&mut self, id: Uuid) -> DbResult<usize> {
        Ok(query::schedule::delete(self, id).await?)
    }

    async fn delete_occurrences_for_schedule(&mut self, schedule_id: Uuid) -> DbResult<usize> {
        Ok(query::occurrence::delete_by_schedule_id(self, schedule_id).await?)
    }

    async fn bulk_insert_occurrences(&mut self, rows: &[NewOccurrence]) -> DbResult<usize> {
        Ok(query::occurrence::insert_occurrences(self, rows).await?)
    }

    async fn find_occurrences(
        &mut self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> DbResult<Vec<Occurrence>> {
        Ok(query::occurrence::for_user_on_date(self, user_id, date).await?)
    }
}

impl DateDimension for DbConnection<'_> {
    async fn date_row(&mut self, date: NaiveDate) -> DbResult<Option<DateRow>> {
        Ok(query::date_dimension::row_for_date(self, date).await?)
    }

    async fn date_rows_for_month(&mut self, year: i32, month: i32) -> DbResult<Vec<DateRow>> {
        Ok(query::date_dimension::rows_for_month(self, year, month).await?)
    }
}
