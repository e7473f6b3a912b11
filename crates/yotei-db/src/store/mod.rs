//! Collaborator interfaces between the scheduling services and storage.
//!
//! The service layer is written against these traits rather than a
//! concrete backend: [`pg`] implements them directly on a pooled
//! diesel-async connection, [`memory`] on a self-contained in-process
//! store used by tests and embedded callers.
//!
//! Atomicity is the caller's concern: the write pipeline runs its
//! operations inside one transaction of whichever backend it holds
//! (`AsyncConnection::transaction` for Postgres,
//! [`memory::MemoryStore::transaction`] for the in-memory store).

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::DbResult;
use crate::model::date_dimension::DateRow;
use crate::model::occurrence::{NewOccurrence, Occurrence};
use crate::model::schedule::{Schedule, ScheduleDraft};

pub mod memory;
pub mod pg;

/// Storage operations for schedules and their generated occurrences.
pub trait ScheduleStore: Send {
    /// Inserts a new schedule and returns the persisted row.
    fn insert_schedule(
        &mut self,
        draft: &ScheduleDraft,
    ) -> impl Future<Output = DbResult<Schedule>> + Send;

    /// Updates an existing schedule; `None` when the id is unknown.
    fn update_schedule(
        &mut self,
        id: Uuid,
        draft: &ScheduleDraft,
    ) -> impl Future<Output = DbResult<Option<Schedule>>> + Send;

    /// Loads one schedule by id.
    fn find_schedule(
        &mut self,
        id: Uuid,
    ) -> impl Future<Output = DbResult<Option<Schedule>>> + Send;

    /// Deletes a schedule row, returning the number of rows removed.
    fn delete_schedule(&mut self, id: Uuid) -> impl Future<Output = DbResult<usize>> + Send;

    /// Removes every occurrence generated for a schedule. Idempotent.
    fn delete_occurrences_for_schedule(
        &mut self,
        schedule_id: Uuid,
    ) -> impl Future<Output = DbResult<usize>> + Send;

    /// Inserts a freshly expanded occurrence set in one batch.
    fn bulk_insert_occurrences(
        &mut self,
        rows: &[NewOccurrence],
    ) -> impl Future<Output = DbResult<usize>> + Send;

    /// Occurrences visible to `user_id` on `date`: all occurrences of open
    /// schedules plus the user's own, ordered by start time then sequence.
    fn find_occurrences(
        &mut self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> impl Future<Output = DbResult<Vec<Occurrence>>> + Send;
}

/// Read access to the externally maintained date dimension.
pub trait DateDimension: Send {
    /// The dimension row for one date; `None` when the batch job has not
    /// generated it yet.
    fn date_row(
        &mut self,
        date: NaiveDate,
    ) -> impl Future<Output = DbResult<Option<DateRow>>> + Send;

    /// All dimension rows of a month in ascending date order.
    fn date_rows_for_month(
        &mut self,
        year: i32,
        month: i32,
    ) -> impl Future<Output = DbResult<Vec<DateRow>>> + Send;
}
