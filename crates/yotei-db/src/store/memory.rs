//! In-memory implementation of the collaborator traits.
//!
//! Backs the service test suites and embedded single-process callers.
//! State lives in plain maps, transactions are snapshot and restore, and
//! a fault can be injected before the bulk insert step to exercise the
//! write pipeline's atomicity guarantee.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use yotei_core::util::date::{compose_date, last_day_of_month};

use crate::error::{DbError, DbResult};
use crate::model::date_dimension::DateRow;
use crate::model::occurrence::{NewOccurrence, Occurrence};
use crate::model::schedule::{Schedule, ScheduleDraft};
use crate::store::{DateDimension, ScheduleStore};

/// Data under transactional control. The fault switch lives outside so a
/// rollback cannot re-arm a consumed fault.
#[derive(Debug, Clone, Default, PartialEq)]
struct MemoryState {
    schedules: HashMap<Uuid, Schedule>,
    occurrences: Vec<Occurrence>,
    date_rows: BTreeMap<NaiveDate, DateRow>,
}

/// Self-contained store holding schedules, occurrences, and a seeded date
/// dimension.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: MemoryState,
    fail_next_bulk_insert: bool,
}

impl PartialEq for MemoryStore {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Runs `op` with transactional semantics: when it returns an error
    /// the store is restored to its state before the call, so partial
    /// writes are never observable afterwards.
    ///
    /// ## Errors
    /// Returns the error produced by `op` unchanged.
    pub async fn transaction<T, E, F>(&mut self, op: F) -> Result<T, E>
    where
        F: AsyncFnOnce(&mut Self) -> Result<T, E>,
    {
        let snapshot = self.state.clone();
        match op(self).await {
            Ok(value) => Ok(value),
            Err(err) => {
                self.state = snapshot;
                Err(err)
            }
        }
    }

    /// Arms a one-shot failure for the next `bulk_insert_occurrences`
    /// call. Test hook for the pipeline's rollback behavior.
    pub fn inject_bulk_insert_fault(&mut self) {
        self.fail_next_bulk_insert = true;
    }

    /// Adds or replaces one date-dimension row.
    pub fn insert_date_row(&mut self, row: DateRow) {
        self.state.date_rows.insert(row.date, row);
    }

    /// Seeds the dimension with every day of a month, no holiday styling.
    pub fn seed_month(&mut self, year: i32, month: u32) {
        for day in 1..=last_day_of_month(year, month) {
            let date = compose_date(year, i32::try_from(month).unwrap_or(1), day);
            self.insert_date_row(DateRow::for_date(date, None));
        }
    }

    /// Number of stored occurrences, across all schedules.
    #[must_use]
    pub fn occurrence_count(&self) -> usize {
        self.state.occurrences.len()
    }

    /// All occurrences of one schedule in sequence order.
    #[must_use]
    pub fn occurrences_for_schedule(&self, schedule_id: Uuid) -> Vec<Occurrence> {
        let mut rows: Vec<Occurrence> = self
            .state
            .occurrences
            .iter()
            .filter(|occ| occ.schedule_id == schedule_id)
            .cloned()
            .collect();
        rows.sort_by_key(|occ| occ.seq);
        rows
    }
}

impl ScheduleStore for MemoryStore {
    async fn insert_schedule(&mut self, draft: &ScheduleDraft) -> DbResult<Schedule> {
        let schedule = Schedule::from_draft(Uuid::now_v7(), draft, Utc::now());
        self.state.schedules.insert(schedule.id, schedule.clone());
        Ok(schedule)
    }

    async fn update_schedule(
        &mut self,
        id: Uuid,
        draft: &ScheduleDraft,
    ) -> DbResult<Option<Schedule>> {
        let Some(existing) = self.state.schedules.get(&id) else {
            return Ok(None);
        };
        let mut schedule = Schedule::from_draft(id, draft, Utc::now());
        schedule.created_at = existing.created_at;
        self.state.schedules.insert(id, schedule.clone());
        Ok(Some(schedule))
    }

    async fn find_schedule(&mut self, id: Uuid) -> DbResult<Option<Schedule>> {
        Ok(self.state.schedules.get(&id).cloned())
    }

    async fn delete_schedule(&mut self, id: Uuid) -> DbResult<usize> {
        let removed = usize::from(self.state.schedules.remove(&id).is_some());
        // Mirrors the cascading foreign key of the relational schema.
        self.state.occurrences.retain(|occ| occ.schedule_id != id);
        Ok(removed)
    }

    async fn delete_occurrences_for_schedule(&mut self, schedule_id: Uuid) -> DbResult<usize> {
        let before = self.state.occurrences.len();
        self.state
            .occurrences
            .retain(|occ| occ.schedule_id != schedule_id);
        Ok(before - self.state.occurrences.len())
    }

    async fn bulk_insert_occurrences(&mut self, rows: &[NewOccurrence]) -> DbResult<usize> {
        if self.fail_next_bulk_insert {
            self.fail_next_bulk_insert = false;
            return Err(DbError::StorageError(
                "injected bulk insert failure".to_string(),
            ));
        }
        for row in rows {
            self.state.occurrences.push(Occurrence {
                id: Uuid::now_v7(),
                schedule_id: row.schedule_id,
                occur_date: row.occur_date,
                occur_hour: row.occur_hour,
                occur_minute: row.occur_minute,
                owner_id: row.owner_id,
                title: row.title.clone(),
                font_color: row.font_color.clone(),
                seq: row.seq,
            });
        }
        Ok(rows.len())
    }

    async fn find_occurrences(
        &mut self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> DbResult<Vec<Occurrence>> {
        let mut rows: Vec<Occurrence> = self
            .state
            .occurrences
            .iter()
            .filter(|occ| occ.occur_date == date)
            .filter(|occ| {
                occ.owner_id == user_id
                    || self
                        .state
                        .schedules
                        .get(&occ.schedule_id)
                        .is_some_and(|schedule| schedule.is_open)
            })
            .cloned()
            .collect();
        rows.sort_by_key(|occ| (occ.occur_hour, occ.occur_minute, occ.seq));
        Ok(rows)
    }
}

impl DateDimension for MemoryStore {
    async fn date_row(&mut self, date: NaiveDate) -> DbResult<Option<DateRow>> {
        Ok(self.state.date_rows.get(&date).cloned())
    }

    async fn date_rows_for_month(&mut self, year: i32, month: i32) -> DbResult<Vec<DateRow>> {
        Ok(self
            .state
            .date_rows
            .values()
            .filter(|row| row.year == year && row.month == month)
            .cloned()
            .collect())
    }
}
