//! Models for generated schedule occurrences.

use chrono::NaiveDate;
use diesel::{pg::Pg, prelude::*};
use uuid::Uuid;

use crate::db::schema;

/// One concrete calendar-day instance generated from a schedule.
///
/// Occurrence rows are never edited individually; the write pipeline
/// replaces the whole set for a schedule on every save.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Queryable,
    Selectable,
    Identifiable,
    Associations,
    serde::Serialize,
)]
#[diesel(table_name = schema::schedule_occurrence)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(super::schedule::Schedule, foreign_key = schedule_id))]
pub struct Occurrence {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub occur_date: NaiveDate,
    /// Start hour copied from the schedule at generation time.
    pub occur_hour: i16,
    /// Start minute copied from the schedule at generation time.
    pub occur_minute: i16,
    pub owner_id: Uuid,
    /// Title snapshot; later title edits propagate through regeneration.
    pub title: String,
    pub font_color: Option<String>,
    /// Contiguous from 1 in chronological order within a schedule.
    pub seq: i32,
}

/// New occurrence for insertion.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = schema::schedule_occurrence)]
pub struct NewOccurrence {
    pub schedule_id: Uuid,
    pub occur_date: NaiveDate,
    pub occur_hour: i16,
    pub occur_minute: i16,
    pub owner_id: Uuid,
    pub title: String,
    pub font_color: Option<String>,
    pub seq: i32,
}
