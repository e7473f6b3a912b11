//! The schedule master record and its write-side companions.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::{pg::Pg, prelude::*};
use uuid::Uuid;

use crate::db::{enums::RepeatType, schema};

/// A user-authored schedule, possibly repeating.
///
/// Owns its generated occurrences exclusively; every write replaces the
/// whole occurrence set.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, serde::Serialize)]
#[diesel(table_name = schema::schedule)]
#[diesel(check_for_backend(Pg))]
pub struct Schedule {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    /// Category code ("1" personal, "2" shared).
    pub category: String,
    pub contents: String,
    /// Whether the schedule is visible to users other than the owner.
    pub is_open: bool,
    pub start_date: NaiveDate,
    pub start_hour: i16,
    pub start_minute: i16,
    pub end_date: NaiveDate,
    pub end_hour: i16,
    pub end_minute: i16,
    pub repeat_type: RepeatType,
    /// Weekday 1 to 7 for weekly repeats, day-of-month 1 to 31 for monthly.
    pub repeat_anchor: Option<i16>,
    /// Inclusive upper bound for generated occurrences of repeating
    /// schedules; ignored when `repeat_type` is `None`.
    pub repeat_end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    /// Materializes a draft as a full row, used by stores that assign ids
    /// themselves rather than relying on a column default.
    #[must_use]
    pub fn from_draft(id: Uuid, draft: &ScheduleDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id: draft.owner_id,
            title: draft.title.clone(),
            category: draft.category.clone(),
            contents: draft.contents.clone(),
            is_open: draft.is_open,
            start_date: draft.start_date,
            start_hour: draft.start_hour,
            start_minute: draft.start_minute,
            end_date: draft.end_date,
            end_hour: draft.end_hour,
            end_minute: draft.end_minute,
            repeat_type: draft.repeat_type,
            repeat_anchor: draft.repeat_anchor,
            repeat_end_date: draft.repeat_end_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Schedule field values as submitted by the (out-of-scope) input layer.
///
/// An absent `id` means "new schedule"; a present one targets an existing
/// row and fails with not-found if it no longer exists.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ScheduleDraft {
    pub id: Option<Uuid>,
    pub owner_id: Uuid,
    pub title: String,
    pub category: String,
    pub contents: String,
    pub is_open: bool,
    pub start_date: NaiveDate,
    pub start_hour: i16,
    pub start_minute: i16,
    pub end_date: NaiveDate,
    pub end_hour: i16,
    pub end_minute: i16,
    pub repeat_type: RepeatType,
    pub repeat_anchor: Option<i16>,
    pub repeat_end_date: Option<NaiveDate>,
}

/// Insert struct for creating new schedules
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::schedule)]
pub struct NewSchedule<'a> {
    pub owner_id: Uuid,
    pub title: &'a str,
    pub category: &'a str,
    pub contents: &'a str,
    pub is_open: bool,
    pub start_date: NaiveDate,
    pub start_hour: i16,
    pub start_minute: i16,
    pub end_date: NaiveDate,
    pub end_hour: i16,
    pub end_minute: i16,
    pub repeat_type: RepeatType,
    pub repeat_anchor: Option<i16>,
    pub repeat_end_date: Option<NaiveDate>,
}

impl<'a> NewSchedule<'a> {
    #[must_use]
    pub fn from_draft(draft: &'a ScheduleDraft) -> Self {
        Self {
            owner_id: draft.owner_id,
            title: &draft.title,
            category: &draft.category,
            contents: &draft.contents,
            is_open: draft.is_open,
            start_date: draft.start_date,
            start_hour: draft.start_hour,
            start_minute: draft.start_minute,
            end_date: draft.end_date,
            end_hour: draft.end_hour,
            end_minute: draft.end_minute,
            repeat_type: draft.repeat_type,
            repeat_anchor: draft.repeat_anchor,
            repeat_end_date: draft.repeat_end_date,
        }
    }
}

/// Update struct applied when re-saving an existing schedule.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::schedule)]
pub struct ScheduleChangeset<'a> {
    pub title: &'a str,
    pub category: &'a str,
    pub contents: &'a str,
    pub is_open: bool,
    pub start_date: NaiveDate,
    pub start_hour: i16,
    pub start_minute: i16,
    pub end_date: NaiveDate,
    pub end_hour: i16,
    pub end_minute: i16,
    pub repeat_type: RepeatType,
    pub repeat_anchor: Option<Option<i16>>,
    pub repeat_end_date: Option<Option<NaiveDate>>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> ScheduleChangeset<'a> {
    #[must_use]
    pub fn from_draft(draft: &'a ScheduleDraft) -> Self {
        Self {
            title: &draft.title,
            category: &draft.category,
            contents: &draft.contents,
            is_open: draft.is_open,
            start_date: draft.start_date,
            start_hour: draft.start_hour,
            start_minute: draft.start_minute,
            end_date: draft.end_date,
            end_hour: draft.end_hour,
            end_minute: draft.end_minute,
            repeat_type: draft.repeat_type,
            repeat_anchor: Some(draft.repeat_anchor),
            repeat_end_date: Some(draft.repeat_end_date),
            updated_at: Utc::now(),
        }
    }
}
