//! Ephemeral calendar view aggregates handed to the rendering layer.
//!
//! These are built fresh per request and never persisted.

use chrono::NaiveDate;

use yotei_db::model::occurrence::Occurrence;

/// One calendar day merged with the requesting user's occurrences.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CalendarDayView {
    pub date: NaiveDate,
    /// Day of month, 1 to 31.
    pub day: u32,
    /// 1 = Sunday through 7 = Saturday.
    pub day_of_week: i16,
    /// Holiday styling from the date dimension; `None` when the dimension
    /// has no row or no special color for this day.
    pub color: Option<String>,
    pub occurrences: Vec<Occurrence>,
}

/// A day inside a week view, flagged when it is the current day.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WeekDayView {
    #[serde(flatten)]
    pub day: CalendarDayView,
    pub is_today: bool,
}

/// The Sunday-to-Saturday week around an anchor date, with the hop dates
/// the navigation controls page to.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WeekView {
    pub days: Vec<WeekDayView>,
    pub prev_week: NaiveDate,
    pub next_week: NaiveDate,
}
