//! Expansion of a schedule into its concrete occurrence rows.
//!
//! This is pure computation: the same schedule value always expands to the
//! same occurrence set, which is what makes the write pipeline's
//! delete-then-regenerate approach safe.

use chrono::{Datelike, NaiveDate};

use yotei_core::constants::{CATEGORY_SHARED, SHARED_SCHEDULE_COLOR};
use yotei_core::util::date::{add_days, compose_date, weekday_of};
use yotei_db::db::enums::RepeatType;
use yotei_db::model::occurrence::NewOccurrence;
use yotei_db::model::schedule::Schedule;

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Expands a schedule into its ordered occurrence rows.
///
/// Every row copies the schedule's start hour and minute, owner, and a
/// snapshot of its title; sequence numbers run contiguously from 1 in
/// chronological order.
///
/// - `None`: one occurrence per day from the start date through the end
///   date; an end date before the start date yields an empty set.
/// - `Weekly`: occurrences on the anchor weekday, every seven days from
///   the first match at or after the start date, through the repeat end
///   date.
/// - `Monthly`: occurrences on the anchor day-of-month, probing each month
///   from the start date's month through the repeat end date. Months too
///   short for the anchor resolve under the lenient carry-over policy of
///   [`compose_date`], so anchor 31 lands on March 2 or 3 when probing
///   February.
///
/// ## Errors
/// Returns a validation error when a repeating schedule has a missing or
/// out-of-range anchor, is missing its repeat end date, or has a repeat
/// end date earlier than its start date.
pub fn expand(schedule: &Schedule) -> ServiceResult<Vec<NewOccurrence>> {
    match schedule.repeat_type {
        RepeatType::None => Ok(expand_single(schedule)),
        RepeatType::Weekly => expand_weekly(schedule),
        RepeatType::Monthly => expand_monthly(schedule),
    }
}

fn expand_single(schedule: &Schedule) -> Vec<NewOccurrence> {
    let mut emitter = Emitter::new(schedule);
    let mut date = schedule.start_date;
    while date <= schedule.end_date {
        emitter.emit(date);
        date = add_days(date, 1);
    }
    emitter.into_rows()
}

fn expand_weekly(schedule: &Schedule) -> ServiceResult<Vec<NewOccurrence>> {
    let anchor = weekday_anchor(schedule)?;
    let bound = repeat_bound(schedule)?;

    // Each weekday occurs exactly once in any seven consecutive days; the
    // explicit cap guarantees termination even on corrupted anchor values.
    let mut date = schedule.start_date;
    let mut aligned = false;
    for _ in 0..7 {
        if weekday_of(date) == anchor {
            aligned = true;
            break;
        }
        date = add_days(date, 1);
    }
    if !aligned {
        return Err(ServiceError::InvariantViolation(
            "weekday alignment did not converge within seven days",
        ));
    }

    let mut emitter = Emitter::new(schedule);
    while date <= bound {
        emitter.emit(date);
        date = add_days(date, 7);
    }
    Ok(emitter.into_rows())
}

fn expand_monthly(schedule: &Schedule) -> ServiceResult<Vec<NewOccurrence>> {
    let anchor = month_day_anchor(schedule)?;
    let bound = repeat_bound(schedule)?;
    let start = schedule.start_date;

    let year = start.year();
    let month = i32::try_from(start.month()).unwrap_or(1);

    // The anchor day of the start month may already have passed.
    let mut offset = 0;
    let mut candidate = compose_date(year, month, anchor);
    if candidate < start {
        offset = 1;
        candidate = compose_date(year, month + offset, anchor);
    }

    let mut emitter = Emitter::new(schedule);
    while candidate <= bound {
        emitter.emit(candidate);
        offset += 1;
        candidate = compose_date(year, month + offset, anchor);
    }
    Ok(emitter.into_rows())
}

/// Inclusive expansion bound for repeating schedules.
fn repeat_bound(schedule: &Schedule) -> ServiceResult<NaiveDate> {
    let Some(end) = schedule.repeat_end_date else {
        return Err(ServiceError::ValidationError(format!(
            "{} schedule is missing its repeat end date",
            schedule.repeat_type
        )));
    };
    if end < schedule.start_date {
        return Err(ServiceError::ValidationError(format!(
            "repeat end date {end} precedes start date {}",
            schedule.start_date
        )));
    }
    Ok(end)
}

fn weekday_anchor(schedule: &Schedule) -> ServiceResult<u8> {
    match schedule.repeat_anchor {
        Some(anchor @ 1..=7) => Ok(u8::try_from(anchor).unwrap_or(1)),
        other => Err(ServiceError::ValidationError(format!(
            "weekly repeat anchor must be a weekday 1 to 7, got {other:?}"
        ))),
    }
}

fn month_day_anchor(schedule: &Schedule) -> ServiceResult<u32> {
    match schedule.repeat_anchor {
        Some(anchor @ 1..=31) => Ok(u32::try_from(anchor).unwrap_or(1)),
        other => Err(ServiceError::ValidationError(format!(
            "monthly repeat anchor must be a day-of-month 1 to 31, got {other:?}"
        ))),
    }
}

/// Copies the schedule's snapshot fields onto each emitted row and keeps
/// the sequence contiguous.
struct Emitter<'a> {
    schedule: &'a Schedule,
    font_color: Option<String>,
    rows: Vec<NewOccurrence>,
}

impl<'a> Emitter<'a> {
    fn new(schedule: &'a Schedule) -> Self {
        let font_color = (schedule.category == CATEGORY_SHARED)
            .then(|| SHARED_SCHEDULE_COLOR.to_string());
        Self {
            schedule,
            font_color,
            rows: Vec::new(),
        }
    }

    fn emit(&mut self, date: NaiveDate) {
        let seq = i32::try_from(self.rows.len()).unwrap_or(i32::MAX - 1) + 1;
        self.rows.push(NewOccurrence {
            schedule_id: self.schedule.id,
            occur_date: date,
            occur_hour: self.schedule.start_hour,
            occur_minute: self.schedule.start_minute,
            owner_id: self.schedule.owner_id,
            title: self.schedule.title.clone(),
            font_color: self.font_color.clone(),
            seq,
        });
    }

    fn into_rows(self) -> Vec<NewOccurrence> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn schedule(
        repeat_type: RepeatType,
        start: NaiveDate,
        end: NaiveDate,
        anchor: Option<i16>,
        repeat_end: Option<NaiveDate>,
    ) -> Schedule {
        Schedule {
            id: Uuid::now_v7(),
            owner_id: Uuid::now_v7(),
            title: "Team sync".to_string(),
            category: "1".to_string(),
            contents: String::new(),
            is_open: true,
            start_date: start,
            start_hour: 10,
            start_minute: 15,
            end_date: end,
            end_hour: 11,
            end_minute: 0,
            repeat_type,
            repeat_anchor: anchor,
            repeat_end_date: repeat_end,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn dates(rows: &[NewOccurrence]) -> Vec<NaiveDate> {
        rows.iter().map(|row| row.occur_date).collect()
    }

    #[test]
    fn single_schedule_covers_every_day_inclusive() {
        let sched = schedule(
            RepeatType::None,
            date(2024, 3, 1),
            date(2024, 3, 5),
            None,
            None,
        );
        let rows = expand(&sched).expect("expansion succeeds");

        assert_eq!(
            dates(&rows),
            vec![
                date(2024, 3, 1),
                date(2024, 3, 2),
                date(2024, 3, 3),
                date(2024, 3, 4),
                date(2024, 3, 5),
            ]
        );
        let seqs: Vec<i32> = rows.iter().map(|row| row.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn single_schedule_with_inverted_range_is_empty() {
        let sched = schedule(
            RepeatType::None,
            date(2024, 3, 5),
            date(2024, 3, 1),
            None,
            None,
        );
        assert!(expand(&sched).expect("no error").is_empty());
    }

    #[test]
    fn weekly_emits_on_anchor_weekday() {
        // 2024-03-01 was a Friday (weekday 6).
        let sched = schedule(
            RepeatType::Weekly,
            date(2024, 3, 1),
            date(2024, 3, 1),
            Some(6),
            Some(date(2024, 3, 22)),
        );
        let rows = expand(&sched).expect("expansion succeeds");

        assert_eq!(
            dates(&rows),
            vec![
                date(2024, 3, 1),
                date(2024, 3, 8),
                date(2024, 3, 15),
                date(2024, 3, 22),
            ]
        );
        assert_eq!(rows.last().map(|row| row.seq), Some(4));
    }

    #[test]
    fn weekly_advances_forward_to_first_anchor() {
        // Start on Monday, anchor on Friday: the walk may only move forward.
        let sched = schedule(
            RepeatType::Weekly,
            date(2024, 3, 4),
            date(2024, 3, 4),
            Some(6),
            Some(date(2024, 3, 22)),
        );
        let rows = expand(&sched).expect("expansion succeeds");

        assert_eq!(
            dates(&rows),
            vec![date(2024, 3, 8), date(2024, 3, 15), date(2024, 3, 22)]
        );
    }

    #[test]
    fn weekly_anchor_out_of_range_is_rejected() {
        let sched = schedule(
            RepeatType::Weekly,
            date(2024, 3, 1),
            date(2024, 3, 1),
            Some(8),
            Some(date(2024, 3, 22)),
        );
        assert!(matches!(
            expand(&sched),
            Err(ServiceError::ValidationError(_))
        ));

        let missing = schedule(
            RepeatType::Weekly,
            date(2024, 3, 1),
            date(2024, 3, 1),
            None,
            Some(date(2024, 3, 22)),
        );
        assert!(matches!(
            expand(&missing),
            Err(ServiceError::ValidationError(_))
        ));
    }

    #[test]
    fn repeat_end_before_start_is_rejected() {
        let sched = schedule(
            RepeatType::Weekly,
            date(2024, 3, 15),
            date(2024, 3, 15),
            Some(6),
            Some(date(2024, 3, 1)),
        );
        assert!(matches!(
            expand(&sched),
            Err(ServiceError::ValidationError(_))
        ));

        let monthly = schedule(
            RepeatType::Monthly,
            date(2024, 3, 15),
            date(2024, 3, 15),
            Some(10),
            None,
        );
        assert!(matches!(
            expand(&monthly),
            Err(ServiceError::ValidationError(_))
        ));
    }

    #[test]
    fn monthly_skips_start_month_when_anchor_has_passed() {
        let sched = schedule(
            RepeatType::Monthly,
            date(2024, 3, 20),
            date(2024, 3, 20),
            Some(10),
            Some(date(2024, 6, 10)),
        );
        let rows = expand(&sched).expect("expansion succeeds");

        assert_eq!(
            dates(&rows),
            vec![date(2024, 4, 10), date(2024, 5, 10), date(2024, 6, 10)]
        );
        let seqs: Vec<i32> = rows.iter().map(|row| row.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
    }

    #[test]
    fn monthly_anchor_carries_over_short_months() {
        // Anchor 31 probing February and April resolves under the lenient
        // carry policy: 2024-02-31 is March 2, 2024-04-31 is May 1.
        let sched = schedule(
            RepeatType::Monthly,
            date(2024, 1, 31),
            date(2024, 1, 31),
            Some(31),
            Some(date(2024, 5, 1)),
        );
        let rows = expand(&sched).expect("expansion succeeds");

        assert_eq!(
            dates(&rows),
            vec![
                date(2024, 1, 31),
                date(2024, 3, 2),
                date(2024, 3, 31),
                date(2024, 5, 1),
            ]
        );
    }

    #[test]
    fn expansion_is_deterministic() {
        let sched = schedule(
            RepeatType::Weekly,
            date(2024, 3, 4),
            date(2024, 3, 4),
            Some(2),
            Some(date(2024, 4, 29)),
        );
        let first = expand(&sched).expect("expansion succeeds");
        let second = expand(&sched).expect("expansion succeeds");
        assert_eq!(first, second);
    }

    #[test]
    fn rows_snapshot_schedule_fields() {
        let mut sched = schedule(
            RepeatType::None,
            date(2024, 3, 1),
            date(2024, 3, 1),
            None,
            None,
        );
        sched.category = CATEGORY_SHARED.to_string();
        let rows = expand(&sched).expect("expansion succeeds");

        let row = rows.first().expect("one occurrence");
        assert_eq!(row.schedule_id, sched.id);
        assert_eq!(row.owner_id, sched.owner_id);
        assert_eq!(row.title, sched.title);
        assert_eq!(row.occur_hour, 10);
        assert_eq!(row.occur_minute, 15);
        assert_eq!(row.font_color.as_deref(), Some(SHARED_SCHEDULE_COLOR));
    }
}
