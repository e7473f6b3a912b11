//! Schedule storage orchestration: the write pipeline that keeps a
//! schedule and its generated occurrence set consistent.

use diesel_async::AsyncConnection;
use diesel_async::scoped_futures::ScopedFutureExt;
use uuid::Uuid;

use yotei_db::db::connection::DbConnection;
use yotei_db::model::schedule::{Schedule, ScheduleDraft};
use yotei_db::store::ScheduleStore;

use crate::error::{ServiceError, ServiceResult};
use crate::schedule::recurrence::expand;

/// ## Summary
/// Persists a schedule and regenerates its occurrence set.
///
/// An absent draft id inserts a new schedule, a present one updates the
/// existing row. Either way every previously generated occurrence is
/// deleted and the set is expanded afresh from the persisted field values,
/// so re-saving an unmodified schedule reproduces the identical set
/// instead of appending to it.
///
/// This pipeline is the only writer of occurrence rows. Callers must run
/// it inside one transaction of the backing store so a failure leaves the
/// previous schedule and occurrence set untouched; [`save_schedule`] does
/// exactly that for Postgres.
///
/// ## Errors
/// Returns `NotFound` for an unknown draft id, a validation error from
/// expansion, or any storage error.
#[tracing::instrument(skip(store, draft), fields(schedule_id = ?draft.id))]
pub async fn save_schedule_with<S>(store: &mut S, draft: &ScheduleDraft) -> ServiceResult<Schedule>
where
    S: ScheduleStore,
{
    tracing::debug!("Saving schedule");

    let schedule = match draft.id {
        None => store.insert_schedule(draft).await?,
        Some(id) => store
            .update_schedule(id, draft)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("schedule {id}")))?,
    };

    let purged = store.delete_occurrences_for_schedule(schedule.id).await?;
    let rows = expand(&schedule)?;
    let inserted = store.bulk_insert_occurrences(&rows).await?;

    tracing::debug!(purged, inserted, "Occurrence set regenerated");

    Ok(schedule)
}

/// ## Summary
/// Runs [`save_schedule_with`] inside one database transaction, the
/// atomicity boundary of a save.
///
/// ## Errors
/// Returns the pipeline error after the transaction has rolled back.
pub async fn save_schedule<'a>(
    conn: &mut DbConnection<'a>,
    draft: &'a ScheduleDraft,
) -> ServiceResult<Schedule> {
    conn.transaction::<_, ServiceError, _>(|conn| {
        async move { save_schedule_with(conn, draft).await }.scope_boxed()
    })
    .await
}

/// ## Summary
/// Deletes a schedule together with its generated occurrences.
///
/// ## Errors
/// Returns `NotFound` when no schedule with that id exists.
#[tracing::instrument(skip(store))]
pub async fn delete_schedule_with<S>(store: &mut S, id: Uuid) -> ServiceResult<()>
where
    S: ScheduleStore,
{
    let purged = store.delete_occurrences_for_schedule(id).await?;
    let removed = store.delete_schedule(id).await?;
    if removed == 0 {
        return Err(ServiceError::NotFound(format!("schedule {id}")));
    }

    tracing::debug!(purged, "Schedule deleted");
    Ok(())
}

/// ## Summary
/// Runs [`delete_schedule_with`] inside one database transaction.
///
/// ## Errors
/// Returns the pipeline error after the transaction has rolled back.
pub async fn delete_schedule(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    conn.transaction::<_, ServiceError, _>(|conn| {
        async move { delete_schedule_with(conn, id).await }.scope_boxed()
    })
    .await
}

/// Loads one schedule.
///
/// ## Errors
/// Returns `NotFound` when no schedule with that id exists.
pub async fn get_schedule<S>(store: &mut S, id: Uuid) -> ServiceResult<Schedule>
where
    S: ScheduleStore,
{
    store
        .find_schedule(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("schedule {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use yotei_db::db::enums::RepeatType;
    use yotei_db::store::memory::MemoryStore;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    fn weekly_draft(owner_id: Uuid) -> ScheduleDraft {
        ScheduleDraft {
            id: None,
            owner_id,
            title: "Team sync".to_string(),
            category: "1".to_string(),
            contents: "weekly status round".to_string(),
            is_open: true,
            start_date: date(2024, 3, 1),
            start_hour: 10,
            start_minute: 0,
            end_date: date(2024, 3, 1),
            end_hour: 11,
            end_minute: 0,
            repeat_type: RepeatType::Weekly,
            repeat_anchor: Some(6),
            repeat_end_date: Some(date(2024, 3, 22)),
        }
    }

    #[test_log::test(tokio::test)]
    async fn save_generates_occurrences_for_new_schedule() {
        let mut store = MemoryStore::new();
        let schedule = save_schedule_with(&mut store, &weekly_draft(Uuid::now_v7()))
            .await
            .expect("save succeeds");

        let rows = store.occurrences_for_schedule(schedule.id);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].occur_date, date(2024, 3, 1));
        assert_eq!(rows[3].occur_date, date(2024, 3, 22));
        let seqs: Vec<i32> = rows.iter().map(|row| row.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn resaving_unchanged_schedule_is_idempotent() {
        let mut store = MemoryStore::new();
        let draft = weekly_draft(Uuid::now_v7());

        let schedule = save_schedule_with(&mut store, &draft)
            .await
            .expect("first save succeeds");
        let first: Vec<_> = store
            .occurrences_for_schedule(schedule.id)
            .into_iter()
            .map(|row| (row.occur_date, row.seq))
            .collect();

        let resave = ScheduleDraft {
            id: Some(schedule.id),
            ..draft
        };
        save_schedule_with(&mut store, &resave)
            .await
            .expect("second save succeeds");
        let second: Vec<_> = store
            .occurrences_for_schedule(schedule.id)
            .into_iter()
            .map(|row| (row.occur_date, row.seq))
            .collect();

        assert_eq!(first, second);
        assert_eq!(store.occurrence_count(), 4);
    }

    #[tokio::test]
    async fn updating_title_propagates_through_regeneration() {
        let mut store = MemoryStore::new();
        let draft = weekly_draft(Uuid::now_v7());
        let schedule = save_schedule_with(&mut store, &draft)
            .await
            .expect("save succeeds");

        let renamed = ScheduleDraft {
            id: Some(schedule.id),
            title: "Team sync (moved)".to_string(),
            ..draft
        };
        save_schedule_with(&mut store, &renamed)
            .await
            .expect("resave succeeds");

        let rows = store.occurrences_for_schedule(schedule.id);
        assert!(rows.iter().all(|row| row.title == "Team sync (moved)"));
    }

    #[tokio::test]
    async fn save_with_unknown_id_is_not_found() {
        let mut store = MemoryStore::new();
        let draft = ScheduleDraft {
            id: Some(Uuid::now_v7()),
            ..weekly_draft(Uuid::now_v7())
        };

        let err = save_schedule_with(&mut store, &draft)
            .await
            .expect_err("unknown id fails");
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(store.occurrence_count(), 0);
    }

    #[tokio::test]
    async fn failed_save_leaves_previous_state_intact() {
        let mut store = MemoryStore::new();
        let draft = weekly_draft(Uuid::now_v7());
        let schedule = save_schedule_with(&mut store, &draft)
            .await
            .expect("initial save succeeds");
        let before = store.clone();

        let renamed = ScheduleDraft {
            id: Some(schedule.id),
            title: "Lost update".to_string(),
            ..draft
        };
        store.inject_bulk_insert_fault();
        let result = store
            .transaction(async |tx| save_schedule_with(tx, &renamed).await)
            .await;

        assert!(result.is_err());
        assert_eq!(store, before);
        let rows = store.occurrences_for_schedule(schedule.id);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.title == "Team sync"));
    }

    #[tokio::test]
    async fn invalid_repeat_definition_aborts_the_save() {
        let mut store = MemoryStore::new();
        let draft = ScheduleDraft {
            repeat_end_date: Some(date(2024, 2, 1)),
            ..weekly_draft(Uuid::now_v7())
        };

        let result = store
            .transaction(async |tx| save_schedule_with(tx, &draft).await)
            .await;

        assert!(matches!(result, Err(ServiceError::ValidationError(_))));
        assert_eq!(store.occurrence_count(), 0);
        assert_eq!(store, MemoryStore::new());
    }

    #[tokio::test]
    async fn delete_removes_schedule_and_occurrences() {
        let mut store = MemoryStore::new();
        let schedule = save_schedule_with(&mut store, &weekly_draft(Uuid::now_v7()))
            .await
            .expect("save succeeds");

        delete_schedule_with(&mut store, schedule.id)
            .await
            .expect("delete succeeds");

        assert_eq!(store.occurrence_count(), 0);
        let err = get_schedule(&mut store, schedule.id)
            .await
            .expect_err("schedule is gone");
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_unknown_schedule_is_not_found() {
        let mut store = MemoryStore::new();
        let err = delete_schedule_with(&mut store, Uuid::now_v7())
            .await
            .expect_err("unknown id fails");
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
