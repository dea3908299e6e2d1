use super::*;

/// Tests upserting a member that is not tracked yet.
///
/// Verifies that a join patch creates the record with both timestamps set to the
/// join time and the member pending verification.
///
/// Expected: Ok with record created
#[tokio::test]
async fn creates_record_on_first_join() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRecordRepository::new(db);
    let record = repo.upsert(1001, MemberPatch::join(t0())).await?;

    assert_eq!(record.member_id, 1001);
    assert_eq!(record.joined_at, t0());
    assert_eq!(record.last_seen_at, t0());
    assert!(record.pending_verification);

    let count = entity::prelude::MemberRecord::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that a duplicate join never resets the join time.
///
/// Verifies that upserting a second join patch with a later timestamp leaves
/// `joined_at` and the pending flag untouched and does not create a second row.
///
/// Expected: Ok with original joined_at preserved
#[tokio::test]
async fn duplicate_join_keeps_joined_at() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRecordRepository::new(db);
    repo.upsert(1001, MemberPatch::join(t0())).await?;
    repo.upsert(1001, MemberPatch::verified(t0() + Duration::hours(1)))
        .await?;

    let record = repo
        .upsert(1001, MemberPatch::join(t0() + Duration::days(3)))
        .await?;

    assert_eq!(record.joined_at, t0());
    assert!(!record.pending_verification);

    let count = entity::prelude::MemberRecord::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that last_seen_at never moves backwards.
///
/// Verifies that an activity patch older than the stored activity is ignored
/// while a newer one is applied.
///
/// Expected: Ok with the later timestamp kept
#[tokio::test]
async fn last_seen_is_monotonic() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRecordRepository::new(db);
    repo.upsert(1001, MemberPatch::join(t0())).await?;

    let later = t0() + Duration::hours(5);
    let record = repo.upsert(1001, seen(later)).await?;
    assert_eq!(record.last_seen_at, later);

    let record = repo
        .upsert(1001, seen(t0() + Duration::hours(1)))
        .await?;
    assert_eq!(record.last_seen_at, later);

    Ok(())
}

/// Tests creating a record from a patch without a join time.
///
/// Verifies that `joined_at` falls back to the supplied activity time and the
/// record defaults to pending.
///
/// Expected: Ok with joined_at == last_seen_at
#[tokio::test]
async fn create_without_join_time_uses_last_seen() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRecordRepository::new(db);
    let record = repo.upsert(1001, seen(t0())).await?;

    assert_eq!(record.joined_at, t0());
    assert!(record.pending_verification);

    Ok(())
}

/// Tests upsert when the member table does not exist.
///
/// Verifies that a backend failure is surfaced as an error rather than a panic.
///
/// Expected: Err
#[tokio::test]
async fn fails_when_table_missing() -> Result<(), DbErr> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRecordRepository::new(db);
    let result = repo.upsert(1001, MemberPatch::join(t0())).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests creating a record from a patch that carries no timestamps at all.
///
/// Verifies that both timestamps come from the repository's clock rather than
/// wall-clock time.
///
/// Expected: Ok with joined_at == last_seen_at == clock time
#[tokio::test]
async fn create_without_timestamps_uses_repository_clock() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let clock = ManualClock::new(t0() - Duration::days(400));

    let repo = MemberRecordRepository::with_clock(db, &clock);
    let record = repo
        .upsert(
            1001,
            MemberPatch {
                pending_verification: Some(false),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(record.joined_at, t0() - Duration::days(400));
    assert_eq!(record.last_seen_at, t0() - Duration::days(400));
    assert!(!record.pending_verification);

    Ok(())
}
