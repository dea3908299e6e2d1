use super::*;

/// Tests snapshotting every tracked member.
///
/// Verifies that each stored record appears exactly once.
///
/// Expected: Ok with all records
#[tokio::test]
async fn returns_every_record_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_member_with_id(db, 1).await?;
    factory::create_member_with_id(db, 2).await?;
    factory::create_member_with_id(db, 3).await?;

    let repo = MemberRecordRepository::new(db);
    let mut ids: Vec<u64> = repo
        .snapshot()
        .await?
        .into_iter()
        .map(|r| r.member_id)
        .collect();
    ids.sort_unstable();

    assert_eq!(ids, vec![1, 2, 3]);

    Ok(())
}

/// Tests snapshotting an empty store.
///
/// Expected: Ok with empty vector
#[tokio::test]
async fn returns_empty_for_empty_store() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRecordRepository::new(db);

    assert!(repo.snapshot().await?.is_empty());

    Ok(())
}
