use super::*;

/// Tests getting an existing member record.
///
/// Expected: Ok(Some) with the stored values
#[tokio::test]
async fn returns_existing_record() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::member_record::MemberRecordFactory::new(db)
        .member_id(2002)
        .joined_at(t0())
        .last_seen_at(t0())
        .pending_verification(true)
        .build()
        .await?;

    let repo = MemberRecordRepository::new(db);
    let record = repo.get(2002).await?.expect("record should exist");

    assert_eq!(record.member_id, 2002);
    assert_eq!(record.joined_at, t0());
    assert!(record.pending_verification);

    Ok(())
}

/// Tests getting a member that is not tracked.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_member() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_member_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MemberRecordRepository::new(db);

    assert!(repo.get(404).await?.is_none());

    Ok(())
}
