use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MemberRecord::Table)
                    .if_not_exists()
                    .col(string(MemberRecord::MemberId).primary_key())
                    .col(timestamp_with_time_zone(MemberRecord::JoinedAt))
                    .col(timestamp_with_time_zone(MemberRecord::LastSeenAt))
                    .col(boolean(MemberRecord::PendingVerification).default(true))
                    .to_owned(),
            )
            .await?;

        // Sweeps filter on these two columns
        manager
            .create_index(
                Index::create()
                    .name("idx_member_record_pending_last_seen")
                    .table(MemberRecord::Table)
                    .col(MemberRecord::PendingVerification)
                    .col(MemberRecord::LastSeenAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MemberRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MemberRecord {
    Table,
    MemberId,
    JoinedAt,
    LastSeenAt,
    PendingVerification,
}
