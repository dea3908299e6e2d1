use sea_orm::entity::prelude::*;

/// Lifecycle state of a single tracked guild member.
///
/// `member_id` holds the Discord user snowflake as a decimal string.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "member_record")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub member_id: String,
    pub joined_at: DateTimeUtc,
    pub last_seen_at: DateTimeUtc,
    pub pending_verification: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
