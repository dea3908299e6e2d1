//! Member record factory for creating test lifecycle records.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test member records with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::member_record::MemberRecordFactory;
///
/// let member = MemberRecordFactory::new(&db)
///     .member_id(987654321)
///     .pending_verification(true)
///     .build()
///     .await?;
/// ```
pub struct MemberRecordFactory<'a> {
    db: &'a DatabaseConnection,
    member_id: u64,
    joined_at: DateTime<Utc>,
    last_seen_at: DateTime<Utc>,
    pending_verification: bool,
}

impl<'a> MemberRecordFactory<'a> {
    /// Creates a new MemberRecordFactory with default values.
    ///
    /// Defaults:
    /// - member_id: auto-incremented
    /// - joined_at / last_seen_at: `Utc::now()`
    /// - pending_verification: `false`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let now = Utc::now();
        Self {
            db,
            member_id: next_id(),
            joined_at: now,
            last_seen_at: now,
            pending_verification: false,
        }
    }

    pub fn member_id(mut self, member_id: u64) -> Self {
        self.member_id = member_id;
        self
    }

    pub fn joined_at(mut self, joined_at: DateTime<Utc>) -> Self {
        self.joined_at = joined_at;
        self
    }

    pub fn last_seen_at(mut self, last_seen_at: DateTime<Utc>) -> Self {
        self.last_seen_at = last_seen_at;
        self
    }

    pub fn pending_verification(mut self, pending: bool) -> Self {
        self.pending_verification = pending;
        self
    }

    /// Builds and inserts the member record into the database.
    ///
    /// # Returns
    /// - `Ok(entity::member_record::Model)` - Created record
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::member_record::Model, DbErr> {
        entity::member_record::ActiveModel {
            member_id: ActiveValue::Set(self.member_id.to_string()),
            joined_at: ActiveValue::Set(self.joined_at),
            last_seen_at: ActiveValue::Set(self.last_seen_at),
            pending_verification: ActiveValue::Set(self.pending_verification),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a verified member record with default values.
///
/// Shorthand for `MemberRecordFactory::new(db).build().await`.
pub async fn create_member(
    db: &DatabaseConnection,
) -> Result<entity::member_record::Model, DbErr> {
    MemberRecordFactory::new(db).build().await
}

/// Creates a verified member record with a specific member id.
pub async fn create_member_with_id(
    db: &DatabaseConnection,
    member_id: u64,
) -> Result<entity::member_record::Model, DbErr> {
    MemberRecordFactory::new(db).member_id(member_id).build().await
}
