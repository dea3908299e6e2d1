//! Member record repository: the member lifecycle store.
//!
//! Every write to a single member is a read-modify-write inside its own database
//! transaction, so concurrent writes to the same `member_id` never interleave.
//! Different members never share a lock; `snapshot` reads without holding any
//! application-level lock at all.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
};

use crate::{
    model::member::{MemberPatch, MemberRecord},
    util::clock::{Clock, SystemClock},
};

static SYSTEM_CLOCK: SystemClock = SystemClock;

/// Repository for member lifecycle records.
pub struct MemberRecordRepository<'a> {
    /// Database connection for executing queries.
    db: &'a DatabaseConnection,
    /// Supplies the creation time for records created from a patch without timestamps.
    clock: &'a dyn Clock,
}

impl<'a> MemberRecordRepository<'a> {
    /// Creates a new repository instance using wall-clock time.
    ///
    /// # Arguments
    /// - `db` - Database connection for executing queries
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            clock: &SYSTEM_CLOCK,
        }
    }

    /// Creates a repository that takes "now" from `clock`.
    pub fn with_clock(db: &'a DatabaseConnection, clock: &'a dyn Clock) -> Self {
        Self { db, clock }
    }

    /// Merges `patch` into the member's record, creating the record if absent.
    ///
    /// On create, `joined_at` falls back to `last_seen_at`, then to the repository
    /// clock's current time, and `pending_verification` defaults to `true`. On
    /// update, `joined_at` is ignored and `last_seen_at` only moves forward. The row is only written when a
    /// field actually changes.
    ///
    /// # Arguments
    /// - `member_id` - Discord user ID of the member
    /// - `patch` - Fields to merge
    ///
    /// # Returns
    /// - `Ok(MemberRecord)` - The record after the merge
    /// - `Err(DbErr)` - Database error during query, insert, or update
    pub async fn upsert(&self, member_id: u64, patch: MemberPatch) -> Result<MemberRecord, DbErr> {
        let txn = self.db.begin().await?;

        let existing = entity::prelude::MemberRecord::find_by_id(member_id.to_string())
            .one(&txn)
            .await?;

        let entity = match existing {
            Some(existing) => {
                let mut changed = false;
                let mut active: entity::member_record::ActiveModel = existing.clone().into();

                if let Some(seen) = patch.last_seen_at {
                    if seen > existing.last_seen_at {
                        active.last_seen_at = ActiveValue::Set(seen);
                        changed = true;
                    }
                }

                if let Some(pending) = patch.pending_verification {
                    if pending != existing.pending_verification {
                        active.pending_verification = ActiveValue::Set(pending);
                        changed = true;
                    }
                }

                if changed {
                    active.update(&txn).await?
                } else {
                    existing
                }
            }
            None => {
                let joined_at = patch
                    .joined_at
                    .or(patch.last_seen_at)
                    .unwrap_or_else(|| self.clock.now());

                entity::member_record::ActiveModel {
                    member_id: ActiveValue::Set(member_id.to_string()),
                    joined_at: ActiveValue::Set(joined_at),
                    last_seen_at: ActiveValue::Set(patch.last_seen_at.unwrap_or(joined_at)),
                    pending_verification: ActiveValue::Set(
                        patch.pending_verification.unwrap_or(true),
                    ),
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;

        MemberRecord::from_entity(entity)
    }

    /// Moves `last_seen_at` forward for an existing record.
    ///
    /// Unlike `upsert`, never creates a record: activity from a member the bot does
    /// not track is ignored.
    ///
    /// # Returns
    /// - `Ok(Some(MemberRecord))` - The record after the refresh
    /// - `Ok(None)` - No record exists for the member
    /// - `Err(DbErr)` - Database error
    pub async fn refresh_last_seen(
        &self,
        member_id: u64,
        at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<MemberRecord>, DbErr> {
        let txn = self.db.begin().await?;

        let Some(existing) = entity::prelude::MemberRecord::find_by_id(member_id.to_string())
            .one(&txn)
            .await?
        else {
            txn.rollback().await?;
            return Ok(None);
        };

        let entity = if at > existing.last_seen_at {
            let mut active: entity::member_record::ActiveModel = existing.into();
            active.last_seen_at = ActiveValue::Set(at);
            active.update(&txn).await?
        } else {
            existing
        };

        txn.commit().await?;

        MemberRecord::from_entity(entity).map(Some)
    }

    /// Gets a single member record.
    ///
    /// # Returns
    /// - `Ok(Some(MemberRecord))` - The record if found
    /// - `Ok(None)` - Member is not tracked
    /// - `Err(DbErr)` - Database error during query
    pub async fn get(&self, member_id: u64) -> Result<Option<MemberRecord>, DbErr> {
        let entity = entity::prelude::MemberRecord::find_by_id(member_id.to_string())
            .one(self.db)
            .await?;

        entity.map(MemberRecord::from_entity).transpose()
    }

    /// Returns a point-in-time copy of every record.
    ///
    /// Not transactionally consistent with concurrent upserts: a record written while
    /// the query runs may or may not be included, but never twice.
    pub async fn snapshot(&self) -> Result<Vec<MemberRecord>, DbErr> {
        let entities = entity::prelude::MemberRecord::find().all(self.db).await?;

        entities
            .into_iter()
            .map(MemberRecord::from_entity)
            .collect()
    }

    /// Gets every record still pending verification.
    pub async fn pending_members(&self) -> Result<Vec<MemberRecord>, DbErr> {
        let entities = entity::prelude::MemberRecord::find()
            .filter(entity::member_record::Column::PendingVerification.eq(true))
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(MemberRecord::from_entity)
            .collect()
    }

    /// Deletes a member record. No-op if the record doesn't exist.
    ///
    /// # Returns
    /// - `Ok(true)` - A record was deleted
    /// - `Ok(false)` - No record existed
    /// - `Err(DbErr)` - Database error during deletion
    pub async fn remove(&self, member_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::MemberRecord::delete_by_id(member_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
