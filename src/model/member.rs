use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// Lifecycle state of one tracked guild member.
///
/// Converted from `entity::member_record::Model` at the repository boundary so the
/// service layer works with a numeric member id instead of the stored string.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRecord {
    /// Discord user ID of the member.
    pub member_id: u64,
    /// When the member joined. Never changes after the record is created.
    pub joined_at: DateTime<Utc>,
    /// Last recorded activity. Never moves backwards.
    pub last_seen_at: DateTime<Utc>,
    /// True until the member completes onboarding. Pending members are exempt from
    /// inactivity removal.
    pub pending_verification: bool,
}

impl MemberRecord {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(MemberRecord)` - Successfully converted record
    /// - `Err(DbErr::Custom)` - Stored member_id is not a valid u64
    pub fn from_entity(entity: entity::member_record::Model) -> Result<Self, DbErr> {
        let member_id = entity
            .member_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse member_id: {}", e)))?;

        Ok(Self {
            member_id,
            joined_at: entity.joined_at,
            last_seen_at: entity.last_seen_at,
            pending_verification: entity.pending_verification,
        })
    }
}

/// Fields to merge into a member record.
///
/// `joined_at` is only honored when the upsert creates the record. `last_seen_at`
/// is merged as the later of the stored and supplied values. Unset fields keep
/// their stored value, or a default when the record is created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberPatch {
    pub joined_at: Option<DateTime<Utc>>,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub pending_verification: Option<bool>,
}

impl MemberPatch {
    /// Patch for a member joining at `at`; the new record starts pending.
    pub fn join(at: DateTime<Utc>) -> Self {
        Self {
            joined_at: Some(at),
            last_seen_at: Some(at),
            pending_verification: Some(true),
        }
    }

    /// Patch clearing the pending flag and recording activity at `at`.
    pub fn verified(at: DateTime<Utc>) -> Self {
        Self {
            last_seen_at: Some(at),
            pending_verification: Some(false),
            ..Default::default()
        }
    }
}

/// A guild member as currently reported by the platform.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildMemberSnapshot {
    pub member_id: u64,
    pub joined_at: Option<DateTime<Utc>>,
    /// Whether the member has yet to pass membership screening.
    pub pending: bool,
    /// Bot accounts are never tracked.
    pub bot: bool,
    pub role_ids: HashSet<u64>,
}
