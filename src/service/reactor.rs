//! Reactions to membership events delivered by the gateway.
//!
//! Each handler updates the member store for one member and returns an outcome
//! describing what happened. Storage failures are logged and turned into a
//! `Skipped` outcome so the gateway keeps delivering events.

use std::{collections::HashSet, sync::Arc};

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    data::MemberRecordRepository,
    error::AppError,
    model::{
        member::{MemberPatch, MemberRecord},
        moderation::{ActionOutcome, Classification, RemovalReason},
    },
    service::{
        classifier::BotSignatureClassifier, moderation::ModerationActions,
        platform::CommunityPlatform,
    },
    util::clock::Clock,
};

#[derive(Debug, Clone, PartialEq)]
pub enum JoinOutcome {
    /// A new record was created.
    Created(MemberRecord),
    /// The member was already tracked; nothing changed.
    AlreadyTracked(MemberRecord),
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoleUpdateOutcome {
    /// The role set matched a bot signature and the bot-removal action ran.
    FlaggedBot(ActionOutcome),
    /// The member left the pending state with this update.
    Verified(MemberRecord),
    Unchanged,
    /// Update for a member the bot does not track.
    Untracked,
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivityOutcome {
    Refreshed(MemberRecord),
    /// Activity from a member the bot does not track.
    Untracked,
    Skipped,
}

/// Counts from reconciling the store with the guild's member list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileSummary {
    pub added: usize,
    pub verified: usize,
    pub removed: usize,
    /// Members whose roles matched a bot signature; the bot-removal action ran
    /// instead of adding or verifying them.
    pub flagged: usize,
}

pub struct MemberEventReactor {
    db: DatabaseConnection,
    classifier: BotSignatureClassifier,
    actions: Arc<ModerationActions>,
    platform: Arc<dyn CommunityPlatform>,
    clock: Arc<dyn Clock>,
}

impl MemberEventReactor {
    pub fn new(
        db: DatabaseConnection,
        classifier: BotSignatureClassifier,
        actions: Arc<ModerationActions>,
        platform: Arc<dyn CommunityPlatform>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            db,
            classifier,
            actions,
            platform,
            clock,
        }
    }

    /// Handles a member joining the guild.
    ///
    /// Creates the record pending verification with both timestamps at `at`, or
    /// the current time when the platform did not report a join time. Duplicate
    /// deliveries leave the existing record untouched.
    pub async fn handle_join(&self, member_id: u64, at: Option<DateTime<Utc>>) -> JoinOutcome {
        let at = at.unwrap_or_else(|| self.clock.now());
        let repo = MemberRecordRepository::with_clock(&self.db, self.clock.as_ref());

        let existing = match repo.get(member_id).await {
            Ok(existing) => existing,
            Err(e) => {
                tracing::error!("Failed to look up member {} on join: {}", member_id, e);
                return JoinOutcome::Skipped;
            }
        };

        if let Some(record) = existing {
            tracing::debug!("Duplicate join for already tracked member {}", member_id);
            return JoinOutcome::AlreadyTracked(record);
        }

        // The upsert never overwrites joined_at, so a join racing this one is harmless
        match repo.upsert(member_id, MemberPatch::join(at)).await {
            Ok(record) => {
                tracing::info!("Now tracking member {} (joined {})", member_id, at);
                JoinOutcome::Created(record)
            }
            Err(e) => {
                tracing::error!("Failed to create record for member {}: {}", member_id, e);
                JoinOutcome::Skipped
            }
        }
    }

    /// Handles a change to a member's roles or screening state.
    ///
    /// Runs the bot-signature classifier first; a likely bot triggers the removal
    /// action and nothing else. Otherwise a member the platform no longer reports as
    /// pending is marked verified. Updates for untracked members are ignored, so a
    /// late update can never bring back a member who already left; members missed
    /// while offline are picked up by `reconcile_guild`.
    pub async fn handle_role_update(
        &self,
        member_id: u64,
        roles: &HashSet<u64>,
        pending: bool,
    ) -> RoleUpdateOutcome {
        if self.classifier.classify(roles) == Classification::LikelyBot {
            tracing::warn!(
                "Member {} holds only watched roles {:?}, treating as likely bot",
                member_id,
                roles
            );
            let outcome = self.actions.apply(member_id, RemovalReason::LikelyBot).await;
            return RoleUpdateOutcome::FlaggedBot(outcome);
        }

        let now = self.clock.now();
        let repo = MemberRecordRepository::with_clock(&self.db, self.clock.as_ref());

        let record = match repo.get(member_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::debug!("Ignoring update for untracked member {}", member_id);
                return RoleUpdateOutcome::Untracked;
            }
            Err(e) => {
                tracing::error!("Failed to look up member {} on update: {}", member_id, e);
                return RoleUpdateOutcome::Skipped;
            }
        };

        if !record.pending_verification || pending {
            return RoleUpdateOutcome::Unchanged;
        }

        match repo.upsert(member_id, MemberPatch::verified(now)).await {
            Ok(record) => {
                tracing::info!("Member {} completed verification", member_id);
                RoleUpdateOutcome::Verified(record)
            }
            Err(e) => {
                tracing::error!("Failed to mark member {} verified: {}", member_id, e);
                RoleUpdateOutcome::Skipped
            }
        }
    }

    /// Handles qualifying activity (message, reaction, voice join) by a member.
    ///
    /// `at` defaults to the current time for events that carry no timestamp.
    pub async fn handle_activity(
        &self,
        member_id: u64,
        at: Option<DateTime<Utc>>,
    ) -> ActivityOutcome {
        let at = at.unwrap_or_else(|| self.clock.now());
        let repo = MemberRecordRepository::with_clock(&self.db, self.clock.as_ref());

        match repo.refresh_last_seen(member_id, at).await {
            Ok(Some(record)) => ActivityOutcome::Refreshed(record),
            Ok(None) => ActivityOutcome::Untracked,
            Err(e) => {
                tracing::error!("Failed to record activity for member {}: {}", member_id, e);
                ActivityOutcome::Skipped
            }
        }
    }

    /// Handles a member leaving or being removed from the guild.
    ///
    /// # Returns
    /// - `true` if a record was deleted
    pub async fn handle_leave(&self, member_id: u64) -> bool {
        let repo = MemberRecordRepository::with_clock(&self.db, self.clock.as_ref());

        match repo.remove(member_id).await {
            Ok(removed) => {
                if removed {
                    tracing::info!("Member {} left, record removed", member_id);
                }
                removed
            }
            Err(e) => {
                tracing::error!("Failed to remove record for member {}: {}", member_id, e);
                false
            }
        }
    }

    /// Members still pending verification.
    pub async fn pending_members(&self) -> Result<Vec<MemberRecord>, AppError> {
        let repo = MemberRecordRepository::with_clock(&self.db, self.clock.as_ref());
        Ok(repo.pending_members().await?)
    }

    /// Reconciles the store with the guild's current member list.
    ///
    /// Catches up on join/leave/verification events missed while the bot was
    /// offline. Untracked members are added with their platform join time and
    /// screening state, with activity starting now so they are not immediately
    /// inactive. Records for users no longer in the guild are deleted. Bot accounts
    /// are ignored.
    ///
    /// Members about to be added or verified are classified first, exactly as a
    /// role update would; a likely bot gets the bot-removal action instead.
    ///
    /// # Returns
    /// - `Ok(ReconcileSummary)` - Counts of added, verified, removed, and flagged members
    /// - `Err(AppError)` - Listing members or reading the store failed; individual
    ///   write failures are logged and skipped
    pub async fn reconcile_guild(&self) -> Result<ReconcileSummary, AppError> {
        let members = self.platform.list_members().await?;
        let now = self.clock.now();
        let repo = MemberRecordRepository::with_clock(&self.db, self.clock.as_ref());

        let tracked: std::collections::HashMap<u64, MemberRecord> = repo
            .snapshot()
            .await?
            .into_iter()
            .map(|record| (record.member_id, record))
            .collect();

        let mut summary = ReconcileSummary::default();
        let mut present = HashSet::new();

        for member in members.iter().filter(|m| !m.bot) {
            present.insert(member.member_id);

            let (patch, added) = match tracked.get(&member.member_id) {
                None => (
                    MemberPatch {
                        joined_at: Some(member.joined_at.unwrap_or(now)),
                        last_seen_at: Some(now),
                        pending_verification: Some(member.pending),
                    },
                    true,
                ),
                Some(record) if record.pending_verification && !member.pending => {
                    (MemberPatch::verified(now), false)
                }
                Some(_) => continue,
            };

            if self.classifier.classify(&member.role_ids) == Classification::LikelyBot {
                tracing::warn!(
                    "Member {} holds only watched roles {:?}, treating as likely bot",
                    member.member_id,
                    member.role_ids
                );
                self.actions
                    .apply(member.member_id, RemovalReason::LikelyBot)
                    .await;
                summary.flagged += 1;
                continue;
            }

            match repo.upsert(member.member_id, patch).await {
                Ok(_) if added => summary.added += 1,
                Ok(_) => summary.verified += 1,
                Err(e) => {
                    tracing::error!("Failed to reconcile member {}: {}", member.member_id, e)
                }
            }
        }

        for member_id in tracked.keys().filter(|id| !present.contains(id)) {
            match repo.remove(*member_id).await {
                Ok(_) => summary.removed += 1,
                Err(e) => {
                    tracing::error!("Failed to remove departed member {}: {}", member_id, e)
                }
            }
        }

        tracing::info!(
            "Reconciled {} guild members: {} added, {} verified, {} removed, {} flagged",
            present.len(),
            summary.added,
            summary.verified,
            summary.removed,
            summary.flagged
        );

        Ok(summary)
    }
}
