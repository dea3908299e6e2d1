//! Best-effort moderation actions shared by bot removal and inactivity sweeps.
//!
//! In `notify-and-remove` mode each action is two steps: a direct message that may
//! fail without consequence, then a removal whose failure is reported to operators
//! but never retried and never propagated. In `report-only` mode operators are
//! told what would have happened and nothing else is done.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    data::MemberRecordRepository,
    error::platform::PlatformError,
    model::moderation::{ActionMode, ActionOutcome, RemovalReason, SweepReport},
    service::platform::CommunityPlatform,
};

/// Formats a Discord user mention.
pub fn mention(member_id: u64) -> String {
    format!("<@{}>", member_id)
}

pub struct ModerationActions {
    db: DatabaseConnection,
    platform: Arc<dyn CommunityPlatform>,
    mode: ActionMode,
}

impl ModerationActions {
    pub fn new(db: DatabaseConnection, platform: Arc<dyn CommunityPlatform>, mode: ActionMode) -> Self {
        Self { db, platform, mode }
    }

    pub fn mode(&self) -> ActionMode {
        self.mode
    }

    /// Applies the configured action to one member.
    ///
    /// Never returns an error: every failure is logged, reported where operators
    /// need to know, and folded into the returned outcome.
    pub async fn apply(&self, member_id: u64, reason: RemovalReason) -> ActionOutcome {
        match self.mode {
            ActionMode::ReportOnly => {
                tracing::info!(
                    "Report-only mode: would remove member {} ({})",
                    member_id,
                    reason.audit_reason()
                );
                self.report(&format!(
                    "I'd remove {} ({})!",
                    mention(member_id),
                    reason.audit_reason()
                ))
                .await;

                ActionOutcome::Reported
            }
            ActionMode::NotifyAndRemove => self.notify_and_remove(member_id, reason).await,
        }
    }

    async fn notify_and_remove(&self, member_id: u64, reason: RemovalReason) -> ActionOutcome {
        let notified = match self
            .platform
            .notify_member(member_id, reason.notification())
            .await
        {
            Ok(()) => true,
            Err(PlatformError::NotificationBlocked(_)) => {
                tracing::debug!("Member {} does not accept direct messages", member_id);
                false
            }
            Err(e) => {
                tracing::warn!("Failed to notify member {} before removal: {}", member_id, e);
                false
            }
        };

        match self
            .platform
            .remove_member(member_id, reason.audit_reason())
            .await
        {
            Ok(()) => {
                tracing::info!("Removed member {} ({})", member_id, reason.audit_reason());
                self.forget(member_id).await;
                self.report(&format!(
                    "Removed {} ({}){}",
                    mention(member_id),
                    reason.audit_reason(),
                    if notified { "" } else { " - could not notify them first" }
                ))
                .await;

                ActionOutcome::Removed { notified }
            }
            Err(e) => {
                tracing::error!("Failed to remove member {}: {}", member_id, e);

                // Nothing left to remove; stop tracking so later sweeps skip them
                if matches!(e, PlatformError::MemberGone(_)) {
                    self.forget(member_id).await;
                }

                self.report(&format!(
                    "Failed to remove {} ({}): {}",
                    mention(member_id),
                    reason.audit_reason(),
                    e
                ))
                .await;

                ActionOutcome::Failed(e.to_string())
            }
        }
    }

    /// Posts the completion report for one sweep firing.
    pub async fn report_sweep(&self, report: &SweepReport) {
        self.report(&format!(
            "Inactivity sweep finished ({}): {} flagged, {} processed, {} failed",
            self.mode, report.flagged, report.processed, report.failed
        ))
        .await;
    }

    /// Posts a message to the reporting channel, logging delivery failures.
    pub async fn report(&self, content: &str) {
        if let Err(e) = self.platform.send_report(content).await {
            tracing::error!("Failed to send report to operators: {}", e);
        }
    }

    async fn forget(&self, member_id: u64) {
        let repo = MemberRecordRepository::new(&self.db);
        if let Err(e) = repo.remove(member_id).await {
            tracing::error!("Failed to delete record for member {}: {}", member_id, e);
        }
    }
}
