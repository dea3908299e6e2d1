//! One firing of the inactivity sweep.
//!
//! Scheduling lives in `scheduler::inactivity_sweep`; this service only knows how to
//! run a single pass: snapshot the store, evaluate, act on every flagged member
//! with bounded fan-out, then report.

use std::sync::Arc;

use chrono::Duration;
use futures::{stream, StreamExt};
use sea_orm::DatabaseConnection;

use crate::{
    data::MemberRecordRepository,
    error::AppError,
    model::moderation::{RemovalReason, SweepOutcome, SweepReport},
    service::{inactivity, moderation::ModerationActions},
    util::clock::Clock,
};

pub struct InactivitySweepService {
    db: DatabaseConnection,
    actions: Arc<ModerationActions>,
    clock: Arc<dyn Clock>,
    threshold: Duration,
    concurrency: usize,
}

impl InactivitySweepService {
    /// Creates the sweep service.
    ///
    /// # Arguments
    /// - `threshold` - Time since last activity after which a verified member is inactive
    /// - `concurrency` - Maximum number of members acted on at once (at least 1)
    pub fn new(
        db: DatabaseConnection,
        actions: Arc<ModerationActions>,
        clock: Arc<dyn Clock>,
        threshold: Duration,
        concurrency: usize,
    ) -> Self {
        Self {
            db,
            actions,
            clock,
            threshold,
            concurrency: concurrency.max(1),
        }
    }

    /// Members a sweep would flag right now, without acting on them.
    pub async fn preview(&self) -> Result<Vec<u64>, AppError> {
        let repo = MemberRecordRepository::new(&self.db);
        let snapshot = repo.snapshot().await?;

        Ok(inactivity::evaluate(
            &snapshot,
            self.clock.now(),
            self.threshold,
        ))
    }

    /// Runs one sweep.
    ///
    /// A failure for one member never stops the others. The completion report is
    /// sent after every flagged member has been handled, and is sent even when
    /// nothing was flagged. If the store cannot be read, operators are told the
    /// sweep was skipped instead.
    pub async fn run(&self) -> SweepOutcome {
        tracing::info!("Running inactivity sweep");

        let now = self.clock.now();
        let repo = MemberRecordRepository::new(&self.db);

        let snapshot = match repo.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("Skipping inactivity sweep, failed to read member store: {}", e);
                self.actions
                    .report("Inactivity sweep skipped: member store unavailable")
                    .await;
                return SweepOutcome::StorageUnavailable;
            }
        };

        let flagged = inactivity::evaluate(&snapshot, now, self.threshold);

        tracing::debug!(
            "{} of {} tracked members are inactive",
            flagged.len(),
            snapshot.len()
        );

        let outcomes: Vec<_> = stream::iter(flagged)
            .map(|member_id| self.actions.apply(member_id, RemovalReason::Inactive))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let report = SweepReport::from_outcomes(&outcomes);

        tracing::info!(
            "Inactivity sweep finished: {} flagged, {} processed, {} failed",
            report.flagged,
            report.processed,
            report.failed
        );

        self.actions.report_sweep(&report).await;

        SweepOutcome::Completed(report)
    }
}
