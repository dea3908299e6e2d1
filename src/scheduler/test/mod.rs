use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::{
    data::MemberRecordRepository,
    model::{
        member::MemberPatch,
        moderation::{ActionMode, SweepOutcome, SweepReport},
    },
    scheduler::{inactivity_sweep::SweepScheduler, ready::ReadySignal},
    service::test::{t0, Harness, PlatformCall},
};


const THRESHOLD_DAYS: i64 = 30;
/// Long enough that the regular schedule never fires during a test.
const INTERVAL: StdDuration = StdDuration::from_secs(2 * 60 * 60);

async fn seed_inactive(harness: &Harness, ids: &[u64]) {
    let repo = MemberRecordRepository::new(&harness.db);
    for id in ids {
        repo.upsert(*id, MemberPatch::verified(t0())).await.unwrap();
    }
    harness.clock.advance(Duration::days(THRESHOLD_DAYS + 1));
}

/// Tests that shutdown waits for an in-flight sweep to act on every member.
///
/// Setup:
/// - Three inactive members, removals take 50ms each
/// - A sweep is triggered and shutdown requested while it runs
///
/// Expected: all three removals and the completion report are recorded before
/// shutdown returns
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shutdown_waits_for_in_flight_sweep() {
    let harness = Harness::new(ActionMode::NotifyAndRemove).await;
    seed_inactive(&harness, &[1, 2, 3]).await;
    harness
        .platform
        .delay_removals(StdDuration::from_millis(50));

    let ready = ReadySignal::new();
    ready.mark_ready();
    let sweeper = std::sync::Arc::new(harness.sweeper(THRESHOLD_DAYS, 1));
    let scheduler = SweepScheduler::start(sweeper, INTERVAL, ready)
        .await
        .unwrap();

    let firing = scheduler.trigger().await;
    tokio::time::sleep(StdDuration::from_millis(10)).await;

    scheduler.shutdown().await.unwrap();

    let mut removed = harness.platform.removed();
    removed.sort_unstable();
    assert_eq!(removed, vec![1, 2, 3]);
    let reports = harness.platform.reports();
    assert!(reports
        .last()
        .is_some_and(|r| r.starts_with("Inactivity sweep finished")));

    assert_eq!(
        firing.await.unwrap(),
        Some(SweepOutcome::Completed(SweepReport {
            flagged: 3,
            processed: 3,
            failed: 0,
        }))
    );
}

/// Tests the regular schedule and that overlapping ticks are skipped.
///
/// Setup:
/// - One inactive member, its removal takes 2.5s
/// - Sweeps scheduled every second
///
/// Expected: the first tick runs a sweep; the ticks arriving while it is still
/// removing the member start nothing, so by the time the completion report
/// lands the member was notified exactly once and exactly one sweep finished
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn scheduled_tick_runs_sweep_and_skips_overlap() {
    let harness = Harness::new(ActionMode::NotifyAndRemove).await;
    seed_inactive(&harness, &[1]).await;
    harness
        .platform
        .delay_removals(StdDuration::from_millis(2500));

    let ready = ReadySignal::new();
    ready.mark_ready();
    let sweeper = std::sync::Arc::new(harness.sweeper(THRESHOLD_DAYS, 1));
    let scheduler = SweepScheduler::start(sweeper, StdDuration::from_secs(1), ready)
        .await
        .unwrap();

    let finished = |reports: &[String]| {
        reports
            .iter()
            .filter(|r| r.starts_with("Inactivity sweep finished"))
            .count()
    };

    let calls = tokio::time::timeout(StdDuration::from_secs(10), async {
        loop {
            if finished(&harness.platform.reports()) > 0 {
                return harness.platform.calls();
            }
            tokio::time::sleep(StdDuration::from_millis(50)).await;
        }
    })
    .await
    .expect("scheduled sweep never finished");

    scheduler.shutdown().await.unwrap();

    let reports: Vec<String> = calls
        .iter()
        .filter_map(|call| match call {
            PlatformCall::Report(content) => Some(content.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(finished(&reports), 1);
    let notified = calls
        .iter()
        .filter(|call| **call == PlatformCall::Notify(1))
        .count();
    assert_eq!(notified, 1);
    assert_eq!(
        calls
            .iter()
            .filter(|call| **call == PlatformCall::Remove(1))
            .count(),
        1
    );
}

/// Tests that a manual trigger runs a full sweep.
///
/// Expected: Completed outcome with the seeded member flagged
#[tokio::test]
async fn trigger_runs_sweep() {
    let harness = Harness::new(ActionMode::ReportOnly).await;
    seed_inactive(&harness, &[5]).await;

    let ready = ReadySignal::new();
    ready.mark_ready();
    let sweeper = std::sync::Arc::new(harness.sweeper(THRESHOLD_DAYS, 4));
    let scheduler = SweepScheduler::start(sweeper, INTERVAL, ready)
        .await
        .unwrap();

    let outcome = scheduler.trigger().await.await.unwrap();

    assert_eq!(
        outcome,
        Some(SweepOutcome::Completed(SweepReport {
            flagged: 1,
            processed: 1,
            failed: 0,
        }))
    );

    scheduler.shutdown().await.unwrap();
}

/// Tests that the scheduler does not start before the gateway is ready.
///
/// Expected: start is still pending until the signal is raised
#[tokio::test]
async fn start_waits_for_ready_signal() {
    let harness = Harness::new(ActionMode::ReportOnly).await;
    let ready = ReadySignal::new();
    let sweeper = std::sync::Arc::new(harness.sweeper(THRESHOLD_DAYS, 4));

    let start = tokio::spawn(SweepScheduler::start(sweeper, INTERVAL, ready.clone()));
    tokio::time::sleep(StdDuration::from_millis(20)).await;
    assert!(!start.is_finished());

    ready.mark_ready();
    let scheduler = start.await.unwrap().unwrap();
    scheduler.shutdown().await.unwrap();
}
