use std::{sync::Arc, time::Duration};

use tokio::{sync::Mutex, task::JoinHandle};
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;

use crate::{
    error::AppError,
    model::moderation::SweepOutcome,
    scheduler::ready::ReadySignal,
    service::sweep::InactivitySweepService,
};

/// Recurring inactivity sweep.
///
/// Fires on a fixed interval. Missed firings (the process was down) are not
/// backfilled; the schedule simply resumes. At most one firing runs at a time: a
/// tick that arrives while a firing is still in flight is skipped.
pub struct SweepScheduler {
    scheduler: JobScheduler,
    sweeper: Arc<InactivitySweepService>,
    in_flight: Arc<Mutex<()>>,
    shutdown: CancellationToken,
}

impl SweepScheduler {
    /// Starts the sweep scheduler
    ///
    /// Waits for the gateway to report ready (once, here, not on every firing),
    /// then schedules a sweep every `interval`. The first sweep runs one interval
    /// after startup.
    ///
    /// # Arguments
    /// - `sweeper` - Service that runs a single sweep
    /// - `interval` - Time between firings
    /// - `ready` - Signal raised by the gateway ready handler
    pub async fn start(
        sweeper: Arc<InactivitySweepService>,
        interval: Duration,
        ready: ReadySignal,
    ) -> Result<Self, AppError> {
        tracing::debug!("Waiting for Discord connection before scheduling sweeps");
        ready.wait().await;

        let scheduler = JobScheduler::new().await?;
        let in_flight = Arc::new(Mutex::new(()));
        let shutdown = CancellationToken::new();

        let job_sweeper = sweeper.clone();
        let job_in_flight = in_flight.clone();
        let job_shutdown = shutdown.clone();

        let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
            let sweeper = job_sweeper.clone();
            let in_flight = job_in_flight.clone();
            let shutdown = job_shutdown.clone();

            Box::pin(async move {
                let Ok(_guard) = in_flight.try_lock_owned() else {
                    tracing::warn!("Previous inactivity sweep still running, skipping this tick");
                    return;
                };

                // Checked under the guard so shutdown cannot slip in between
                if shutdown.is_cancelled() {
                    return;
                }

                sweeper.run().await;
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        tracing::info!(
            "Inactivity sweep scheduler started (every {} seconds)",
            interval.as_secs()
        );

        Ok(Self {
            scheduler,
            sweeper,
            in_flight,
            shutdown,
        })
    }

    /// Runs a sweep now, outside the regular schedule.
    ///
    /// Waits for any in-flight firing to finish first. The returned handle resolves
    /// to the outcome of the sweep.
    pub async fn trigger(&self) -> JoinHandle<Option<SweepOutcome>> {
        let guard = self.in_flight.clone().lock_owned().await;
        let sweeper = self.sweeper.clone();
        let shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            let _guard = guard;
            if shutdown.is_cancelled() {
                return None;
            }
            Some(sweeper.run().await)
        })
    }

    /// Stops the scheduler gracefully.
    ///
    /// No new firing starts once this is called. The timer is released, then this
    /// waits for an in-flight firing to finish acting on all of its members before
    /// reporting the scheduler stopped.
    pub async fn shutdown(mut self) -> Result<(), AppError> {
        tracing::info!("Stopping inactivity sweep scheduler");

        self.shutdown.cancel();
        self.scheduler.shutdown().await?;

        let _idle = self.in_flight.lock().await;

        tracing::info!("Inactivity sweep scheduler stopped");

        Ok(())
    }
}
