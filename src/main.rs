//! Membership lifecycle and auto-moderation bot for a single Discord guild.
//!
//! # Architecture
//!
//! - **Bot Layer** (`bot/`) - Gateway event handlers and the Discord HTTP platform adapter
//! - **Service Layer** (`service/`) - Event reactor, bot-signature classifier, inactivity
//!   evaluation, moderation actions, and the sweep
//! - **Data Layer** (`data/`) - Member store operations and entity-to-domain conversion
//! - **Model Layer** (`model/`) - Domain models shared across layers
//! - **Error Layer** (`error/`) - Application error types
//! - **Scheduler** (`scheduler/`) - Recurring inactivity sweep with graceful shutdown
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared state handed to the event handler
//! - **Startup** (`startup`) - Database connection and migrations

mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use serenity::http::Http;
use tracing_subscriber::EnvFilter;

use crate::{
    bot::platform::SerenityPlatform,
    config::Config,
    error::AppError,
    scheduler::{inactivity_sweep::SweepScheduler, ready::ReadySignal},
    service::{
        classifier::BotSignatureClassifier, moderation::ModerationActions,
        platform::CommunityPlatform, reactor::MemberEventReactor, sweep::InactivitySweepService,
    },
    state::BotState,
    util::clock::{Clock, SystemClock},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pawkeeper=info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;

    let discord_http = Arc::new(Http::new(&config.discord_bot_token));
    let platform: Arc<dyn CommunityPlatform> = Arc::new(SerenityPlatform::new(
        discord_http,
        config.guild_id,
        config.report_channel_id,
    ));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let actions = Arc::new(ModerationActions::new(
        db.clone(),
        platform.clone(),
        config.action_mode,
    ));

    let classifier = BotSignatureClassifier::new(
        config.watched_role_sets.clone(),
        config.empty_role_set_policy,
    );
    if config.watched_role_sets.is_empty() {
        tracing::warn!("No watched role sets configured, bot-signature detection is disabled");
    }

    let reactor = Arc::new(MemberEventReactor::new(
        db.clone(),
        classifier,
        actions.clone(),
        platform,
        clock.clone(),
    ));

    let sweeper = Arc::new(InactivitySweepService::new(
        db,
        actions.clone(),
        clock,
        config.inactivity_threshold,
        config.sweep_concurrency,
    ));

    tracing::info!(
        "Starting pawkeeper for guild {} in {} mode",
        config.guild_id,
        actions.mode()
    );

    let ready = ReadySignal::new();
    let state = BotState::new(reactor.clone(), ready.clone(), config.guild_id);

    let bot_client = bot::start::init_bot(&config, state).await?;
    let shard_manager = bot_client.shard_manager.clone();

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    // The scheduler only starts once the gateway reports ready
    let scheduler = tokio::select! {
        scheduler = SweepScheduler::start(sweeper.clone(), config.sweep_interval, ready) => Some(scheduler?),
        _ = tokio::signal::ctrl_c() => None,
    };

    match scheduler {
        Some(scheduler) => {
            log_member_overview(&reactor, &sweeper).await;

            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown requested");
            scheduler.shutdown().await?;
        }
        None => tracing::info!("Shutdown requested before the bot was ready"),
    }

    shard_manager.shutdown_all().await;

    tracing::info!("Shutdown complete");

    Ok(())
}

/// Logs how many members are waiting on screening and how many the next sweep
/// would act on.
async fn log_member_overview(reactor: &MemberEventReactor, sweeper: &InactivitySweepService) {
    match reactor.pending_members().await {
        Ok(pending) => tracing::info!("{} members pending verification", pending.len()),
        Err(e) => tracing::warn!("Failed to count pending members: {}", e),
    }

    match sweeper.preview().await {
        Ok(inactive) => tracing::info!("{} members currently past the inactivity threshold", inactive.len()),
        Err(e) => tracing::warn!("Failed to preview inactivity sweep: {}", e),
    }
}
