//! Error types for the pawkeeper bot.
//!
//! `AppError` is the top-level error returned across service boundaries. Most
//! variants wrap a domain-specific error via `#[from]`. Only `ConfigErr` is fatal,
//! and only at startup; every other variant is logged by the caller and the
//! affected operation is skipped.

pub mod config;
pub mod platform;

use thiserror::Error;

use crate::error::{config::ConfigError, platform::PlatformError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error while loading environment variables.
    ///
    /// Aborts startup; the bot never runs with a partially valid configuration.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// The member store backend could not complete an operation.
    ///
    /// The reactor and the sweep log this and skip the affected member or firing.
    #[error("member store unavailable: {0}")]
    StorageUnavailable(#[from] sea_orm::DbErr),

    /// Discord platform operation failed.
    #[error(transparent)]
    PlatformErr(#[from] PlatformError),

    /// Discord API or gateway error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
