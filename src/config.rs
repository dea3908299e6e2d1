use std::{collections::HashSet, time::Duration};

use crate::{
    error::{config::ConfigError, AppError},
    model::moderation::{ActionMode, EmptyRoleSetPolicy},
    util::parse::{parse_positive_u64, parse_role_sets, parse_u64},
};

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 2 * 60 * 60;
const DEFAULT_INACTIVITY_THRESHOLD_DAYS: u64 = 30;
const DEFAULT_SWEEP_CONCURRENCY: u64 = 4;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    /// Guild whose members are tracked and moderated.
    pub guild_id: u64,
    /// Channel that receives moderation reports.
    pub report_channel_id: u64,

    pub sweep_interval: Duration,
    pub inactivity_threshold: chrono::Duration,
    pub sweep_concurrency: usize,

    pub watched_role_sets: Vec<HashSet<u64>>,
    pub empty_role_set_policy: EmptyRoleSetPolicy,
    pub action_mode: ActionMode,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Unset optional variables fall back to their defaults; set but malformed
    /// values are always rejected.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let positive_or = |name: &str, default: u64| match lookup(name) {
            Some(value) => parse_positive_u64(name, &value),
            None => Ok(default),
        };

        let guild_id = parse_u64("GUILD_ID", &required("GUILD_ID")?)?;
        let report_channel_id = parse_u64("REPORT_CHANNEL_ID", &required("REPORT_CHANNEL_ID")?)?;

        let sweep_interval = Duration::from_secs(positive_or(
            "SWEEP_INTERVAL_SECS",
            DEFAULT_SWEEP_INTERVAL_SECS,
        )?);

        let threshold_days = positive_or(
            "INACTIVITY_THRESHOLD_DAYS",
            DEFAULT_INACTIVITY_THRESHOLD_DAYS,
        )?;
        let inactivity_threshold = i64::try_from(threshold_days)
            .ok()
            .and_then(chrono::Duration::try_days)
            .ok_or_else(|| ConfigError::InvalidValue {
                name: "INACTIVITY_THRESHOLD_DAYS".to_string(),
                value: threshold_days.to_string(),
                reason: "out of range".to_string(),
            })?;

        let sweep_concurrency =
            positive_or("SWEEP_CONCURRENCY", DEFAULT_SWEEP_CONCURRENCY)? as usize;

        let watched_role_sets = match lookup("WATCHED_ROLE_SETS") {
            Some(value) => parse_role_sets("WATCHED_ROLE_SETS", &value)?,
            None => Vec::new(),
        };

        let empty_role_set_policy = match lookup("EMPTY_ROLE_SET_POLICY") {
            Some(value) => value
                .parse()
                .map_err(|reason| invalid("EMPTY_ROLE_SET_POLICY", &value, reason))?,
            None => EmptyRoleSetPolicy::default(),
        };

        let action_mode = match lookup("ACTION_MODE") {
            Some(value) => value
                .parse()
                .map_err(|reason| invalid("ACTION_MODE", &value, reason))?,
            None => ActionMode::default(),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            guild_id,
            report_channel_id,
            sweep_interval,
            inactivity_threshold,
            sweep_concurrency,
            watched_role_sets,
            empty_role_set_policy,
            action_mode,
        })
    }
}

fn invalid(name: &str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
        reason,
    }
}
