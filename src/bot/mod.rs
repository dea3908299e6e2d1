//! Discord bot integration.
//!
//! The gateway client delivers membership and activity events for the configured
//! guild to `handler::Handler`, which hands them to the member event reactor.
//! `platform::SerenityPlatform` is the outbound side: listing members, direct
//! messages, removals and operator reports over Discord's HTTP API.
//!
//! The bot runs in its own tokio task so the sweep scheduler and the shutdown
//! signal can be driven from `main`.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild availability, used to reconcile members on startup
//! - `GUILD_MEMBERS` - Receive member join, update, and leave events (privileged intent)
//! - `GUILD_MESSAGES` - Messages count as member activity
//! - `GUILD_MESSAGE_REACTIONS` - Reactions count as member activity
//! - `GUILD_VOICE_STATES` - Joining a voice channel counts as member activity
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod handler;
pub mod platform;
pub mod start;
