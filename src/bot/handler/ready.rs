//! Ready event handler for bot initialization.
//!
//! The `ready` event fires when the bot connects to Discord's gateway and completes
//! the initial handshake, and again after every full reconnect. Raising the ready
//! signal here is what lets the sweep scheduler start.

use serenity::all::{ActivityData, Context, Ready};

use crate::state::BotState;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `state` - Shared bot state holding the ready signal
/// - `ctx` - Discord context for setting activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &BotState, ctx: Context, ready: Ready) {
    if state.ready.is_ready() {
        tracing::info!("{} reconnected to Discord", ready.user.name);
    } else {
        tracing::info!("{} is connected to Discord", ready.user.name);
    }

    ctx.set_activity(Some(ActivityData::watching("the member list")));

    state.ready.mark_ready();
}
