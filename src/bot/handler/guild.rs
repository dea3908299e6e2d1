use serenity::all::{Context, Guild};

use crate::state::BotState;

/// Handles the guild becoming available.
///
/// Fires on every (re)connect, so this is where members who joined, left or
/// finished screening while the bot was offline are caught up on.
pub async fn handle_guild_create(state: &BotState, _ctx: Context, guild: Guild, _is_new: Option<bool>) {
    tracing::debug!(
        "Guild create event: {} ({}) - member_count: {}",
        guild.name,
        guild.id,
        guild.member_count
    );

    if let Err(e) = state.reactor.reconcile_guild().await {
        tracing::error!("Failed to reconcile members of guild {}: {}", guild.id, e);
    }
}
