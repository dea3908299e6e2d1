//! Activity events: anything a member does that counts as being active.
//!
//! Messages, reactions, and joining a voice channel refresh the member's
//! `last_seen_at`. Activity from bots and from members the bot does not track is
//! ignored.

use serenity::all::{Context, Message, Reaction, VoiceState};

use crate::state::BotState;

/// Whether a voice state change is the member entering a channel.
///
/// Muting, deafening, or leaving voice does not count. Moving between channels does.
pub(crate) fn is_voice_join(old: Option<&VoiceState>, new: &VoiceState) -> bool {
    match new.channel_id {
        Some(channel) => old.and_then(|old| old.channel_id) != Some(channel),
        None => false,
    }
}

pub async fn handle_message(state: &BotState, _ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    state
        .reactor
        .handle_activity(message.author.id.get(), Some(*message.timestamp))
        .await;
}

pub async fn handle_reaction_add(state: &BotState, _ctx: Context, reaction: Reaction) {
    if reaction.member.as_ref().is_some_and(|m| m.user.bot) {
        return;
    }

    // Reactions in DMs or uncached paths carry no member data, so a bot can get
    // past the check above. Bots are never tracked, and activity from untracked
    // users only logs and returns Untracked.
    let Some(user_id) = reaction.user_id else {
        return;
    };

    state.reactor.handle_activity(user_id.get(), None).await;
}

pub async fn handle_voice_state_update(
    state: &BotState,
    _ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    if new.member.as_ref().is_some_and(|m| m.user.bot) {
        return;
    }

    if !is_voice_join(old.as_ref(), &new) {
        return;
    }

    state.reactor.handle_activity(new.user_id.get(), None).await;
}
