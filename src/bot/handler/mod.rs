use serenity::all::{
    Context, EventHandler, Guild, GuildId, GuildMemberUpdateEvent, Member, Message, Reaction,
    Ready, User, VoiceState,
};
use serenity::async_trait;

use crate::state::BotState;

pub mod activity;
pub mod guild;
pub mod member;
pub mod ready;

#[cfg(test)]
mod test;

/// Discord bot event handler
pub struct Handler {
    pub state: BotState,
}

impl Handler {
    pub fn new(state: BotState) -> Self {
        Self { state }
    }

    /// Whether an event from `guild_id` concerns the guild this bot moderates.
    fn is_target_guild(&self, guild_id: Option<GuildId>) -> bool {
        guild_id.is_some_and(|id| id.get() == self.state.guild_id)
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.state, ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        if !self.is_target_guild(Some(guild.id)) {
            return;
        }
        guild::handle_guild_create(&self.state, ctx, guild, is_new).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        if !self.is_target_guild(Some(new_member.guild_id)) {
            return;
        }
        member::handle_guild_member_addition(&self.state, ctx, new_member).await;
    }

    /// Called when a member leaves a guild
    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        member_data_if_available: Option<Member>,
    ) {
        if !self.is_target_guild(Some(guild_id)) {
            return;
        }
        member::handle_guild_member_removal(&self.state, ctx, user, member_data_if_available)
            .await;
    }

    /// Called when a member is updated in a guild (roles, screening, etc.)
    async fn guild_member_update(
        &self,
        ctx: Context,
        old: Option<Member>,
        new: Option<Member>,
        event: GuildMemberUpdateEvent,
    ) {
        if !self.is_target_guild(Some(event.guild_id)) {
            return;
        }
        member::handle_guild_member_update(&self.state, ctx, old, new, event).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        if !self.is_target_guild(message.guild_id) {
            return;
        }
        activity::handle_message(&self.state, ctx, message).await;
    }

    /// Called when a reaction is added to a message
    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        if !self.is_target_guild(reaction.guild_id) {
            return;
        }
        activity::handle_reaction_add(&self.state, ctx, reaction).await;
    }

    /// Called when a member joins, leaves or moves between voice channels
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        if !self.is_target_guild(new.guild_id) {
            return;
        }
        activity::handle_voice_state_update(&self.state, ctx, old, new).await;
    }
}
