use std::collections::HashSet;

use serenity::all::{Context, GuildMemberUpdateEvent, Member, RoleId, User};

use crate::state::BotState;

pub(crate) fn role_set(roles: &[RoleId]) -> HashSet<u64> {
    roles.iter().map(|role| role.get()).collect()
}

/// Handles the guild_member_addition event when a member joins a guild
///
/// Members that join without screening enabled arrive already verified; their
/// roles are classified straight away.
pub async fn handle_guild_member_addition(state: &BotState, _ctx: Context, new_member: Member) {
    if new_member.user.bot {
        return;
    }

    let member_id = new_member.user.id.get();
    let joined_at = new_member.joined_at.map(|t| *t);

    state.reactor.handle_join(member_id, joined_at).await;

    if !new_member.pending {
        state
            .reactor
            .handle_role_update(member_id, &role_set(&new_member.roles), false)
            .await;
    }
}

/// Handles the guild_member_removal event when a member leaves a guild
pub async fn handle_guild_member_removal(
    state: &BotState,
    _ctx: Context,
    user: User,
    _member_data_if_available: Option<Member>,
) {
    if user.bot {
        return;
    }

    state.reactor.handle_leave(user.id.get()).await;
}

/// Handles the guild_member_update event when a member's roles or screening state change
pub async fn handle_guild_member_update(
    state: &BotState,
    _ctx: Context,
    _old: Option<Member>,
    _new: Option<Member>,
    event: GuildMemberUpdateEvent,
) {
    if event.user.bot {
        return;
    }

    let outcome = state
        .reactor
        .handle_role_update(event.user.id.get(), &role_set(&event.roles), event.pending)
        .await;

    tracing::debug!("Member {} updated: {:?}", event.user.id, outcome);
}
