//! Serenity-backed implementation of `CommunityPlatform`.
//!
//! Talks to Discord's HTTP API for one guild and one reporting channel. Discord
//! error responses are mapped onto `PlatformError` by JSON error code first and
//! HTTP status second.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::{
    all::{ChannelId, CreateMessage, GuildId, Member, UserId},
    http::{Http, HttpError},
};

use crate::{
    error::platform::PlatformError, model::member::GuildMemberSnapshot,
    service::platform::CommunityPlatform,
};

/// Maximum number of members to fetch per API request.
///
/// Discord's API supports up to 1000 members per request.
static MEMBERS_PER_REQUEST: u64 = 1000;

/// Discord JSON error code: Unknown Member.
const UNKNOWN_MEMBER: isize = 10007;
/// Discord JSON error code: Unknown User.
const UNKNOWN_USER: isize = 10013;
/// Discord JSON error code: Missing Permissions.
const MISSING_PERMISSIONS: isize = 50013;
/// Discord JSON error code: Cannot send messages to this user.
const CANNOT_MESSAGE_USER: isize = 50007;

/// Which operation a Discord error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformAction {
    Notify,
    Remove,
    Report,
    ListMembers,
}

impl PlatformAction {
    fn describe(self) -> &'static str {
        match self {
            Self::Notify => "message member",
            Self::Remove => "remove member",
            Self::Report => "post to reporting channel",
            Self::ListMembers => "list guild members",
        }
    }
}

/// Kind of failure a Discord error response represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscordFailure {
    NotificationBlocked,
    MemberGone,
    InsufficientPermission,
    Other,
}

/// Classifies a Discord error response by status code and JSON error code.
pub fn classify_discord_error(action: PlatformAction, status: u16, code: isize) -> DiscordFailure {
    match code {
        CANNOT_MESSAGE_USER => return DiscordFailure::NotificationBlocked,
        UNKNOWN_MEMBER | UNKNOWN_USER => return DiscordFailure::MemberGone,
        MISSING_PERMISSIONS => return DiscordFailure::InsufficientPermission,
        _ => {}
    }

    match (action, status) {
        (PlatformAction::Notify, 403) => DiscordFailure::NotificationBlocked,
        (PlatformAction::Notify | PlatformAction::Remove, 404) => DiscordFailure::MemberGone,
        (_, 403) => DiscordFailure::InsufficientPermission,
        _ => DiscordFailure::Other,
    }
}

fn map_error(err: serenity::Error, action: PlatformAction, member_id: u64) -> PlatformError {
    let failure = match &err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            classify_discord_error(action, response.status_code.as_u16(), response.error.code)
        }
        _ => DiscordFailure::Other,
    };

    match failure {
        DiscordFailure::NotificationBlocked => PlatformError::NotificationBlocked(member_id),
        DiscordFailure::MemberGone => PlatformError::MemberGone(member_id),
        DiscordFailure::InsufficientPermission => {
            PlatformError::InsufficientPermission(action.describe().to_string())
        }
        DiscordFailure::Other => PlatformError::Discord(Box::new(err)),
    }
}

/// Converts a Serenity guild member into the platform-neutral snapshot.
pub fn member_snapshot(member: &Member) -> GuildMemberSnapshot {
    GuildMemberSnapshot {
        member_id: member.user.id.get(),
        joined_at: member.joined_at.map(|t| *t),
        pending: member.pending,
        bot: member.user.bot,
        role_ids: member.roles.iter().map(|role| role.get()).collect(),
    }
}

pub struct SerenityPlatform {
    http: Arc<Http>,
    guild_id: GuildId,
    report_channel_id: ChannelId,
}

impl SerenityPlatform {
    pub fn new(http: Arc<Http>, guild_id: u64, report_channel_id: u64) -> Self {
        Self {
            http,
            guild_id: GuildId::new(guild_id),
            report_channel_id: ChannelId::new(report_channel_id),
        }
    }
}

#[async_trait]
impl CommunityPlatform for SerenityPlatform {
    async fn list_members(&self) -> Result<Vec<GuildMemberSnapshot>, PlatformError> {
        let mut snapshots = Vec::new();
        let mut after: Option<u64> = None;

        // Requires the GUILD_MEMBERS privileged intent
        loop {
            let members = self
                .http
                .get_guild_members(self.guild_id, Some(MEMBERS_PER_REQUEST), after)
                .await
                .map_err(|e| map_error(e, PlatformAction::ListMembers, 0))?;

            let fetched_count = members.len();
            after = members.last().map(|m| m.user.id.get());
            snapshots.extend(members.iter().map(member_snapshot));

            tracing::debug!(
                "Fetched {} members for guild {} (total so far: {})",
                fetched_count,
                self.guild_id,
                snapshots.len()
            );

            if fetched_count < MEMBERS_PER_REQUEST as usize {
                break;
            }
        }

        Ok(snapshots)
    }

    async fn notify_member(&self, member_id: u64, content: &str) -> Result<(), PlatformError> {
        let user_id = UserId::new(member_id);

        let channel = user_id
            .create_dm_channel(&self.http)
            .await
            .map_err(|e| map_error(e, PlatformAction::Notify, member_id))?;

        channel
            .id
            .send_message(&self.http, CreateMessage::new().content(content))
            .await
            .map_err(|e| map_error(e, PlatformAction::Notify, member_id))?;

        Ok(())
    }

    async fn remove_member(&self, member_id: u64, reason: &str) -> Result<(), PlatformError> {
        self.http
            .kick_member(self.guild_id, UserId::new(member_id), Some(reason))
            .await
            .map_err(|e| map_error(e, PlatformAction::Remove, member_id))
    }

    async fn send_report(&self, content: &str) -> Result<(), PlatformError> {
        self.report_channel_id
            .send_message(&self.http, CreateMessage::new().content(content))
            .await
            .map_err(|e| map_error(e, PlatformAction::Report, 0))?;

        Ok(())
    }
}
