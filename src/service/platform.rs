//! Contract for the community platform the bot moderates.
//!
//! The services never call Discord directly; they go through `CommunityPlatform`
//! so the Serenity-backed implementation in `bot::platform` can be swapped for a
//! scripted fake in tests. Implementations are scoped to a single guild and a
//! single reporting channel.

use async_trait::async_trait;

use crate::{error::platform::PlatformError, model::member::GuildMemberSnapshot};

#[async_trait]
pub trait CommunityPlatform: Send + Sync {
    /// Lists every current member of the guild.
    async fn list_members(&self) -> Result<Vec<GuildMemberSnapshot>, PlatformError>;

    /// Sends a direct message to a member.
    ///
    /// Fails with `NotificationBlocked` when the member does not accept messages
    /// from the bot.
    async fn notify_member(&self, member_id: u64, content: &str) -> Result<(), PlatformError>;

    /// Removes a member from the guild.
    ///
    /// Fails with `InsufficientPermission` or `MemberGone`.
    async fn remove_member(&self, member_id: u64, reason: &str) -> Result<(), PlatformError>;

    /// Posts a message to the operator reporting channel.
    async fn send_report(&self, content: &str) -> Result<(), PlatformError>;
}
