use thiserror::Error;

/// Failures reported by the community platform adapter.
///
/// `NotificationBlocked` is expected during normal operation and is never logged as
/// an error. `InsufficientPermission` and `MemberGone` are reported to operators.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The member does not accept direct messages from the bot.
    #[error("member {0} does not accept direct messages")]
    NotificationBlocked(u64),

    /// The bot lacks the permission required for the action.
    #[error("missing permission to {0}")]
    InsufficientPermission(String),

    /// The member is no longer part of the guild.
    #[error("member {0} is no longer in the guild")]
    MemberGone(u64),

    /// Any other Discord API failure.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),
}
