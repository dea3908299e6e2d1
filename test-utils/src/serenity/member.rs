//! Test factory for creating Serenity Member objects.

use serenity::all::Member;

fn user_json(user_id: u64, bot: bool) -> serde_json::Value {
    serde_json::json!({
        "id": user_id.to_string(),
        "username": format!("user{}", user_id),
        "global_name": null,
        "avatar": null,
        "bot": bot,
    })
}

fn member_json(
    guild_id: u64,
    user_id: u64,
    role_ids: &[u64],
    pending: bool,
    bot: bool,
) -> serde_json::Value {
    let roles: Vec<String> = role_ids.iter().map(|id| id.to_string()).collect();

    serde_json::json!({
        "user": user_json(user_id, bot),
        "nick": null,
        "avatar": null,
        "roles": roles,
        "joined_at": "2024-01-01T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": pending,
        "permissions": null,
        "communication_disabled_until": null,
        "guild_id": guild_id.to_string(),
    })
}

/// Creates a test Serenity guild Member.
///
/// The member joined at `2024-01-01T00:00:00Z` and is not a bot account.
///
/// # Arguments
/// - `guild_id` - Guild the member belongs to
/// - `user_id` - Discord user ID of the member
/// - `role_ids` - Role IDs the member currently holds
/// - `pending` - Whether the member has yet to pass membership screening
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
pub fn create_test_member(guild_id: u64, user_id: u64, role_ids: &[u64], pending: bool) -> Member {
    serde_json::from_value(member_json(guild_id, user_id, role_ids, pending, false))
        .expect("Failed to create test member - invalid JSON structure")
}

/// Creates a test Serenity guild Member whose user is a bot account.
pub fn create_test_bot_member(guild_id: u64, user_id: u64) -> Member {
    serde_json::from_value(member_json(guild_id, user_id, &[], false, true))
        .expect("Failed to create test bot member - invalid JSON structure")
}
