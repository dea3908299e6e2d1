use serenity::all::{RoleId, VoiceState};

use crate::bot::handler::{activity::is_voice_join, member::role_set};

fn voice_state(user_id: u64, channel_id: Option<u64>) -> VoiceState {
    serde_json::from_value(serde_json::json!({
        "channel_id": channel_id.map(|id| id.to_string()),
        "guild_id": "1",
        "user_id": user_id.to_string(),
        "member": null,
        "session_id": "session",
        "deaf": false,
        "mute": false,
        "self_deaf": false,
        "self_mute": false,
        "self_stream": false,
        "self_video": false,
        "suppress": false,
        "request_to_speak_timestamp": null,
    }))
    .expect("Failed to create test voice state - invalid JSON structure")
}

/// Tests that entering a voice channel from nowhere counts as activity.
#[test]
fn entering_voice_is_activity() {
    assert!(is_voice_join(None, &voice_state(7, Some(300))));
    assert!(is_voice_join(
        Some(&voice_state(7, None)),
        &voice_state(7, Some(300))
    ));
}

/// Tests that moving to a different channel counts as activity.
#[test]
fn switching_channel_is_activity() {
    assert!(is_voice_join(
        Some(&voice_state(7, Some(300))),
        &voice_state(7, Some(301))
    ));
}

/// Tests that leaving voice or a state change within the same channel does not.
#[test]
fn leaving_or_muting_is_not_activity() {
    assert!(!is_voice_join(
        Some(&voice_state(7, Some(300))),
        &voice_state(7, None)
    ));
    assert!(!is_voice_join(
        Some(&voice_state(7, Some(300))),
        &voice_state(7, Some(300))
    ));
}

#[test]
fn converts_role_ids() {
    let roles = role_set(&[RoleId::new(5), RoleId::new(6), RoleId::new(5)]);

    assert_eq!(roles, [5, 6].into_iter().collect());
}
