use serde_json::{json, Value};

use super::sfu::shorten_id;
use super::{
    ConnectionQualityHandler, Handler, JoinRequestHandler, TrackMappingHandler,
    UpdateMuteStatesHandler,
};
use crate::event::RawEvent;

fn event(name: &str, payload: Value) -> RawEvent {
    RawEvent {
        name: name.to_string(),
        scope: None,
        payload,
        ts: 0,
    }
}

#[test]
fn test_shorten_id() {
    let tests = vec![
        ("4a5b6c7d-1234-5678-9abc-def012345678", "4a5b..5678"),
        ("short-id", "short-id"),
        ("exactly12chr", "exactly12chr"),
    ];

    for (input, expected) in tests {
        assert_eq!(shorten_id(input), expected, "input {input}");
    }
}

#[test]
fn test_join_request() {
    let e = event(
        "joinRequest",
        json!({
            "requestPayload": {
                "joinRequest": {
                    "sessionId": "4a5b6c7d-1234-5678-9abc-def012345678",
                    "fastReconnect": true,
                    "capabilities": ["subscriber-video-pause"],
                    "clientDetails": {
                        "sdk": {"type": 2, "major": "1", "minor": "8", "patch": "4"},
                        "os": {"name": "macOS", "version": "14.1", "architecture": "arm64"},
                        "browser": {"name": "Chrome", "version": "126.0.6478.127"}
                    }
                }
            }
        }),
    );

    let result = JoinRequestHandler.transform(&e).unwrap();
    assert_eq!(result["sid"], "4a5b..5678");
    assert_eq!(result["fr"], 1);
    assert_eq!(result["cap"], json!(["subscriber-video-pause"]));
    assert_eq!(result["sdk"], json!([2, "1.8.4"]));
    assert_eq!(result["os"], json!(["mac", "14.1", "arm64"]));
    assert_eq!(result["br"], json!(["ch", "126"]));
}

#[test]
fn test_update_mute_states() {
    let e = event(
        "UpdateMuteStates",
        json!({"muteStates": [
            {"trackType": "TRACK_TYPE_AUDIO", "muted": true},
            {"trackType": 2, "muted": false}
        ]}),
    );

    let result = UpdateMuteStatesHandler.transform(&e).unwrap();
    assert_eq!(result, json!({"mu": {"a": 1, "v": 0}}));
}

#[test]
fn test_connection_quality_wrapped_and_bare() {
    let wrapped = event("connectionQualityChanged", json!({"quality": 3}));
    assert_eq!(
        ConnectionQualityHandler.transform(&wrapped),
        Some(json!({"q": 3}))
    );

    let bare = event("connectionQualityChanged", json!(4));
    assert_eq!(
        ConnectionQualityHandler.transform(&bare),
        Some(json!({"q": 4}))
    );
}

#[test]
fn test_track_mapping() {
    let e = event(
        "sfu.track.mapping",
        json!({
            "direction": "inbound",
            "track_type": "TRACK_TYPE_VIDEO",
            "codec": "VP9:profile-2",
            "participant": {"user_id": "alice"},
            "ssrc": 123456789.0
        }),
    );

    let result = TrackMappingHandler.transform(&e).unwrap();
    assert_eq!(
        result,
        json!({"dir": "in", "tt": 2, "c": "vp9", "uid": "alice", "s": 123456789})
    );
}
