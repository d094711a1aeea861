use serde_json::{json, Value};

use super::{EnumerateDevicesHandler, GetUserMediaHandler, Handler};
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
fn test_enumerate_devices_counts() {
    let e = event(
        "navigator.mediaDevices.enumerateDevices",
        json!([
            {"kind": "audioinput", "label": "Mic 1"},
            {"kind": "audioinput", "label": ""},
            {"kind": "videoinput", "label": ""},
            {"kind": "audiooutput", "label": ""}
        ]),
    );

    let result = EnumerateDevicesHandler.transform(&e).unwrap();
    assert_eq!(result, json!({"ai": 2, "vi": 1, "ao": 1, "hl": 1}));
}

#[test]
fn test_enumerate_devices_without_labels() {
    let e = event(
        "navigator.mediaDevices.enumerateDevices",
        json!([{"kind": "videoinput", "label": ""}]),
    );

    let result = EnumerateDevicesHandler.transform(&e).unwrap();
    assert_eq!(result, json!({"vi": 1, "hl": 0}));
}

#[test]
fn test_get_user_media_request() {
    let e = event(
        "navigator.mediaDevices.getUserMedia.request",
        json!({
            "audio": {"autoGainControl": true, "noiseSuppression": true, "echoCancellation": false},
            "video": {"width": 1280, "height": 720}
        }),
    );

    let result = GetUserMediaHandler.transform(&e).unwrap();
    assert_eq!(
        result,
        json!({"a": 1, "agc": 1, "ns": 1, "v": 1, "w": 1280, "h": 720})
    );
}

#[test]
fn test_get_user_media_success_tracks() {
    let e = event(
        "navigator.mediaDevices.getUserMedia.OnSuccess",
        json!({"tracks": [{"kind": "audio"}, {"kind": "video"}]}),
    );

    let result = GetUserMediaHandler.transform(&e).unwrap();
    assert_eq!(result, json!({"a": 1, "v": 1}));
}

#[test]
fn test_get_user_media_failure_truncates_message() {
    let long_message = "x".repeat(80);
    let e = event(
        "navigator.mediaDevices.getUserMedia.OnFailure",
        json!({"name": "NotReadableError", "message": long_message}),
    );

    let result = GetUserMediaHandler.transform(&e).unwrap();
    assert_eq!(result["ok"], 0);
    assert_eq!(result["errc"], "NotReadableError");
    let err = result["err"].as_str().unwrap();
    assert_eq!(err.len(), 53);
    assert!(err.ends_with("..."));
}
