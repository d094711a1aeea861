use serde_json::Value;

/// Media kinds compress to one-letter codes; unknown kinds pass through.
pub fn compress_media_kind(kind: &str) -> &str {
    match kind {
        "audio" => "a",
        "video" => "v",
        _ => kind,
    }
}

/// Device kinds compress to two-letter codes; unknown kinds pass through.
pub fn compress_device_kind(kind: &str) -> &str {
    match kind {
        "audioinput" => "ai",
        // "videoinput2" is a rare duplicate reported by some browsers
        "videoinput" | "videoinput2" => "vi",
        "audiooutput" => "ao",
        _ => kind,
    }
}

/// Unknown states map to -1, never an error.
pub fn compress_signaling_state(state: &str) -> i64 {
    match state {
        "stable" => 0,
        "have-local-offer" => 1,
        "have-remote-offer" => 2,
        "have-local-pranswer" => 3,
        "have-remote-pranswer" => 4,
        "closed" => 5,
        _ => -1,
    }
}

pub fn compress_ice_connection_state(state: &str) -> i64 {
    match state {
        "new" => 0,
        "checking" => 1,
        "connected" => 2,
        "completed" => 3,
        "failed" => 4,
        "disconnected" => 5,
        "closed" => 6,
        _ => -1,
    }
}

pub fn compress_ice_gathering_state(state: &str) -> i64 {
    match state {
        "new" => 0,
        "gathering" => 1,
        "complete" => 2,
        _ => -1,
    }
}

pub fn compress_connection_state(state: &str) -> i64 {
    match state {
        "new" => 0,
        "connecting" => 1,
        "connected" => 2,
        "disconnected" => 3,
        "failed" => 4,
        "closed" => 5,
        _ => -1,
    }
}

/// Permission states are string-coded; unknown states pass through.
pub fn compress_permission_state(state: &str) -> &str {
    match state {
        "granted" => "g",
        "prompt" => "p",
        "denied" => "d",
        _ => state,
    }
}

/// Track types arrive either as protobuf enum names, plain kind strings, or
/// already-numeric codes.
pub fn compress_track_type(tt: &Value) -> i64 {
    match tt {
        Value::String(s) => match s.as_str() {
            "TRACK_TYPE_UNSPECIFIED" => 0,
            "TRACK_TYPE_AUDIO" | "audio" => 1,
            "TRACK_TYPE_VIDEO" | "video" => 2,
            _ => 0,
        },
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        _ => 0,
    }
}

pub fn bool_to_int(b: bool) -> i64 {
    if b {
        1
    } else {
        0
    }
}
