use serde_json::{Map, Value};

/// Maps original payload field names to their short output keys.
pub fn rename_field(name: &str) -> &str {
    match name {
        "deviceId" => "did",
        "groupId" => "gid",
        "sessionId" => "sid",
        "unifiedSessionId" => "usid",
        "userId" | "user_id" => "uid",
        "kind" => "k",
        "trackType" | "track_type" => "tt",
        "width" => "w",
        "height" => "h",
        "direction" => "dir",
        "enabled" => "en",
        "muted" => "mu",
        "readyState" => "rs",
        "peerType" => "pt",
        "sdpMLineIndex" => "mli",
        "sdpMid" => "mid",
        _ => name,
    }
}

/// Fields removed entirely from generically-compressed payloads. SDP and
/// candidate bodies have dedicated summarizers; the rest is noise.
pub fn should_drop_field(name: &str) -> bool {
    matches!(
        name,
        "label" | "timestamp" | "sdp" | "candidate" | "iceCandidate" | "usernameFragment"
    )
}

/// Renames keys in an object according to the short-name map, dropping the
/// drop-set along the way. Nested objects are rewritten recursively.
pub fn rename_map_keys(map: &Map<String, Value>) -> Map<String, Value> {
    let mut result = Map::new();
    for (k, v) in map {
        if should_drop_field(k) {
            continue;
        }
        let value = match v {
            Value::Object(nested) => Value::Object(rename_map_keys(nested)),
            other => other.clone(),
        };
        result.insert(rename_field(k).to_string(), value);
    }
    result
}
