use serde_json::{json, Map, Value};

use super::Handler;
use crate::event::RawEvent;
use crate::sdp::create_sdp_digest;
use crate::transform::compress_track_type;

/// Truncates long ids (session ids are UUIDs) to `first4..last4`.
pub fn shorten_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() > 12 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}..{tail}")
    } else {
        id.to_string()
    }
}

/// signal.ws.open carries only `{isTrusted: true}`.
pub struct SignalWsOpenHandler;

impl Handler for SignalWsOpenHandler {
    fn transform(&self, _event: &RawEvent) -> Option<Value> {
        Some(json!({"ok": 1}))
    }
}

/// joinRequest: session id, reconnect flag, capabilities, client details,
/// and digests of both negotiated SDPs.
pub struct JoinRequestHandler;

impl Handler for JoinRequestHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let payload = event.payload.as_object()?;

        // The interesting fields sit under a requestPayload.joinRequest
        // wrapper on the wire; fall back to the top level without it.
        let req = payload
            .get("requestPayload")
            .and_then(Value::as_object)
            .and_then(|rp| rp.get("joinRequest"))
            .and_then(Value::as_object)
            .unwrap_or(payload);

        let mut result = Map::new();

        if let Some(sid) = req.get("sessionId").and_then(Value::as_str) {
            result.insert("sid".to_string(), Value::from(shorten_id(sid)));
        }
        if req.get("fastReconnect").and_then(Value::as_bool) == Some(true) {
            result.insert("fr".to_string(), Value::from(1));
        }
        if let Some(caps) = req.get("capabilities").and_then(Value::as_array) {
            if !caps.is_empty() {
                result.insert("cap".to_string(), Value::Array(caps.clone()));
            }
        }

        if let Some(details) = req.get("clientDetails").and_then(Value::as_object) {
            if let Some(sdk) = details.get("sdk").and_then(Value::as_object) {
                let sdk_type = sdk.get("type").and_then(Value::as_f64).unwrap_or(0.0) as i64;
                let mut version = String::new();
                if let Some(major) = sdk.get("major").and_then(Value::as_str) {
                    version.push_str(major);
                    if let Some(minor) = sdk.get("minor").and_then(Value::as_str) {
                        version.push('.');
                        version.push_str(minor);
                        if let Some(patch) = sdk.get("patch").and_then(Value::as_str) {
                            version.push('.');
                            version.push_str(patch);
                        }
                    }
                }
                if !version.is_empty() {
                    result.insert("sdk".to_string(), json!([sdk_type, version]));
                }
            }

            if let Some(os) = details.get("os").and_then(Value::as_object) {
                let mut entry = Vec::new();
                if let Some(name) = os.get("name").and_then(Value::as_str) {
                    let short: String = name.chars().take(3).collect();
                    entry.push(Value::from(short.to_lowercase()));
                }
                if let Some(version) = os.get("version").and_then(Value::as_str) {
                    entry.push(Value::from(version));
                }
                if let Some(arch) = os.get("architecture").and_then(Value::as_str) {
                    entry.push(Value::from(arch));
                }
                if !entry.is_empty() {
                    result.insert("os".to_string(), Value::Array(entry));
                }
            }

            if let Some(browser) = details.get("browser").and_then(Value::as_object) {
                let mut entry = Vec::new();
                if let Some(name) = browser.get("name").and_then(Value::as_str) {
                    let short: String = name.chars().take(2).collect();
                    entry.push(Value::from(short.to_lowercase()));
                }
                if let Some(version) = browser.get("version").and_then(Value::as_str) {
                    // Keep the major version only
                    let major = match version.find('.') {
                        Some(idx) if idx > 0 => &version[..idx],
                        _ => version,
                    };
                    entry.push(Value::from(major));
                }
                if !entry.is_empty() {
                    result.insert("br".to_string(), Value::Array(entry));
                }
            }
        }

        if let Some(sdp) = req.get("publisherSdp").and_then(Value::as_str) {
            if let Some(digest) = create_sdp_digest(sdp, "offer").and_then(|d| d.to_value()) {
                result.insert("pub_sdp_sum".to_string(), digest);
            }
        }
        if let Some(sdp) = req.get("subscriberSdp").and_then(Value::as_str) {
            if let Some(digest) = create_sdp_digest(sdp, "offer").and_then(|d| d.to_value()) {
                result.insert("sub_sdp_sum".to_string(), digest);
            }
        }

        Some(Value::Object(result))
    }
}

/// SetPublisher: session id, offer digest, and a per-track summary with
/// simulcast layers.
pub struct SetPublisherHandler;

impl Handler for SetPublisherHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let payload = event.payload.as_object()?;
        let mut result = Map::new();

        if let Some(sid) = payload.get("sessionId").and_then(Value::as_str) {
            result.insert("sid".to_string(), Value::from(shorten_id(sid)));
        }
        if let Some(sdp) = payload.get("sdp").and_then(Value::as_str) {
            if let Some(digest) = create_sdp_digest(sdp, "offer").and_then(|d| d.to_value()) {
                result.insert("sdp_sum".to_string(), digest);
            }
        }

        if let Some(tracks) = payload.get("tracks").and_then(Value::as_array) {
            let mut summaries = Vec::new();
            for track in tracks {
                let Some(track) = track.as_object() else {
                    continue;
                };

                let mut summary = Map::new();
                if let Some(mid) = track.get("mid").and_then(Value::as_str) {
                    summary.insert("mid".to_string(), Value::from(mid));
                }
                if let Some(tt) = track.get("trackType").and_then(Value::as_f64) {
                    summary.insert("tt".to_string(), Value::from(tt as i64));
                }
                if let Some(name) = track
                    .get("codec")
                    .and_then(Value::as_object)
                    .and_then(|c| c.get("name"))
                    .and_then(Value::as_str)
                {
                    summary.insert("c".to_string(), Value::from(name.to_lowercase()));
                }

                if let Some(layers) = track.get("layers").and_then(Value::as_array) {
                    let mut sc = Vec::new();
                    for layer in layers {
                        let Some(layer) = layer.as_object() else {
                            continue;
                        };
                        let mut entry = Vec::new();
                        if let Some(rid) = layer.get("rid").and_then(Value::as_str) {
                            entry.push(Value::from(rid));
                        }
                        if let Some(bitrate) = layer.get("bitrate").and_then(Value::as_f64) {
                            entry.push(Value::from((bitrate / 1000.0) as i64)); // kbps
                        }
                        if let Some(dim) =
                            layer.get("videoDimension").and_then(Value::as_object)
                        {
                            if let Some(w) = dim.get("width").and_then(Value::as_f64) {
                                entry.push(Value::from(w as i64));
                            }
                            if let Some(h) = dim.get("height").and_then(Value::as_f64) {
                                entry.push(Value::from(h as i64));
                            }
                        }
                        if !entry.is_empty() {
                            sc.push(Value::Array(entry));
                        }
                    }
                    if !sc.is_empty() {
                        summary.insert("sc".to_string(), Value::Array(sc));
                    }
                }

                if !summary.is_empty() {
                    summaries.push(Value::Object(summary));
                }
            }
            if !summaries.is_empty() {
                result.insert("tr".to_string(), Value::Array(summaries));
            }
        }

        Some(Value::Object(result))
    }
}

/// SetPublisherResponse: the SFU's answer, reduced to its digest.
pub struct SetPublisherResponseHandler;

impl Handler for SetPublisherResponseHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let payload = event.payload.as_object()?;
        let mut result = Map::new();

        if let Some(sdp) = payload.get("sdp").and_then(Value::as_str) {
            if let Some(digest) = create_sdp_digest(sdp, "answer").and_then(|d| d.to_value()) {
                result.insert("sdp_sum".to_string(), digest);
            }
        }

        Some(Value::Object(result))
    }
}

/// SendAnswer: session id plus the answer digest.
pub struct SendAnswerHandler;

impl Handler for SendAnswerHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let payload = event.payload.as_object()?;
        let mut result = Map::new();

        if let Some(sid) = payload.get("sessionId").and_then(Value::as_str) {
            result.insert("sid".to_string(), Value::from(shorten_id(sid)));
        }
        if let Some(sdp) = payload.get("sdp").and_then(Value::as_str) {
            if let Some(digest) = create_sdp_digest(sdp, "answer").and_then(|d| d.to_value()) {
                result.insert("sdp_sum".to_string(), digest);
            }
        }

        Some(Value::Object(result))
    }
}

/// UpdateMuteStates: collapses the per-track list into an audio/video
/// muted map.
pub struct UpdateMuteStatesHandler;

impl Handler for UpdateMuteStatesHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let payload = event.payload.as_object()?;
        let mut result = Map::new();

        if let Some(states) = payload.get("muteStates").and_then(Value::as_array) {
            let mut audio = None;
            let mut video = None;
            for state in states {
                let Some(state) = state.as_object() else {
                    continue;
                };
                let tt = compress_track_type(state.get("trackType").unwrap_or(&Value::Null));
                let muted =
                    i64::from(state.get("muted").and_then(Value::as_bool) == Some(true));
                match tt {
                    1 => audio = Some(muted),
                    2 => video = Some(muted),
                    _ => {}
                }
            }

            let mut mu = Map::new();
            if let Some(a) = audio {
                mu.insert("a".to_string(), Value::from(a));
            }
            if let Some(v) = video {
                mu.insert("v".to_string(), Value::from(v));
            }
            if !mu.is_empty() {
                result.insert("mu".to_string(), Value::Object(mu));
            }
        }

        Some(Value::Object(result))
    }
}

/// UpdateSubscriptions: which remote tracks are wanted, at what dimensions.
pub struct UpdateSubscriptionsHandler;

impl Handler for UpdateSubscriptionsHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let payload = event.payload.as_object()?;
        let mut result = Map::new();

        if let Some(sid) = payload.get("sessionId").and_then(Value::as_str) {
            result.insert("sid".to_string(), Value::from(shorten_id(sid)));
        }

        if let Some(tracks) = payload.get("tracks").and_then(Value::as_array) {
            let mut summaries = Vec::new();
            for track in tracks {
                let Some(track) = track.as_object() else {
                    continue;
                };

                let mut summary = Map::new();
                if let Some(uid) = track.get("userId").and_then(Value::as_str) {
                    summary.insert("u".to_string(), Value::from(uid));
                }
                if let Some(tt) = track.get("trackType").and_then(Value::as_f64) {
                    summary.insert("tt".to_string(), Value::from(tt as i64));
                }
                if let Some(dim) = track.get("dimension").and_then(Value::as_object) {
                    let w = dim.get("width").and_then(Value::as_f64);
                    let h = dim.get("height").and_then(Value::as_f64);
                    if let (Some(w), Some(h)) = (w, h) {
                        summary.insert("wh".to_string(), json!([w as i64, h as i64]));
                    }
                }

                if !summary.is_empty() {
                    summaries.push(Value::Object(summary));
                }
            }
            if !summaries.is_empty() {
                result.insert("tr".to_string(), Value::Array(summaries));
            }
        }

        Some(Value::Object(result))
    }
}

/// connectionQualityChanged: a single small integer, whether it arrives
/// wrapped or bare.
pub struct ConnectionQualityHandler;

impl Handler for ConnectionQualityHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        match &event.payload {
            Value::Object(map) => {
                let q = map.get("quality").and_then(Value::as_f64)?;
                Some(json!({"q": q as i64}))
            }
            Value::Number(n) => Some(json!({"q": n.as_f64()? as i64})),
            _ => None,
        }
    }
}

/// sfu.track.mapping: correlates SFU-side tracks with browser-side stats.
pub struct TrackMappingHandler;

impl Handler for TrackMappingHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let payload = event.payload.as_object()?;
        let mut result = Map::new();

        match payload.get("direction").and_then(Value::as_str) {
            Some("inbound") => {
                result.insert("dir".to_string(), Value::from("in"));
            }
            Some("outbound") => {
                result.insert("dir".to_string(), Value::from("out"));
            }
            _ => {}
        }

        if let Some(tt) = payload.get("track_type") {
            if tt.is_string() {
                result.insert("tt".to_string(), Value::from(compress_track_type(tt)));
            }
        }

        if let Some(codec) = payload.get("codec").and_then(Value::as_str) {
            // Strip mime prefix params like "vp9:profile-2"
            let codec = codec.trim_end_matches(':');
            let codec = match codec.find(':') {
                Some(idx) if idx > 0 => &codec[..idx],
                _ => codec,
            };
            result.insert("c".to_string(), Value::from(codec.to_lowercase()));
        }

        if let Some(uid) = payload
            .get("participant")
            .and_then(Value::as_object)
            .and_then(|p| p.get("user_id"))
            .and_then(Value::as_str)
        {
            result.insert("uid".to_string(), Value::from(uid));
        }

        // SSRC stays numeric, it is useful for correlation
        if let Some(ssrc) = payload.get("ssrc").and_then(Value::as_f64) {
            result.insert("s".to_string(), Value::from(ssrc as i64));
        }

        Some(Value::Object(result))
    }
}
