use serde_json::{Map, Value};

use super::Handler;
use crate::event::RawEvent;
use crate::sdp::create_sdp_digest;
use crate::transform::compress_media_kind;

/// The "create" event: peer-connection configuration, summarized down to
/// bundle policy and an ICE server census.
pub struct CreatePcHandler;

impl Handler for CreatePcHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let payload = event.payload.as_object()?;
        let mut result = Map::new();

        if let Some(policy) = payload.get("bundlePolicy").and_then(Value::as_str) {
            let short = match policy {
                "max-bundle" => "mb",
                "max-compat" => "mc",
                "balanced" => "b",
                other => other,
            };
            result.insert("bp".to_string(), Value::from(short));
        }

        if let Some(servers) = payload.get("iceServers").and_then(Value::as_array) {
            let summary = summarize_ice_servers(servers);
            if !summary.is_empty() {
                result.insert("ice".to_string(), Value::Object(summary));
            }
        }

        Some(Value::Object(result))
    }
}

fn summarize_ice_servers(servers: &[Value]) -> Map<String, Value> {
    let mut turns = 0i64;
    let mut turn = 0i64;
    let mut stun = 0i64;
    let mut tcp = 0i64;
    let mut udp = 0i64;
    let mut hosts: Vec<String> = Vec::new();

    for server in servers {
        let Some(server) = server.as_object() else {
            continue;
        };

        let urls: Vec<&str> = match server.get("urls") {
            Some(Value::Array(urls)) => urls.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(url)) => vec![url.as_str()],
            _ => continue,
        };

        for url in urls {
            if url.starts_with("turns:") {
                turns += 1;
            } else if url.starts_with("turn:") {
                turn += 1;
            } else if url.starts_with("stun:") {
                stun += 1;
            }

            // UDP is the default transport when none is requested
            if url.contains("transport=tcp") {
                tcp += 1;
            } else if url.contains("transport=udp") || !url.contains("transport=") {
                udp += 1;
            }

            let host = extract_host(url);
            if !host.is_empty() && !hosts.contains(&host) {
                hosts.push(host);
            }
        }
    }

    let mut summary = Map::new();
    for (key, count) in [
        ("turns", turns),
        ("turn", turn),
        ("stun", stun),
        ("tcp", tcp),
        ("udp", udp),
    ] {
        if count > 0 {
            summary.insert(key.to_string(), Value::from(count));
        }
    }
    if !hosts.is_empty() {
        summary.insert("hosts".to_string(), Value::from(hosts.len()));
    }
    summary
}

fn extract_host(url: &str) -> String {
    let mut host = url;
    for scheme in ["turns:", "turn:", "stun:"] {
        host = host.strip_prefix(scheme).unwrap_or(host);
    }
    if let Some(idx) = host.find(':') {
        host = &host[..idx];
    }
    if let Some(idx) = host.find('?') {
        host = &host[..idx];
    }
    host.to_string()
}

/// createOfferOnSuccess: the generated offer, reduced to its digest.
pub struct CreateOfferSuccessHandler;

impl Handler for CreateOfferSuccessHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        description_summary(event.payload.as_object()?, "o", "offer")
    }
}

/// createAnswerOnSuccess: the generated answer, reduced to its digest.
pub struct CreateAnswerSuccessHandler;

impl Handler for CreateAnswerSuccessHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        description_summary(event.payload.as_object()?, "a", "answer")
    }
}

fn description_summary(
    payload: &Map<String, Value>,
    short_type: &str,
    default_type: &str,
) -> Option<Value> {
    let mut result = Map::new();
    result.insert("t".to_string(), Value::from(short_type));

    let sdp_type = payload
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or(default_type);
    if let Some(sdp) = payload.get("sdp").and_then(Value::as_str) {
        if let Some(digest) = create_sdp_digest(sdp, sdp_type).and_then(|d| d.to_value()) {
            result.insert("sdp_sum".to_string(), digest);
        }
    }

    Some(Value::Object(result))
}

/// setLocalDescription / setRemoteDescription: the payload is the
/// description, usually wrapped in a one-element argument array.
pub struct SetDescriptionHandler;

impl Handler for SetDescriptionHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let payload = match &event.payload {
            Value::Array(items) => items.first()?.as_object()?,
            Value::Object(map) => map,
            _ => return None,
        };

        let mut result = Map::new();
        let mut sdp_type = "offer";
        if let Some(t) = payload.get("type").and_then(Value::as_str) {
            sdp_type = t;
            let short = if t == "offer" { "o" } else { "a" };
            result.insert("t".to_string(), Value::from(short));
        }

        if let Some(sdp) = payload.get("sdp").and_then(Value::as_str) {
            if let Some(digest) = create_sdp_digest(sdp, sdp_type).and_then(|d| d.to_value()) {
                result.insert("sdp_sum".to_string(), digest);
            }
        }

        Some(Value::Object(result))
    }
}

/// ontrack: media kind and (when supplied) the transceiver mid.
pub struct OnTrackHandler;

impl Handler for OnTrackHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let payload = event.payload.as_object()?;
        let mut result = Map::new();

        if let Some(kind) = payload.get("kind").and_then(Value::as_str) {
            result.insert("k".to_string(), Value::from(compress_media_kind(kind)));
        }
        if let Some(mid) = payload.get("mid").and_then(Value::as_str) {
            result.insert("mid".to_string(), Value::from(mid));
        }

        Some(Value::Object(result))
    }
}
