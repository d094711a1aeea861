use serde_json::{Map, Value};

use super::{ellipsize, Handler};
use crate::event::RawEvent;
use crate::transform::{bool_to_int, compress_device_kind, compress_media_kind, compress_permission_state};

/// navigator.mediaDevices.enumerateDevices: device counts by kind plus a
/// has-label flag (labels are only populated once permission was granted).
pub struct EnumerateDevicesHandler;

impl Handler for EnumerateDevicesHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let devices = event.payload.as_array()?;

        let mut counts: Vec<(String, i64)> = Vec::new();
        let mut has_label = false;
        for device in devices {
            let device = device.as_object()?;
            if let Some(kind) = device.get("kind").and_then(Value::as_str) {
                let short = compress_device_kind(kind).to_string();
                match counts.iter_mut().find(|(k, _)| *k == short) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((short, 1)),
                }
            }
            if let Some(label) = device.get("label").and_then(Value::as_str) {
                if !label.is_empty() {
                    has_label = true;
                }
            }
        }

        let mut result = Map::new();
        for (kind, count) in counts {
            result.insert(kind, Value::from(count));
        }
        result.insert("hl".to_string(), Value::from(bool_to_int(has_label)));
        Some(Value::Object(result))
    }
}

/// navigator.mediaDevices.getUserMedia.*: the request, its success, and its
/// failure all arrive under the same prefix.
pub struct GetUserMediaHandler;

impl Handler for GetUserMediaHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        if event.name.ends_with(".OnSuccess") {
            return self.success(event);
        }
        if event.name.ends_with(".OnFailure") {
            return self.failure(event);
        }
        self.request(event)
    }
}

impl GetUserMediaHandler {
    fn request(&self, event: &RawEvent) -> Option<Value> {
        let payload = event.payload.as_object()?;
        let mut result = Map::new();

        match payload.get("audio") {
            Some(Value::Bool(true)) => {
                result.insert("a".to_string(), Value::from(1));
            }
            Some(Value::Object(audio)) => {
                result.insert("a".to_string(), Value::from(1));
                for (field, short) in [
                    ("autoGainControl", "agc"),
                    ("noiseSuppression", "ns"),
                    ("echoCancellation", "ec"),
                ] {
                    if audio.get(field).and_then(Value::as_bool) == Some(true) {
                        result.insert(short.to_string(), Value::from(1));
                    }
                }
            }
            _ => {}
        }

        match payload.get("video") {
            Some(Value::Bool(true)) => {
                result.insert("v".to_string(), Value::from(1));
            }
            Some(Value::Object(video)) => {
                result.insert("v".to_string(), Value::from(1));
                if let Some(w) = video.get("width").and_then(Value::as_f64) {
                    result.insert("w".to_string(), Value::from(w as i64));
                }
                if let Some(h) = video.get("height").and_then(Value::as_f64) {
                    result.insert("h".to_string(), Value::from(h as i64));
                }
            }
            _ => {}
        }

        Some(Value::Object(result))
    }

    fn success(&self, event: &RawEvent) -> Option<Value> {
        let payload = event.payload.as_object()?;
        let mut result = Map::new();

        if let Some(tracks) = payload.get("tracks").and_then(Value::as_array) {
            for track in tracks {
                if let Some(kind) = track.get("kind").and_then(Value::as_str) {
                    result.insert(compress_media_kind(kind).to_string(), Value::from(1));
                }
            }
        }

        Some(Value::Object(result))
    }

    fn failure(&self, event: &RawEvent) -> Option<Value> {
        let mut result = Map::new();
        result.insert("ok".to_string(), Value::from(0));

        if let Some(payload) = event.payload.as_object() {
            if let Some(name) = payload.get("name").and_then(Value::as_str) {
                result.insert("errc".to_string(), Value::from(name));
            }
            if let Some(message) = payload.get("message").and_then(Value::as_str) {
                result.insert("err".to_string(), Value::from(ellipsize(message, 50)));
            }
        }

        Some(Value::Object(result))
    }
}

/// permissions.query(...): just the resulting state.
pub struct PermissionsHandler;

impl Handler for PermissionsHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let state = match &event.payload {
            Value::Object(map) => map.get("state")?.as_str()?,
            Value::String(state) => state.as_str(),
            _ => return None,
        };
        let mut result = Map::new();
        result.insert(
            "st".to_string(),
            Value::from(compress_permission_state(state)),
        );
        Some(Value::Object(result))
    }
}

/// navigator.mediaDevices.setSinkId: the sink id is already a hash, keep
/// only the fact it happened.
pub struct SetSinkIdHandler;

impl Handler for SetSinkIdHandler {
    fn transform(&self, _event: &RawEvent) -> Option<Value> {
        let mut result = Map::new();
        result.insert("ok".to_string(), Value::from(1));
        Some(Value::Object(result))
    }
}
