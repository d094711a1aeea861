use serde_json::{Map, Value};

use super::{ellipsize, Handler};
use crate::event::RawEvent;
use crate::transform::{rename_map_keys, strip_secrets};

/// Fallback for event names with no dedicated handler: strip secrets, then
/// rename keys. Arrays are rewritten element-wise; scalars pass through.
pub struct GenericHandler;

impl Handler for GenericHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        match &event.payload {
            Value::Null => None,
            Value::Object(map) => Some(Value::Object(rename_map_keys(&strip_secrets(map)))),
            Value::Array(items) => Some(Value::Array(
                items
                    .iter()
                    .map(|item| match item {
                        Value::Object(map) => {
                            Value::Object(rename_map_keys(&strip_secrets(map)))
                        }
                        other => other.clone(),
                    })
                    .collect(),
            )),
            other => Some(other.clone()),
        }
    }
}

/// For events whose payload carries no information worth keeping.
pub struct NullPayloadHandler;

impl Handler for NullPayloadHandler {
    fn transform(&self, _event: &RawEvent) -> Option<Value> {
        None
    }
}

/// Passes the payload through untouched.
pub struct PassthroughHandler;

impl Handler for PassthroughHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        match &event.payload {
            Value::Null => None,
            other => Some(other.clone()),
        }
    }
}

/// For *OnFailure events: `{ok:0}` plus error code and truncated message
/// when the payload supplies them.
pub struct FailureHandler;

impl Handler for FailureHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let mut result = Map::new();
        result.insert("ok".to_string(), Value::from(0));

        if let Some(payload) = event.payload.as_object() {
            if let Some(name) = payload.get("name").and_then(Value::as_str) {
                result.insert("errc".to_string(), Value::from(name));
            }
            if let Some(message) = payload.get("message").and_then(Value::as_str) {
                result.insert("err".to_string(), Value::from(ellipsize(message, 100)));
            }
        }

        Some(Value::Object(result))
    }
}
