use serde_json::{Map, Value};

use super::Handler;
use crate::event::RawEvent;
use crate::ice::{eoc_summary, simple_summary, CandidateSummary};
use super::sfu::shorten_id;

/// onicecandidate: candidate details are stripped, only end-of-candidates
/// is distinguished from a gathered candidate.
pub struct OnIceCandidateHandler;

impl Handler for OnIceCandidateHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        match &event.payload {
            Value::Null => Some(eoc_summary()),
            Value::Object(map) => match map.get("candidate") {
                Some(Value::String(candidate)) if candidate.is_empty() => Some(eoc_summary()),
                Some(Value::String(_)) => Some(simple_summary()),
                None | Some(Value::Null) => Some(eoc_summary()),
                Some(_) => Some(simple_summary()),
            },
            _ => Some(simple_summary()),
        }
    }
}

/// addIceCandidate: a count is all that is kept.
pub struct AddIceCandidateHandler;

impl Handler for AddIceCandidateHandler {
    fn transform(&self, _event: &RawEvent) -> Option<Value> {
        Some(simple_summary())
    }
}

/// IceTrickle (SFU side): peer type, shortened session id, and the parsed
/// candidate carried as a JSON-encoded string.
pub struct IceTrickleHandler;

impl Handler for IceTrickleHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let Some(payload) = event.payload.as_object() else {
            return Some(simple_summary());
        };

        let mut result = Map::new();

        if let Some(pt) = payload.get("peerType").and_then(Value::as_f64) {
            result.insert("pt".to_string(), Value::from(pt as i64));
        }
        if let Some(sid) = payload.get("sessionId").and_then(Value::as_str) {
            result.insert("sid".to_string(), Value::from(shorten_id(sid)));
        }

        if let Some(candidate_json) = payload.get("iceCandidate").and_then(Value::as_str) {
            if let Ok(candidate) = serde_json::from_str::<Value>(candidate_json) {
                let summary = CandidateSummary::from_payload(&candidate);
                if summary.is_end_of_candidates() {
                    result.insert("eoc".to_string(), Value::from(1));
                } else {
                    result.insert("c".to_string(), summary.to_value());
                }
            }
        }

        Some(Value::Object(result))
    }
}
