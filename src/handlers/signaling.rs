use serde_json::Value;

use super::Handler;
use crate::event::RawEvent;
use crate::transform::{
    compress_connection_state, compress_ice_connection_state, compress_ice_gathering_state,
    compress_signaling_state,
};

// State-change payloads are bare strings; unknown states compress to -1.

pub struct SignalingStateHandler;

impl Handler for SignalingStateHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let state = event.payload.as_str()?;
        Some(Value::from(compress_signaling_state(state)))
    }
}

pub struct IceGatheringStateHandler;

impl Handler for IceGatheringStateHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let state = event.payload.as_str()?;
        Some(Value::from(compress_ice_gathering_state(state)))
    }
}

pub struct IceConnectionStateHandler;

impl Handler for IceConnectionStateHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let state = event.payload.as_str()?;
        Some(Value::from(compress_ice_connection_state(state)))
    }
}

pub struct ConnectionStateHandler;

impl Handler for ConnectionStateHandler {
    fn transform(&self, event: &RawEvent) -> Option<Value> {
        let state = event.payload.as_str()?;
        Some(Value::from(compress_connection_state(state)))
    }
}
