use std::collections::HashMap;

use super::generic::{FailureHandler, GenericHandler, NullPayloadHandler, PassthroughHandler};
use super::ice::{AddIceCandidateHandler, IceTrickleHandler, OnIceCandidateHandler};
use super::media_devices::{
    EnumerateDevicesHandler, GetUserMediaHandler, PermissionsHandler, SetSinkIdHandler,
};
use super::peer_connection::{
    CreateAnswerSuccessHandler, CreateOfferSuccessHandler, CreatePcHandler, OnTrackHandler,
    SetDescriptionHandler,
};
use super::sfu::{
    ConnectionQualityHandler, JoinRequestHandler, SendAnswerHandler, SetPublisherHandler,
    SetPublisherResponseHandler, SignalWsOpenHandler, TrackMappingHandler,
    UpdateMuteStatesHandler, UpdateSubscriptionsHandler,
};
use super::signaling::{
    ConnectionStateHandler, IceConnectionStateHandler, IceGatheringStateHandler,
    SignalingStateHandler,
};
use super::Handler;

/// Routes event names to handlers: exact match first, then prefixes, then
/// suffixes, then the generic fallback. The built-in registrations do not
/// overlap, so prefix/suffix iteration order is not observable. The
/// stateful getstats transformer is owned by the pipeline, not registered
/// here.
pub struct Registry {
    exact: HashMap<&'static str, Box<dyn Handler>>,
    prefix: Vec<(&'static str, Box<dyn Handler>)>,
    suffix: Vec<(&'static str, Box<dyn Handler>)>,
    fallback: Box<dyn Handler>,
}

impl Default for Registry {
    fn default() -> Registry {
        Registry::new()
    }
}

impl Registry {
    pub fn new() -> Registry {
        let mut r = Registry {
            exact: HashMap::new(),
            prefix: Vec::new(),
            suffix: Vec::new(),
            fallback: Box::new(GenericHandler),
        };

        r.register_media_device_handlers();
        r.register_peer_connection_handlers();
        r.register_signaling_handlers();
        r.register_ice_handlers();
        r.register_sfu_handlers();

        r
    }

    fn register_media_device_handlers(&mut self) {
        self.register("navigator.mediaDevices.enumerateDevices", Box::new(EnumerateDevicesHandler));
        self.register_prefix("navigator.mediaDevices.getUserMedia.", Box::new(GetUserMediaHandler));
        self.register("navigator.mediaDevices.setSinkId", Box::new(SetSinkIdHandler));
        self.register("setUseWebAudio", Box::new(PassthroughHandler));
        self.register_prefix("permissions.query", Box::new(PermissionsHandler));
    }

    fn register_peer_connection_handlers(&mut self) {
        self.register("create", Box::new(CreatePcHandler));
        self.register("negotiationneeded", Box::new(NullPayloadHandler));

        self.register("createOffer", Box::new(NullPayloadHandler));
        self.register("createOfferOnSuccess", Box::new(CreateOfferSuccessHandler));
        self.register("createOfferOnFailure", Box::new(FailureHandler));

        self.register("createAnswer", Box::new(NullPayloadHandler));
        self.register("createAnswerOnSuccess", Box::new(CreateAnswerSuccessHandler));
        self.register("createAnswerOnFailure", Box::new(FailureHandler));

        self.register("setLocalDescription", Box::new(SetDescriptionHandler));
        self.register("setLocalDescriptionOnSuccess", Box::new(NullPayloadHandler));
        self.register("setLocalDescriptionOnFailure", Box::new(FailureHandler));

        self.register("setRemoteDescription", Box::new(SetDescriptionHandler));
        self.register("setRemoteDescriptionOnSuccess", Box::new(NullPayloadHandler));
        self.register("setRemoteDescriptionOnFailure", Box::new(FailureHandler));

        self.register("ontrack", Box::new(OnTrackHandler));
    }

    fn register_signaling_handlers(&mut self) {
        self.register("signalingstatechange", Box::new(SignalingStateHandler));
        self.register("icegatheringstatechange", Box::new(IceGatheringStateHandler));
        self.register("iceconnectionstatechange", Box::new(IceConnectionStateHandler));
        self.register("connectionstatechange", Box::new(ConnectionStateHandler));
    }

    fn register_ice_handlers(&mut self) {
        self.register("onicecandidate", Box::new(OnIceCandidateHandler));
        self.register("addIceCandidate", Box::new(AddIceCandidateHandler));
        self.register("addIceCandidateOnSuccess", Box::new(NullPayloadHandler));
        self.register("addIceCandidateOnFailure", Box::new(FailureHandler));
        self.register("IceTrickle", Box::new(IceTrickleHandler));
    }

    fn register_sfu_handlers(&mut self) {
        self.register("signal.ws.open", Box::new(SignalWsOpenHandler));
        self.register("joinRequest", Box::new(JoinRequestHandler));
        self.register("SetPublisher", Box::new(SetPublisherHandler));
        self.register("SetPublisherResponse", Box::new(SetPublisherResponseHandler));
        self.register("SendAnswer", Box::new(SendAnswerHandler));
        self.register("UpdateMuteStates", Box::new(UpdateMuteStatesHandler));
        self.register("UpdateSubscriptions", Box::new(UpdateSubscriptionsHandler));
        self.register("connectionQualityChanged", Box::new(ConnectionQualityHandler));
        self.register("sfu.track.mapping", Box::new(TrackMappingHandler));
    }

    /// Returns the handler for an event name.
    pub fn get(&self, name: &str) -> &dyn Handler {
        if let Some(handler) = self.exact.get(name) {
            return handler.as_ref();
        }
        for (prefix, handler) in &self.prefix {
            if name.starts_with(prefix) {
                return handler.as_ref();
            }
        }
        for (suffix, handler) in &self.suffix {
            if name.ends_with(suffix) {
                return handler.as_ref();
            }
        }
        self.fallback.as_ref()
    }

    /// Adds a handler for an exact event name match.
    pub fn register(&mut self, name: &'static str, handler: Box<dyn Handler>) {
        self.exact.insert(name, handler);
    }

    /// Adds a handler for event names matching a prefix.
    pub fn register_prefix(&mut self, prefix: &'static str, handler: Box<dyn Handler>) {
        self.prefix.push((prefix, handler));
    }

    /// Adds a handler for event names matching a suffix.
    pub fn register_suffix(&mut self, suffix: &'static str, handler: Box<dyn Handler>) {
        self.suffix.push((suffix, handler));
    }
}
