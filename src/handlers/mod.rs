#[cfg(test)]
mod get_stats_test;
#[cfg(test)]
mod media_devices_test;
#[cfg(test)]
mod sfu_test;

mod generic;
mod get_stats;
mod ice;
mod media_devices;
mod peer_connection;
mod registry;
mod sfu;
mod signaling;

pub use generic::{FailureHandler, GenericHandler, NullPayloadHandler, PassthroughHandler};
pub use get_stats::{GetStatsHandler, StatsSnapshot};
pub use ice::{AddIceCandidateHandler, IceTrickleHandler, OnIceCandidateHandler};
pub use media_devices::{
    EnumerateDevicesHandler, GetUserMediaHandler, PermissionsHandler, SetSinkIdHandler,
};
pub use peer_connection::{
    CreateAnswerSuccessHandler, CreateOfferSuccessHandler, CreatePcHandler, OnTrackHandler,
    SetDescriptionHandler,
};
pub use registry::Registry;
pub use sfu::{
    ConnectionQualityHandler, JoinRequestHandler, SendAnswerHandler, SetPublisherHandler,
    SetPublisherResponseHandler, SignalWsOpenHandler, TrackMappingHandler,
    UpdateMuteStatesHandler, UpdateSubscriptionsHandler,
};
pub use signaling::{
    ConnectionStateHandler, IceConnectionStateHandler, IceGatheringStateHandler,
    SignalingStateHandler,
};

use serde_json::Value;

use crate::event::RawEvent;

/// Transforms a raw event's payload into its compressed form. `None` means
/// the envelope is written without a payload.
pub trait Handler {
    fn transform(&self, event: &RawEvent) -> Option<Value>;
}

/// Truncates to at most `max` characters, marking a cut with an ellipsis.
pub(crate) fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut truncated: String = s.chars().take(max).collect();
        truncated.push_str("...");
        truncated
    }
}
