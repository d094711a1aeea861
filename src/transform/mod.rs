#[cfg(test)]
mod scope_test;

mod enums;
mod fields;
mod scope;
mod secrets;

pub use enums::{
    bool_to_int, compress_connection_state, compress_device_kind, compress_ice_connection_state,
    compress_ice_gathering_state, compress_media_kind, compress_permission_state,
    compress_signaling_state, compress_track_type,
};
pub use fields::{rename_field, rename_map_keys, should_drop_field};
pub use scope::compress_scope;
pub use secrets::{is_secret_field, strip_secrets};
