
mod digest;
mod parser;

pub use digest::{create_sdp_digest, MediaEntry, SdpDigest};
pub use parser::{parse_sdp, Codec, MediaSection, ParsedSdp};
