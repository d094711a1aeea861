use serde::Serialize;
use serde_json::Value;

use super::parser::{parse_sdp, ParsedSdp};

/// The `sdp_sum` output format: a small structured summary standing in for
/// a multi-kilobyte SDP blob.
#[derive(Debug, Serialize)]
pub struct SdpDigest {
    #[serde(rename = "type")]
    pub sdp_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sdp_hash: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bundle_mids: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub ice_lite: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaEntry>,
}

/// One m= line in the digest.
#[derive(Debug, Serialize)]
pub struct MediaEntry {
    pub mid: String,
    pub kind: String,
    pub dir: String,
    #[serde(skip_serializing_if = "is_false")]
    pub rejected: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub codecs: Vec<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub sim_rids: usize,
    #[serde(skip_serializing_if = "is_false")]
    pub tcc: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_zero(v: &usize) -> bool {
    *v == 0
}

impl SdpDigest {
    pub fn new(parsed: &ParsedSdp, sdp_type: &str) -> SdpDigest {
        SdpDigest {
            sdp_type: sdp_type.to_string(),
            sdp_hash: parsed.hash(),
            bundle_mids: parsed.bundle_mids.clone(),
            ice_lite: parsed.ice_lite,
            media: parsed
                .media
                .iter()
                .map(|m| MediaEntry {
                    mid: m.mid.clone(),
                    kind: m.kind.clone(),
                    dir: m.direction.clone(),
                    rejected: m.rejected,
                    codecs: m.codec_names(),
                    sim_rids: m.rids.len(),
                    tcc: m.has_tcc,
                })
                .collect(),
        }
    }

    pub fn to_value(&self) -> Option<Value> {
        serde_json::to_value(self).ok()
    }
}

/// Parses `sdp` and summarizes it in one step. `None` for empty input.
pub fn create_sdp_digest(sdp: &str, sdp_type: &str) -> Option<SdpDigest> {
    parse_sdp(sdp).map(|parsed| SdpDigest::new(&parsed, sdp_type))
}
