use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

static RTPMAP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^rtpmap:(\d+)\s+([^/]+)/(\d+)").expect("rtpmap pattern"));
static RID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^rid:(\S+)\s+(send|recv)").expect("rid pattern"));

/// The subset of an SDP that the digest needs.
#[derive(Debug, Default)]
pub struct ParsedSdp {
    pub raw: String,
    pub bundle_mids: Vec<String>,
    pub ice_lite: bool,
    pub media: Vec<MediaSection>,
}

/// One m= section.
#[derive(Debug, Default)]
pub struct MediaSection {
    /// audio, video, application
    pub kind: String,
    /// port 0 in the m= line
    pub rejected: bool,
    pub mid: String,
    /// sendrecv, sendonly, recvonly, inactive
    pub direction: String,
    pub codecs: Vec<Codec>,
    /// simulcast RIDs
    pub rids: Vec<String>,
    /// transport-wide congestion control seen in any attribute
    pub has_tcc: bool,
}

#[derive(Debug)]
pub struct Codec {
    pub payload_type: String,
    pub name: String,
    pub clock_rate: String,
}

/// Parses an SDP string line by line. Returns `None` for empty input.
pub fn parse_sdp(sdp: &str) -> Option<ParsedSdp> {
    if sdp.is_empty() {
        return None;
    }

    let mut parsed = ParsedSdp {
        raw: sdp.to_string(),
        ..Default::default()
    };

    let mut lines: Vec<&str> = sdp.split("\r\n").collect();
    if lines.len() <= 1 {
        lines = sdp.split('\n').collect();
    }

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(attr) = line.strip_prefix("a=") {
            parse_attribute(&mut parsed, attr);
        } else if let Some(m) = line.strip_prefix("m=") {
            parsed.media.push(parse_media_line(m));
        }
    }

    Some(parsed)
}

fn parse_attribute(parsed: &mut ParsedSdp, attr: &str) {
    let Some(media) = parsed.media.last_mut() else {
        // Session-level attributes, before any m= line.
        if let Some(mids) = attr.strip_prefix("group:BUNDLE ") {
            parsed.bundle_mids = mids.split_whitespace().map(str::to_string).collect();
        } else if attr == "ice-lite" {
            parsed.ice_lite = true;
        }
        return;
    };

    if let Some(mid) = attr.strip_prefix("mid:") {
        media.mid = mid.to_string();
    } else if attr.starts_with("rtpmap:") {
        if let Some(caps) = RTPMAP_PATTERN.captures(attr) {
            let name = caps[2].to_string();
            // rtx/red/ulpfec are repair streams, not real codecs
            if !matches!(
                name.to_ascii_lowercase().as_str(),
                "rtx" | "red" | "ulpfec"
            ) {
                media.codecs.push(Codec {
                    payload_type: caps[1].to_string(),
                    name,
                    clock_rate: caps[3].to_string(),
                });
            }
        }
    } else if matches!(attr, "sendrecv" | "sendonly" | "recvonly" | "inactive") {
        media.direction = attr.to_string();
    } else if attr.starts_with("rid:") {
        if let Some(caps) = RID_PATTERN.captures(attr) {
            media.rids.push(caps[1].to_string());
        }
    } else if attr.contains("transport-cc") {
        media.has_tcc = true;
    }
}

// m=video 9 UDP/TLS/RTP/SAVPF 120 124 121
fn parse_media_line(body: &str) -> MediaSection {
    let mut parts = body.split_whitespace();
    MediaSection {
        kind: parts.next().unwrap_or_default().to_string(),
        rejected: parts.next() == Some("0"),
        direction: "sendrecv".to_string(),
        ..Default::default()
    }
}

impl ParsedSdp {
    /// Short correlation hash: first 8 bytes of SHA-256 of the raw SDP,
    /// hex-encoded (16 characters).
    pub fn hash(&self) -> String {
        let digest = Sha256::digest(self.raw.as_bytes());
        digest[..8].iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl MediaSection {
    /// Deduplicated, normalized codec display names, capped at 8 in
    /// first-seen order.
    pub fn codec_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for codec in &self.codecs {
            let name = match codec.name.to_ascii_lowercase().as_str() {
                "opus" => "opus".to_string(),
                "vp8" => "VP8".to_string(),
                "vp9" => "VP9".to_string(),
                "h264" => "H264".to_string(),
                "av1" => "AV1".to_string(),
                _ => codec.name.to_ascii_uppercase(),
            };
            if !names.contains(&name) {
                names.push(name);
                if names.len() >= 8 {
                    break;
                }
            }
        }
        names
    }
}
