use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

// candidate:0 1 UDP 2122252543 192.168.50.234 51101 typ host
// candidate:4 1 UDP 8331263 89.222.124.8 40846 typ relay raddr 89.222.124.8 rport 40846
static CANDIDATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"candidate:\S+\s+\d+\s+(\S+)\s+\d+\s+\S+\s+\d+\s+typ\s+(\S+)")
        .expect("candidate pattern")
});

/// A compressed ICE candidate: type and transport, or one of the two
/// degenerate markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSummary {
    /// Empty or null candidate, i.e. gathering finished.
    EndOfCandidates,
    /// Candidate present but not in a shape we recognize; counted, not kept.
    Unparsed,
    Parsed {
        /// host, srflx, prflx, relay
        typ: String,
        /// udp, tcp
        transport: String,
        mid: Option<String>,
    },
}

impl CandidateSummary {
    /// Parses an ICE candidate attribute string.
    pub fn parse(candidate: &str) -> CandidateSummary {
        if candidate.is_empty() {
            return CandidateSummary::EndOfCandidates;
        }

        match CANDIDATE_PATTERN.captures(candidate) {
            Some(caps) => CandidateSummary::Parsed {
                typ: caps[2].to_string(),
                transport: caps[1].to_ascii_lowercase(),
                mid: None,
            },
            None => CandidateSummary::Unparsed,
        }
    }

    /// Extracts and parses a candidate from the payload shapes browsers and
    /// SFUs produce: a bare string, `{candidate, sdpMid}`, or a wrapper
    /// holding a JSON-encoded `iceCandidate` string.
    pub fn from_payload(payload: &Value) -> CandidateSummary {
        match payload {
            Value::Null => CandidateSummary::EndOfCandidates,
            Value::String(s) => CandidateSummary::parse(s),
            Value::Object(map) => {
                if let Some(Value::String(candidate)) = map.get("candidate") {
                    if candidate.is_empty() {
                        return CandidateSummary::EndOfCandidates;
                    }
                    let mut summary = CandidateSummary::parse(candidate);
                    if let (
                        CandidateSummary::Parsed { mid, .. },
                        Some(Value::String(sdp_mid)),
                    ) = (&mut summary, map.get("sdpMid"))
                    {
                        *mid = Some(sdp_mid.clone());
                    }
                    return summary;
                }

                if let Some(Value::String(nested)) = map.get("iceCandidate") {
                    if let Ok(inner) = serde_json::from_str::<Value>(nested) {
                        return CandidateSummary::from_payload(&inner);
                    }
                }

                CandidateSummary::Unparsed
            }
            _ => CandidateSummary::Unparsed,
        }
    }

    pub fn is_end_of_candidates(&self) -> bool {
        *self == CandidateSummary::EndOfCandidates
    }

    pub fn to_value(&self) -> Value {
        match self {
            CandidateSummary::EndOfCandidates => eoc_summary(),
            CandidateSummary::Unparsed => simple_summary(),
            CandidateSummary::Parsed { typ, transport, mid } => {
                let mut result = serde_json::Map::new();
                result.insert("t".to_string(), Value::from(typ.as_str()));
                result.insert("tr".to_string(), Value::from(transport.as_str()));
                if let Some(mid) = mid {
                    result.insert("mid".to_string(), Value::from(mid.as_str()));
                }
                Value::Object(result)
            }
        }
    }
}

/// Count-only summary for candidates whose details are stripped.
pub fn simple_summary() -> Value {
    json!({"n": 1})
}

/// End-of-candidates marker.
pub fn eoc_summary() -> Value {
    json!({"eoc": 1})
}
