use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::event::RawEvent;

/// Classification of an RTCStatsReport entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReportType {
    OutboundVideo,
    OutboundAudio,
    InboundAudio,
    InboundVideo,
    RemoteInbound,
    CandidatePairActive,
    CandidatePairRelay,
    MediaSourceVideo,
    ConnectionQuality,
}

/// A single field to extract from a stats entry. Counters become deltas,
/// gauges are emitted as-is after rounding.
struct FieldSpec {
    original: &'static str,
    short: &'static str,
    counter: bool,
}

const fn counter(original: &'static str, short: &'static str) -> FieldSpec {
    FieldSpec {
        original,
        short,
        counter: true,
    }
}

const fn gauge(original: &'static str, short: &'static str) -> FieldSpec {
    FieldSpec {
        original,
        short,
        counter: false,
    }
}

const OUTBOUND_VIDEO_FIELDS: &[FieldSpec] = &[
    counter("bytesSent", "bs"),
    counter("headerBytesSent", "hbs"),
    counter("packetsSent", "ps"),
    counter("framesEncoded", "fe"),
    gauge("framesPerSecond", "fps"),
    counter("qpSum", "qp"),
    counter("totalEncodeTime", "tet"),
    counter("totalEncodedBytesTarget", "tebt"),
    counter("pliCount", "pli"),
    counter("hugeFramesSent", "hfs"),
];

const OUTBOUND_AUDIO_FIELDS: &[FieldSpec] = &[
    counter("bytesSent", "bs"),
    counter("headerBytesSent", "hbs"),
    counter("packetsSent", "ps"),
];

const INBOUND_AUDIO_FIELDS: &[FieldSpec] = &[
    counter("bytesReceived", "br"),
    counter("headerBytesReceived", "hbr"),
    counter("packetsReceived", "pr"),
    gauge("jitter", "j"),
    gauge("audioLevel", "al"),
    counter("totalAudioEnergy", "tae"),
    counter("totalSamplesDuration", "tsd"),
    counter("totalSamplesReceived", "tsr"),
    counter("concealedSamples", "cs"),
    counter("concealmentEvents", "ce"),
    counter("removedSamplesForAcceleration", "rsa"),
    counter("silentConcealedSamples", "scs"),
    counter("jitterBufferDelay", "jbd"),
    counter("jitterBufferEmittedCount", "jbe"),
    counter("jitterBufferMinimumDelay", "jbm"),
    counter("jitterBufferTargetDelay", "jbt"),
];

const INBOUND_VIDEO_FIELDS: &[FieldSpec] = &[
    counter("bytesReceived", "br"),
    counter("headerBytesReceived", "hbr"),
    counter("packetsReceived", "pr"),
    gauge("jitter", "j"),
    counter("framesDecoded", "fd"),
    counter("framesReceived", "fr"),
    gauge("framesPerSecond", "fps"),
    counter("framesAssembledFromMultiplePackets", "fam"),
    counter("qpSum", "qp"),
    counter("totalDecodeTime", "tdt"),
    counter("totalInterFrameDelay", "tifd"),
    counter("totalSquaredInterFrameDelay", "tsid"),
    counter("totalAssemblyTime", "tat"),
    counter("totalProcessingDelay", "tpd"),
    counter("jitterBufferDelay", "jbd"),
    counter("jitterBufferEmittedCount", "jbe"),
    counter("jitterBufferMinimumDelay", "jbm"),
    counter("jitterBufferTargetDelay", "jbt"),
    counter("packetsLost", "pl"),
    counter("packetsDiscarded", "pd"),
    counter("nackCount", "nk"),
    counter("keyFramesDecoded", "kfd"),
    counter("freezeCount", "fzc"),
    counter("totalFreezesDuration", "fzd"),
    counter("framesDropped", "fdr"),
];

const REMOTE_INBOUND_FIELDS: &[FieldSpec] = &[
    gauge("roundTripTime", "rtt"),
    gauge("jitter", "j"),
    counter("packetsReceived", "pr"),
    counter("totalRoundTripTime", "trtt"),
    counter("roundTripTimeMeasurements", "rttm"),
];

const CANDIDATE_PAIR_ACTIVE_FIELDS: &[FieldSpec] = &[
    counter("bytesSent", "bs"),
    counter("bytesReceived", "br"),
    gauge("currentRoundTripTime", "rtt"),
    counter("responsesReceived", "rr"),
    counter("totalRoundTripTime", "trtt"),
];

const CANDIDATE_PAIR_RELAY_FIELDS: &[FieldSpec] = &[
    counter("bytesSent", "bs"),
    counter("packetsSent", "ps"),
    gauge("remoteTimestamp", "rts"),
];

const CONNECTION_QUALITY_FIELDS: &[FieldSpec] = &[
    gauge("score", "s"),
    gauge("avgScore", "as"),
    gauge("mosScore", "mos"),
];

const MEDIA_SOURCE_VIDEO_FIELDS: &[FieldSpec] =
    &[counter("frames", "f"), gauge("framesPerSecond", "fps")];

fn fields_for_type(report_type: ReportType) -> &'static [FieldSpec] {
    match report_type {
        ReportType::OutboundVideo => OUTBOUND_VIDEO_FIELDS,
        ReportType::OutboundAudio => OUTBOUND_AUDIO_FIELDS,
        ReportType::InboundAudio => INBOUND_AUDIO_FIELDS,
        ReportType::InboundVideo => INBOUND_VIDEO_FIELDS,
        ReportType::RemoteInbound => REMOTE_INBOUND_FIELDS,
        ReportType::CandidatePairActive => CANDIDATE_PAIR_ACTIVE_FIELDS,
        ReportType::CandidatePairRelay => CANDIDATE_PAIR_RELAY_FIELDS,
        ReportType::ConnectionQuality => CONNECTION_QUALITY_FIELDS,
        ReportType::MediaSourceVideo => MEDIA_SOURCE_VIDEO_FIELDS,
    }
}

/// Determines the report type of a stats entry by field fingerprint.
/// Rules apply top to bottom; the first match wins.
pub(crate) fn classify_entry(entry_id: &str, entry: &Map<String, Value>) -> Option<ReportType> {
    let timestamp_only =
        entry.is_empty() || (entry.len() == 1 && entry.contains_key("timestamp"));
    classify_fields(entry_id, |k| entry.contains_key(k), timestamp_only)
}

fn classify_fields(
    entry_id: &str,
    has: impl Fn(&str) -> bool,
    timestamp_only: bool,
) -> Option<ReportType> {
    use ReportType::*;

    if entry_id == "CQ" {
        return Some(ConnectionQuality);
    }
    if entry_id.starts_with("mediasource_video_") && has("frames") {
        return Some(MediaSourceVideo);
    }
    if entry_id.starts_with("mediasource_audio_") {
        return None;
    }
    if timestamp_only {
        return None;
    }

    let has_fe = has("framesEncoded");
    let has_bs = has("bytesSent");
    let has_hbs = has("headerBytesSent");
    let has_br = has("bytesReceived");
    let has_fd = has("framesDecoded");
    let has_rtt = has("roundTripTime");
    let has_rttm = has("roundTripTimeMeasurements");
    let has_rr = has("responsesReceived");
    let has_crtt = has("currentRoundTripTime");
    let has_rts = has("remoteTimestamp");
    let has_tae = has("totalAudioEnergy");
    let has_al = has("audioLevel");

    if has_fe && has_bs {
        return Some(OutboundVideo);
    }
    // Candidate pairs also carry bytesSent + headerBytesSent; rule them out
    if has_bs && has_hbs && !has_fe && !has_rts && !has_rr && !has_crtt && !has_br {
        return Some(OutboundAudio);
    }
    if has_br && (has_tae || has_al) {
        return Some(InboundAudio);
    }
    if has_br && has_fd {
        return Some(InboundVideo);
    }
    if (has_rtt || has_rttm) && !has_rr && !has_crtt {
        return Some(RemoteInbound);
    }
    if has_rr || has_crtt {
        return Some(CandidatePairActive);
    }
    if has_bs && has_rts && !has_rr {
        return Some(CandidatePairRelay);
    }

    None
}

/// Raw numeric values of one getstats sample, sufficient to recompute any
/// delta against any baseline. Owned by the sampler's buffer slot until the
/// sample is emitted or evicted.
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub scope: String,
    // state key → original field name → raw value, in payload order
    raw_values: Vec<(String, HashMap<&'static str, f64>)>,
}

/// Compresses RTCStatsReport payloads. Holds per-entity counter baselines:
/// `prev_values` advances on every sample and feeds the live output;
/// `emitted_values` advances only when a sample is actually written and
/// feeds the sampled re-emission path.
#[derive(Debug, Default)]
pub struct GetStatsHandler {
    prev_values: HashMap<String, HashMap<&'static str, f64>>,
    emitted_values: HashMap<String, HashMap<&'static str, f64>>,
}

impl GetStatsHandler {
    pub fn new() -> GetStatsHandler {
        GetStatsHandler::default()
    }

    /// Live-path transform: deltas against the per-sample baseline.
    pub fn transform(&mut self, event: &RawEvent) -> Option<Value> {
        self.extract_and_transform(event).0
    }

    /// Like [`GetStatsHandler::transform`], but also captures the raw
    /// values of every relevant field so that deltas can be recomputed
    /// later against the emitted baseline.
    pub fn extract_and_transform(
        &mut self,
        event: &RawEvent,
    ) -> (Option<Value>, Option<StatsSnapshot>) {
        let Some(payload) = event.payload.as_object() else {
            return (None, None);
        };
        let scope = event.scope.clone().unwrap_or_default();

        let mut snapshot = StatsSnapshot {
            scope: scope.clone(),
            raw_values: Vec::new(),
        };
        let mut buckets = Buckets::default();

        for (entry_id, raw) in payload {
            // Top-level non-object values ("timestamp" etc.) are skipped
            let Some(entry) = raw.as_object() else {
                continue;
            };
            let Some(report_type) = classify_entry(entry_id, entry) else {
                continue;
            };

            let state_key = format!("{scope}:{entry_id}");
            let fields = fields_for_type(report_type);

            let mut raw_vals = HashMap::new();
            for spec in fields {
                if let Some(val) = entry.get(spec.original).and_then(Value::as_f64) {
                    raw_vals.insert(spec.original, val);
                }
            }
            snapshot.raw_values.push((state_key.clone(), raw_vals));

            let compressed = self.compress_entry(&state_key, entry, fields);
            if compressed.is_empty() {
                continue;
            }
            buckets.push(report_type, compressed);
        }

        (buckets.into_value(), Some(snapshot))
    }

    /// Recomputes the compressed output for a snapshot, using the emitted
    /// baseline for counter deltas. When samples have been skipped, the
    /// emitted deltas then still sum to the raw counter totals. An entity
    /// with no emitted baseline counts as a first sighting.
    pub fn recompute_for_emission(&self, snapshot: &StatsSnapshot) -> Option<Value> {
        let mut buckets = Buckets::default();

        for (state_key, raw_vals) in &snapshot.raw_values {
            let entry_id = state_key
                .rsplit_once(':')
                .map_or(state_key.as_str(), |(_, id)| id);
            let Some(report_type) = classify_fields(
                entry_id,
                |k| raw_vals.contains_key(k),
                raw_vals.is_empty(),
            ) else {
                continue;
            };

            let fields = fields_for_type(report_type);
            let prev = self.emitted_values.get(state_key);

            let mut compressed = Map::new();
            for spec in fields {
                let Some(&val) = raw_vals.get(spec.original) else {
                    continue;
                };
                let shown = if spec.counter {
                    match prev.and_then(|p| p.get(spec.original)) {
                        Some(prev_val) => round6(val - prev_val),
                        None => round6(val),
                    }
                } else {
                    round6(val)
                };
                if shown != 0.0 {
                    compressed.insert(spec.short.to_string(), clean_number(shown));
                }
            }

            if compressed.is_empty() {
                continue;
            }
            buckets.push(report_type, compressed);
        }

        buckets.into_value()
    }

    /// Copies snapshot values into the emitted baseline. Call only after
    /// the sample has actually been written.
    pub fn update_emitted_baseline(&mut self, snapshot: &StatsSnapshot) {
        for (state_key, raw_vals) in &snapshot.raw_values {
            self.emitted_values
                .insert(state_key.clone(), raw_vals.clone());
        }
    }

    fn compress_entry(
        &mut self,
        state_key: &str,
        entry: &Map<String, Value>,
        fields: &'static [FieldSpec],
    ) -> Map<String, Value> {
        let mut curr: HashMap<&'static str, f64> = HashMap::new();
        let mut result = Map::new();

        let prev = self.prev_values.get(state_key);
        for spec in fields {
            // Only numbers participate; anything else is skipped
            let Some(val) = entry.get(spec.original).and_then(Value::as_f64) else {
                continue;
            };
            let shown = if spec.counter {
                curr.insert(spec.original, val);
                match prev.and_then(|p| p.get(spec.original)) {
                    Some(prev_val) => round6(val - prev_val),
                    // First sighting emits the absolute value, so a
                    // non-zero starting counter is not silently lost
                    None => round6(val),
                }
            } else {
                round6(val)
            };
            if shown != 0.0 {
                result.insert(spec.short.to_string(), clean_number(shown));
            }
        }

        self.prev_values
            .entry(state_key.to_string())
            .or_default()
            .extend(curr);
        result
    }
}

#[derive(Default)]
struct Buckets {
    out_v: Vec<Value>,
    out_a: Option<Value>,
    in_a: Option<Value>,
    in_v: Option<Value>,
    rtt: Vec<Value>,
    cp: Vec<Value>,
    cq: Option<Value>,
    ms: Option<Value>,
}

impl Buckets {
    fn push(&mut self, report_type: ReportType, entry: Map<String, Value>) {
        let entry = Value::Object(entry);
        match report_type {
            ReportType::OutboundVideo => self.out_v.push(entry),
            ReportType::OutboundAudio => self.out_a = Some(entry),
            ReportType::InboundAudio => self.in_a = Some(entry),
            ReportType::InboundVideo => self.in_v = Some(entry),
            ReportType::RemoteInbound => self.rtt.push(entry),
            // Active and relay pairs share the cp bucket
            ReportType::CandidatePairActive | ReportType::CandidatePairRelay => {
                self.cp.push(entry)
            }
            ReportType::ConnectionQuality => self.cq = Some(entry),
            ReportType::MediaSourceVideo => self.ms = Some(entry),
        }
    }

    fn into_value(self) -> Option<Value> {
        let mut result = Map::new();
        if !self.out_v.is_empty() {
            result.insert("out_v".to_string(), Value::Array(self.out_v));
        }
        if let Some(v) = self.out_a {
            result.insert("out_a".to_string(), v);
        }
        if let Some(v) = self.in_a {
            result.insert("in_a".to_string(), v);
        }
        if let Some(v) = self.in_v {
            result.insert("in_v".to_string(), v);
        }
        if !self.rtt.is_empty() {
            result.insert("rtt".to_string(), Value::Array(self.rtt));
        }
        if !self.cp.is_empty() {
            result.insert("cp".to_string(), Value::Array(self.cp));
        }
        if let Some(v) = self.cq {
            result.insert("cq".to_string(), v);
        }
        if let Some(v) = self.ms {
            result.insert("ms".to_string(), v);
        }
        if result.is_empty() {
            None
        } else {
            Some(Value::Object(result))
        }
    }
}

fn round6(val: f64) -> f64 {
    (val * 1e6).round() / 1e6
}

/// Integral values serialize as integers so the JSON stays clean
/// (298 instead of 298.0).
fn clean_number(val: f64) -> Value {
    if val == val.trunc() && val >= i64::MIN as f64 && val <= i64::MAX as f64 {
        Value::from(val as i64)
    } else {
        Value::from(val)
    }
}
