use serde_json::{json, Value};

use super::get_stats::{classify_entry, GetStatsHandler, ReportType};
use crate::event::RawEvent;

fn getstats_event(scope: &str, payload: Value) -> RawEvent {
    RawEvent {
        name: "getstats".to_string(),
        scope: Some(scope.to_string()),
        payload,
        ts: 0,
    }
}

#[test]
fn test_classify_entry() {
    let tests = vec![
        ("CQ", json!({"score": 80}), Some(ReportType::ConnectionQuality)),
        (
            "mediasource_video_1",
            json!({"frames": 100, "framesPerSecond": 30}),
            Some(ReportType::MediaSourceVideo),
        ),
        ("mediasource_audio_1", json!({"audioLevel": 0.5}), None),
        ("t1", json!({"timestamp": 1234567}), None),
        ("t2", json!({}), None),
        (
            "out1",
            json!({"framesEncoded": 10, "bytesSent": 1000}),
            Some(ReportType::OutboundVideo),
        ),
        (
            "out2",
            json!({"bytesSent": 1000, "headerBytesSent": 100}),
            Some(ReportType::OutboundAudio),
        ),
        (
            "in1",
            json!({"bytesReceived": 1000, "totalAudioEnergy": 0.4}),
            Some(ReportType::InboundAudio),
        ),
        (
            "in2",
            json!({"bytesReceived": 1000, "audioLevel": 0.1}),
            Some(ReportType::InboundAudio),
        ),
        (
            "in3",
            json!({"bytesReceived": 1000, "framesDecoded": 50}),
            Some(ReportType::InboundVideo),
        ),
        (
            "r1",
            json!({"roundTripTime": 0.05, "jitter": 0.001}),
            Some(ReportType::RemoteInbound),
        ),
        (
            "r2",
            json!({"roundTripTimeMeasurements": 3}),
            Some(ReportType::RemoteInbound),
        ),
        (
            "cp1",
            json!({"responsesReceived": 10, "bytesSent": 100}),
            Some(ReportType::CandidatePairActive),
        ),
        (
            "cp2",
            json!({"currentRoundTripTime": 0.02, "roundTripTime": 0.02}),
            Some(ReportType::CandidatePairActive),
        ),
        (
            "cp3",
            json!({"bytesSent": 100, "remoteTimestamp": 1e12}),
            Some(ReportType::CandidatePairRelay),
        ),
        // bytesSent + headerBytesSent + remoteTimestamp is a relay pair,
        // not outbound audio
        (
            "cp4",
            json!({"bytesSent": 100, "headerBytesSent": 10, "remoteTimestamp": 1e12}),
            Some(ReportType::CandidatePairRelay),
        ),
        ("x", json!({"somethingElse": 1}), None),
    ];

    for (entry_id, entry, expected) in tests {
        let entry = entry.as_object().unwrap().clone();
        assert_eq!(classify_entry(entry_id, &entry), expected, "entry {entry_id}");
    }
}

#[test]
fn test_delta_arithmetic() {
    let mut handler = GetStatsHandler::new();

    let first = handler.transform(&getstats_event(
        "0-pub",
        json!({"out1": {"bytesSent": 1000, "packetsSent": 10, "framesPerSecond": 30, "framesEncoded": 0}}),
    ));
    assert_eq!(
        first,
        Some(json!({"out_v": [{"bs": 1000, "ps": 10, "fps": 30}]}))
    );

    let second = handler.transform(&getstats_event(
        "0-pub",
        json!({"out1": {"bytesSent": 1500, "packetsSent": 15, "framesPerSecond": 30, "framesEncoded": 0}}),
    ));
    assert_eq!(
        second,
        Some(json!({"out_v": [{"bs": 500, "ps": 5, "fps": 30}]}))
    );
}

#[test]
fn test_zero_deltas_are_omitted() {
    let mut handler = GetStatsHandler::new();
    let payload =
        json!({"out1": {"bytesSent": 1000, "packetsSent": 10, "framesPerSecond": 30, "framesEncoded": 1}});

    handler.transform(&getstats_event("0-pub", payload.clone()));
    let second = handler.transform(&getstats_event("0-pub", payload));

    // Unchanged counters disappear; the gauge stays
    assert_eq!(second, Some(json!({"out_v": [{"fps": 30}]})));
}

#[test]
fn test_all_zero_entry_is_dropped_entirely() {
    let mut handler = GetStatsHandler::new();

    let result = handler.transform(&getstats_event(
        "0-pub",
        json!({"out1": {"bytesSent": 0, "headerBytesSent": 0, "packetsSent": 0, "framesEncoded": 0}}),
    ));
    assert_eq!(result, None);
}

#[test]
fn test_scopes_do_not_share_baselines() {
    let mut handler = GetStatsHandler::new();
    let payload = json!({"out1": {"bytesSent": 1000, "framesEncoded": 1}});

    handler.transform(&getstats_event("0-pub", payload.clone()));
    let other_scope = handler.transform(&getstats_event("1-pub", payload));

    // Same entry id under a different scope is a fresh first sighting
    assert_eq!(other_scope, Some(json!({"out_v": [{"bs": 1000, "fe": 1}]})));
}

#[test]
fn test_counter_decrease_emits_negative_delta() {
    let mut handler = GetStatsHandler::new();

    handler.transform(&getstats_event(
        "s",
        json!({"out1": {"bytesSent": 1000, "framesEncoded": 1}}),
    ));
    let second = handler.transform(&getstats_event(
        "s",
        json!({"out1": {"bytesSent": 400, "framesEncoded": 1}}),
    ));

    assert_eq!(second, Some(json!({"out_v": [{"bs": -600}]})));
}

#[test]
fn test_rounding_and_numeric_cleanup() {
    let mut handler = GetStatsHandler::new();

    let result = handler
        .transform(&getstats_event(
            "s",
            json!({"in1": {
                "bytesReceived": 1000,
                "audioLevel": 0.30000000004,
                "jitter": 0.0041234564,
                "totalAudioEnergy": 2.0
            }}),
        ))
        .unwrap();

    let in_a = &result["in_a"];
    // Rounded to 6 decimals, float stays float
    assert_eq!(in_a["j"], json!(0.004123));
    assert_eq!(in_a["al"], json!(0.3));
    // Integral floats serialize as integers
    assert_eq!(in_a["tae"], json!(2));
    assert!(in_a["tae"].is_i64());
    assert!(in_a["br"].is_i64());
}

#[test]
fn test_non_numeric_fields_are_skipped() {
    let mut handler = GetStatsHandler::new();

    let result = handler.transform(&getstats_event(
        "s",
        json!({"out1": {"bytesSent": "not-a-number", "framesEncoded": 5, "packetsSent": 7}}),
    ));

    assert_eq!(result, Some(json!({"out_v": [{"fe": 5, "ps": 7}]})));
}

#[test]
fn test_non_object_payload_is_null() {
    let mut handler = GetStatsHandler::new();
    let (payload, snapshot) =
        handler.extract_and_transform(&getstats_event("s", json!("oops")));
    assert!(payload.is_none());
    assert!(snapshot.is_none());
}

#[test]
fn test_candidate_pairs_share_the_cp_bucket() {
    let mut handler = GetStatsHandler::new();

    let result = handler
        .transform(&getstats_event(
            "s",
            json!({
                "active": {"responsesReceived": 4, "currentRoundTripTime": 0.025},
                "relay": {"bytesSent": 880, "remoteTimestamp": 1.7e12}
            }),
        ))
        .unwrap();

    assert_eq!(result["cp"].as_array().unwrap().len(), 2);
}

#[test]
fn test_recompute_spans_skipped_samples() {
    let mut handler = GetStatsHandler::new();

    let samples = [1000.0, 1500.0, 2100.0];
    let mut snapshots = Vec::new();
    for bytes in samples {
        let (_, snapshot) = handler.extract_and_transform(&getstats_event(
            "0-pub",
            json!({"out1": {"bytesSent": bytes, "framesEncoded": 1}}),
        ));
        snapshots.push(snapshot.unwrap());
    }

    // Emit the first sample: no emitted baseline yet, absolute values
    let first = handler.recompute_for_emission(&snapshots[0]).unwrap();
    assert_eq!(first["out_v"][0]["bs"], json!(1000));
    handler.update_emitted_baseline(&snapshots[0]);

    // Skip the second, emit the third: delta spans the gap
    let third = handler.recompute_for_emission(&snapshots[2]).unwrap();
    assert_eq!(third["out_v"][0]["bs"], json!(1100));
    handler.update_emitted_baseline(&snapshots[2]);

    // First absolute plus emitted deltas equals the final raw value
    assert_eq!(1000 + 1100, 2100);
}
