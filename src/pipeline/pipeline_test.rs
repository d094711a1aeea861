use serde_json::{json, Value};

use super::Pipeline;
use crate::event::{RawEvent, TimestampMode};
use crate::sampling::SamplingConfig;

fn raw(name: &str, scope: Option<&str>, payload: Value, ts: i64) -> RawEvent {
    RawEvent {
        name: name.to_string(),
        scope: scope.map(str::to_string),
        payload,
        ts,
    }
}

fn run(events: &[RawEvent], ts_mode: TimestampMode, sampling: Option<SamplingConfig>) -> Vec<Value> {
    let mut sink = Vec::new();
    let mut pipeline = Pipeline::new(&mut sink, ts_mode, false, sampling);
    pipeline.run(events).unwrap();

    String::from_utf8(sink)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_one_line_per_event_in_order() {
    let events = vec![
        raw("create", Some("0-pub"), json!({"bundlePolicy": "balanced"}), 100),
        raw("signalingstatechange", Some("0-pub"), json!("stable"), 150),
        raw("negotiationneeded", None, json!(null), 175),
        raw("iceconnectionstatechange", Some("0-pub"), json!("checking"), 200),
    ];

    let lines = run(&events, TimestampMode::Absolute, None);
    assert_eq!(lines.len(), 4);

    let names: Vec<&str> = lines.iter().map(|l| l["n"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["create", "signalingstatechange", "negotiationneeded", "iceconnectionstatechange"]
    );
}

#[test]
fn test_envelope_field_omission() {
    let events = vec![raw("negotiationneeded", None, json!(null), 100)];
    let lines = run(&events, TimestampMode::Absolute, None);

    let record = lines[0].as_object().unwrap();
    assert!(record.contains_key("n"));
    assert!(record.contains_key("ts"));
    // null scope and null payload are omitted outright
    assert!(!record.contains_key("s"));
    assert!(!record.contains_key("p"));
    assert!(!record.contains_key("dt"));
}

#[test]
fn test_timestamp_modes() {
    let events = vec![
        raw("a.first", None, json!(null), 5000),
        raw("b.second", None, json!(null), 5250),
    ];

    let absolute = run(&events, TimestampMode::Absolute, None);
    assert_eq!(absolute[1]["ts"], 5250);
    assert!(absolute[1].get("dt").is_none());

    let delta = run(&events, TimestampMode::Delta, None);
    assert_eq!(delta[0]["dt"], 0);
    assert_eq!(delta[1]["dt"], 250);
    assert!(delta[1].get("ts").is_none());

    let both = run(&events, TimestampMode::Both, None);
    assert_eq!(both[1]["ts"], 5250);
    assert_eq!(both[1]["dt"], 250);
}

#[test]
fn test_negative_delta_is_written_verbatim() {
    let events = vec![
        raw("a.first", None, json!(null), 5000),
        raw("b.earlier", None, json!(null), 4000),
    ];

    let delta = run(&events, TimestampMode::Delta, None);
    assert_eq!(delta[1]["dt"], -1000);
}

#[test]
fn test_getstats_goes_through_baselines_without_sampling() {
    let payload1 = json!({"out1": {"bytesSent": 1000, "framesEncoded": 1}});
    let payload2 = json!({"out1": {"bytesSent": 1600, "framesEncoded": 1}});
    let events = vec![
        raw("getstats", Some("0-pub"), payload1, 100),
        raw("getstats", Some("0-pub"), payload2, 200),
    ];

    let lines = run(&events, TimestampMode::Absolute, None);
    assert_eq!(lines[0]["p"], json!({"out_v": [{"bs": 1000, "fe": 1}]}));
    assert_eq!(lines[1]["p"], json!({"out_v": [{"bs": 600}]}));
}

#[test]
fn test_non_getstats_events_bypass_the_sampler() {
    let sampling = SamplingConfig {
        interval: 100,
        context_before: 2,
        context_after: 2,
        steady_state: false,
    };

    let mut events = Vec::new();
    for i in 0..6 {
        events.push(raw(
            "getstats",
            Some("0-pub"),
            json!({"out1": {"bytesSent": 1000 + i * 100, "framesEncoded": 1}}),
            100 + i,
        ));
    }
    events.push(raw("signalingstatechange", Some("0-pub"), json!("closed"), 300));

    let lines = run(&events, TimestampMode::Absolute, Some(sampling));

    // The state change is written immediately, before buffered getstats
    // samples are flushed
    let names: Vec<&str> = lines.iter().map(|l| l["n"].as_str().unwrap()).collect();
    let change_pos = names.iter().position(|n| *n == "signalingstatechange").unwrap();
    let last_stats = names.iter().rposition(|n| *n == "getstats").unwrap();
    assert!(change_pos < last_stats);
}

#[test]
fn test_sampled_emission_rebaselines_deltas() {
    let sampling = SamplingConfig {
        interval: 5,
        context_before: 0,
        context_after: 0,
        steady_state: false,
    };

    let mut events = Vec::new();
    for i in 0..10i64 {
        events.push(raw(
            "getstats",
            Some("0-pub"),
            json!({"out1": {"bytesSent": 1000 + i * 100, "framesEncoded": 1}}),
            100 + i,
        ));
    }

    let lines = run(&events, TimestampMode::Absolute, Some(sampling));
    let stats: Vec<&Value> = lines.iter().filter(|l| l["n"] == "getstats").collect();

    // Samples 1, 5, 10 survive; the first emits absolutes and every
    // later delta spans the skipped samples
    assert_eq!(stats.len(), 3);
    assert_eq!(stats[0]["p"]["out_v"][0]["bs"], 1000);
    assert_eq!(stats[1]["p"]["out_v"][0]["bs"], 400);
    assert_eq!(stats[2]["p"]["out_v"][0]["bs"], 500);

    // First absolute plus emitted deltas reconstructs the final total
    let total: i64 = stats
        .iter()
        .map(|s| s["p"]["out_v"][0]["bs"].as_i64().unwrap())
        .sum();
    assert_eq!(total, 1900);
}

#[test]
fn test_steady_state_suppression_in_sampled_output() {
    let sampling = SamplingConfig {
        interval: 2,
        context_before: 0,
        context_after: 0,
        steady_state: true,
    };

    // Constant rate: every emitted delta is identical after the first
    let mut events = Vec::new();
    for i in 0..8i64 {
        events.push(raw(
            "getstats",
            Some("0-pub"),
            json!({"out1": {"bytesSent": 1000 + i * 100, "framesEncoded": 1}}),
            100 + i,
        ));
    }

    let lines = run(&events, TimestampMode::Absolute, Some(sampling));
    let stats: Vec<&Value> = lines.iter().filter(|l| l["n"] == "getstats").collect();

    // Kept samples: 1 (first), 2, 4, 6, 8, and 8 is also the flush-forced
    // last. Sample 4 and 6 both emit {out_v:[{bs:200}]}, so 6 collapses.
    assert_eq!(stats[0]["p"]["out_v"][0]["bs"], 1000);
    assert_eq!(stats[1]["p"]["out_v"][0]["bs"], 100);
    assert_eq!(stats[2]["p"]["out_v"][0]["bs"], 200);
    assert_eq!(stats[3]["p"]["out_v"], "=");
    assert_eq!(stats[4]["p"]["out_v"], "=");
}
