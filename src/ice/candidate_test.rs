use super::*;
use serde_json::json;

#[test]
fn test_parse_candidate() {
    let tests = vec![
        (
            "candidate:0 1 UDP 2122252543 192.168.50.234 51101 typ host",
            CandidateSummary::Parsed {
                typ: "host".to_string(),
                transport: "udp".to_string(),
                mid: None,
            },
        ),
        (
            "candidate:4 1 UDP 8331263 89.222.124.8 40846 typ relay raddr 89.222.124.8 rport 40846",
            CandidateSummary::Parsed {
                typ: "relay".to_string(),
                transport: "udp".to_string(),
                mid: None,
            },
        ),
        (
            "candidate:2 1 TCP 1686052863 203.0.113.5 9 typ srflx tcptype active",
            CandidateSummary::Parsed {
                typ: "srflx".to_string(),
                transport: "tcp".to_string(),
                mid: None,
            },
        ),
        ("", CandidateSummary::EndOfCandidates),
        ("not a candidate line", CandidateSummary::Unparsed),
    ];

    for (input, expected) in tests {
        assert_eq!(CandidateSummary::parse(input), expected, "input {input:?}");
    }
}

#[test]
fn test_from_payload_shapes() {
    let null = json!(null);
    assert!(CandidateSummary::from_payload(&null).is_end_of_candidates());

    let with_mid = json!({
        "candidate": "candidate:0 1 UDP 2122252543 10.0.0.7 51101 typ host",
        "sdpMid": "0"
    });
    assert_eq!(
        CandidateSummary::from_payload(&with_mid).to_value(),
        json!({"t": "host", "tr": "udp", "mid": "0"})
    );

    let empty = json!({"candidate": ""});
    assert!(CandidateSummary::from_payload(&empty).is_end_of_candidates());

    // SFU IceTrickle wraps the candidate in a JSON-encoded string
    let nested = json!({
        "iceCandidate": "{\"candidate\":\"candidate:1 1 UDP 1 1.2.3.4 9 typ relay\"}"
    });
    assert_eq!(
        CandidateSummary::from_payload(&nested).to_value(),
        json!({"t": "relay", "tr": "udp"})
    );

    let odd = json!(42);
    assert_eq!(CandidateSummary::from_payload(&odd).to_value(), json!({"n": 1}));
}
