use super::*;
use crate::error::Error;

#[test]
fn test_parse_events() {
    let input = br#"[
        ["create", "0-pub", {"bundlePolicy": "max-bundle"}, 1000],
        ["signalingstatechange", null, "stable", 1005]
    ]"#;

    let reader = Reader::new(input).unwrap();
    assert_eq!(reader.len(), 2);

    let events = reader.events();
    assert_eq!(events[0].name, "create");
    assert_eq!(events[0].scope.as_deref(), Some("0-pub"));
    assert_eq!(events[0].ts, 1000);

    assert_eq!(events[1].name, "signalingstatechange");
    assert_eq!(events[1].scope, None);
    assert_eq!(events[1].payload, serde_json::json!("stable"));
}

#[test]
fn test_empty_input_is_empty_reader() {
    assert!(Reader::new(b"").unwrap().is_empty());
    assert!(Reader::new(b"  \n ").unwrap().is_empty());
    assert!(Reader::new(b"[]").unwrap().is_empty());
}

#[test]
fn test_rejects_non_array_input() {
    match Reader::new(b"{\"nope\": 1}") {
        Err(Error::ErrExpectedArray(c)) => assert_eq!(c, '{'),
        other => panic!("expected ErrExpectedArray, got {other:?}"),
    }
}

#[test]
fn test_short_event_reports_index() {
    let input = br#"[["ok", null, null, 1], ["short", null]]"#;
    match Reader::new(input) {
        Err(Error::ErrEventTooShort { index, len }) => {
            assert_eq!(index, 2);
            assert_eq!(len, 2);
        }
        other => panic!("expected ErrEventTooShort, got {other:?}"),
    }
}

#[test]
fn test_bad_field_reports_index() {
    let input = br#"[[42, null, null, 1]]"#;
    match Reader::new(input) {
        Err(Error::ErrEventField { index, field, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(field, "event name");
        }
        other => panic!("expected ErrEventField, got {other:?}"),
    }
}

#[test]
fn test_extra_elements_are_tolerated() {
    let input = br#"[["name", "s", 7, 1, "extra"]]"#;
    let reader = Reader::new(input).unwrap();
    assert_eq!(reader.events()[0].payload, serde_json::json!(7));
}
