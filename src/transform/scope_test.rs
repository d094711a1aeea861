use super::*;

#[test]
fn test_compress_scope() {
    let tests = vec![
        (None, ""),
        (Some("0-pub"), "0-pub"),
        (Some("0-sub"), "0-sub"),
        (Some("short"), "short"),
        // -pub/-sub suffixes survive even when long
        (Some("reconnected-session-pub"), "reconnected-session-pub"),
        (
            Some("0-sfu-dpk-frankfurt-vp1-54d1dc529306.stream-io-video.com"),
            "sfu:frankfurt-vp1",
        ),
        (
            Some("2-sfu-abc-tokyo-aa9-0123456789ab.stream-io-video.com"),
            "sfu:tokyo-aa9",
        ),
        // Hostnames missing the strict shape still reduce via the region scan
        (
            Some("edge-frankfurt-vp2-gateway.stream-io-video.com"),
            "sfu:frankfurt-vp2",
        ),
    ];

    for (scope, expected) in tests {
        assert_eq!(compress_scope(scope), expected, "scope {scope:?}");
    }
}

#[test]
fn test_compress_scope_truncates_long_strings() {
    let long = "x".repeat(50);
    let got = compress_scope(Some(&long));
    assert_eq!(got.len(), 43);
    assert!(got.ends_with("..."));
    assert!(got.starts_with(&"x".repeat(40)));
}
