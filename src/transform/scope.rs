use once_cell::sync::Lazy;
use regex::Regex;

// SFU hostname shape: 0-sfu-dpk-frankfurt-vp1-54d1dc529306.stream-io-video.com
static SFU_HOSTNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)-sfu-[a-z]+-([a-z]+-[a-z0-9]+)-[a-f0-9]+\.stream-io-video\.com$")
        .expect("sfu hostname pattern")
});

const KNOWN_REGIONS: &[&str] = &[
    "frankfurt",
    "london",
    "paris",
    "amsterdam",
    "newyork",
    "chicago",
    "losangeles",
    "singapore",
    "tokyo",
    "sydney",
    "mumbai",
    "saopaulo",
];

/// Compresses scope strings. Short scopes like "0-pub" and "0-sub" are kept
/// as-is, SFU hostnames reduce to "sfu:<region>", anything else long is
/// truncated.
pub fn compress_scope(scope: Option<&str>) -> String {
    let Some(s) = scope else {
        return String::new();
    };

    if s.chars().count() <= 10 || s.ends_with("-pub") || s.ends_with("-sub") {
        return s.to_string();
    }

    if let Some(caps) = SFU_HOSTNAME.captures(s) {
        return format!("sfu:{}", &caps[2]);
    }

    // Looser fallback for any stream-io hostname: find a known region among
    // the hyphen-separated components, keep the cluster component after it.
    if s.contains(".stream-io-video.com") {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() >= 3 {
            for i in 1..parts.len() - 1 {
                if is_region(parts[i]) {
                    let mut region = parts[i].to_string();
                    if i + 1 < parts.len() && is_cluster(parts[i + 1]) {
                        region.push('-');
                        region.push_str(parts[i + 1]);
                    }
                    return format!("sfu:{region}");
                }
            }
        }
    }

    if s.chars().count() > 40 {
        let truncated: String = s.chars().take(40).collect();
        return format!("{truncated}...");
    }

    s.to_string()
}

fn is_region(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    KNOWN_REGIONS.contains(&lower.as_str())
}

// Cluster components look like "vp1", "vp2".
fn is_cluster(s: &str) -> bool {
    (2..=4).contains(&s.len())
}
