use serde_json::{Map, Value};

/// Field names whose values must never reach the output, matched
/// case-insensitively. TURN usernames are included since they can embed
/// expiry-signed identities.
pub fn is_secret_field(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "token"
            | "credential"
            | "credentials"
            | "password"
            | "secret"
            | "username"
            | "ice-pwd"
            | "ice-ufrag"
    )
}

/// Removes secret fields from an object recursively. Arrays recurse into
/// object elements; scalars are kept as-is.
pub fn strip_secrets(map: &Map<String, Value>) -> Map<String, Value> {
    let mut result = Map::new();
    for (k, v) in map {
        if is_secret_field(k) {
            continue;
        }
        result.insert(k.clone(), strip_value(v));
    }
    result
}

fn strip_value(v: &Value) -> Value {
    match v {
        Value::Object(nested) => Value::Object(strip_secrets(nested)),
        Value::Array(items) => Value::Array(items.iter().map(strip_value).collect()),
        other => other.clone(),
    }
}
