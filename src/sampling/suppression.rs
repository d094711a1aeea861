use std::collections::HashMap;

use serde_json::{Map, Value};

/// Replaces report categories that are unchanged since the last emitted
/// sample with the literal string "=", shrinking long stable calls.
#[derive(Debug, Default)]
pub struct SteadyStateSuppressor {
    // scope → last emitted payload, always stored unsubstituted
    last_emitted: HashMap<String, Map<String, Value>>,
}

impl SteadyStateSuppressor {
    pub fn new() -> SteadyStateSuppressor {
        SteadyStateSuppressor::default()
    }

    /// Compares each top-level category against the previous emission for
    /// the scope and substitutes "=" for deep-equal values. The full
    /// payload is what gets remembered, never the substituted one.
    pub fn suppress(&mut self, scope: &str, payload: Value) -> Value {
        let result = match payload {
            Value::Object(map) => map,
            other => return other,
        };

        let prev = self.last_emitted.get(scope);
        let mut suppressed = Map::new();
        for (category, value) in &result {
            if prev.and_then(|p| p.get(category)) == Some(value) {
                suppressed.insert(category.clone(), Value::String("=".to_string()));
            } else {
                suppressed.insert(category.clone(), value.clone());
            }
        }

        self.last_emitted.insert(scope.to_string(), result);
        Value::Object(suppressed)
    }
}
