use std::collections::{BTreeSet, HashMap};

use serde_json::{Map, Value};

/// Decides whether a compressed getstats output represents an "interesting"
/// moment that warrants full-resolution sampling. Operates on the
/// compressed output so it sees the zero-suppressed view, and keeps its own
/// per-scope gauge history.
#[derive(Debug, Default)]
pub struct InterestDetector {
    // scope → category keys seen in the previous sample
    prev_categories: HashMap<String, BTreeSet<String>>,
    // scope → "category[index].gauge" → previous value
    prev_gauges: HashMap<String, HashMap<String, f64>>,
}

// Any positive delta on these counters is interesting on its own.
const COUNTER_TRIGGERS: &[&str] = &["pl", "fzc", "fdr"];

// Gauges trigger when they move more than their threshold between samples.
const GAUGE_TRIGGERS: &[(&str, f64)] = &[("fps", 5.0), ("j", 0.02), ("rtt", 0.05), ("s", 10.0)];

impl InterestDetector {
    pub fn new() -> InterestDetector {
        InterestDetector::default()
    }

    /// Inspects a compressed getstats payload and reports whether any
    /// trigger fired. Gauge history is updated on every call, crossing a
    /// threshold or not. A missing or non-object payload is never
    /// interesting and leaves the state untouched.
    pub fn is_interesting(&mut self, scope: &str, payload: Option<&Value>) -> bool {
        let Some(Value::Object(result)) = payload else {
            return false;
        };

        let mut interesting = false;

        // A category key appearing or disappearing means a track was added
        // or removed.
        let current: BTreeSet<String> = result.keys().cloned().collect();
        if let Some(prev) = self.prev_categories.get(scope) {
            if *prev != current {
                interesting = true;
            }
        }

        for (category, entries) in result {
            interesting |= self.check_category(scope, category, entries);
        }

        self.prev_categories.insert(scope.to_string(), current);
        interesting
    }

    fn check_category(&mut self, scope: &str, category: &str, entries: &Value) -> bool {
        match entries {
            Value::Object(fields) => self.check_fields(scope, category, "", fields),
            Value::Array(items) => {
                let mut found = false;
                for (i, item) in items.iter().enumerate() {
                    if let Value::Object(fields) = item {
                        found |= self.check_fields(scope, category, &i.to_string(), fields);
                    }
                }
                found
            }
            _ => false,
        }
    }

    fn check_fields(
        &mut self,
        scope: &str,
        category: &str,
        suffix: &str,
        fields: &Map<String, Value>,
    ) -> bool {
        let mut interesting = false;

        for key in COUNTER_TRIGGERS {
            if let Some(v) = fields.get(*key).and_then(Value::as_f64) {
                if v > 0.0 {
                    interesting = true;
                }
            }
        }

        let gauges = self.prev_gauges.entry(scope.to_string()).or_default();
        for (key, threshold) in GAUGE_TRIGGERS {
            if let Some(v) = fields.get(*key).and_then(Value::as_f64) {
                let gauge_key = format!("{category}{suffix}.{key}");
                if let Some(prev) = gauges.get(&gauge_key) {
                    if (v - prev).abs() > *threshold {
                        interesting = true;
                    }
                }
                gauges.insert(gauge_key, v);
            }
        }

        interesting
    }
}
