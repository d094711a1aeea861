use std::collections::{HashMap, VecDeque};

use super::detector::InterestDetector;
use super::SamplingConfig;
use crate::event::CompressedEvent;
use crate::handlers::StatsSnapshot;

/// A getstats sample held in the look-behind buffer until the sampler
/// knows whether it is worth keeping.
#[derive(Debug)]
pub struct BufferedSample {
    pub event: CompressedEvent,
    pub snapshot: Option<StatsSnapshot>,
    keep: bool,
}

#[derive(Debug, Default)]
struct ScopeState {
    // total samples seen
    count: usize,
    // countdown of remaining context-after samples
    context_after: usize,
    // look-behind buffer, at most context_before + 1 slots
    buffer: VecDeque<BufferedSample>,
}

/// Two-layer adaptive sampling for getstats events: a fixed keep-every-Nth
/// layer, plus full resolution around moments the interest detector flags.
///
/// The sampler performs no I/O. [`Sampler::offer`] and [`Sampler::flush`]
/// return the samples that are ready to emit, in order; the caller
/// recomputes their deltas and writes them.
#[derive(Debug, Default)]
pub struct Sampler {
    config: SamplingConfig,
    detector: InterestDetector,
    scopes: HashMap<String, ScopeState>,
    // flush drains scopes in first-seen order
    scope_order: Vec<String>,
}

impl Sampler {
    pub fn new(config: SamplingConfig) -> Sampler {
        Sampler {
            config,
            ..Default::default()
        }
    }

    /// Feeds one compressed getstats sample through the sampling decision
    /// and returns any older samples that became ready to emit.
    pub fn offer(
        &mut self,
        event: CompressedEvent,
        snapshot: Option<StatsSnapshot>,
    ) -> Vec<BufferedSample> {
        let scope = event.s.clone();
        let interesting = self.detector.is_interesting(&scope, event.p.as_ref());

        if !self.scopes.contains_key(&scope) {
            self.scope_order.push(scope.clone());
        }
        let state = self.scopes.entry(scope).or_default();
        state.count += 1;

        let keep = if state.count == 1 {
            // The first sample carries the absolute baselines
            true
        } else if self.config.interval > 0 && state.count % self.config.interval == 0 {
            true
        } else if interesting {
            true
        } else if state.context_after > 0 {
            state.context_after -= 1;
            true
        } else {
            false
        };

        if interesting {
            // Promote everything still buffered: these are the
            // context-before samples of this moment. Samples already
            // evicted stay dropped; that is the bound on look-behind.
            for sample in state.buffer.iter_mut() {
                sample.keep = true;
            }
            state.context_after = self.config.context_after;
        }

        state.buffer.push_back(BufferedSample {
            event,
            snapshot,
            keep,
        });

        let capacity = self.config.context_before + 1;
        let mut ready = Vec::new();
        while state.buffer.len() > capacity {
            if let Some(oldest) = state.buffer.pop_front() {
                if oldest.keep {
                    ready.push(oldest);
                }
            }
        }
        ready
    }

    /// Drains all buffers at end of stream. The last buffered sample per
    /// scope is force-kept so the log always closes on current totals.
    pub fn flush(&mut self) -> Vec<BufferedSample> {
        let mut ready = Vec::new();
        for scope in &self.scope_order {
            if let Some(state) = self.scopes.get_mut(scope) {
                if let Some(last) = state.buffer.back_mut() {
                    last.keep = true;
                }
                ready.extend(state.buffer.drain(..).filter(|sample| sample.keep));
            }
        }
        ready
    }
}
