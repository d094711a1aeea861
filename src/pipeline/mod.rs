#[cfg(test)]
mod pipeline_test;

use std::io::Write;

use serde_json::Value;

use crate::error::Result;
use crate::event::{CompressedEvent, RawEvent, TimestampMode, Writer};
use crate::handlers::{GetStatsHandler, Registry};
use crate::sampling::{BufferedSample, Sampler, SamplingConfig, SteadyStateSuppressor};
use crate::transform::compress_scope;

/// Drives raw events through the transformers and writes JSONL records.
///
/// The pipeline owns all mutable state: the getstats baselines, the sampler
/// buffers, and the suppressor memory. Events are strictly sequential;
/// getstats events go through the sampler when sampling is enabled, every
/// other event goes straight from the registry to the sink.
pub struct Pipeline<W: Write> {
    writer: Writer<W>,
    registry: Registry,
    get_stats: GetStatsHandler,
    ts_mode: TimestampMode,
    first_ts: i64,
    sampler: Option<Sampler>,
    suppressor: Option<SteadyStateSuppressor>,
}

impl<W: Write> Pipeline<W> {
    pub fn new(
        sink: W,
        ts_mode: TimestampMode,
        pretty: bool,
        sampling: Option<SamplingConfig>,
    ) -> Pipeline<W> {
        let suppressor = match sampling {
            Some(config) if config.steady_state => Some(SteadyStateSuppressor::new()),
            _ => None,
        };

        Pipeline {
            writer: Writer::new(sink, pretty),
            registry: Registry::new(),
            get_stats: GetStatsHandler::new(),
            ts_mode,
            first_ts: 0,
            sampler: sampling.map(Sampler::new),
            suppressor,
        }
    }

    /// Processes all events in order, then flushes the sampler. The first
    /// event's timestamp anchors delta timestamps for the whole run. Any
    /// write error terminates immediately.
    pub fn run(&mut self, events: &[RawEvent]) -> Result<()> {
        for (i, raw) in events.iter().enumerate() {
            if i == 0 {
                self.first_ts = raw.ts;
            }

            if self.sampler.is_some() && raw.name == "getstats" {
                self.process_getstats_sampled(raw)?;
            } else {
                let compressed = self.transform_event(raw);
                self.writer.write(&compressed)?;
            }
        }

        let ready = match &mut self.sampler {
            Some(sampler) => sampler.flush(),
            None => Vec::new(),
        };
        for sample in ready {
            self.emit_sample(sample)?;
        }

        Ok(())
    }

    pub fn into_sink(self) -> W {
        self.writer.into_inner()
    }

    fn process_getstats_sampled(&mut self, raw: &RawEvent) -> Result<()> {
        // The eager payload feeds the interest detector; emission
        // recomputes it against the emitted baseline.
        let (payload, snapshot) = self.get_stats.extract_and_transform(raw);
        let compressed = self.envelope(raw, payload);

        let ready = match &mut self.sampler {
            Some(sampler) => sampler.offer(compressed, snapshot),
            None => Vec::new(),
        };
        for sample in ready {
            self.emit_sample(sample)?;
        }
        Ok(())
    }

    fn emit_sample(&mut self, mut sample: BufferedSample) -> Result<()> {
        let recomputed = sample
            .snapshot
            .as_ref()
            .and_then(|snapshot| self.get_stats.recompute_for_emission(snapshot));

        sample.event.p = match (recomputed, &mut self.suppressor) {
            (Some(payload), Some(suppressor)) => {
                Some(suppressor.suppress(&sample.event.s, payload))
            }
            (payload, _) => payload,
        };

        if let Some(snapshot) = &sample.snapshot {
            self.get_stats.update_emitted_baseline(snapshot);
        }

        self.writer.write(&sample.event)
    }

    fn transform_event(&mut self, raw: &RawEvent) -> CompressedEvent {
        let payload = if raw.name == "getstats" {
            self.get_stats.transform(raw)
        } else {
            self.registry.get(&raw.name).transform(raw)
        };
        self.envelope(raw, payload)
    }

    fn envelope(&self, raw: &RawEvent, payload: Option<Value>) -> CompressedEvent {
        let (ts, dt) = match self.ts_mode {
            TimestampMode::Absolute => (Some(raw.ts), None),
            TimestampMode::Delta => (None, Some(raw.ts - self.first_ts)),
            TimestampMode::Both => (Some(raw.ts), Some(raw.ts - self.first_ts)),
        };

        CompressedEvent {
            n: raw.name.clone(),
            s: compress_scope(raw.scope.as_deref()),
            p: payload.filter(|p| !p.is_null()),
            ts,
            dt,
        }
    }
}
