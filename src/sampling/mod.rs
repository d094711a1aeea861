
mod detector;
mod sampler;
mod suppression;

pub use detector::InterestDetector;
pub use sampler::{BufferedSample, Sampler};
pub use suppression::SteadyStateSuppressor;

/// Controls adaptive sampling of getstats events.
#[derive(Debug, Clone, Copy)]
pub struct SamplingConfig {
    /// Keep every Nth getstats sample.
    pub interval: usize,
    /// Full-resolution samples retained before an interesting moment.
    pub context_before: usize,
    /// Full-resolution samples retained after an interesting moment.
    pub context_after: usize,
    /// Replace unchanged report categories with "=".
    pub steady_state: bool,
}

impl Default for SamplingConfig {
    fn default() -> SamplingConfig {
        SamplingConfig {
            interval: 5,
            context_before: 2,
            context_after: 2,
            steady_state: true,
        }
    }
}
