#[cfg(test)]
mod candidate_test;

mod candidate;

pub use candidate::{eoc_summary, simple_summary, CandidateSummary};
