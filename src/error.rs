use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("expected JSON array, got: {0}")]
    ErrExpectedArray(char),
    #[error("event {index}: expected a 4-element array")]
    ErrEventNotArray { index: usize },
    #[error("event {index}: array has {len} elements, need 4")]
    ErrEventTooShort { index: usize, len: usize },
    #[error("event {index}: parsing {field}: {source}")]
    ErrEventField {
        index: usize,
        field: &'static str,
        source: serde_json::Error,
    },
    #[error("parsing input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
