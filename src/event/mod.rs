#[cfg(test)]
mod reader_test;

use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// One `[name, scope, payload, ts]` element of the input array.
#[derive(Debug, Clone)]
pub struct RawEvent {
    pub name: String,
    /// `null` in the input stays `None`; distinct from an empty string.
    pub scope: Option<String>,
    pub payload: Value,
    /// Milliseconds since the Unix epoch.
    pub ts: i64,
}

/// The output record. Field names and omission rules are part of the
/// external contract.
#[derive(Debug, Clone, Serialize)]
pub struct CompressedEvent {
    pub n: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub s: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dt: Option<i64>,
}

/// Controls which timestamp fields appear in output records.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TimestampMode {
    #[default]
    Absolute,
    Delta,
    Both,
}

/// Parses the bounded input document into an ordered event sequence.
#[derive(Debug)]
pub struct Reader {
    events: Vec<RawEvent>,
}

impl Reader {
    /// Parses a complete input document. The top-level value must be a JSON
    /// array of 4-element arrays; empty input yields an empty reader.
    pub fn new(data: &[u8]) -> Result<Reader> {
        let data = data.trim_ascii();
        if data.is_empty() {
            return Ok(Reader { events: Vec::new() });
        }
        if data[0] != b'[' {
            return Err(Error::ErrExpectedArray(data[0] as char));
        }

        let outer: Vec<Value> = serde_json::from_slice(data)?;

        let mut events = Vec::with_capacity(outer.len());
        for (i, element) in outer.into_iter().enumerate() {
            events.push(parse_event(i + 1, element)?);
        }
        Ok(Reader { events })
    }

    pub fn events(&self) -> &[RawEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

fn parse_event(index: usize, element: Value) -> Result<RawEvent> {
    let Value::Array(mut parts) = element else {
        return Err(Error::ErrEventNotArray { index });
    };
    if parts.len() < 4 {
        return Err(Error::ErrEventTooShort {
            index,
            len: parts.len(),
        });
    }

    let ts = serde_json::from_value(parts[3].take()).map_err(|source| Error::ErrEventField {
        index,
        field: "timestamp",
        source,
    })?;
    let payload = parts[2].take();
    let scope = match parts[1].take() {
        Value::Null => None,
        other => Some(serde_json::from_value(other).map_err(|source| Error::ErrEventField {
            index,
            field: "scope",
            source,
        })?),
    };
    let name = serde_json::from_value(parts[0].take()).map_err(|source| Error::ErrEventField {
        index,
        field: "event name",
        source,
    })?;

    Ok(RawEvent {
        name,
        scope,
        payload,
        ts,
    })
}

/// Writes compressed events as JSONL: one `write` per record, each followed
/// by a newline. Pretty mode indents with two spaces; records then span
/// multiple lines.
pub struct Writer<W: Write> {
    w: W,
    pretty: bool,
}

impl<W: Write> Writer<W> {
    pub fn new(w: W, pretty: bool) -> Writer<W> {
        Writer { w, pretty }
    }

    pub fn write(&mut self, event: &CompressedEvent) -> Result<()> {
        let data = if self.pretty {
            serde_json::to_string_pretty(event)?
        } else {
            serde_json::to_string(event)?
        };
        self.w.write_all(data.as_bytes())?;
        self.w.write_all(b"\n")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.w
    }
}
